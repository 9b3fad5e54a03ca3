//! CSV Export functionality
//!
//! Writes the filtered project table back out as CSV with the uploaded
//! header row.

use std::io::Write;

use crate::error::{DashboardError, DashboardResult};
use crate::models::Dataset;

/// Export the rows of a dataset to CSV
pub fn export_dataset_csv<W: Write>(dataset: &Dataset, writer: &mut W) -> DashboardResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(dataset.headers())
        .map_err(|e| DashboardError::Export(e.to_string()))?;

    for record in dataset.iter() {
        let cells = dataset.row_cells(record);
        csv_writer
            .write_record(cells.iter().map(|cell| cell.to_string()))
            .map_err(|e| DashboardError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| DashboardError::Export(e.to_string()))?;

    tracing::info!(rows = dataset.len(), "exported project rows as CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{load_csv, ImportOptions};

    #[test]
    fn test_export_dataset_csv() {
        let data = "\
CATEGORY,CLIENTID,PROJDATE,GROSSSALES,CSAT,NOTES
\"Web, Mobile\",1001,2024/01/15,\"$1,000.5\",4.5,
Hardware,1002,,20,,ok
";
        let dataset = load_csv(data.as_bytes(), &ImportOptions::default()).unwrap();

        let mut output = Vec::new();
        export_dataset_csv(&dataset, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "CATEGORY,CLIENTID,PROJDATE,GROSSSALES,CSAT,NOTES");
        assert_eq!(lines[1], "\"Web, Mobile\",1001,2024-01-15,1000.50,4.5,");
        assert_eq!(lines[2], "Hardware,1002,,20.00,,ok");
    }

    #[test]
    fn test_exported_csv_loads_back() {
        let data = "CATEGORY,COUNTRY,GROSSSALES\nA,Kenya,10\nB,Chad,-2.5\n";
        let dataset = load_csv(data.as_bytes(), &ImportOptions::default()).unwrap();

        let mut output = Vec::new();
        export_dataset_csv(&dataset, &mut output).unwrap();
        let reloaded = load_csv(output.as_slice(), &ImportOptions::default()).unwrap();

        assert_eq!(reloaded, dataset);
    }
}
