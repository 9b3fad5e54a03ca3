use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PROJECTS: &str = "\
PROJECTID,CATEGORY,COUNTRY,CLIENTID,PROJDATE,GROSSSALES,NETSALES,PROFITAFTERTAX,RETAINEDEARNINGS,DIVIDEND,CSAT
P1,Retail,Kenya,101,2024-01-15,1000,900,300,200,100,4
P2,Retail,Ghana,102,2024-02-20,2000,1800,500,350,150,5
P3,Energy,Kenya,103,2024-03-05,500,450,100,60,40,3
";

fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn projdash(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("projdash").unwrap();
    cmd.env("PROJDASH_CONFIG_DIR", config_dir.path())
        .env_remove("PROJDASH_FILE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_file_prompts_for_upload() {
    let dir = TempDir::new().unwrap();
    projdash(&dir)
        .arg("report")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No file uploaded"));
}

#[test]
fn test_filters_lists_distinct_values() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "projects.csv", PROJECTS);
    projdash(&dir)
        .args(["filters", "--file"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 projects loaded"))
        .stdout(predicate::str::contains("Energy"))
        .stdout(predicate::str::contains("Ghana"));
}

#[test]
fn test_report_shows_sections_and_metrics() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "projects.csv", PROJECTS);
    projdash(&dir)
        .args(["report", "--file"])
        .arg(&csv)
        .args(["--country", "Kenya"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gross Sales vs. Net Sales by Category"))
        .stdout(predicate::str::contains("Profit After Tax by Country"))
        .stdout(predicate::str::contains("CSAT Distribution"))
        .stdout(predicate::str::contains("1,500.00"));
}

#[test]
fn test_file_from_environment() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "projects.csv", PROJECTS);
    projdash(&dir)
        .env("PROJDASH_FILE", &csv)
        .arg("overview")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows: 3 of 3"));
}

#[test]
fn test_unsupported_chart_kind_rejected() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "projects.csv", PROJECTS);
    projdash(&dir)
        .args(["report", "--chart", "Radar", "--file"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported chart kind"));
}

#[test]
fn test_chart_json_sums_groups() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "projects.csv", PROJECTS);
    projdash(&dir)
        .args(["chart", "bar", "-m", "gross-sales", "--file"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"bar\""))
        .stdout(predicate::str::contains("3000"));
}

#[test]
fn test_missing_csat_column_reported() {
    let dir = TempDir::new().unwrap();
    let without_csat: String = PROJECTS
        .lines()
        .map(|line| line.rsplit_once(',').map(|(head, _)| head).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n");
    let csv = write_csv(dir.path(), "no_csat.csv", &without_csat);
    projdash(&dir)
        .args(["histogram", "--file"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing column: CSAT"));
}

#[test]
fn test_export_xlsx_writes_report() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "projects.csv", PROJECTS);
    let output = dir.path().join("report.xlsx");
    projdash(&dir)
        .args(["export", "--verify", "--category", "Retail", "--file"])
        .arg(&csv)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 projects"))
        .stdout(predicate::str::contains("Verified 2 rows"));
    assert!(output.exists());
}

#[test]
fn test_empty_selection_is_a_notice() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "projects.csv", PROJECTS);
    projdash(&dir)
        .args(["overview", "--category", "Mining", "--file"])
        .arg(&csv)
        .assert()
        .success()
        .stderr(predicate::str::contains("No projects match"));
}

#[test]
fn test_export_verify_ignores_blank_lines() {
    let dir = TempDir::new().unwrap();
    let padded = format!("{},,,,,,,,,,\n,,,,,,,,,,\n", PROJECTS);
    let csv = write_csv(dir.path(), "padded.csv", &padded);
    let output = dir.path().join("report.xlsx");
    projdash(&dir)
        .args(["export", "--verify", "--file"])
        .arg(&csv)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 projects"))
        .stdout(predicate::str::contains("Verified 3 rows"));
}
