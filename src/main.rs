use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use project_dashboard::cli::{
    handle_chart_command, handle_export_command, handle_filters_command,
    handle_histogram_command, handle_overview_command, handle_report_command, ChartArgs,
    ExportArgs, FilterArgs, HistogramArgs, ReportArgs, SourceArgs,
};
use project_dashboard::cli::filters::FILE_ENV;
use project_dashboard::config::{paths::CONFIG_DIR_ENV, DashboardPaths, Settings};
use project_dashboard::DashboardError;

#[derive(Parser)]
#[command(
    name = "projdash",
    version,
    about = "Project financial analysis dashboard",
    long_about = "projdash loads a CSV of project records, filters it by category, \
                  country, client and project date, and shows sales, profit, \
                  earnings and customer satisfaction charts with key metrics. \
                  The filtered table can be downloaded as an Excel report."
)]
struct Cli {
    /// Log pipeline steps to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the values available to each filter
    Filters {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show the filtered project table
    #[command(alias = "table")]
    Overview {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the full analysis: section charts and key metrics
    Report(ReportArgs),

    /// Build one chart from aggregated money columns
    Chart(ChartArgs),

    /// Bucket one column of the filtered rows
    Histogram(HistogramArgs),

    /// Download the filtered table as an xlsx (or CSV) report
    Export(ExportArgs),

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the config file
        #[arg(long)]
        init: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "project_dashboard=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = DashboardPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    if let Err(err) = run(cli.command, &paths, &settings) {
        if let Some(DashboardError::NoFileUploaded) = err.downcast_ref::<DashboardError>() {
            eprintln!("{}", DashboardError::NoFileUploaded);
            eprintln!("Pass --file <CSV> or set {}.", FILE_ENV);
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}

fn run(command: Option<Commands>, paths: &DashboardPaths, settings: &Settings) -> Result<()> {
    match command {
        Some(Commands::Filters { source }) => {
            handle_filters_command(settings, &source)?;
        }
        Some(Commands::Overview { source, filters }) => {
            handle_overview_command(settings, &source, &filters)?;
        }
        Some(Commands::Report(args)) => {
            handle_report_command(settings, &args)?;
        }
        Some(Commands::Chart(args)) => {
            handle_chart_command(settings, &args)?;
        }
        Some(Commands::Histogram(args)) => {
            handle_histogram_command(settings, &args)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(settings, &args)?;
        }
        Some(Commands::Config { init }) => {
            println!("Project Dashboard Configuration");
            println!("===============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("(override with {})", CONFIG_DIR_ENV);
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Histogram bins:     {}", settings.histogram_bins);
            println!("  Report file name:   {}", settings.report_file_name);
            match settings.default_chart_kind {
                Some(kind) => println!("  Default chart kind: {}", kind),
                None => println!("  Default chart kind: (per section)"),
            }
            println!("  CSV delimiter:      {:?}", settings.csv_delimiter);
            println!("  Date format:        {}", settings.date_format);

            if init {
                settings.save(paths)?;
                println!();
                println!("Settings written to: {}", paths.settings_file().display());
            }
        }
        None => {
            println!("projdash - Project financial analysis dashboard");
            println!();
            println!("{}", DashboardError::NoFileUploaded);
            println!("Run 'projdash report --file <CSV>' to analyze a file.");
            println!("Run 'projdash --help' for usage information.");
        }
    }

    Ok(())
}
