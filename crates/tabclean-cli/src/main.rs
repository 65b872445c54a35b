//! tabclean CLI
//!
//! Command-line tool for cleaning CSV files, tallying letters in name
//! lists, splitting log files by severity and summarising housing prices.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tabclean_core::{
    count_letters, housing_summary, load_csv_quoted, read_names, run_clean, sort_names,
    split_log_file, write_summary, CleanConfig, CleanOverrides, NameOrder, Severity,
    SummaryFormat, Table,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tabclean")]
#[command(about = "Small utilities for cleaning and summarising delimited text files", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a CSV file, optionally drop bad rows, and write it out
    Clean {
        /// Source CSV file
        #[arg(short, long)]
        input_file: Option<PathBuf>,

        /// Directory to write into
        #[arg(short = 'O', long)]
        output_dir: Option<PathBuf>,

        /// Output file name
        #[arg(short, long)]
        output_file: Option<String>,

        /// Drop rows with empty fields or a non-numeric id
        #[arg(short, long)]
        drop_rows: bool,

        /// Print the table before writing
        #[arg(short, long)]
        verbose: bool,

        /// TOML file with defaults for the options above
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Count letters in a comma-separated name list
    Names {
        /// File whose first line holds the names
        #[arg(short, long, default_value = "Data/Navneliste.txt")]
        input_file: PathBuf,

        /// Order used when listing names
        #[arg(short, long, value_enum, default_value_t = SortArg::Alpha)]
        sort: SortArg,

        /// Print the sorted names too
        #[arg(short, long)]
        verbose: bool,

        /// Print the tally as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split a log file into one file per severity
    SplitLog {
        /// Log file to split
        #[arg(short, long, default_value = "Data/app_log.txt")]
        input_file: PathBuf,

        /// Directory for the per-severity files
        #[arg(short, long, default_value = "logs")]
        output_dir: PathBuf,

        /// Print a line count per severity
        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarise a housing price CSV by region and house type
    Stats {
        /// Housing price CSV with a header row
        #[arg(short, long, default_value = "Data/DKHousingPricesSample100k.csv")]
        input_file: PathBuf,

        /// Directory for saved summaries
        #[arg(short, long, default_value = "stats")]
        output_dir: PathBuf,

        /// Save the summaries to the output directory
        #[arg(long)]
        save: bool,

        /// Format of saved summaries
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,

        /// Print the summaries
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Alpha,
    Length,
}

impl From<SortArg> for NameOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Alpha => NameOrder::Alpha,
            SortArg::Length => NameOrder::Length,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for SummaryFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => SummaryFormat::Csv,
            FormatArg::Json => SummaryFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(e.kind().exit_code());
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> tabclean_core::Result<()> {
    match command {
        Commands::Clean {
            input_file,
            output_dir,
            output_file,
            drop_rows,
            verbose,
            config,
        } => {
            let config = CleanConfig::resolve(
                config.as_deref(),
                CleanOverrides {
                    input_file,
                    output_dir,
                    output_file,
                    drop_invalid_rows: drop_rows,
                    verbose,
                },
            )?;
            cmd_clean(&config)
        }
        Commands::Names {
            input_file,
            sort,
            verbose,
            json,
        } => cmd_names(&input_file, sort.into(), verbose, json),
        Commands::SplitLog {
            input_file,
            output_dir,
            verbose,
        } => cmd_split_log(&input_file, &output_dir, verbose),
        Commands::Stats {
            input_file,
            output_dir,
            save,
            format,
            verbose,
        } => cmd_stats(&input_file, &output_dir, save.then_some(format.into()), verbose),
    }
}

fn cmd_clean(config: &CleanConfig) -> tabclean_core::Result<()> {
    debug!(?config, "clean");

    let report = run_clean(config, |table| {
        if config.verbose {
            print_table(table);
        }
    })?;

    println!(
        "Wrote {} rows to {} ({} dropped)",
        report.table.row_count(),
        report.output_path.display(),
        report.rows_dropped()
    );
    Ok(())
}

fn print_table(table: &Table) {
    for row in &table.rows {
        println!("{}", row);
    }
    println!();
}

fn cmd_names(path: &Path, order: NameOrder, verbose: bool, json: bool) -> tabclean_core::Result<()> {
    let names = read_names(path)?;
    let sorted = sort_names(&names, order);
    let counts = count_letters(&sorted);

    if verbose {
        println!("Names ({}):", sorted.len());
        for name in &sorted {
            println!("  {}", name);
        }
        println!();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        for (letter, count) in &counts {
            println!("{}: {}", letter, count);
        }
    }
    Ok(())
}

fn cmd_split_log(input: &Path, output_dir: &Path, verbose: bool) -> tabclean_core::Result<()> {
    let buckets = split_log_file(input, output_dir)?;

    if verbose {
        for severity in Severity::ALL {
            println!("  {:<8} {}", severity, buckets.get(severity).len());
        }
        if buckets.unmatched > 0 {
            println!("  {:<8} {}", "(none)", buckets.unmatched);
        }
    }

    println!(
        "Split {} lines into {}",
        buckets.total(),
        output_dir.display()
    );
    Ok(())
}

fn cmd_stats(
    input: &Path,
    output_dir: &Path,
    save: Option<SummaryFormat>,
    verbose: bool,
) -> tabclean_core::Result<()> {
    let table = load_csv_quoted(input)?;
    let summary = housing_summary(&table)?;

    if verbose {
        println!("Average price by region:");
        for group in &summary.average_price_by_region {
            println!("  {:<20} {:>14.2}", group.group, group.mean);
        }
        println!();
        println!("House types:");
        for value in &summary.house_type_distribution {
            println!("  {:<20} {:>8}", value.value, value.count);
        }
        println!();
    }

    if let Some(format) = save {
        for path in write_summary(&summary, output_dir, format)? {
            println!("Saved {}", path.display());
        }
    }

    println!("Successfully read and processed {}", input.display());
    Ok(())
}
