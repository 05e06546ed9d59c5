use clap::{Parser, ValueEnum};
use logsieve::batch::{self, BatchReport, PipelineOpts};
use logsieve::structure;
use logsieve::timebuckets::DescriptionCount;
use std::path::PathBuf;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

fn init_parallelism() {
    static START: Once = Once::new();
    START.call_once(|| {
        let n = num_cpus::get();
        let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
    });
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Parser, Debug)]
#[command(name = "logsieve", version, about = "Error extraction and tallying for legacy application logs")]
struct Cli {
    /// Log files to analyze (windows-1254 encoded)
    input: Vec<PathBuf>,

    /// Print only a specific section: records | categories | structures | times | summary
    #[arg(long = "only")]
    only: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Token that marks an error line
    #[arg(long = "marker", default_value = logsieve::extractor::DEFAULT_MARKER)]
    marker: String,

    #[arg(long = "min-words", default_value_t = structure::DEFAULT_MIN_WORDS)]
    min_words: usize,
    #[arg(long = "max-words", default_value_t = structure::DEFAULT_MAX_WORDS)]
    max_words: usize,

    /// Keep only the N most frequent entries in ranked tables
    #[arg(long = "top")]
    top: Option<usize>,

    /// Process files one after another instead of on the thread pool
    #[arg(long = "sequential", default_value_t = false)]
    sequential: bool,

    #[arg(long = "verbose", short = 'v', default_value_t = false)]
    verbose: bool,
}

impl Cli {
    fn pipeline_opts(&self) -> PipelineOpts {
        PipelineOpts {
            marker: self.marker.clone(),
            min_phrase_words: self.min_words,
            max_phrase_words: self.max_words,
            parallel: !self.sequential,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    init_parallelism();

    let report = batch::analyze_paths(&cli.input, &cli.pipeline_opts())?;

    for f in &report.failures {
        eprintln!("failed to process {}: {}", f.file, f.error);
    }

    let table = cli.format == OutputFormat::Table;
    match cli.only.as_deref() {
        Some("records") => {
            if table {
                print_records_table(&report);
            } else {
                println!("{}", serde_json::to_string_pretty(&report.records)?);
            }
        }
        Some("categories") => {
            if table {
                print_counts_table("Category", report.categories.counts.iter().map(|(c, n)| (c.to_string(), *n)));
            } else {
                println!("{}", serde_json::to_string_pretty(&report.categories)?);
            }
        }
        Some("structures") => {
            let mut ranked = structure::ranked(&report.structures);
            if let Some(top) = cli.top { ranked.truncate(top); }
            if table {
                print_counts_table("Phrase", ranked.into_iter().map(|p| (p.phrase.replace('\n', " "), p.count)));
            } else {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            }
        }
        Some("times") => {
            if table {
                print_counts_table("Time", report.by_time_of_day.iter().map(|(t, n)| (t.clone(), *n)));
            } else {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                    "by_time_of_day": report.by_time_of_day,
                    "by_timestamp": report.by_timestamp,
                    "by_description_and_time": report.by_description_and_time,
                }))?);
            }
        }
        Some("summary") => {
            let mut top_descriptions = report.description_counts.clone();
            if let Some(top) = cli.top { top_descriptions.truncate(top); }
            if table {
                print_summary_table(&report, &top_descriptions);
                return Ok(());
            }
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                "files": report.files.len(),
                "failed_files": report.failures,
                "records": report.records.len(),
                "skipped_lines": report.skipped_lines(),
                "categories": report.categories,
                "top_descriptions": top_descriptions,
            }))?);
        }
        Some(other) => anyhow::bail!("unknown section '{other}' (expected records | categories | structures | times | summary)"),
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn print_records_table(report: &BatchReport) {
    println!("{:<24} {}", "Timestamp", "Description");
    for r in &report.records {
        println!("{:<24} {}", r.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"), r.description.replace('\n', " "));
    }
}

fn print_summary_table(report: &BatchReport, top_descriptions: &[DescriptionCount]) {
    println!("Files: {}  Failed: {}  Records: {}  Skipped lines: {}",
        report.files.len(), report.failures.len(), report.records.len(), report.skipped_lines());
    println!();
    print_counts_table("Category", report.categories.counts.iter().map(|(c, n)| (c.to_string(), *n)));
    println!();
    print_counts_table("Description", top_descriptions.iter().map(|d| (d.description.replace('\n', " "), d.count)));
}

fn print_counts_table<I: IntoIterator<Item = (String, usize)>>(label: &str, rows: I) {
    println!("{:<8} {}", "Count", label);
    for (key, count) in rows {
        println!("{:<8} {}", count, key);
    }
}
