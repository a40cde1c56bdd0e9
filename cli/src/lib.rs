use anyhow::{Error, Result};
use clap::{Parser, Subcommand};
use log::info;
use sporthlm::config::Config;
use sporthlm::dedup::clean_ttl_document;
use sporthlm::extract::extract_housing_only;
use sporthlm::housing::generate_housing;
use sporthlm::pipeline::run_pipeline;
use sporthlm::sanitize::clean_uri;
use sporthlm::sport::generate_sport;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sporthlm")]
#[command(about = "Sport and social housing Turtle generator")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Verbose mode - sets the RUST_LOG level to info, defaults to warning level
    #[clap(long, short, action, default_value = "false", global = true)]
    verbose: bool,
    /// Debug mode - sets the RUST_LOG level to debug, defaults to warning level
    #[clap(long, action, default_value = "false", global = true)]
    debug: bool,
    /// JSON configuration file; keys that are absent keep their default value
    #[clap(long, short, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the sport extracts, overrides the configuration
    #[clap(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Directory receiving the Turtle files, overrides the configuration
    #[clap(long, global = true)]
    rdf_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration.
    Show,
    /// Write the effective configuration to a JSON file.
    Write {
        /// Destination file, defaults to 'sporthlm.json'
        destination: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Prints the version of the sporthlm binary
    Version,
    /// Remove duplicated triple blocks from a Turtle file
    Clean {
        /// The Turtle file to read
        input: PathBuf,
        /// The file to write; it is fully replaced
        output: PathBuf,
        /// Drop '@prefix' blocks from the body and write the standard prefix declarations first
        #[clap(long, action, default_value = "false")]
        with_prefixes: bool,
    },
    /// Print the URI fragment of each label
    Sanitize {
        /// Labels to sanitize
        #[clap(required = true)]
        labels: Vec<String>,
    },
    /// Generate the raw housing Turtle file from the housing extract
    Housing {
        /// The housing CSV file, overrides the configuration
        #[clap(long)]
        input: Option<PathBuf>,
        /// Only convert rows published this year, overrides the configuration
        #[clap(long)]
        year: Option<i32>,
    },
    /// Generate the raw sport Turtle file from every sport extract
    Sport {
        /// Glob selecting the extracts inside the data directory, overrides the configuration
        #[clap(long)]
        pattern: Option<String>,
    },
    /// Extract the housing records of a housing Turtle file
    HousingOnly {
        /// Input file, defaults to the generated housing file
        #[clap(long)]
        input: Option<PathBuf>,
        /// Output file, defaults to 'housingdata_only.ttl' in the RDF directory
        #[clap(long)]
        output: Option<PathBuf>,
    },
    /// Generate, clean and extract every output file
    Pipeline,
    /// Inspect or write the configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

pub fn run() -> Result<()> {
    sporthlm::init_logging();
    let cmd = Cli::parse();
    execute(cmd)
}

pub fn run_from_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    sporthlm::init_logging();
    let cmd = Cli::try_parse_from(args).map_err(Error::from)?;
    execute(cmd)
}

fn load_config(cmd: &Cli) -> Result<Config> {
    let mut config = match &cmd.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(dir) = &cmd.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(dir) = &cmd.rdf_dir {
        config.rdf_dir = dir.clone();
    }
    Ok(config)
}

fn execute(cmd: Cli) -> Result<()> {
    // The RUST_LOG env var is set by `init_logging` if SPORTHLM_LOG is present.
    // CLI flags for verbosity take precedence. If nothing is set, we default to "warn".
    if cmd.debug {
        std::env::set_var("RUST_LOG", "debug");
    } else if cmd.verbose {
        std::env::set_var("RUST_LOG", "info");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    let _ = env_logger::try_init();

    let mut config = load_config(&cmd)?;
    if cmd.verbose || cmd.debug {
        config.print();
    }

    match cmd.command {
        Commands::Version => {
            println!("sporthlm {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Clean {
            input,
            output,
            with_prefixes,
        } => {
            let report = clean_ttl_document(&input, &output, with_prefixes.into())?;
            println!("Cleaned: {}", report.output.display());
            println!("  Unique triples: {}", report.unique_triples);
            println!("  Duplicates removed: {}", report.duplicates_removed);
        }
        Commands::Sanitize { labels } => {
            for label in labels {
                println!("{}", clean_uri(&label));
            }
        }
        Commands::Housing { input, year } => {
            if let Some(input) = input {
                config.housing_csv = input;
            }
            if let Some(year) = year {
                config.housing_year = year;
            }
            std::fs::create_dir_all(&config.rdf_dir)?;
            let report = generate_housing(&config)?;
            println!(
                "Generated {} ({} rows, year {})",
                report.output.display(),
                report.rows,
                config.housing_year
            );
        }
        Commands::Sport { pattern } => {
            if let Some(pattern) = pattern {
                config.sport_pattern = pattern;
            }
            std::fs::create_dir_all(&config.rdf_dir)?;
            let report = generate_sport(&config)?;
            println!("Generated {} ({} rows)", report.output.display(), report.rows);
        }
        Commands::HousingOnly { input, output } => {
            let input = input.unwrap_or_else(|| config.housing_output());
            let output = output.unwrap_or_else(|| config.housing_only_output());
            let report = extract_housing_only(&input, &output)?;
            println!(
                "Generated {} ({} housing records, {} links)",
                output.display(),
                report.records,
                report.links
            );
        }
        Commands::Pipeline => {
            let report = run_pipeline(&config)?;
            info!("Pipeline report: {:?}", report);
            for clean in [&report.housing_clean, &report.sport_clean] {
                println!(
                    "Cleaned: {} ({} unique triples)",
                    clean.output.display(),
                    clean.unique_triples
                );
            }
            println!(
                "Generated {} ({} housing records)",
                config.housing_only_output().display(),
                report.housing_only.records
            );
        }
        Commands::Config(ConfigCommands::Show) => {
            config.print();
        }
        Commands::Config(ConfigCommands::Write { destination }) => {
            let destination = destination.unwrap_or_else(|| PathBuf::from("sporthlm.json"));
            config.save_to_file(&destination)?;
            println!("Configuration written to {}", destination.display());
        }
    }

    Ok(())
}
