use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use wikilives::WebScraper;
use wikilives::render::render_block;
use wikilives::store;
use wikilives::types::Introducer;

#[derive(Parser)]
#[command(name = "wikilives")]
#[command(about = "A wikipedia biography scraper", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the article for each subject and persist one JSON record apiece
    Produce {
        #[arg(required = true, help = "Subjects to look up, processed in order")]
        subjects: Vec<String>,

        #[arg(long, default_value = "data", help = "Directory for the JSON records")]
        data_dir: PathBuf,
    },
    /// Assemble previously produced records into a markdown digest
    Consume {
        #[arg(required = true, help = "Subjects to include, in order")]
        subjects: Vec<String>,

        #[arg(long, default_value = "data", help = "Directory holding the JSON records")]
        data_dir: PathBuf,

        #[arg(
            short = 'o',
            long = "output",
            default_value = "data/digest.md",
            help = "Path of the markdown file to write"
        )]
        output: PathBuf,

        #[arg(long, default_value = "Subjects", help = "Top-level heading of the digest")]
        title: String,
    },
}

struct ProducerRole;
struct ConsumerRole;

impl Introducer for ProducerRole {
    fn announce_start(&self) {
        println!("Producer here: fetching each subject's article and saving a JSON record.");
    }

    fn announce_end(&self) {
        println!("All subjects processed. Run the consume step to build the digest.");
    }
}

impl Introducer for ConsumerRole {
    fn announce_start(&self) {
        println!("Consumer here: combining saved records into a markdown digest.");
    }

    fn announce_end(&self) {
        println!("Digest written. Done.");
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    match cli.command {
        Commands::Produce { subjects, data_dir } => {
            let role = ProducerRole;
            role.announce_start();

            let scraper = WebScraper::new().unwrap_or_else(|e| {
                log::error!("Error creating scraper: {}", e);
                process::exit(1);
            });

            for subject in &subjects {
                log::info!("Producing {} data...", subject);

                // One subject at a time; a failed subject never stops the rest.
                let record = match scraper.fetch_subject(subject).await {
                    Ok(record) => record,
                    Err(e) => {
                        log::error!("Error retrieving {} from Wikipedia: {}", subject, e);
                        continue;
                    }
                };

                match store::save_record(&data_dir, subject, &record) {
                    Ok(path) => log::info!("Saved {}", path.display()),
                    Err(e) => log::error!("Error saving {}: {}", subject, e),
                }
            }

            role.announce_end();
        }

        Commands::Consume {
            subjects,
            data_dir,
            output,
            title,
        } => {
            let role = ConsumerRole;
            role.announce_start();

            let mut digest = format!("# {}\n", title);

            for subject in &subjects {
                log::info!("Consuming {} data...", subject);

                let record = match store::load_record(&data_dir, subject) {
                    Ok(record) => record,
                    Err(e) => {
                        log::warn!("Skipping {}: {}", subject, e);
                        continue;
                    }
                };

                if let Some(block) = render_block(subject, &record) {
                    digest.push_str(&block);
                }
            }

            if let Some(parent) = output.parent()
                && !parent.as_os_str().is_empty()
                && let Err(e) = std::fs::create_dir_all(parent)
            {
                log::error!("Error creating {}: {}", parent.display(), e);
                process::exit(1);
            }

            if let Err(e) = std::fs::write(&output, &digest) {
                log::error!("Error writing {}: {}", output.display(), e);
                process::exit(1);
            }

            log::info!("Wrote digest to {}", output.display());
            role.announce_end();
        }
    }
}
