pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::orchestrator::{IsolationMode, RunConfig};

#[derive(Parser)]
#[command(name = "about-harvest")]
#[command(about = "Harvest and classify \"about us\" text for business records", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/about-harvest/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape records that lack a usable about text, then classify all of them
    Run {
        /// JSON array of business records
        input: PathBuf,

        /// Where to write the updated records
        #[arg(short, long, default_value = "full_business_scrape_results.json")]
        output: PathBuf,

        /// Where to write the good/bad classification report
        #[arg(short, long, default_value = "classification_report.json")]
        report: PathBuf,

        #[command(flatten)]
        overrides: RunOverrides,
    },
    /// Score existing record text without scraping
    Classify {
        /// JSON array of business records
        input: PathBuf,

        /// Write the scored records as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Break a dataset down by URL and content availability
    Analyze {
        /// JSON array of business records
        input: PathBuf,

        /// Write records that have a URL but no content as JSON
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
    /// Run one supervised scrape attempt for a single URL
    ScrapeUrl {
        /// Website to scrape
        url: String,

        /// Identifier echoed in the result
        #[arg(long, default_value = "manual")]
        id: String,

        #[command(flatten)]
        overrides: RunOverrides,
    },
    /// Run a single isolated attempt (reads a request on stdin)
    #[command(hide = true)]
    Worker,
}

/// Command-line overrides for the `[run]` config section.
#[derive(Args, Debug, Clone, Default)]
pub struct RunOverrides {
    /// Records per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Pause after each attempt (e.g., "5s", "1m")
    #[arg(long, value_parser = RunConfig::parse_interval)]
    pub request_delay: Option<u64>,

    /// Pause between batches (e.g., "60s", "2m")
    #[arg(long, value_parser = RunConfig::parse_interval)]
    pub batch_delay: Option<u64>,

    /// Hard limit per attempt (e.g., "300s", "5m")
    #[arg(long, value_parser = RunConfig::parse_interval)]
    pub timeout: Option<u64>,

    /// Run attempts as tasks in this process instead of child processes
    #[arg(long)]
    pub in_process: bool,
}

impl RunOverrides {
    pub fn apply(&self, run: &mut RunConfig) {
        if let Some(n) = self.batch_size {
            run.batch_size = n;
        }
        if let Some(secs) = self.request_delay {
            run.request_delay_secs = secs;
        }
        if let Some(secs) = self.batch_delay {
            run.batch_delay_secs = secs;
        }
        if let Some(secs) = self.timeout {
            run.process_timeout_secs = secs;
        }
        if self.in_process {
            run.isolation = IsolationMode::Task;
        }
    }
}
