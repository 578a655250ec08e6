use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::query::DEFAULT_LIMIT;

#[derive(Parser, Debug)]
#[command(name = "stormlens")]
#[command(author, version, about = "Aggregate queries over wind, tornado and hail event CSVs")]
pub struct Cli {
    /// CSV file with wind events
    #[arg(long)]
    pub wind: Option<PathBuf>,

    /// CSV file with tornado events
    #[arg(long)]
    pub tornado: Option<PathBuf>,

    /// CSV file with hail events
    #[arg(long)]
    pub hail: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// CSV delimiter
    #[arg(short, long, default_value = ",")]
    pub delimiter: char,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Domain {
    Wind,
    Tornado,
    Hail,
}

impl Domain {
    pub fn table_name(self) -> &'static str {
        match self {
            Domain::Wind => "wind",
            Domain::Tornado => "tornado",
            Domain::Hail => "hail",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Count wind gusts of at least MIN_KNOTS between two dates
    WindGusts {
        min_knots: f64,
        start: String,
        end: String,
    },
    /// Percent of wind events with a magnitude below GUST_KNOTS
    WindPercentile { gust_knots: f64 },
    /// Count hail reports of at least MIN_INCHES between two dates
    HailSize {
        min_inches: f64,
        start: String,
        end: String,
    },
    /// Count tornadoes rated exactly SCALE (e.g. EF2) between two dates
    TornadoExact {
        scale: String,
        start: String,
        end: String,
    },
    /// Count tornadoes rated SCALE or stronger between two dates
    TornadoAtLeast {
        scale: String,
        start: String,
        end: String,
    },
    /// Longest tornado tracks
    TornadoLength {
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Event counts per month
    Monthly { domain: Domain },
    /// Event counts per year
    Yearly { domain: Domain },
    /// Events with the highest property damage
    TopDamage {
        domain: Domain,
        /// Start date (YYYY-MM-DD or MM/DD/YYYY); omit with --end for the whole table
        #[arg(long, requires = "end")]
        start: Option<String>,
        #[arg(long, requires = "start")]
        end: Option<String>,
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Percent of events whose BEGIN_TIME lies between two HHMM values
    TimeRange {
        domain: Domain,
        start_time: String,
        end_time: String,
    },
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
