//! Command implementations for the GDD CLI.
//!
//! Provides subcommands for fetching a location's GDD payload and for
//! rendering the planting-date aligned chart series from a saved payload.

use clap::{Subcommand, ValueEnum};
use gdd_series::View;

pub mod fetch;
pub mod render;

/// Which chart to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    /// Season to date, with the observed/forecast split
    SeasonToDate,
    /// Current conditions over the full season
    FullSeason,
}

impl From<ViewArg> for View {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::SeasonToDate => View::SeasonToDate,
            ViewArg::FullSeason => View::FullSeason,
        }
    }
}

/// Output format for rendered series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One row per day
    Csv,
    /// The full chart model
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download the GDD payload for a location and season
    Fetch {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Season year (defaults to the latest selectable season)
        #[arg(short, long)]
        year: Option<i32>,

        /// Output path for the payload JSON
        #[arg(short, long)]
        output: String,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 60)]
        timeout: u64,
    },

    /// Render aligned chart series from a saved payload
    Render {
        /// Path to a payload JSON file
        #[arg(short, long)]
        payload: String,

        /// GDD threshold key (gdd50, gdd8650)
        #[arg(short, long, default_value = "gdd50")]
        threshold: String,

        /// Planting date, MM/DD/YYYY (defaults to Jan 1 of the latest selectable season)
        #[arg(long)]
        planting_date: Option<String>,

        /// Chart view
        #[arg(long, value_enum, default_value_t = ViewArg::SeasonToDate)]
        view: ViewArg,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print every series' value on one date
    Summary {
        /// Path to a payload JSON file
        #[arg(short, long)]
        payload: String,

        /// GDD threshold key (gdd50, gdd8650)
        #[arg(short, long, default_value = "gdd50")]
        threshold: String,

        /// Planting date, MM/DD/YYYY (defaults to Jan 1 of the latest selectable season)
        #[arg(long)]
        planting_date: Option<String>,

        /// Chart view
        #[arg(long, value_enum, default_value_t = ViewArg::SeasonToDate)]
        view: ViewArg,

        /// Date to summarize, YYYY-MM-DD
        #[arg(short, long)]
        date: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Fetch {
            lat,
            lon,
            year,
            output,
            timeout,
        } => fetch::run_fetch(lat, lon, year, &output, timeout).await,
        Command::Render {
            payload,
            threshold,
            planting_date,
            view,
            format,
            output,
        } => {
            let chart = render::chart_inputs(&threshold, planting_date.as_deref(), view.into())?;
            render::run_render(&payload, &chart, format, output.as_deref())
        }
        Command::Summary {
            payload,
            threshold,
            planting_date,
            view,
            date,
        } => {
            let chart = render::chart_inputs(&threshold, planting_date.as_deref(), view.into())?;
            render::run_summary(&payload, &chart, &date)
        }
    }
}
