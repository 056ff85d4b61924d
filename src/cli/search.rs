//! Search command handler
//!
//! Searches for places by free text, optionally biased towards a point.

use crate::cli::{emit, formatter};
use crate::config::Config;
use crate::coord::{Coordinates, Region};
use crate::error::{Error, Result};
use crate::geo::{get_geocoder, get_ip_locator};
use crate::picker::SearchSession;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Text to search for
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Prefer results near LAT,LNG
    #[arg(long, allow_hyphen_values = true, conflicts_with = "here")]
    pub near: Option<Coordinates>,

    /// Prefer results near the current location (IP geolocation)
    #[arg(long)]
    pub here: bool,

    /// Maximum number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

impl SearchArgs {
    fn text(&self) -> String {
        self.query.join(" ")
    }
}

/// Run the search command
pub async fn run(args: SearchArgs, config: Config) -> Result<()> {
    let text = args.text();
    if text.trim().is_empty() {
        return Err(Error::Config("Search text is empty".to_string()));
    }
    let formatter = formatter(args.format.as_deref())?;

    let near = if args.here {
        let location = get_ip_locator()?.locate().await?;
        eprintln!("Searching near {}", location);
        Some(location)
    } else {
        args.near
    };
    let hint = near.map(Region::search_hint);

    let limit = args.limit.unwrap_or(config.picker.search_result_limit);
    let backend = get_geocoder(&config.geocoder)?.with_limit(limit);
    let places = SearchSession::lookup(&backend, &text, hint).await?;

    let output = formatter.format_all(&places, &config)?;
    emit(&output, args.output.as_deref())
}
