//! Reverse command handler
//!
//! Describes the place at a coordinate.

use crate::cli::{emit, formatter};
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::geo::get_geocoder;
use crate::picker::GeocodeSession;
use clap::Args;

/// Reverse command arguments
#[derive(Args)]
pub struct ReverseArgs {
    /// Latitude
    #[arg(allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude
    #[arg(allow_negative_numbers = true)]
    pub lng: f64,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the reverse command
pub async fn run(args: ReverseArgs, config: Config) -> Result<()> {
    let coords = Coordinates::new(args.lat, args.lng);
    coords.validate()?;
    let formatter = formatter(args.format.as_deref())?;

    let backend = get_geocoder(&config.geocoder)?;
    let place = GeocodeSession::lookup(&backend, coords).await?;

    let output = formatter.format(&place, &config)?;
    emit(&output, args.output.as_deref())
}
