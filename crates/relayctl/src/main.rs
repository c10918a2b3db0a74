//! Prompt Relay control - CLI client for relayd.

mod client;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::RelaydClient;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "relayctl")]
#[command(about = "Prompt Relay - outreach and generation flows from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the relayd daemon (defaults to $RELAYD_URL, then localhost)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show daemon health and model availability
    Status,

    /// Generate an Ideal Customer Profile for a company website
    Icp {
        /// Company website to profile
        website: String,

        /// Write the profile to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Extract structured search parameters from a saved profile
    Params {
        /// File containing previously generated profile text
        file: PathBuf,
    },

    /// Discover prospects matching a saved profile
    Prospects {
        /// File containing previously generated profile text (stdin when omitted)
        #[arg(long)]
        icp_file: Option<PathBuf>,

        /// How many prospects to request
        #[arg(long, default_value_t = 10)]
        count: usize,

        /// Export the results as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Generate a multi-day trip itinerary
    Trip {
        #[arg(long)]
        origin: String,

        /// Cities to visit (repeat the flag for each)
        #[arg(long = "city", required = true)]
        cities: Vec<String>,

        /// Travel dates, free-form (e.g. "2026-09-01 to 2026-09-08")
        #[arg(long)]
        dates: String,

        /// Interests to shape the itinerary around
        #[arg(long)]
        interests: String,
    },

    /// Generate an image from a text prompt
    Image {
        prompt: String,

        /// Extra note describing a reference image
        #[arg(long)]
        reference_note: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let base_url = RelaydClient::discover_base_url(cli.url.as_deref());
    let client = RelaydClient::new(base_url)?;

    match cli.command {
        Commands::Status => commands::status(&client).await,
        Commands::Icp { website, out } => commands::icp(&client, &website, out).await,
        Commands::Params { file } => commands::params(&client, &file).await,
        Commands::Prospects { icp_file, count, csv } => {
            commands::prospects(&client, icp_file.as_ref(), count, csv).await
        }
        Commands::Trip { origin, cities, dates, interests } => {
            commands::trip(&client, origin, cities, dates, interests).await
        }
        Commands::Image { prompt, reference_note } => {
            commands::image(&client, prompt, reference_note).await
        }
    }
}
