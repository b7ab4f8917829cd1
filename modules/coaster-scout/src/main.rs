use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use coaster_common::Config;
use coaster_scout::infra::env_filter;
use coaster_scout::pipeline::{CoasterScraper, VideoRanker};
use coasterpedia_client::WikiClient;
use youtube_client::YouTubeClient;

#[derive(Parser)]
#[command(name = "coaster-scout")]
#[command(about = "Collect roller coaster attributes from Coasterpedia and rank YouTube videos for them")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List coasters from the wiki category and write their infobox fields to CSV
    Coasters {
        /// Maximum number of coaster pages to collect
        #[arg(long)]
        max: Option<usize>,

        /// Output CSV (overwritten)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Delay between page fetches, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Search videos for each coaster in the coaster CSV and append the top ones
    Videos {
        /// Coaster CSV produced by the `coasters` command
        #[arg(long)]
        input: Option<PathBuf>,

        /// Video CSV (appended; also the resume checkpoint)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Maximum number of coasters to read from the input
        #[arg(long)]
        max: Option<usize>,

        /// Search results requested per coaster
        #[arg(long)]
        candidates: Option<u32>,

        /// Rows kept per coaster, by view count
        #[arg(long)]
        top_k: Option<usize>,

        /// Delay between coasters, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    match cli.command {
        Commands::Coasters { max, out, delay_ms } => {
            if let Some(max) = max {
                config.max_coasters = max;
            }
            if let Some(out) = out {
                config.coasters_csv = out;
            }
            if let Some(ms) = delay_ms {
                config.wiki_delay = Duration::from_millis(ms);
            }

            info!(category = config.category.as_str(), max = config.max_coasters, "Coaster scrape starting");
            let wiki = WikiClient::new(&config.wiki_api_url, config.http_timeout)?;
            let stats = CoasterScraper::new(&wiki, &config).run().await?;
            info!("{stats}");
        }
        Commands::Videos {
            input,
            out,
            max,
            candidates,
            top_k,
            delay_ms,
        } => {
            if let Some(input) = input {
                config.coasters_csv = input;
            }
            if let Some(out) = out {
                config.videos_csv = out;
            }
            if let Some(max) = max {
                config.video_max_coasters = max;
            }
            if let Some(candidates) = candidates {
                config.candidates_per_coaster = candidates.clamp(1, 50);
            }
            if let Some(top_k) = top_k {
                config.top_k_by_views = top_k;
            }
            if let Some(ms) = delay_ms {
                config.video_delay = Duration::from_millis(ms);
            }

            let api_key = config.require_api_key()?;
            let youtube =
                YouTubeClient::with_base_url(&config.youtube_api_url, api_key, config.http_timeout)?;

            info!(input = %config.coasters_csv.display(), "Video run starting");
            let stats = VideoRanker::new(&youtube, &config).run().await?;
            info!("{stats}");
        }
    }

    Ok(())
}
