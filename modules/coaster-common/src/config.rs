use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::CoasterError;

pub const DEFAULT_WIKI_API_URL: &str = "https://coasterpedia.net/w/api.php";
pub const DEFAULT_CATEGORY: &str = "Category:Roller_coasters_by_name";
pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Listing endpoints refuse pages larger than this.
pub const MAX_LISTING_PAGE_SIZE: u32 = 50;

/// Process-wide settings, built once at startup and handed to each stage.
#[derive(Debug, Clone)]
pub struct Config {
    // Wiki stage
    pub wiki_api_url: String,
    pub category: String,
    pub max_coasters: usize,
    pub listing_page_size: u32,
    pub wiki_delay: Duration,

    // Video stage
    pub youtube_api_url: String,
    pub youtube_api_key: Option<String>,
    pub video_max_coasters: usize,
    pub candidates_per_coaster: u32,
    pub top_k_by_views: usize,
    pub video_delay: Duration,
    pub stats_delay: Duration,

    // Shared HTTP behaviour
    pub http_timeout: Duration,
    pub retry_attempts: u32,
    pub retry_base_delay: Duration,

    // Output files
    pub coasters_csv: PathBuf,
    pub videos_csv: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wiki_api_url: DEFAULT_WIKI_API_URL.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            max_coasters: 300,
            listing_page_size: MAX_LISTING_PAGE_SIZE,
            wiki_delay: Duration::from_millis(250),
            youtube_api_url: DEFAULT_YOUTUBE_API_URL.to_string(),
            youtube_api_key: None,
            video_max_coasters: 200,
            candidates_per_coaster: 5,
            top_k_by_views: 3,
            video_delay: Duration::from_millis(250),
            stats_delay: Duration::from_millis(100),
            http_timeout: Duration::from_secs(30),
            retry_attempts: 3,
            retry_base_delay: Duration::from_secs(1),
            coasters_csv: PathBuf::from("coasters_basic.csv"),
            videos_csv: PathBuf::from("coaster_youtube_videos.csv"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    /// Every variable is optional; unset ones keep their defaults.
    pub fn from_env() -> Result<Self, CoasterError> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.log_redacted();
        Ok(config)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoasterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            wiki_api_url: get("COASTERPEDIA_API_URL").unwrap_or(defaults.wiki_api_url),
            category: get("COASTER_CATEGORY").unwrap_or(defaults.category),
            max_coasters: parse_or(&get, "MAX_COASTERS", defaults.max_coasters)?,
            listing_page_size: parse_or(&get, "LISTING_PAGE_SIZE", defaults.listing_page_size)?
                .clamp(1, MAX_LISTING_PAGE_SIZE),
            wiki_delay: secs_or(&get, "WIKI_DELAY_SECS", defaults.wiki_delay)?,
            youtube_api_url: get("YOUTUBE_API_URL").unwrap_or(defaults.youtube_api_url),
            youtube_api_key: get("YOUTUBE_API_KEY"),
            video_max_coasters: parse_or(&get, "VIDEO_MAX_COASTERS", defaults.video_max_coasters)?,
            candidates_per_coaster: parse_or(
                &get,
                "CANDIDATES_PER_COASTER",
                defaults.candidates_per_coaster,
            )?,
            top_k_by_views: parse_or(&get, "TOP_K_BY_VIEWS", defaults.top_k_by_views)?,
            video_delay: secs_or(&get, "VIDEO_DELAY_SECS", defaults.video_delay)?,
            stats_delay: secs_or(&get, "STATS_DELAY_SECS", defaults.stats_delay)?,
            http_timeout: secs_or(&get, "HTTP_TIMEOUT_SECS", defaults.http_timeout)?,
            retry_attempts: parse_or(&get, "RETRY_ATTEMPTS", defaults.retry_attempts)?.max(1),
            retry_base_delay: secs_or(&get, "RETRY_BASE_SECS", defaults.retry_base_delay)?,
            coasters_csv: get("COASTERS_CSV")
                .map(PathBuf::from)
                .unwrap_or(defaults.coasters_csv),
            videos_csv: get("VIDEOS_CSV")
                .map(PathBuf::from)
                .unwrap_or(defaults.videos_csv),
        };

        if config.candidates_per_coaster == 0 || config.candidates_per_coaster > 50 {
            return Err(CoasterError::Config(format!(
                "CANDIDATES_PER_COASTER must be between 1 and 50, got {}",
                config.candidates_per_coaster
            )));
        }

        Ok(config)
    }

    /// The video stage cannot run without a key.
    pub fn require_api_key(&self) -> Result<&str, CoasterError> {
        self.youtube_api_key
            .as_deref()
            .ok_or_else(|| CoasterError::MissingEnv {
                key: "YOUTUBE_API_KEY".to_string(),
            })
    }

    pub fn log_redacted(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  COASTERPEDIA_API_URL: {}", self.wiki_api_url);
        tracing::info!("  COASTER_CATEGORY: {}", self.category);
        tracing::info!("  YOUTUBE_API_KEY: {}", preview(&self.youtube_api_key));
        tracing::info!("  COASTERS_CSV: {}", self.coasters_csv.display());
        tracing::info!("  VIDEOS_CSV: {}", self.videos_csv.display());
    }
}

fn preview(val: &Option<String>) -> String {
    match val {
        Some(v) if !v.is_empty() => {
            let n = v.chars().take(5).map(char::len_utf8).sum::<usize>();
            format!("{}...({} chars)", &v[..n], v.chars().count())
        }
        _ => "<not set>".to_string(),
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, CoasterError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse() {
            Ok(value) => Ok(value),
            Err(e) => Err(CoasterError::InvalidEnv {
                key: key.to_string(),
                value: raw,
                reason: e.to_string(),
            }),
        },
    }
}

fn secs_or<G>(get: &G, key: &str, default: Duration) -> Result<Duration, CoasterError>
where
    G: Fn(&str) -> Option<String>,
{
    let secs: f64 = parse_or(get, key, default.as_secs_f64())?;
    Duration::try_from_secs_f64(secs).map_err(|e| CoasterError::InvalidEnv {
        key: key.to_string(),
        value: secs.to_string(),
        reason: e.to_string(),
    })
}
