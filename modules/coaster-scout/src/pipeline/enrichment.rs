use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use coaster_common::{CoasterRow, Config};
use coasterpedia_client::WikiError;

use crate::infra::{retry, RetryPolicy};
use crate::pipeline::infobox::extract_fields;
use crate::pipeline::listing::fetch_entity_list;
use crate::pipeline::stats::EnrichStats;
use crate::store::write_coaster_rows;
use crate::traits::WikiSource;

/// Wiki stage: list coaster pages, read each infobox, write the coaster CSV.
pub struct CoasterScraper<'a> {
    wiki: &'a dyn WikiSource,
    config: &'a Config,
    retry: RetryPolicy,
}

impl<'a> CoasterScraper<'a> {
    pub fn new(wiki: &'a dyn WikiSource, config: &'a Config) -> Self {
        Self {
            wiki,
            config,
            retry: RetryPolicy::from_config(config),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn fetch_entity_list(&self) -> Result<Vec<String>, WikiError> {
        fetch_entity_list(
            self.wiki,
            &self.config.category,
            self.config.max_coasters,
            self.config.listing_page_size,
            &self.retry,
        )
        .await
    }

    /// One row per title whose page exists. Missing pages and pages that keep
    /// failing are skipped; `wiki_delay` follows every appended row.
    pub async fn enrich_all(&self, titles: &[String], stats: &mut EnrichStats) -> Vec<CoasterRow> {
        let total = titles.len();
        let mut rows = Vec::with_capacity(total);

        for (i, title) in titles.iter().enumerate() {
            info!(index = i + 1, total, title = title.as_str(), "Fetching infobox");

            let wiki = self.wiki;
            let title_ref = title.as_str();
            let fetched = retry(&self.retry, "wiki.parse", WikiError::is_transient, move || {
                wiki.page_wikitext(title_ref)
            })
            .await;

            let wikitext = match fetched {
                Ok(Some(text)) if !text.is_empty() => text,
                Ok(_) => {
                    warn!(title = title.as_str(), "No wikitext, skipping");
                    stats.pages_missing += 1;
                    continue;
                }
                Err(e) => {
                    warn!(title = title.as_str(), error = %e, "Page fetch failed, skipping");
                    stats.pages_failed += 1;
                    continue;
                }
            };

            let fields = extract_fields(Some(&wikitext));
            debug!(title = title.as_str(), fields = ?fields, "Normalized infobox fields");
            rows.push(CoasterRow::new(title.clone(), fields));

            tokio::time::sleep(self.config.wiki_delay).await;
        }

        rows
    }

    /// Full stage. Fails only when the listing itself fails or the CSV cannot
    /// be written.
    pub async fn run(&self) -> Result<EnrichStats> {
        let mut stats = EnrichStats::default();

        let titles = self
            .fetch_entity_list()
            .await
            .context("Failed to list coaster titles")?;
        stats.titles_listed = titles.len() as u32;

        let rows = self.enrich_all(&titles, &mut stats).await;
        write_coaster_rows(&self.config.coasters_csv, &rows)?;
        stats.rows_written = rows.len() as u32;

        Ok(stats)
    }
}
