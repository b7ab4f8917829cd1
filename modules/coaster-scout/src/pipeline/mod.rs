pub mod enrichment;
pub mod infobox;
pub mod listing;
pub mod query;
pub mod ranking;
pub mod stats;
pub mod videos;

pub use enrichment::CoasterScraper;
pub use infobox::extract_fields;
pub use listing::fetch_entity_list;
pub use query::{build_query, clean_wiki_text};
pub use ranking::{rank_top_k, EntityOutcome, VideoRanker};
pub use stats::{EnrichStats, VideoRunStats};
pub use videos::{fetch_statistics, search_candidates, StatsFetch};
