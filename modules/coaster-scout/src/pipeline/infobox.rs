// Best-effort reader for the `{{Infobox roller coaster ...}}` template.
//
// Only single-level `| key = value` lines between the opening marker and the
// first line starting with `}}` are considered. Anything else is ignored, so a
// page with unusual markup yields fewer fields rather than an error.

use indexmap::IndexMap;
use tracing::debug;

use coaster_common::{FieldMapping, FIELD_ALIASES};

const OPEN_MARKER: &str = "{{infobox roller coaster";
const CLOSE_MARKER: &str = "}}";
const FIELD_PREFIX: char = '|';

/// Raw `key -> value` pairs from the infobox block. Keys are trimmed and
/// lower-cased, values only trimmed. Later duplicates overwrite earlier ones.
pub fn raw_infobox_fields(wikitext: &str) -> IndexMap<String, String> {
    let mut raw = IndexMap::new();
    let mut inside = false;

    for line in wikitext.lines() {
        let stripped = line.trim();
        if !inside {
            if stripped.to_lowercase().starts_with(OPEN_MARKER) {
                inside = true;
            }
            continue;
        }
        if stripped.starts_with(CLOSE_MARKER) {
            break;
        }

        let Some(body) = stripped.strip_prefix(FIELD_PREFIX) else {
            continue;
        };
        let Some((key, value)) = body.split_once('=') else {
            continue;
        };
        raw.insert(key.trim().to_lowercase(), value.trim().to_string());
    }

    raw
}

/// Resolve every semantic field from its aliases. Empty or missing input gives
/// an empty mapping; otherwise every field is present, `""` when unresolved.
pub fn extract_fields(wikitext: Option<&str>) -> FieldMapping {
    let Some(wikitext) = wikitext.filter(|t| !t.is_empty()) else {
        return FieldMapping::new();
    };

    let raw = raw_infobox_fields(wikitext);
    debug!(
        lines = wikitext.lines().count(),
        keys = ?raw.keys().collect::<Vec<_>>(),
        "Infobox keys found"
    );

    FIELD_ALIASES
        .iter()
        .map(|(field, aliases)| {
            let value = aliases
                .iter()
                .find_map(|alias| raw.get(*alias))
                .cloned()
                .unwrap_or_default();
            (field.to_string(), value)
        })
        .collect()
}
