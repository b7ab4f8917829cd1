use std::sync::LazyLock;

use regex::Regex;

static RE_PIPED_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^|\]]+)\|([^\]]+)\]\]").unwrap());
static RE_BARE_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

/// Reduce wiki link markup to display text: `[[Target|Label]]` becomes `Label`,
/// `[[Target]]` becomes `Target`, stray brackets are dropped.
pub fn clean_wiki_text(s: &str) -> String {
    if s.trim().is_empty() {
        return String::new();
    }
    let s = RE_PIPED_LINK.replace_all(s, "$2");
    let s = RE_BARE_LINK.replace_all(&s, "$1");
    s.replace(['[', ']'], "").trim().to_string()
}

/// Phrase-quoted search query, narrowed by the most specific context available:
/// park, then location, then country.
pub fn build_query(title: &str, park: &str, location: &str, country: &str) -> String {
    let title = clean_wiki_text(title);
    let context = [park, location, country]
        .into_iter()
        .map(clean_wiki_text)
        .find(|c| !c.is_empty());

    match context {
        Some(context) => format!("\"{title}\" \"{context}\" roller coaster"),
        None => format!("\"{title}\" roller coaster"),
    }
}
