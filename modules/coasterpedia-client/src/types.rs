use serde::Deserialize;

/// One page of a `list=categorymembers` query.
#[derive(Debug, Clone, Default)]
pub struct CategoryPage {
    pub titles: Vec<String>,
    /// `cmcontinue` token; `None` once the category is exhausted.
    pub continuation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryMembersResponse {
    #[serde(default)]
    pub query: Option<CategoryQuery>,
    #[serde(rename = "continue", default)]
    pub cont: Option<Continuation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryQuery {
    #[serde(default)]
    pub categorymembers: Vec<CategoryMember>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryMember {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Continuation {
    pub cmcontinue: Option<String>,
}

/// `action=parse&prop=wikitext` response. `parse` is absent for missing pages.
#[derive(Debug, Deserialize)]
pub(crate) struct ParseResponse {
    #[serde(default)]
    pub parse: Option<ParseBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ParseBlock {
    #[serde(default)]
    pub wikitext: Option<Wikitext>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Wikitext {
    #[serde(rename = "*")]
    pub content: Option<String>,
}

impl From<CategoryMembersResponse> for CategoryPage {
    fn from(resp: CategoryMembersResponse) -> Self {
        Self {
            titles: resp
                .query
                .map(|q| q.categorymembers.into_iter().map(|m| m.title).collect())
                .unwrap_or_default(),
            continuation: resp.cont.and_then(|c| c.cmcontinue),
        }
    }
}
