// Translates structured search parameters into GitHub's issue search grammar
use crate::models::IssueState;

/// Everything `/search/issues` can be asked for.
///
/// When `raw_query` is set it replaces the whole `q` text; the paging and
/// sorting fields still apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub language: Option<String>,
    pub labels: Vec<String>,
    pub org: Option<String>,
    /// `owner/name`
    pub repo: Option<String>,
    pub state: Option<IssueState>,
    pub sort: Option<SortKey>,
    pub order: Option<SortOrder>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub raw_query: Option<String>,
    pub no_assignee: bool,
    pub kind: Option<IssueKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Created,
    Updated,
    Comments,
    Reactions,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Created => "created",
            SortKey::Updated => "updated",
            SortKey::Comments => "comments",
            SortKey::Reactions => "reactions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// `is:issue` / `is:pr` qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Issue,
    Pr,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Issue => "issue",
            IssueKind::Pr => "pr",
        }
    }
}

/// Build the `q` text.
///
/// Clause order is fixed: labels, language, is, no:assignee, org, repo,
/// state. Each label becomes its own `label:"..."` clause, which GitHub
/// combines with AND.
pub fn build_search_query(params: &SearchParams) -> String {
    if let Some(raw) = &params.raw_query {
        return raw.clone();
    }

    let mut parts: Vec<String> = params
        .labels
        .iter()
        .map(|label| format!("label:\"{}\"", label))
        .collect();

    if let Some(lang) = &params.language {
        parts.push(format!("language:{}", lang));
    }
    if let Some(kind) = params.kind {
        parts.push(format!("is:{}", kind.as_str()));
    }
    if params.no_assignee {
        parts.push("no:assignee".to_string());
    }
    if let Some(org) = &params.org {
        parts.push(format!("org:{}", org));
    }
    if let Some(repo) = &params.repo {
        parts.push(format!("repo:{}", repo));
    }
    if let Some(state) = params.state {
        parts.push(format!("state:{}", state.as_str()));
    }

    parts.join(" ").trim().to_string()
}

/// Build the percent-encoded query string (without the leading `?`).
///
/// `q` is left out when the query text is empty, the rest when unset.
pub fn build_query_string(params: &SearchParams) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();

    let q = build_search_query(params);
    if !q.is_empty() {
        pairs.push(("q", q));
    }
    if let Some(sort) = params.sort {
        pairs.push(("sort", sort.as_str().to_string()));
    }
    if let Some(order) = params.order {
        pairs.push(("order", order.as_str().to_string()));
    }
    if let Some(per_page) = params.per_page {
        pairs.push(("per_page", per_page.to_string()));
    }
    if let Some(page) = params.page {
        pairs.push(("page", page.to_string()));
    }

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
