//! Recommendation page types and next-page resolution.

use serde::{Deserialize, Serialize};

use crate::types::ProblemDifficulty;

/// Value of the `rec-source` header when the backend served fallback results.
pub const DEFAULT_REC_SOURCE: &str = "DEFAULT";

/// How to request the next page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageParam {
    /// Opaque server cursor, passed back verbatim.
    Cursor(String),
    /// Page number for page-based backends.
    Page(u32),
    /// No further pages (or the first request).
    #[default]
    None,
}

impl PageParam {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Query parameters to append to the request.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Cursor(cursor) => vec![("cursor", cursor.clone())],
            Self::Page(page) => vec![("page", page.to_string())],
            Self::None => Vec::new(),
        }
    }
}

/// One recommended problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub problem_id: i64,
    #[serde(default)]
    pub recommendation_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub difficulty: Option<ProblemDifficulty>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Paging and status metadata of a recommendation response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationMeta {
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<u32>,
    #[serde(default)]
    pub busy: Option<bool>,
}

impl RecommendationMeta {
    /// Cursor wins; `hasMore` + `nextPage` is the fallback.
    pub fn next_page_param(&self) -> PageParam {
        if let Some(cursor) = self.next_cursor.as_deref().filter(|c| !c.is_empty()) {
            return PageParam::Cursor(cursor.to_string());
        }
        match (self.has_more, self.next_page) {
            (true, Some(page)) => PageParam::Page(page),
            _ => PageParam::None,
        }
    }
}

/// Response headers describing where recommendations came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationHeaders {
    pub rec_source: Option<String>,
    pub cache_hit: Option<bool>,
    pub provider_chain: Option<String>,
}

/// A decoded recommendation page: body plus headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationPage {
    pub items: Vec<RecommendationItem>,
    #[serde(default)]
    pub meta: RecommendationMeta,
    #[serde(default)]
    pub headers: RecommendationHeaders,
}

impl RecommendationPage {
    /// Backend is degraded: explicitly busy, or serving default results.
    pub fn is_busy(&self) -> bool {
        self.meta.busy == Some(true)
            || self.headers.rec_source.as_deref() == Some(DEFAULT_REC_SOURCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cursor_is_preferred_over_page() {
        let meta = RecommendationMeta {
            next_cursor: Some("abc".to_string()),
            has_more: true,
            next_page: Some(3),
            ..Default::default()
        };
        assert_eq!(meta.next_page_param(), PageParam::Cursor("abc".to_string()));
    }

    #[test]
    fn page_is_used_without_cursor() {
        let meta = RecommendationMeta {
            has_more: true,
            next_page: Some(2),
            ..Default::default()
        };
        assert_eq!(meta.next_page_param(), PageParam::Page(2));
    }

    #[test]
    fn no_more_pages_without_cursor_or_has_more() {
        let exhausted = RecommendationMeta {
            has_more: false,
            next_page: Some(2),
            ..Default::default()
        };
        assert_eq!(exhausted.next_page_param(), PageParam::None);

        let missing_page = RecommendationMeta {
            has_more: true,
            ..Default::default()
        };
        assert_eq!(missing_page.next_page_param(), PageParam::None);

        let empty_cursor = RecommendationMeta {
            next_cursor: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(empty_cursor.next_page_param(), PageParam::None);
    }

    #[test]
    fn query_pairs_per_variant() {
        assert_eq!(
            PageParam::Cursor("c1".into()).query_pairs(),
            vec![("cursor", "c1".to_string())]
        );
        assert_eq!(PageParam::Page(4).query_pairs(), vec![("page", "4".to_string())]);
        assert!(PageParam::None.query_pairs().is_empty());
    }

    #[test]
    fn meta_deserializes_with_missing_fields() {
        let meta: RecommendationMeta =
            serde_json::from_str(r#"{"traceId":"t-1","nextCursor":"n"}"#).unwrap();
        assert_eq!(meta.trace_id.as_deref(), Some("t-1"));
        assert!(!meta.has_more);
        assert_eq!(meta.busy, None);
    }

    #[test]
    fn busy_from_meta_or_default_source() {
        let mut page = RecommendationPage {
            items: vec![],
            meta: RecommendationMeta::default(),
            headers: RecommendationHeaders::default(),
        };
        assert!(!page.is_busy());

        page.headers.rec_source = Some("LLM".to_string());
        assert!(!page.is_busy());

        page.headers.rec_source = Some("DEFAULT".to_string());
        assert!(page.is_busy());

        page.headers.rec_source = None;
        page.meta.busy = Some(true);
        assert!(page.is_busy());
    }
}
