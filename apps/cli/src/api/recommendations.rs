//! AI recommendation endpoints.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Method;
use review_core::{
    FeedbackAction, PageParam, RecommendationHeaders, RecommendationItem, RecommendationMeta,
    RecommendationPage,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{decode, ApiClient};
use crate::error::Result;

pub const HEADER_REC_SOURCE: &str = "rec-source";
/// Prefixed spelling sent by some gateways; read when the bare header is absent.
pub const HEADER_REC_SOURCE_PREFIXED: &str = "x-rec-source";
pub const HEADER_CACHE_HIT: &str = "x-cache-hit";
pub const HEADER_PROVIDER_CHAIN: &str = "x-provider-chain";

/// Parameters of `GET /ai/recommendations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationQuery {
    pub limit: u32,
    pub page: PageParam,
    pub ab_group: Option<String>,
}

impl RecommendationQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            page: PageParam::None,
            ab_group: None,
        }
    }

    pub fn with_page(&self, page: PageParam) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.limit.to_string())];
        params.extend(self.page.query_pairs());
        if let Some(group) = &self.ab_group {
            params.push(("ab_group", group.clone()));
        }
        params
    }
}

#[derive(Debug, Deserialize)]
struct RecommendationBody {
    #[serde(default)]
    items: Vec<RecommendationItem>,
    #[serde(default)]
    meta: RecommendationMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackRequest<'a> {
    recommendation_id: Option<&'a str>,
    action: FeedbackAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    helpful: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackResponse {
    #[serde(default)]
    pub success: bool,
}

fn parse_headers(headers: &HeaderMap) -> RecommendationHeaders {
    let text = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    RecommendationHeaders {
        rec_source: text(HEADER_REC_SOURCE).or_else(|| text(HEADER_REC_SOURCE_PREFIXED)),
        cache_hit: text(HEADER_CACHE_HIT).map(|v| v.eq_ignore_ascii_case("true") || v == "1"),
        provider_chain: text(HEADER_PROVIDER_CHAIN),
    }
}

/// Where recommendation pages and feedback go.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn fetch_page(&self, query: &RecommendationQuery) -> Result<RecommendationPage>;

    async fn send_feedback(
        &self,
        problem_id: i64,
        recommendation_id: Option<&str>,
        action: FeedbackAction,
        helpful: Option<bool>,
    ) -> Result<()>;
}

impl ApiClient {
    /// GET /ai/recommendations
    pub async fn fetch_recommendations(
        &self,
        query: &RecommendationQuery,
    ) -> Result<RecommendationPage> {
        let resp = self
            .send(Method::GET, "/ai/recommendations", &query.params(), None)
            .await?;
        let headers = parse_headers(resp.headers());
        let body: RecommendationBody = decode(resp).await?;

        debug!(
            items = body.items.len(),
            trace_id = body.meta.trace_id.as_deref().unwrap_or("-"),
            source = headers.rec_source.as_deref().unwrap_or("-"),
            "fetched recommendations"
        );

        Ok(RecommendationPage {
            items: body.items,
            meta: body.meta,
            headers,
        })
    }

    /// POST /ai/recommendations/{problemId}/feedback
    pub async fn send_recommendation_feedback(
        &self,
        problem_id: i64,
        recommendation_id: Option<&str>,
        action: FeedbackAction,
        helpful: Option<bool>,
    ) -> Result<FeedbackResponse> {
        let path = format!("/ai/recommendations/{}/feedback", problem_id);
        let request = FeedbackRequest {
            recommendation_id,
            action,
            helpful,
        };
        self.post_json(&path, &request).await
    }
}

#[async_trait]
impl RecommendationSource for ApiClient {
    async fn fetch_page(&self, query: &RecommendationQuery) -> Result<RecommendationPage> {
        self.fetch_recommendations(query).await
    }

    async fn send_feedback(
        &self,
        problem_id: i64,
        recommendation_id: Option<&str>,
        action: FeedbackAction,
        helpful: Option<bool>,
    ) -> Result<()> {
        self.send_recommendation_feedback(problem_id, recommendation_id, action, helpful)
            .await
            .map(|_| ())
    }
}
