use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::schemas::{
    EvaluationResult, ExerciseDetails, ExerciseListItem, ExerciseRequest, GrammarMasteryItem,
    LessonContent, Submission, UserStatusSummary, VocabularyMasteryItem,
};

const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Pagination window for `GET /review/history`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPage {
    pub skip: u32,
    pub limit: u32,
}

impl Default for HistoryPage {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl HistoryPage {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// The page right after this one, same size.
    pub fn next(self) -> Self {
        Self {
            skip: self.skip.saturating_add(self.limit),
            limit: self.limit,
        }
    }
}

/// Typed client for the learning backend.
///
/// One call is one HTTP request: nothing is retried, cached or deduplicated,
/// and every failure is handed back to the caller. Clones share the
/// connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        let mut api = Self::with_http_client(&config.api_base_url, client)?;
        api.timeout = config.timeout;
        Ok(api)
    }

    pub fn from_env() -> ApiResult<Self> {
        Self::new(&ClientConfig::from_env())
    }

    /// Wraps an existing `reqwest::Client`, e.g. one shared with the host.
    pub fn with_http_client(base_url: &str, client: reqwest::Client) -> ApiResult<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeout: None,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout set from config. Always `None` for a wrapped
    /// client, whose own settings apply.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub async fn get_dashboard_status(&self) -> ApiResult<UserStatusSummary> {
        self.send(self.request(Method::GET, "/dashboard/status")).await
    }

    pub async fn get_next_lesson(&self) -> ApiResult<LessonContent> {
        self.send(self.request(Method::GET, "/lessons/next")).await
    }

    pub async fn generate_exercise(&self, request: &ExerciseRequest) -> ApiResult<ExerciseDetails> {
        self.send_json(Method::POST, "/exercises/generate", request)
            .await
    }

    pub async fn submit_exercise(&self, submission: &Submission) -> ApiResult<EvaluationResult> {
        self.send_json(Method::POST, "/exercises/submit", submission)
            .await
    }

    pub async fn get_review_history(&self, page: HistoryPage) -> ApiResult<Vec<ExerciseListItem>> {
        if page.limit == 0 {
            return Err(ApiError::InvalidQuery("limit must be greater than zero"));
        }
        let request = self
            .request(Method::GET, "/review/history")
            .query(&[("skip", page.skip), ("limit", page.limit)]);
        self.send(request).await
    }

    /// `GET /review/history?skip=0&limit=10`.
    pub async fn get_recent_history(&self) -> ApiResult<Vec<ExerciseListItem>> {
        self.get_review_history(HistoryPage::default()).await
    }

    pub async fn get_grammar_mastery(&self) -> ApiResult<Vec<GrammarMasteryItem>> {
        self.send(self.request(Method::GET, "/mastery/grammar")).await
    }

    pub async fn get_vocabulary_mastery(&self) -> ApiResult<Vec<VocabularyMasteryItem>> {
        self.send(self.request(Method::GET, "/mastery/vocab")).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        debug!(method = method.as_str(), url = url.as_str(), "backend request");
        self.client.request(method, url).headers(json_headers())
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(method, path).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let resp = request.send().await?;
        let status = resp.status();
        let url = resp.url().clone();

        if !status.is_success() {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(err) => {
                    warn!(%url, %status, error = %err, "failed to read error response body");
                    String::new()
                }
            };
            warn!(%url, %status, "backend returned error status");
            return Err(ApiError::HttpStatus { status, body });
        }

        let bytes = resp.bytes().await?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                debug!(%url, %status, "backend response decoded");
                Ok(value)
            }
            Err(source) => {
                let body = String::from_utf8_lossy(&bytes).into_owned();
                error!(%url, error = %source, body = %body, "failed to decode backend response");
                Err(ApiError::Decode { source, body })
            }
        }
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    let json = HeaderValue::from_static("application/json");
    headers.insert(CONTENT_TYPE, json.clone());
    headers.insert(ACCEPT, json);
    headers
}

fn normalize_base_url(raw: &str) -> ApiResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| ApiError::InvalidBaseUrl(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl(format!(
            "{raw}: unsupported scheme {}",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ApiError::InvalidBaseUrl(format!("{raw}: missing host")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ApiError::InvalidBaseUrl(format!(
            "{raw}: query and fragment are not allowed"
        )));
    }
    Ok(trimmed.to_string())
}
