use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{
    error::SearchError,
    protocol::{SearchFailure, SearchRequest, SearchResponse, STATUS_SUCCESS},
};
use tracing::{debug, info, warn};
use url::Url;

/// Araport community API root used when nothing else is configured.
pub const DEFAULT_ADAMA_URL: &str = "https://api.araport.org/community/v0.3";

/// Remote search seam. The page lifecycle only ever calls `search`, and only
/// once per page.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError>;
    async fn status(&self) -> Result<(), SearchError>;
}

pub struct MissingSearchBackend;

#[async_trait]
impl SearchBackend for MissingSearchBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        Err(SearchError::rejected(
            "unavailable",
            format!(
                "no search backend configured for {}/{}",
                request.namespace, request.service
            ),
        ))
    }

    async fn status(&self) -> Result<(), SearchError> {
        Err(SearchError::rejected(
            "unavailable",
            "no search backend configured",
        ))
    }
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

/// HTTP client for the Adama search API exposed by the host portal.
///
/// Authentication is the host's business: if it hands over a bearer token it
/// is attached as-is, otherwise requests go out anonymously.
#[derive(Clone)]
pub struct AdamaClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl AdamaClient {
    pub fn new(base_url: &str) -> Result<Self, SearchError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| SearchError::InvalidEndpoint(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SearchError::InvalidEndpoint(format!(
                "{base_url}: not a hierarchical url"
            )));
        }
        Ok(Self {
            http: Client::new(),
            base_url,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.trim().is_empty()).then_some(token);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, SearchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SearchError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, url: Url) -> reqwest::RequestBuilder {
        let builder = self.http.get(url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl SearchBackend for AdamaClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let url = self.endpoint(&[
            request.namespace.as_str(),
            request.service.as_str(),
            "search",
        ])?;
        info!(%url, namespace = %request.namespace, service = %request.service, "issuing search");

        let response = self
            .get(url)
            .query(&request.query_params)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        let http_status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        if !http_status.is_success() {
            warn!(status = %http_status, "search endpoint answered with an error status");
            return Err(match serde_json::from_slice::<SearchFailure>(&body) {
                Ok(failure) => SearchError::rejected(failure.status, failure.message),
                Err(_) => SearchError::rejected(
                    http_status.as_u16().to_string(),
                    String::from_utf8_lossy(&body).into_owned(),
                ),
            });
        }

        let decoded: SearchResponse =
            serde_json::from_slice(&body).map_err(|e| SearchError::Decode(e.to_string()))?;
        debug!(status = %decoded.status, elements = decoded.result.len(), "search completed");
        Ok(decoded)
    }

    async fn status(&self) -> Result<(), SearchError> {
        let url = self.endpoint(&["status"])?;
        let response = self
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        let http_status = response.status();
        if !http_status.is_success() {
            return Err(SearchError::rejected(
                http_status.as_u16().to_string(),
                "status check failed",
            ));
        }

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;
        if body.status != STATUS_SUCCESS {
            return Err(SearchError::rejected(body.status, body.message));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
