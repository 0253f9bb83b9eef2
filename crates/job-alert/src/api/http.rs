use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::{ApiError, ContentSummary, ErrorBody, FeedKind, JobsBackend};
use crate::config::ApiConfig;
use crate::jobs::domain::{JobId, JobPage, JobPayload, JobPosting, ListQuery};

/// `{ "data": ... }` envelope most endpoints wrap their payload in.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Accepts either an enveloped or a bare payload.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MaybeEnveloped<T> {
    Wrapped(Envelope<T>),
    Bare(T),
}

impl<T> MaybeEnveloped<T> {
    fn into_inner(self) -> T {
        match self {
            MaybeEnveloped::Wrapped(envelope) => envelope.data,
            MaybeEnveloped::Bare(value) => value,
        }
    }
}

/// `reqwest`-backed client for the REST backend.
#[derive(Debug, Clone)]
pub struct HttpJobsBackend {
    client: Client,
    base_url: Url,
}

impl HttpJobsBackend {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("job-alert/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, config.base_url.clone()))
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    fn job_endpoint(&self, id: &JobId) -> Result<Url, ApiError> {
        let mut url = self.endpoint("jobs")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(&id.0);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "backend request");
        self.client.request(method, url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let bytes = response.bytes().await.unwrap_or_default();
        let body = ErrorBody::from_bytes(&bytes);
        warn!(status = status.as_u16(), ?body, "backend returned an error");
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        let payload: MaybeEnveloped<T> = serde_json::from_slice(&bytes)?;
        Ok(payload.into_inner())
    }

    /// Saved-record bodies are informational; a success status is what counts.
    async fn decode_saved(response: Response) -> Option<JobPosting> {
        match Self::decode::<JobPosting>(response).await {
            Ok(posting) => Some(posting),
            Err(err) => {
                debug!(error = %err, "saved job response body not decoded");
                None
            }
        }
    }
}

#[async_trait]
impl JobsBackend for HttpJobsBackend {
    async fn list_jobs(&self, query: &ListQuery) -> Result<JobPage, ApiError> {
        let mut url = self.endpoint("jobs")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &query.page.to_string());
            pairs.append_pair("limit", &query.limit.to_string());
            if let Some(search) = query.search.as_deref().filter(|term| !term.is_empty()) {
                pairs.append_pair("search", search);
            }
        }

        let response = self.send(self.request(Method::GET, url)).await?;
        let envelope: Envelope<JobPage> = serde_json::from_slice(&response.bytes().await?)?;
        Ok(envelope.data)
    }

    async fn get_job(&self, id: &JobId) -> Result<JobPosting, ApiError> {
        let url = self.job_endpoint(id)?;
        let response = self.send(self.request(Method::GET, url)).await?;
        Self::decode(response).await
    }

    async fn create_job(&self, payload: &JobPayload) -> Result<Option<JobPosting>, ApiError> {
        let url = self.endpoint("jobs")?;
        let response = self
            .send(self.request(Method::POST, url).json(payload))
            .await?;
        Ok(Self::decode_saved(response).await)
    }

    async fn update_job(
        &self,
        id: &JobId,
        payload: &JobPayload,
    ) -> Result<Option<JobPosting>, ApiError> {
        let url = self.job_endpoint(id)?;
        let response = self
            .send(self.request(Method::PATCH, url).json(payload))
            .await?;
        Ok(Self::decode_saved(response).await)
    }

    async fn delete_job(&self, id: &JobId) -> Result<(), ApiError> {
        let url = self.job_endpoint(id)?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn feed(&self, kind: FeedKind) -> Result<Vec<ContentSummary>, ApiError> {
        let url = self.endpoint(kind.path())?;
        let response = self.send(self.request(Method::GET, url)).await?;
        Self::decode(response).await
    }
}
