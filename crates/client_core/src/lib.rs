use std::time::Duration;

use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    error::ApiError,
    protocol::{
        GenerateIdeasRequest, GenerateIdeasResponse, GenerateScriptRequest,
        GenerateScriptResponse, GENERATE_IDEAS_ROUTE, GENERATE_SCRIPT_ROUTE,
    },
};
use tracing::{debug, warn};

pub mod error;

pub use error::RequestError;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for the idea and script generation endpoints.
#[derive(Debug, Clone)]
pub struct StudioClient {
    http: Client,
    server_url: Url,
}

impl StudioClient {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, RequestError> {
        let server_url = parse_server_url(server_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RequestError::ClientBuild)?;
        Ok(Self { http, server_url })
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    /// Sends `{ "topic": topic }` and returns the ideas in response order.
    pub async fn generate_ideas(&self, topic: &str) -> Result<Vec<String>, RequestError> {
        let body: GenerateIdeasResponse = self
            .post_json(
                GENERATE_IDEAS_ROUTE,
                &GenerateIdeasRequest {
                    topic: topic.to_string(),
                },
            )
            .await?;
        Ok(body.ideas)
    }

    /// Sends `{ "idea": idea }` and returns the generated script text.
    pub async fn generate_script(&self, idea: &str) -> Result<String, RequestError> {
        let body: GenerateScriptResponse = self
            .post_json(
                GENERATE_SCRIPT_ROUTE,
                &GenerateScriptRequest {
                    idea: idea.to_string(),
                },
            )
            .await?;
        Ok(body.script)
    }

    async fn post_json<Req, Res>(
        &self,
        endpoint: &'static str,
        payload: &Req,
    ) -> Result<Res, RequestError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let url = endpoint_url(&self.server_url, endpoint);
        debug!(%url, "posting generation request");
        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|source| RequestError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ApiError>()
                .await
                .ok()
                .map(|err| err.message);
            warn!(endpoint, status = status.as_u16(), ?detail, "generation request rejected");
            return Err(RequestError::Status {
                endpoint,
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<Res>()
            .await
            .map_err(|source| RequestError::Decode { endpoint, source })
    }
}

fn parse_server_url(raw: &str) -> Result<Url, RequestError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|source| RequestError::InvalidServerUrl {
        url: trimmed.to_string(),
        source,
    })?;
    if parsed.cannot_be_a_base() {
        return Err(RequestError::InvalidServerUrl {
            url: trimmed.to_string(),
            source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
        });
    }
    Ok(parsed)
}

/// Appends `endpoint` to the server url, keeping any path prefix the server
/// is mounted under.
fn endpoint_url(base: &Url, endpoint: &str) -> Url {
    let mut url = base.clone();
    let joined = format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    url.set_path(&joined);
    url
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
