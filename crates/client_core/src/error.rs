use thiserror::Error;

/// Failure of either generation call. All variants are handled identically
/// by callers and differ only in the diagnostics they carry.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: u16,
        detail: Option<String>,
    },
    #[error("invalid response payload from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        source: reqwest::Error,
    },
}
