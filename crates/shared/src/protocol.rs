//! JSON bodies exchanged between the studio clients and the generation server.

use serde::{Deserialize, Serialize};

pub const GENERATE_IDEAS_ROUTE: &str = "/generate-ideas";
pub const GENERATE_SCRIPT_ROUTE: &str = "/generate-script";
pub const HEALTHZ_ROUTE: &str = "/healthz";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateIdeasRequest {
    pub topic: String,
}

/// Fields other than `ideas` are ignored when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateIdeasResponse {
    pub ideas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateScriptRequest {
    pub idea: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateScriptResponse {
    pub script: String,
}
