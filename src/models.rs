// src/models.rs
use serde::{Deserialize, Serialize};

/// Query string of `/api/volume`
#[derive(Debug, Default, Deserialize)]
pub struct VolumeQuery {
    pub address: Option<String>,
    pub chain: Option<String>,
}

/// One record's contribution, in upstream order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub hash: Option<String>,
    pub time: Option<String>,
    pub usd: f64,
}

/// Aggregated USD volume for an address on one chain
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeResponse {
    pub volume_usd: f64, // raw float sum, unrounded
    pub count: usize,
    pub breakdown: Vec<BreakdownEntry>,
}

impl VolumeResponse {
    pub fn empty() -> Self {
        Self {
            volume_usd: 0.0,
            count: 0,
            breakdown: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckEnvResponse {
    pub ok: bool,
    pub has_bitquery_env: bool,
}
