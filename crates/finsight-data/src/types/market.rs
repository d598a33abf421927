//! Market status response types

use serde::{Deserialize, Serialize};

/// Market status API response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketStatusResponse {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub markets: Vec<Market>,
}

/// Status of a single trading venue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Market {
    #[serde(default)]
    pub market_type: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub primary_exchanges: String,
    #[serde(default)]
    pub local_open: String,
    #[serde(default)]
    pub local_close: String,
    #[serde(default)]
    pub current_status: String,
    #[serde(default)]
    pub notes: String,
}
