use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_db::catalogue::QueryParams;
use storefront_db::store::StoreConfig;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub seed: SeedConfig,

    #[serde(default)]
    pub query: QueryParams,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SeedConfig {
    /// Time base for order timestamps; order N is placed N days after it.
    /// Defaults to the current time when unset.
    #[serde(default)]
    pub base_time: Option<DateTime<Utc>>,
}

impl SeedConfig {
    pub fn base_time_or_now(&self) -> DateTime<Utc> {
        self.base_time.unwrap_or_else(Utc::now)
    }
}
