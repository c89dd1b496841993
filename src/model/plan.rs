use super::id::flexible_id;
use serde::{Deserialize, Serialize};

/// Reference data for a health plan offered by the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthPlan {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Whole currency units (BRL reais).
    pub monthly_price: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub coverage: String,
    #[serde(default)]
    pub is_recommended: bool,
    /// Price bucket this plan targets, e.g. `economico`, `medio`, `premium`.
    #[serde(default)]
    pub target_price_range: String,
}
