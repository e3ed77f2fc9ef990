//! Land listing bodies.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Status given to listings created without one.
pub const DEFAULT_STATUS: &str = "available";

/// Land creation body. Absent optional fields are stored as null.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewLand {
    /// Account identifier of the lister. Not checked against accounts.
    pub owner_id: String,
    /// Listing title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Where the land is.
    pub location: String,
    /// Size in acres.
    pub area: f64,
    /// Asking price per acre.
    #[serde(default)]
    pub price_per_acre: Option<f64>,
    /// Soil classification.
    #[serde(default)]
    pub soil_type: Option<String>,
    /// Irrigation / water notes.
    #[serde(default)]
    pub water_availability: Option<String>,
    /// Listing status.
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// Arbitrary partial update for a listing. Null values are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct LandUpdate(pub Map<String, Value>);

impl From<Map<String, Value>> for LandUpdate {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
