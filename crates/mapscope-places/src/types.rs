use serde::Deserialize;

/// One entity from a nearby-search response, in API rank order.
///
/// `rating` and `user_ratings_total` are frequently absent for new or
/// unclaimed listings, so both deserialize to `None` when missing.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
}

/// Top-level nearby-search envelope.
///
/// `status` is `"OK"` on success; any other value is an API-level failure
/// and `error_message` may carry a human-readable reason.
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<Place>,
    #[serde(default)]
    pub error_message: Option<String>,
}
