use std::path::PathBuf;

/// Coordinates of the business's home base. All dominance distances are
/// measured from this point.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseLocation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone)]
pub struct AppConfig {
    pub places_api_key: String,
    pub database_url: String,
    pub business_name: String,
    /// Lowercase substrings used to recognise the subject business in
    /// search results.
    pub business_keywords: Vec<String>,
    pub base: BaseLocation,
    pub plan_path: PathBuf,
    pub log_level: String,
    pub search_radius_m: u32,
    /// Only the first N entities of each response are scanned for the
    /// subject and counted as competitors.
    pub result_cap: usize,
    pub pacing_min_ms: u64,
    pub pacing_max_ms: u64,
    pub top_opportunities: usize,
    pub http_timeout_secs: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("places_api_key", &"[redacted]")
            .field("database_url", &"[redacted]")
            .field("business_name", &self.business_name)
            .field("business_keywords", &self.business_keywords)
            .field("base", &self.base)
            .field("plan_path", &self.plan_path)
            .field("log_level", &self.log_level)
            .field("search_radius_m", &self.search_radius_m)
            .field("result_cap", &self.result_cap)
            .field("pacing_min_ms", &self.pacing_min_ms)
            .field("pacing_max_ms", &self.pacing_max_ms)
            .field("top_opportunities", &self.top_opportunities)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
