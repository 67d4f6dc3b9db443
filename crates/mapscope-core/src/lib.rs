use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod plan;

pub use app_config::{AppConfig, BaseLocation};
pub use config::{load_app_config, load_app_config_from_env};
pub use plan::{load_plan, LocationPlan, TestLocation, Tier};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read location plan at {path}: {source}")]
    PlanFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse location plan: {0}")]
    PlanFileParse(#[from] serde_yaml::Error),

    #[error("invalid location plan: {0}")]
    InvalidPlan(String),
}
