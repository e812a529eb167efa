//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CredentialsConfig, DriveConfig, IngestionConfig, LogFormat, LoggingConfig,
};
