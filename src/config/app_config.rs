use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub drive: DriveConfig,
    pub credentials: CredentialsConfig,
    pub ingestion: IngestionConfig,
    pub logging: LoggingConfig,
}

/// Endpoint surface of the remote file-store APIs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    pub files_base_url: String,
    pub sheets_base_url: String,
    pub slides_base_url: String,
    /// OAuth token endpoint (JWT grant and refresh)
    pub token_url: String,
    /// Metadata-server token endpoint for ambient default credentials
    pub metadata_token_url: String,
    /// Page size requested per children listing call
    pub page_size: u32,
}

/// Credential resolution inputs. One service-account key path feeds both
/// the resolution chain and the delegated per-acting-user path.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Path to the service account key file
    pub service_account_key: PathBuf,
    /// Path to the client secrets file for the interactive flow
    pub client_secrets_path: PathBuf,
    /// Directory holding one serialized token blob per acting-user
    pub token_store_dir: PathBuf,
}

/// Defaults applied when an ingestion request leaves them unset
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct IngestionConfig {
    pub recursive: bool,
    pub include_trashed: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            files_base_url: "https://www.googleapis.com/drive/v3".to_string(),
            sheets_base_url: "https://sheets.googleapis.com/v4".to_string(),
            slides_base_url: "https://slides.googleapis.com/v1".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            metadata_token_url: "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token".to_string(),
            page_size: 1000,
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let credentials_dir = home.join(".credentials");

        Self {
            service_account_key: credentials_dir.join("keys.json"),
            client_secrets_path: credentials_dir.join("credentials.json"),
            token_store_dir: credentials_dir.join("tokens"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
