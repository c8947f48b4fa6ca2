use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_CATALOG_PATH: &str = "./data/catalog.json";

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub common: core_config::Config,
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    /// JSON array of items, read once at startup.
    pub path: PathBuf,
    /// Externally reachable base URL encoded into item QR codes.
    pub public_url: String,
}

impl CatalogConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;

        let path = match env::var("CATALOG_PATH") {
            Ok(val) if !val.trim().is_empty() => PathBuf::from(val),
            Ok(_) => {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "CATALOG_PATH is set but empty"
                )));
            }
            Err(_) => PathBuf::from(DEFAULT_CATALOG_PATH),
        };

        let public_url = env::var("PUBLIC_BASE_URL")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .unwrap_or_else(|| local_url(common.port));

        Ok(CatalogConfig {
            common,
            catalog: CatalogSettings { path, public_url },
        })
    }

    /// Configuration pointing at `path` with every other setting defaulted.
    pub fn with_catalog_path(path: impl Into<PathBuf>) -> Self {
        let common = core_config::Config::default();
        let public_url = local_url(common.port);
        CatalogConfig {
            common,
            catalog: CatalogSettings {
                path: path.into(),
                public_url,
            },
        }
    }
}

fn local_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}
