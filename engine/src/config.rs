use serde::Deserialize;
use std::{env, fs, path::PathBuf, time::Duration};

use six_cities_api::{ApiSettings, AuthHeader};
use six_cities_types::CityName;
use thiserror::Error;

use crate::app::UiOptions;
use crate::storage::FileTokenStore;

/// Overrides `[api] base_url`.
pub const API_URL_ENV: &str = "SIX_CITIES_API_URL";
/// Any non-empty value other than `0`/`false` forces ASCII glyphs.
pub const ASCII_ENV: &str = "SIX_CITIES_ASCII";

const MAX_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Default, Deserialize)]
pub struct SixCitiesConfig {
    pub app: Option<AppConfig>,
    pub api: Option<ApiConfig>,
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// City tab selected on start. Unknown names fall back to Paris.
    pub default_city: Option<String>,
    /// Use ASCII-only glyphs for stars, bookmarks and spinners.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Static spinner instead of an animated one.
    #[serde(default)]
    pub reduced_motion: bool,
}

/// HTTP API settings.
///
/// ```toml
/// [api]
/// base_url = "https://15.design.htmlacademy.pro/six-cities"
/// timeout_secs = 5
/// auth_header = "bearer"   # or "x-token"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub auth_header: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    /// Where the session token is kept. Supports `${VAR}` expansion.
    pub token_path: Option<String>,
}

/// Replace `${VAR}` with the variable's value (empty when unset).
///
/// Unclosed `${` and empty names are kept verbatim.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if var.is_empty() {
                    out.push_str("${}");
                } else {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|value| {
        let value = value.trim();
        !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
    })
}

impl SixCitiesConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(path).map(Some)
    }

    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Client settings after env overrides and `${VAR}` expansion.
    #[must_use]
    pub fn api_settings(&self) -> ApiSettings {
        let mut settings = ApiSettings::default();
        let api = self.api.as_ref();

        if let Some(url) = api.and_then(|api| api.base_url.as_deref()) {
            let url = expand_env_vars(url);
            if !url.trim().is_empty() {
                settings.base_url = url;
            }
        }
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            settings.base_url = url;
        }

        if let Some(secs) = api.and_then(|api| api.timeout_secs) {
            settings.timeout = Duration::from_secs(secs.clamp(1, MAX_TIMEOUT_SECS));
        }

        if let Some(raw) = api.and_then(|api| api.auth_header.as_deref()) {
            match AuthHeader::parse(raw) {
                Some(header) => settings.auth_header = header,
                None => tracing::warn!(value = raw, "Unknown auth_header; using bearer"),
            }
        }

        settings
    }

    #[must_use]
    pub fn token_path(&self) -> Option<PathBuf> {
        self.storage
            .as_ref()
            .and_then(|storage| storage.token_path.as_deref())
            .map(expand_env_vars)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .or_else(FileTokenStore::default_path)
    }

    #[must_use]
    pub fn default_city(&self) -> CityName {
        let Some(raw) = self.app.as_ref().and_then(|app| app.default_city.as_deref()) else {
            return CityName::default();
        };
        CityName::parse(raw).unwrap_or_else(|err| {
            tracing::warn!("{err}; starting with {}", CityName::default().as_str());
            CityName::default()
        })
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        let app = self.app.as_ref();
        UiOptions {
            ascii_only: app.is_some_and(|app| app.ascii_only) || env_flag(ASCII_ENV),
            high_contrast: app.is_some_and(|app| app.high_contrast),
            reduced_motion: app.is_some_and(|app| app.reduced_motion),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".six-cities").join("config.toml"))
}
