//! Layered application settings loaded via OrthoConfig.
//!
//! Each section reads defaults, an optional configuration file and its own
//! environment prefix (`SERVER_`, `DATABASE_`, `JWT_`, `ADMIN_`). Command-line
//! flags are parsed for the server section only. Unset values fall back to
//! the defaults exposed by the accessors.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroizing;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_API_VERSION: &str = "1";
const DEFAULT_DOCS_ROUTE: &str = "docs";
const DEFAULT_PUBLIC_DIR: &str = "./public";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
#[error("failed to load {section} settings: {message}")]
pub struct SettingsError {
    section: &'static str,
    message: String,
}

impl SettingsError {
    fn load(section: &'static str, error: impl std::fmt::Display) -> Self {
        Self {
            section,
            message: error.to_string(),
        }
    }
}

/// HTTP listener and API surface settings.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVER")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Version segment of the `/api/v{version}` prefix.
    pub api_version: Option<String>,
    /// Route of the Swagger UI below the API prefix.
    pub docs_route: Option<String>,
    /// Directory receiving uploaded program artifacts.
    pub public_dir: Option<PathBuf>,
    /// Largest accepted artifact upload, in bytes.
    pub max_upload_bytes: Option<usize>,
}

impl ServerSettings {
    /// Interface to bind.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Port to bind.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// API version segment.
    pub fn api_version(&self) -> &str {
        self.api_version.as_deref().unwrap_or(DEFAULT_API_VERSION)
    }

    /// Swagger UI route, without surrounding slashes.
    pub fn docs_route(&self) -> &str {
        self.docs_route
            .as_deref()
            .unwrap_or(DEFAULT_DOCS_ROUTE)
            .trim_matches('/')
    }

    /// Artifact directory.
    pub fn public_dir(&self) -> PathBuf {
        self.public_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR))
    }

    /// Upload size limit in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

/// Database connection settings.
#[derive(Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DATABASE")]
pub struct DatabaseSettings {
    /// PostgreSQL URL. When unset the server runs on in-memory adapters.
    pub url: Option<String>,
    /// Maximum pooled connections.
    pub max_connections: Option<u32>,
    /// Pool checkout timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl DatabaseSettings {
    /// Configured URL, if any.
    pub fn url(&self) -> Option<Zeroizing<String>> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| Zeroizing::new(url.to_owned()))
    }

    /// Maximum pooled connections.
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    /// Pool checkout timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(
            self.connect_timeout_secs
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }
}

/// Bearer token settings.
#[derive(Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JWT")]
pub struct JwtSettings {
    /// HS256 signing secret.
    pub secret: Option<String>,
    /// Token lifetime in seconds.
    pub expires_in_secs: Option<i64>,
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("expires_in_secs", &self.expires_in_secs)
            .finish()
    }
}

impl JwtSettings {
    /// Signing secret, if a non-empty one is configured.
    pub fn secret(&self) -> Option<Zeroizing<String>> {
        self.secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .map(|secret| Zeroizing::new(secret.to_owned()))
    }

    /// Token lifetime in seconds.
    pub fn expires_in_secs(&self) -> i64 {
        self.expires_in_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS)
    }
}

/// Credentials of the account created when the user table is empty.
#[derive(Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADMIN")]
pub struct AdminSettings {
    /// Admin username.
    pub username: Option<String>,
    /// Admin password.
    pub password: Option<String>,
}

impl std::fmt::Debug for AdminSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSettings")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AdminSettings {
    /// Admin username.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_ADMIN_USERNAME)
    }

    /// Admin password.
    pub fn password(&self) -> Zeroizing<String> {
        Zeroizing::new(
            self.password
                .as_deref()
                .unwrap_or(DEFAULT_ADMIN_PASSWORD)
                .to_owned(),
        )
    }
}

/// Every settings section, loaded once at start-up.
#[derive(Debug, Clone, Default)]
pub struct AppSettings {
    /// HTTP settings.
    pub server: ServerSettings,
    /// Database settings.
    pub database: DatabaseSettings,
    /// Token settings.
    pub jwt: JwtSettings,
    /// Seeded admin account.
    pub admin: AdminSettings,
}

impl AppSettings {
    /// Load settings from the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] naming the section that failed to load.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from_iter(std::env::args_os())
    }

    /// Load settings, parsing `args` for the server section.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] naming the section that failed to load.
    pub fn load_from_iter<I>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut args = args.into_iter().collect::<Vec<_>>();
        if args.is_empty() {
            args.push(OsString::from("org-registry"));
        }
        let program = args.iter().take(1).cloned().collect::<Vec<_>>();

        Ok(Self {
            server: ServerSettings::load_from_iter(args)
                .map_err(|err| SettingsError::load("server", err))?,
            database: DatabaseSettings::load_from_iter(program.clone())
                .map_err(|err| SettingsError::load("database", err))?,
            jwt: JwtSettings::load_from_iter(program.clone())
                .map_err(|err| SettingsError::load("jwt", err))?,
            admin: AdminSettings::load_from_iter(program)
                .map_err(|err| SettingsError::load("admin", err))?,
        })
    }
}
