//! GCP Authentication
//!
//! Handles authentication using Application Default Credentials (ADC)
//! or a caller-supplied access token, and reads the gcloud default project.

use crate::error::ServiceError;
use gcp_auth::TokenProvider;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{OnceCell, RwLock};

/// Read-only scopes are enough for listing zones, instances and buckets
pub const DEFAULT_SCOPES: &[&str] = &["https://www.googleapis.com/auth/cloud-platform.read-only"];

/// Token expiry buffer - refresh tokens this much before they actually expire
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Default token TTL if we can't determine expiry (conservative: 30 minutes)
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Where bearer tokens come from
#[derive(Clone)]
pub enum Credentials {
    /// Application Default Credentials, resolved on first use
    Adc(GcpCredentials),
    /// A fixed token, e.g. from `gcloud auth print-access-token`
    Static(String),
}

impl Credentials {
    pub async fn token(&self) -> Result<String, ServiceError> {
        match self {
            Credentials::Adc(creds) => creds.get_token().await,
            Credentials::Static(token) => Ok(token.clone()),
        }
    }
}

/// ADC credentials holder with token caching
///
/// The provider is not looked up until the first token is requested, so
/// building credentials never touches the network or the filesystem.
#[derive(Clone, Default)]
pub struct GcpCredentials {
    provider: Arc<OnceCell<Arc<dyn TokenProvider>>>,
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

impl GcpCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    async fn provider(&self) -> Result<&Arc<dyn TokenProvider>, ServiceError> {
        self.provider
            .get_or_try_init(|| async {
                tracing::debug!("Initializing Application Default Credentials");
                gcp_auth::provider().await.map_err(|e| {
                    ServiceError::Auth(format!(
                        "failed to initialize GCP authentication: {}",
                        e
                    ))
                })
            })
            .await
    }

    /// Get an access token for API calls
    pub async fn get_token(&self) -> Result<String, ServiceError> {
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached token expired, fetching new token");
            }
        }

        let token = self
            .provider()
            .await?
            .token(DEFAULT_SCOPES)
            .await
            .map_err(|e| ServiceError::Auth(format!("failed to get access token: {}", e)))?;

        let token_str = token.as_str().to_string();
        let expires_at = Instant::now() + DEFAULT_TOKEN_TTL - TOKEN_EXPIRY_BUFFER;

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken {
                token: token_str.clone(),
                expires_at,
            });
        }

        tracing::debug!(
            "New token cached, expires in ~{} minutes",
            (DEFAULT_TOKEN_TTL - TOKEN_EXPIRY_BUFFER).as_secs() / 60
        );

        Ok(token_str)
    }
}

/// Get the gcloud configuration directory
pub fn get_gcloud_config_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CLOUDSDK_CONFIG") {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|p| p.join("gcloud"))
}

/// Validate a GCP project ID format
/// Project IDs must be 6-30 characters, lowercase letters, digits, and hyphens
/// Must start with a letter and cannot end with a hyphen
fn validate_project_id(project: &str) -> bool {
    if project.len() < 6 || project.len() > 30 {
        return false;
    }

    match project.chars().next() {
        Some(c) if c.is_ascii_lowercase() => {},
        _ => return false,
    }

    if project.ends_with('-') {
        return false;
    }

    project
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Find `key = value` inside `[section]` of a gcloud ini-style file
fn find_ini_value(content: &str, section: &str, key: &str) -> Option<String> {
    let header = format!("[{}]", section);
    let mut in_section = false;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') {
            in_section = line == header;
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            if k.trim() == key {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

/// Read the default project from the environment or gcloud configuration
pub fn get_default_project() -> Option<String> {
    for var in ["CLOUDSDK_CORE_PROJECT", "GOOGLE_CLOUD_PROJECT", "GCLOUD_PROJECT"] {
        if let Ok(project) = std::env::var(var) {
            if validate_project_id(&project) {
                return Some(project);
            }
            tracing::warn!("Invalid project ID format in {}", var);
        }
    }

    let config_dir = get_gcloud_config_dir()?;

    if let Ok(content) = std::fs::read_to_string(config_dir.join("properties")) {
        if let Some(project) = find_ini_value(&content, "core", "project") {
            if validate_project_id(&project) {
                return Some(project);
            }
        }
    }

    let active_config = std::fs::read_to_string(config_dir.join("active_config")).ok()?;
    let config_name = active_config.trim();

    // Config name becomes part of a path
    if !config_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        tracing::warn!("Invalid characters in active_config name");
        return None;
    }

    let config_path = config_dir
        .join("configurations")
        .join(format!("config_{}", config_name));
    let content = std::fs::read_to_string(config_path).ok()?;

    find_ini_value(&content, "core", "project").filter(|p| validate_project_id(p))
}
