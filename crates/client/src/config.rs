//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SUPABASE_URL` - Project URL (e.g., <https://abc123.supabase.co>)
//! - `SUPABASE_ANON_KEY` - Anonymous API key (sent as `apikey` on every call)
//!
//! ## Optional
//! - `SUPABASE_SERVICE_ROLE_KEY` - Service-role key for unscoped access
//!   (server-side tooling only, bypasses row-level security)
//!
//! ## CLI credentials
//! - `FIELDWORK_EMAIL` / `FIELDWORK_PASSWORD` - password-grant sign-in used
//!   by `fw-cli`

use std::collections::HashMap;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Connection settings for the hosted backend.
///
/// Implements `Debug` manually to redact key material.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project base URL (REST and auth endpoints hang off this).
    pub project_url: Url,
    /// Anonymous API key; identifies the project, carries no user identity.
    pub anon_key: SecretString,
    /// Service-role key bypassing row-level security. Tooling only.
    pub service_role_key: Option<SecretString>,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("project_url", &self.project_url.as_str())
            .field("anon_key", &"[REDACTED]")
            .field(
                "service_role_key",
                &self.service_role_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl SupabaseConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, the URL is
    /// invalid, or keys fail validation (placeholder detection, entropy
    /// check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let project_url = get_required_env("SUPABASE_URL")?;
        let project_url = Url::parse(&project_url)
            .map_err(|e| ConfigError::InvalidEnvVar("SUPABASE_URL".to_string(), e.to_string()))?;

        let anon_key = get_validated_secret("SUPABASE_ANON_KEY")?;
        let service_role_key = match get_optional_env("SUPABASE_SERVICE_ROLE_KEY") {
            Some(_) => Some(get_validated_secret("SUPABASE_SERVICE_ROLE_KEY")?),
            None => None,
        };

        Ok(Self {
            project_url,
            anon_key,
            service_role_key,
        })
    }

    /// REST endpoint for a table, e.g. `https://.../rest/v1/jobs`.
    #[must_use]
    pub fn rest_endpoint(&self, table: &str) -> Url {
        let mut url = self.project_url.clone();
        url.set_path(&format!("/rest/v1/{table}"));
        url
    }

    /// RPC endpoint for a remote procedure, e.g. `https://.../rest/v1/rpc/generate_job_number`.
    #[must_use]
    pub fn rpc_endpoint(&self, procedure: &str) -> Url {
        let mut url = self.project_url.clone();
        url.set_path(&format!("/rest/v1/rpc/{procedure}"));
        url
    }

    /// Auth token endpoint for a grant type.
    #[must_use]
    pub fn token_endpoint(&self, grant_type: &str) -> Url {
        let mut url = self.project_url.clone();
        url.set_path("/auth/v1/token");
        url.set_query(Some(&format!("grant_type={grant_type}")));
        url
    }
}

/// Sign-in credentials for the CLI's password-grant flow.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Load sign-in credentials from `FIELDWORK_EMAIL` / `FIELDWORK_PASSWORD`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if either variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            email: get_required_env("FIELDWORK_EMAIL")?,
            password: SecretString::from(get_required_env("FIELDWORK_PASSWORD")?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a key is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real API keys are JWTs with high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the key from the project dashboard."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a key from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> SupabaseConfig {
        SupabaseConfig {
            project_url: Url::parse("https://abc123.supabase.co").unwrap(),
            anon_key: SecretString::from("eyJhbGciOiJIUzI1NiJ9.k3y"),
            service_role_key: None,
        }
    }

    #[test]
    fn test_rest_endpoint() {
        let config = test_config();
        assert_eq!(
            config.rest_endpoint("jobs").as_str(),
            "https://abc123.supabase.co/rest/v1/jobs"
        );
    }

    #[test]
    fn test_rpc_endpoint() {
        let config = test_config();
        assert_eq!(
            config.rpc_endpoint("generate_job_number").as_str(),
            "https://abc123.supabase.co/rest/v1/rpc/generate_job_number"
        );
    }

    #[test]
    fn test_token_endpoint() {
        let config = test_config();
        assert_eq!(
            config.token_endpoint("password").as_str(),
            "https://abc123.supabase.co/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_high() {
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-anon-key-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_debug_redacts_keys() {
        let config = SupabaseConfig {
            project_url: Url::parse("https://abc123.supabase.co").unwrap(),
            anon_key: SecretString::from("super_secret_anon_key"),
            service_role_key: Some(SecretString::from("super_secret_service_key")),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("abc123.supabase.co"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_anon_key"));
        assert!(!debug_output.contains("super_secret_service_key"));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials {
            email: "owner@example.com".to_string(),
            password: SecretString::from("hunter2hunter2"),
        };
        let debug_output = format!("{creds:?}");
        assert!(debug_output.contains("owner@example.com"));
        assert!(!debug_output.contains("hunter2"));
    }
}
