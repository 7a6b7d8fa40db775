use std::{env, path::PathBuf};

/// AppConfig
///
/// Holds the host's configuration. Immutable once loaded and carried in
/// `AppState`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Address the HTTP listener binds to.
    pub bind_addr: String,
    // Path prefix the SPA is deployed under, always with leading and trailing slash.
    pub base_url: String,
    // Build output of the SPA: index.html plus the assets/ directory.
    pub dist_dir: PathBuf,
    // Runtime environment marker. Selects the log format.
    pub env: Env,
}

/// Env
///
/// Runtime context: human-readable logs locally, JSON logs in production.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Non-panicking values for test state setup, no environment variables needed.
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            base_url: "/".to_string(),
            dist_dir: PathBuf::from("dist"),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables at startup.
    ///
    /// # Panics
    /// Panics in production when `APP_DIST_DIR` is not set; a production host
    /// must not guess where the built SPA lives.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let dist_dir = match env {
            Env::Production => env::var("APP_DIST_DIR")
                .expect("FATAL: APP_DIST_DIR must be set in production."),
            Env::Local => env::var("APP_DIST_DIR").unwrap_or_else(|_| "dist".to_string()),
        };

        Self {
            bind_addr: env::var("APP_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            base_url: normalize_base(&env::var("APP_BASE_URL").unwrap_or_default()),
            dist_dir: PathBuf::from(dist_dir),
            env,
        }
    }

    pub fn shell_path(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.dist_dir.join("assets")
    }
}

/// normalize_base
///
/// `app`, `/app` and `/app/` all become `/app/`; empty becomes `/`.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_base;

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(normalize_base(""), "/");
        assert_eq!(normalize_base("/"), "/");
        assert_eq!(normalize_base("app"), "/app/");
        assert_eq!(normalize_base("/app"), "/app/");
        assert_eq!(normalize_base("/app/"), "/app/");
    }
}
