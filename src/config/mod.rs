// Configuration module entry point
// Loads ambient settings (logging, timeouts) and holds the fixed listen address

mod state;
mod types;

use std::net::{Ipv4Addr, SocketAddr};

pub use state::AppState;
pub use types::Config;

/// Host name announced at startup; the listener binds its loopback address
pub const HOST: &str = "localhost";

/// Fixed listen port
pub const PORT: u16 = 8000;

/// Optional config file, looked up in the working directory (extension inferred)
pub const DEFAULT_CONFIG_PATH: &str = "server";

/// Environment variable prefix, e.g. `HELLO_SERVER_LOGGING__ACCESS_LOG=true`
const ENV_PREFIX: &str = "HELLO_SERVER";

impl Config {
    /// Load configuration from the default file path
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_path, ENV_PREFIX)
    }

    /// Defaults, then the optional file, then `<env_prefix>_SECTION__KEY` variables
    fn load_with_env(config_path: &str, env_prefix: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("logging.access_log", false)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.header_read_timeout", 0)?
            .build()?;

        settings.try_deserialize()
    }
}

/// Socket address the server binds to
pub const fn listen_addr() -> SocketAddr {
    SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::LOCALHOST), PORT)
}

/// URL printed in the startup line
pub fn public_url() -> String {
    format!("http://{HOST}:{PORT}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/server").unwrap();
        assert!(!cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.logging.access_log_file.is_none());
        assert!(cfg.logging.error_log_file.is_none());
        assert_eq!(cfg.performance.keep_alive_timeout, 75);
        assert!(cfg.performance.keep_alive());
        // No request is ever timed out unless configured
        assert_eq!(cfg.performance.header_read_timeout(), None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("hello-server-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("server.toml");
        std::fs::write(
            &path,
            "[logging]\naccess_log = true\naccess_log_format = \"json\"\n\n[performance]\nkeep_alive_timeout = 0\nheader_read_timeout = 5\n",
        )
        .unwrap();

        let cfg = Config::load_from(dir.join("server").to_str().unwrap()).unwrap();
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "json");
        assert!(!cfg.performance.keep_alive());
        assert_eq!(
            cfg.performance.header_read_timeout(),
            Some(Duration::from_secs(5))
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_env_overrides_nested_keys() {
        std::env::set_var("HELLO_SERVER_ENVTEST_LOGGING__ACCESS_LOG", "true");
        std::env::set_var("HELLO_SERVER_ENVTEST_LOGGING__ACCESS_LOG_FORMAT", "common");
        std::env::set_var("HELLO_SERVER_ENVTEST_PERFORMANCE__KEEP_ALIVE_TIMEOUT", "0");

        let cfg = Config::load_with_env("does-not-exist/server", "HELLO_SERVER_ENVTEST").unwrap();
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "common");
        assert_eq!(cfg.performance.keep_alive_timeout, 0);
        assert_eq!(cfg.performance.header_read_timeout, 0);

        std::env::remove_var("HELLO_SERVER_ENVTEST_LOGGING__ACCESS_LOG");
        std::env::remove_var("HELLO_SERVER_ENVTEST_LOGGING__ACCESS_LOG_FORMAT");
        std::env::remove_var("HELLO_SERVER_ENVTEST_PERFORMANCE__KEEP_ALIVE_TIMEOUT");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("hello-server-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("server.toml"),
            "[performance]\nheader_read_timeout = \"soon\"\n",
        )
        .unwrap();

        let result = Config::load_from(dir.join("server").to_str().unwrap());
        assert!(result.is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_fixed_address() {
        assert_eq!(listen_addr().to_string(), "127.0.0.1:8000");
        assert_eq!(public_url(), "http://localhost:8000");
    }
}
