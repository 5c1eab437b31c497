use std::fmt;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;

pub const DEFAULT_ENDPOINT_URL: &str = "https://dbc-646e52e6-ebdc.cloud.databricks.com/serving-endpoints/BirdClassificationModel/invocations";

#[derive(Parser, Clone)]
#[command(name = "ripple-server")]
#[command(about = "Classifies uploaded bird photos through a remote model-serving endpoint", long_about = None)]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "RIPPLE_BIND", default_value = "127.0.0.1:8000")]
    pub bind: String,

    /// Model-serving invocation URL
    #[arg(long, env = "DATABRICKS_ENDPOINT_URL", default_value = DEFAULT_ENDPOINT_URL)]
    pub endpoint_url: Url,

    /// Bearer token sent with every inference request
    #[arg(long, env = "DATABRICKS_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Give up on the inference endpoint after this many seconds (no limit when unset)
    #[arg(long, env = "DATABRICKS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Largest accepted upload, in bytes
    #[arg(long, env = "RIPPLE_MAX_UPLOAD_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind", &self.bind)
            .field("endpoint_url", &self.endpoint_url.as_str())
            .field("token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_config(endpoint_url: &str) -> Config {
        Config::try_parse_from([
            "ripple-server",
            "--endpoint-url",
            endpoint_url,
            "--token",
            "secret-token",
        ])
        .unwrap()
    }

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["ripple-server", "--token", "t"]).unwrap();
        assert_eq!(config.bind, "127.0.0.1:8000");
        assert_eq!(config.endpoint_url.as_str(), DEFAULT_ENDPOINT_URL);
        assert_eq!(config.timeout(), None);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn timeout_flag() {
        let config =
            Config::try_parse_from(["ripple-server", "--token", "t", "--timeout-secs", "30"])
                .unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn rejects_invalid_url() {
        let result = Config::try_parse_from([
            "ripple-server",
            "--token",
            "t",
            "--endpoint-url",
            "not a url",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn debug_hides_token() {
        let rendered = format!("{:?}", test_config("http://localhost/invocations"));
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
