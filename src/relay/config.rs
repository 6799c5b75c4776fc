//! Relay configuration loaded from environment variables.
//!
//! Every setting has a default so the relay starts with zero configuration
//! for local development. Invalid values log a warning and fall back rather
//! than aborting startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use log::warn;
use tokio::time::Duration;

use crate::detector::ClassifierConfig;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address the HTTP server binds.
    /// Env: `RELAY_ADDR`
    /// Default: `127.0.0.1:5000`
    pub addr: SocketAddr,

    /// Program that classifies an image; the staged path is appended as the
    /// final argument.
    /// Env: `CLASSIFIER_CMD`
    /// Default: `python`
    pub classifier_cmd: String,

    /// Whitespace-separated arguments placed before the image path.
    /// Env: `CLASSIFIER_ARGS`
    /// Default: `emotion.py`
    pub classifier_args: Vec<String>,

    /// Directory where uploads are staged for the classifier. Created at
    /// startup when missing.
    /// Env: `UPLOAD_DIR`
    /// Default: `uploads`
    pub upload_dir: PathBuf,

    /// Maximum accepted request body size in bytes.
    /// Env: `MAX_UPLOAD_BYTES`
    /// Default: 10 MiB
    pub max_upload_bytes: usize,

    /// How long one classification may run.
    /// Env: `CLASSIFY_TIMEOUT_SECS`
    /// Default: 30
    pub classify_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 5000).into(),
            classifier_cmd: "python".to_string(),
            classifier_args: vec!["emotion.py".to_string()],
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: 10 * 1024 * 1024,
            classify_timeout: Duration::from_secs(30),
        }
    }
}

impl RelayConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any string-keyed lookup; `from_env` passes the
    /// process environment.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = get("RELAY_ADDR") {
            match addr.parse::<SocketAddr>() {
                Ok(parsed) => config.addr = parsed,
                Err(_) => warn!("Invalid RELAY_ADDR '{addr}', using default"),
            }
        }

        if let Some(cmd) = get("CLASSIFIER_CMD") {
            if !cmd.is_empty() {
                config.classifier_cmd = cmd;
            }
        }

        if let Some(args) = get("CLASSIFIER_ARGS") {
            config.classifier_args = split_args(&args);
        }

        if let Some(dir) = get("UPLOAD_DIR") {
            if !dir.is_empty() {
                config.upload_dir = PathBuf::from(dir);
            }
        }

        if let Some(bytes) = get("MAX_UPLOAD_BYTES") {
            match bytes.parse::<usize>() {
                Ok(parsed) if parsed > 0 => config.max_upload_bytes = parsed,
                _ => warn!("Invalid MAX_UPLOAD_BYTES '{bytes}', using default"),
            }
        }

        if let Some(secs) = get("CLASSIFY_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(parsed) if parsed > 0 => config.classify_timeout = Duration::from_secs(parsed),
                _ => warn!("Invalid CLASSIFY_TIMEOUT_SECS '{secs}', using default"),
            }
        }

        config
    }

    /// The classifier invocation this relay forwards uploads to.
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            command: self.classifier_cmd.clone(),
            args: self.classifier_args.clone(),
            timeout: self.classify_timeout,
        }
    }
}

fn split_args(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_original_deployment() {
        let config = RelayConfig::default();
        assert_eq!(config.addr, ([127, 0, 0, 1], 5000).into());
        assert_eq!(config.classifier_cmd, "python");
        assert_eq!(config.classifier_args, vec!["emotion.py".to_string()]);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.classify_timeout, Duration::from_secs(30));
    }

    #[test]
    fn classifier_args_split_on_whitespace() {
        assert_eq!(
            split_args("-m  detector.cli --quiet"),
            vec!["-m".to_string(), "detector.cli".to_string(), "--quiet".to_string()]
        );
        assert!(split_args("").is_empty());
    }

    #[test]
    fn classifier_config_carries_the_relay_settings() {
        let mut config = RelayConfig::default();
        config.classifier_cmd = "python3".to_string();
        config.classify_timeout = Duration::from_secs(5);

        let classifier = config.classifier_config();
        assert_eq!(classifier.command, "python3");
        assert_eq!(classifier.timeout, Duration::from_secs(5));
        assert_eq!(classifier.args, config.classifier_args);
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn lookup_values_land_in_the_config() {
        let config = RelayConfig::from_lookup(lookup(&[
            ("RELAY_ADDR", "0.0.0.0:8080"),
            ("CLASSIFIER_CMD", "python3"),
            ("CLASSIFIER_ARGS", "-m detector.cli"),
            ("UPLOAD_DIR", "/tmp/relay-uploads"),
            ("MAX_UPLOAD_BYTES", "2048"),
            ("CLASSIFY_TIMEOUT_SECS", "7"),
        ]));

        assert_eq!(config.addr, ([0, 0, 0, 0], 8080).into());
        assert_eq!(config.classifier_cmd, "python3");
        assert_eq!(
            config.classifier_args,
            vec!["-m".to_string(), "detector.cli".to_string()]
        );
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/relay-uploads"));
        assert_eq!(config.max_upload_bytes, 2048);
        assert_eq!(config.classify_timeout, Duration::from_secs(7));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = RelayConfig::from_lookup(lookup(&[
            ("RELAY_ADDR", "not-an-address"),
            ("CLASSIFIER_CMD", ""),
            ("UPLOAD_DIR", ""),
            ("MAX_UPLOAD_BYTES", "zero"),
            ("CLASSIFY_TIMEOUT_SECS", "0"),
        ]));

        let defaults = RelayConfig::default();
        assert_eq!(config.addr, defaults.addr);
        assert_eq!(config.classifier_cmd, defaults.classifier_cmd);
        assert_eq!(config.upload_dir, defaults.upload_dir);
        assert_eq!(config.max_upload_bytes, defaults.max_upload_bytes);
        assert_eq!(config.classify_timeout, defaults.classify_timeout);
    }
}
