// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolved configuration with defaults applied.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use zitauth_common_secret::SecretString;

use crate::layer::ConfigLayer;
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_SCOPE: &str = "openid profile email urn:zitadel:iam:org:project:id:zitadel:aud";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_POLL_ATTEMPTS: u32 = 20;
pub const DEFAULT_POLL_DELAY_SECS: u64 = 2;
pub const DEFAULT_BRANDING_FILE: &str = "./theme/branding.json";
pub const DEFAULT_LOGO_FILE: &str = "./theme/logo.svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Trace,
	Debug,
	#[default]
	Info,
	Warn,
	Error,
}

impl LogLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::Trace => "trace",
			LogLevel::Debug => "debug",
			LogLevel::Info => "info",
			LogLevel::Warn => "warn",
			LogLevel::Error => "error",
		}
	}
}

impl FromStr for LogLevel {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"trace" => Ok(LogLevel::Trace),
			"debug" => Ok(LogLevel::Debug),
			"info" => Ok(LogLevel::Info),
			"warn" | "warning" => Ok(LogLevel::Warn),
			"error" => Ok(LogLevel::Error),
			other => Err(ConfigError::invalid_value(
				"logging.level",
				format!("unknown level '{other}'"),
			)),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Pretty,
	Compact,
	Json,
}

impl FromStr for LogFormat {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"pretty" => Ok(LogFormat::Pretty),
			"compact" => Ok(LogFormat::Compact),
			"json" => Ok(LogFormat::Json),
			other => Err(ConfigError::invalid_value(
				"logging.format",
				format!("unknown format '{other}'"),
			)),
		}
	}
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
	/// Identity system base URL, without trailing slash.
	pub base_url: String,
	pub request_timeout: Duration,
	/// Scope requested by the client-credentials exchange.
	pub scope: String,
}

#[derive(Debug, Clone)]
pub struct CredentialsConfig {
	pub client_id: Option<String>,
	pub client_secret: Option<SecretString>,
	pub token_path: Option<PathBuf>,
	pub poll_attempts: u32,
	pub poll_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct ThemeConfig {
	pub branding_file: PathBuf,
	pub logo_file: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
}

/// Which bootstrap strategy the configuration selects.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialMode {
	/// Wait for a provisioned token file.
	TokenFile {
		path: PathBuf,
		max_attempts: u32,
		delay: Duration,
	},
	/// Exchange client id/secret at the token endpoint.
	ClientCredentials {
		client_id: String,
		client_secret: SecretString,
	},
}

/// The final, validated configuration.
#[derive(Debug, Clone)]
pub struct ZitauthConfig {
	pub api: ApiConfig,
	pub credentials: CredentialsConfig,
	pub theme: ThemeConfig,
	pub logging: LoggingConfig,
}

impl ZitauthConfig {
	/// Apply defaults to a merged layer and validate the result.
	pub fn from_layer(layer: ConfigLayer) -> Result<Self, ConfigError> {
		let api = layer.api.unwrap_or_default();
		let creds = layer.credentials.unwrap_or_default();
		let theme = layer.theme.unwrap_or_default();
		let logging = layer.logging.unwrap_or_default();

		let base_url = api
			.base_url
			.unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
			.trim()
			.trim_end_matches('/')
			.to_string();

		let config = Self {
			api: ApiConfig {
				base_url,
				request_timeout: Duration::from_secs(
					api.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
				),
				scope: api.scope.unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
			},
			credentials: CredentialsConfig {
				client_id: creds.client_id.filter(|id| !id.trim().is_empty()),
				client_secret: creds.client_secret.filter(|s| !s.is_empty()),
				token_path: creds.token_path,
				poll_attempts: creds.poll_attempts.unwrap_or(DEFAULT_POLL_ATTEMPTS),
				poll_delay: Duration::from_secs(creds.poll_delay_secs.unwrap_or(DEFAULT_POLL_DELAY_SECS)),
			},
			theme: ThemeConfig {
				branding_file: theme
					.branding_file
					.unwrap_or_else(|| PathBuf::from(DEFAULT_BRANDING_FILE)),
				logo_file: theme
					.logo_file
					.unwrap_or_else(|| PathBuf::from(DEFAULT_LOGO_FILE)),
			},
			logging: LoggingConfig {
				level: logging.level.unwrap_or_default(),
				format: logging.format.unwrap_or_default(),
			},
		};

		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.api.base_url.is_empty() {
			return Err(ConfigError::invalid_value("api.base_url", "base_url cannot be empty"));
		}
		if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
			return Err(ConfigError::invalid_value(
				"api.base_url",
				"base_url must start with http:// or https://",
			));
		}
		if self.api.request_timeout.is_zero() {
			return Err(ConfigError::invalid_value(
				"api.request_timeout_secs",
				"timeout must be greater than zero",
			));
		}
		if self.credentials.poll_attempts == 0 {
			return Err(ConfigError::invalid_value(
				"credentials.poll_attempts",
				"at least one attempt is required",
			));
		}
		Ok(())
	}

	/// Select the bootstrap strategy. A token path takes precedence over
	/// client credentials; the two are never combined.
	pub fn credential_mode(&self) -> Result<CredentialMode, ConfigError> {
		let creds = &self.credentials;

		if let Some(path) = &creds.token_path {
			return Ok(CredentialMode::TokenFile {
				path: path.clone(),
				max_attempts: creds.poll_attempts,
				delay: creds.poll_delay,
			});
		}

		match (&creds.client_id, &creds.client_secret) {
			(Some(client_id), Some(client_secret)) => Ok(CredentialMode::ClientCredentials {
				client_id: client_id.clone(),
				client_secret: client_secret.clone(),
			}),
			(Some(_), None) => Err(ConfigError::missing_field("credentials.client_secret")),
			(None, Some(_)) => Err(ConfigError::missing_field("credentials.client_id")),
			(None, None) => Err(ConfigError::missing_field(
				"credentials.token_path or credentials.client_id/client_secret",
			)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layer::{ApiLayer, CredentialsLayer};

	#[test]
	fn empty_layer_resolves_to_defaults() {
		let config = ZitauthConfig::from_layer(ConfigLayer::default()).unwrap();
		assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
		assert_eq!(config.api.request_timeout, Duration::from_secs(10));
		assert_eq!(config.credentials.poll_attempts, 20);
		assert_eq!(config.credentials.poll_delay, Duration::from_secs(2));
		assert_eq!(config.theme.branding_file, PathBuf::from("./theme/branding.json"));
		assert_eq!(config.logging.level, LogLevel::Info);
	}

	#[test]
	fn trailing_slashes_are_trimmed_from_base_url() {
		let layer = ConfigLayer {
			api: Some(ApiLayer {
				base_url: Some("https://id.example.com//".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		let config = ZitauthConfig::from_layer(layer).unwrap();
		assert_eq!(config.api.base_url, "https://id.example.com");
	}

	#[test]
	fn non_http_base_url_is_rejected() {
		let layer = ConfigLayer {
			api: Some(ApiLayer {
				base_url: Some("ftp://example.com".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		let err = ZitauthConfig::from_layer(layer).unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "api.base_url"));
	}

	#[test]
	fn zero_poll_attempts_is_rejected() {
		let layer = ConfigLayer {
			credentials: Some(CredentialsLayer {
				poll_attempts: Some(0),
				..Default::default()
			}),
			..Default::default()
		};
		assert!(ZitauthConfig::from_layer(layer).is_err());
	}

	#[test]
	fn token_path_wins_over_client_credentials() {
		let layer = ConfigLayer {
			credentials: Some(CredentialsLayer {
				client_id: Some("go-client-id".to_string()),
				client_secret: Some(SecretString::new("secret")),
				token_path: Some(PathBuf::from("/run/zitadel/admin.pat")),
				poll_attempts: Some(3),
				poll_delay_secs: Some(1),
			}),
			..Default::default()
		};
		let mode = ZitauthConfig::from_layer(layer).unwrap().credential_mode().unwrap();
		assert_eq!(
			mode,
			CredentialMode::TokenFile {
				path: PathBuf::from("/run/zitadel/admin.pat"),
				max_attempts: 3,
				delay: Duration::from_secs(1),
			}
		);
	}

	#[test]
	fn client_credentials_selected_without_token_path() {
		let layer = ConfigLayer {
			credentials: Some(CredentialsLayer {
				client_id: Some("go-client-id".to_string()),
				client_secret: Some(SecretString::new("secret")),
				..Default::default()
			}),
			..Default::default()
		};
		let mode = ZitauthConfig::from_layer(layer).unwrap().credential_mode().unwrap();
		match mode {
			CredentialMode::ClientCredentials {
				client_id,
				client_secret,
			} => {
				assert_eq!(client_id, "go-client-id");
				assert_eq!(client_secret.expose(), "secret");
			}
			other => panic!("unexpected mode: {other:?}"),
		}
	}

	#[test]
	fn missing_secret_is_reported() {
		let layer = ConfigLayer {
			credentials: Some(CredentialsLayer {
				client_id: Some("go-client-id".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		let err = ZitauthConfig::from_layer(layer)
			.unwrap()
			.credential_mode()
			.unwrap_err();
		assert!(matches!(err, ConfigError::MissingField(ref f) if f == "credentials.client_secret"));
	}

	#[test]
	fn no_credentials_is_reported() {
		let config = ZitauthConfig::from_layer(ConfigLayer::default()).unwrap();
		assert!(matches!(
			config.credential_mode(),
			Err(ConfigError::MissingField(_))
		));
	}

	#[test]
	fn log_level_parses_case_insensitively() {
		assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
		assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
		assert!("loud".parse::<LogLevel>().is_err());
	}
}
