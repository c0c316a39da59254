// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: files, environment, CLI.

use std::path::PathBuf;

use tracing::{debug, trace};
use zitauth_common_secret::SecretString;

use crate::layer::ConfigLayer;
use crate::ConfigError;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "ZITAUTH_";

/// TOML file source.
pub struct FileSource {
	path: PathBuf,
	required: bool,
}

impl FileSource {
	/// A file that is skipped when absent (the per-user config).
	pub fn optional(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: false,
		}
	}

	/// A file the operator named explicitly; absence is an error.
	pub fn required(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: true,
		}
	}

	pub fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			if self.required {
				return Err(ConfigError::Io(std::io::Error::new(
					std::io::ErrorKind::NotFound,
					format!("config file not found: {}", self.path.display()),
				)));
			}
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path)?;
		toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})
	}
}

/// Environment variable source.
///
/// Recognized: `ZITAUTH_BASE_URL`, `ZITAUTH_REQUEST_TIMEOUT_SECS`,
/// `ZITAUTH_SCOPE`, `ZITAUTH_CLIENT_ID`, `ZITAUTH_CLIENT_SECRET` (or
/// `ZITAUTH_CLIENT_SECRET_FILE`), `ZITAUTH_TOKEN_PATH`,
/// `ZITAUTH_POLL_ATTEMPTS`, `ZITAUTH_POLL_DELAY_SECS`,
/// `ZITAUTH_BRANDING_FILE`, `ZITAUTH_LOGO_FILE`, `ZITAUTH_LOG_LEVEL`,
/// `ZITAUTH_LOG_FORMAT`.
pub struct EnvSource {
	vars: Vec<(String, String)>,
}

impl EnvSource {
	/// Snapshot the process environment.
	pub fn process() -> Self {
		Self::from_vars(std::env::vars())
	}

	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: vars
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.filter(|(k, _)| k.starts_with(ENV_PREFIX))
				.collect(),
		}
	}

	fn get(&self, var: &str) -> Option<&str> {
		self.vars
			.iter()
			.find(|(k, _)| k == var)
			.map(|(_, v)| v.trim())
			.filter(|v| !v.is_empty())
	}

	/// Load a secret from `VAR_FILE` (trimmed file content) or else `VAR`.
	///
	/// `VAR_FILE` wins when both are set. Empty values count as unset.
	pub fn load_secret_env(&self, var: &str) -> Result<Option<SecretString>, ConfigError> {
		let file_var = format!("{var}_FILE");
		if let Some(path) = self.get(&file_var) {
			let path = PathBuf::from(path);
			let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::SecretFile {
				var: file_var,
				path,
				source,
			})?;
			return Ok(Some(SecretString::new(content).trimmed()));
		}
		Ok(self.get(var).map(SecretString::new))
	}

	pub fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let mut layer = ConfigLayer::default();

		if let Some(secret) = self.load_secret_env("ZITAUTH_CLIENT_SECRET")? {
			trace!("loaded client secret from environment");
			layer.credentials_mut().client_secret = Some(secret);
		}

		for (key, value) in &self.vars {
			let value = value.trim().to_string();
			if value.is_empty() {
				continue;
			}
			trace!(key = %key, "processing env var");

			match key.as_str() {
				"ZITAUTH_BASE_URL" => layer.api_mut().base_url = Some(value),
				"ZITAUTH_REQUEST_TIMEOUT_SECS" => {
					layer.api_mut().request_timeout_secs = Some(parse_number(key, &value)?)
				}
				"ZITAUTH_SCOPE" => layer.api_mut().scope = Some(value),
				"ZITAUTH_CLIENT_ID" => layer.credentials_mut().client_id = Some(value),
				"ZITAUTH_CLIENT_SECRET" | "ZITAUTH_CLIENT_SECRET_FILE" => {}
				"ZITAUTH_TOKEN_PATH" => layer.credentials_mut().token_path = Some(PathBuf::from(value)),
				"ZITAUTH_POLL_ATTEMPTS" => {
					layer.credentials_mut().poll_attempts = Some(parse_number(key, &value)?)
				}
				"ZITAUTH_POLL_DELAY_SECS" => {
					layer.credentials_mut().poll_delay_secs = Some(parse_number(key, &value)?)
				}
				"ZITAUTH_BRANDING_FILE" => layer.theme_mut().branding_file = Some(PathBuf::from(value)),
				"ZITAUTH_LOGO_FILE" => layer.theme_mut().logo_file = Some(PathBuf::from(value)),
				"ZITAUTH_LOG_LEVEL" => layer.logging_mut().level = Some(value.parse()?),
				"ZITAUTH_LOG_FORMAT" => layer.logging_mut().format = Some(value.parse()?),
				_ => trace!(key = %key, "ignoring unrecognized env var"),
			}
		}

		Ok(layer)
	}
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
	value
		.parse()
		.map_err(|_| ConfigError::invalid_value(key, format!("'{value}' is not a valid number")))
}

/// Values supplied on the command line; highest precedence.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub base_url: Option<String>,
	pub client_id: Option<String>,
	pub client_secret: Option<SecretString>,
	pub token_path: Option<PathBuf>,
	pub log_level: Option<String>,
	pub json_logs: bool,
}

impl CliOverrides {
	pub fn into_layer(self) -> Result<ConfigLayer, ConfigError> {
		let mut layer = ConfigLayer::default();
		if let Some(url) = self.base_url {
			layer.api_mut().base_url = Some(url);
		}
		if let Some(id) = self.client_id {
			layer.credentials_mut().client_id = Some(id);
		}
		if let Some(secret) = self.client_secret {
			layer.credentials_mut().client_secret = Some(secret);
		}
		if let Some(path) = self.token_path {
			layer.credentials_mut().token_path = Some(path);
		}
		if let Some(level) = self.log_level {
			layer.logging_mut().level = Some(level.parse()?);
		}
		if self.json_logs {
			layer.logging_mut().format = Some(crate::runtime::LogFormat::Json);
		}
		Ok(layer)
	}
}
