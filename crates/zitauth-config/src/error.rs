// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur while loading and validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Reading a config file failed
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// A config file is not valid TOML for the expected schema
	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// A `*_FILE` environment variable pointed at an unreadable file
	#[error("failed to read secret file {path} (from {var}): {source}")]
	SecretFile {
		var: String,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A required setting has no value in any layer
	#[error("Missing required field: {0}")]
	MissingField(String),

	/// A setting is present but unusable
	#[error("Invalid value for {field}: {message}")]
	InvalidValue { field: String, message: String },

	/// No per-user config directory could be resolved
	#[error("Could not determine config directory")]
	ConfigDirNotFound,
}

impl ConfigError {
	pub fn missing_field(field: impl Into<String>) -> Self {
		Self::MissingField(field.into())
	}

	pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			field: field.into(),
			message: message.into(),
		}
	}
}
