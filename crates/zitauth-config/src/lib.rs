// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for zitauth.
//!
//! Layers, lowest precedence first:
//! - built-in defaults
//! - TOML file (`$XDG_CONFIG_HOME/zitauth/config.toml`, or an explicit path)
//! - `ZITAUTH_*` environment variables
//! - command line overrides

pub mod error;
pub mod layer;
pub mod paths;
pub mod runtime;
pub mod sources;

use std::path::Path;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use runtime::{
	ApiConfig, CredentialMode, CredentialsConfig, LogFormat, LogLevel, LoggingConfig, ThemeConfig,
	ZitauthConfig,
};
pub use sources::{CliOverrides, EnvSource, FileSource};

/// Load configuration from all sources.
///
/// When `config_file` is given it must exist; otherwise the per-user file is
/// read if present.
pub fn load_config(
	config_file: Option<&Path>,
	cli: CliOverrides,
) -> Result<ZitauthConfig, ConfigError> {
	let file = match config_file {
		Some(path) => FileSource::required(path),
		None => match paths::user_config_file() {
			Ok(path) => FileSource::optional(path),
			Err(e) => {
				tracing::debug!(error = %e, "no user config directory, skipping config file");
				return load_from_layers([EnvSource::process().load()?, cli.into_layer()?]);
			}
		},
	};

	load_from_layers([file.load()?, EnvSource::process().load()?, cli.into_layer()?])
}

/// Merge layers in order (later wins) and resolve defaults.
pub fn load_from_layers(
	layers: impl IntoIterator<Item = ConfigLayer>,
) -> Result<ZitauthConfig, ConfigError> {
	let mut merged = ConfigLayer::default();
	for layer in layers {
		merged.merge(layer);
	}
	ZitauthConfig::from_layer(merged)
}
