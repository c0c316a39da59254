// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Config file location.

use std::path::PathBuf;

use crate::ConfigError;

const APP_DIR: &str = "zitauth";
const CONFIG_FILE: &str = "config.toml";

/// Resolve the user config file: `$XDG_CONFIG_HOME/zitauth/config.toml`,
/// falling back to the platform config directory.
pub fn user_config_file() -> Result<PathBuf, ConfigError> {
	let config_home = std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.or_else(dirs::config_dir)
		.ok_or(ConfigError::ConfigDirNotFound)?;

	let path = config_home.join(APP_DIR).join(CONFIG_FILE);
	tracing::debug!(path = %path.display(), "resolved user config path");
	Ok(path)
}
