// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Local branding assets applied to new tenants.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zitauth_api::BrandingConfig;

use crate::error::{ProvisionError, Result};

pub const DEFAULT_BRANDING_FILE: &str = "./theme/branding.json";
pub const DEFAULT_LOGO_FILE: &str = "./theme/logo.svg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeAssets {
	pub branding_file: PathBuf,
	pub logo_file: PathBuf,
}

impl Default for ThemeAssets {
	fn default() -> Self {
		Self {
			branding_file: PathBuf::from(DEFAULT_BRANDING_FILE),
			logo_file: PathBuf::from(DEFAULT_LOGO_FILE),
		}
	}
}

impl ThemeAssets {
	pub fn new(branding_file: impl Into<PathBuf>, logo_file: impl Into<PathBuf>) -> Self {
		Self {
			branding_file: branding_file.into(),
			logo_file: logo_file.into(),
		}
	}

	pub async fn load_branding(&self) -> Result<BrandingConfig> {
		load_branding_config(&self.branding_file).await
	}

	/// The logo path, if the file exists.
	pub async fn logo(&self) -> Option<&Path> {
		match tokio::fs::metadata(&self.logo_file).await {
			Ok(meta) if meta.is_file() => Some(&self.logo_file),
			_ => None,
		}
	}
}

/// Read a branding JSON file. A missing file yields [`BrandingConfig::default`];
/// fields absent from the file keep their default values.
pub async fn load_branding_config(path: &Path) -> Result<BrandingConfig> {
	let data = match tokio::fs::read(path).await {
		Ok(data) => data,
		Err(err) if err.kind() == ErrorKind::NotFound => {
			warn!(path = %path.display(), "no branding file found, using default branding");
			return Ok(BrandingConfig::default());
		}
		Err(source) => {
			return Err(ProvisionError::BrandingRead {
				path: path.to_path_buf(),
				source,
			})
		}
	};

	let config = serde_json::from_slice(&data).map_err(|source| ProvisionError::BrandingParse {
		path: path.to_path_buf(),
		source,
	})?;
	debug!(path = %path.display(), "loaded branding file");
	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn missing_file_gives_default() {
		let dir = tempfile::tempdir().unwrap();
		let config = load_branding_config(&dir.path().join("branding.json"))
			.await
			.unwrap();
		assert_eq!(config, BrandingConfig::default());
	}

	#[tokio::test]
	async fn file_values_override_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("branding.json");
		std::fs::write(&path, r##"{"primaryColor": "#0a0a0a", "hideLoginNameSuffix": false}"##).unwrap();

		let config = load_branding_config(&path).await.unwrap();
		assert_eq!(config.primary_color, "#0a0a0a");
		assert!(!config.hide_login_name_suffix);
		assert_eq!(config.font_color, "#000000");
	}

	#[tokio::test]
	async fn unparsable_file_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("branding.json");
		std::fs::write(&path, "primaryColor = 1").unwrap();

		let err = load_branding_config(&path).await.unwrap_err();
		assert!(matches!(err, ProvisionError::BrandingParse { .. }));
	}

	#[tokio::test]
	async fn logo_is_only_reported_when_present() {
		let dir = tempfile::tempdir().unwrap();
		let assets = ThemeAssets::new(dir.path().join("branding.json"), dir.path().join("logo.svg"));
		assert!(assets.logo().await.is_none());

		std::fs::write(&assets.logo_file, "<svg/>").unwrap();
		assert_eq!(assets.logo().await, Some(assets.logo_file.as_path()));
	}

	#[test]
	fn default_assets_live_under_theme_dir() {
		let assets = ThemeAssets::default();
		assert_eq!(assets.branding_file, PathBuf::from("./theme/branding.json"));
		assert_eq!(assets.logo_file, PathBuf::from("./theme/logo.svg"));
	}
}
