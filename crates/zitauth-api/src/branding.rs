// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Organization branding (label policy) settings.

use serde::{Deserialize, Serialize};

/// Colors and flags pushed to an organization's label policy.
///
/// Field names match both the local `branding.json` format and the label
/// policy request body, so the same value is read from disk and sent as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandingConfig {
	pub primary_color: String,
	pub background_color: String,
	pub warn_color: String,
	pub font_color: String,
	pub primary_color_dark: String,
	pub background_color_dark: String,
	pub warn_color_dark: String,
	pub font_color_dark: String,
	pub hide_login_name_suffix: bool,
	pub disable_watermark: bool,
}

impl Default for BrandingConfig {
	fn default() -> Self {
		Self {
			primary_color: "#5469d4".to_string(),
			background_color: "#ffffff".to_string(),
			warn_color: "#ff3b5b".to_string(),
			font_color: "#000000".to_string(),
			primary_color_dark: "#5469d4".to_string(),
			background_color_dark: "#1a1a1a".to_string(),
			warn_color_dark: "#ff3b5b".to_string(),
			font_color_dark: "#ffffff".to_string(),
			hide_login_name_suffix: true,
			disable_watermark: true,
		}
	}
}
