// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer for merging from multiple sources.

use std::path::PathBuf;

use serde::Deserialize;
use zitauth_common_secret::SecretString;

use crate::runtime::{LogFormat, LogLevel};

/// Partial configuration - every field optional so layers can be stacked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
	#[serde(default)]
	pub api: Option<ApiLayer>,
	#[serde(default)]
	pub credentials: Option<CredentialsLayer>,
	#[serde(default)]
	pub theme: Option<ThemeLayer>,
	#[serde(default)]
	pub logging: Option<LoggingLayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiLayer {
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub request_timeout_secs: Option<u64>,
	#[serde(default)]
	pub scope: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsLayer {
	#[serde(default)]
	pub client_id: Option<String>,
	#[serde(default)]
	pub client_secret: Option<SecretString>,
	#[serde(default)]
	pub token_path: Option<PathBuf>,
	#[serde(default)]
	pub poll_attempts: Option<u32>,
	#[serde(default)]
	pub poll_delay_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeLayer {
	#[serde(default)]
	pub branding_file: Option<PathBuf>,
	#[serde(default)]
	pub logo_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingLayer {
	#[serde(default)]
	pub level: Option<LogLevel>,
	#[serde(default)]
	pub format: Option<LogFormat>,
}

fn merge_field<T>(base: &mut Option<T>, other: Option<T>) {
	if other.is_some() {
		*base = other;
	}
}

fn merge_section<T: Default>(base: &mut Option<T>, other: Option<T>, merge: impl FnOnce(&mut T, T)) {
	if let Some(other) = other {
		merge(base.get_or_insert_with(T::default), other);
	}
}

impl ConfigLayer {
	/// Overlay `other` on top of `self`; set fields in `other` win.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_section(&mut self.api, other.api, |base, o| {
			merge_field(&mut base.base_url, o.base_url);
			merge_field(&mut base.request_timeout_secs, o.request_timeout_secs);
			merge_field(&mut base.scope, o.scope);
		});
		merge_section(&mut self.credentials, other.credentials, |base, o| {
			merge_field(&mut base.client_id, o.client_id);
			merge_field(&mut base.client_secret, o.client_secret);
			merge_field(&mut base.token_path, o.token_path);
			merge_field(&mut base.poll_attempts, o.poll_attempts);
			merge_field(&mut base.poll_delay_secs, o.poll_delay_secs);
		});
		merge_section(&mut self.theme, other.theme, |base, o| {
			merge_field(&mut base.branding_file, o.branding_file);
			merge_field(&mut base.logo_file, o.logo_file);
		});
		merge_section(&mut self.logging, other.logging, |base, o| {
			merge_field(&mut base.level, o.level);
			merge_field(&mut base.format, o.format);
		});
	}

	pub(crate) fn api_mut(&mut self) -> &mut ApiLayer {
		self.api.get_or_insert_with(ApiLayer::default)
	}

	pub(crate) fn credentials_mut(&mut self) -> &mut CredentialsLayer {
		self.credentials.get_or_insert_with(CredentialsLayer::default)
	}

	pub(crate) fn logging_mut(&mut self) -> &mut LoggingLayer {
		self.logging.get_or_insert_with(LoggingLayer::default)
	}

	pub(crate) fn theme_mut(&mut self) -> &mut ThemeLayer {
		self.theme.get_or_insert_with(ThemeLayer::default)
	}
}
