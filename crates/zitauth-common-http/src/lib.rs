// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared HTTP client construction.
//!
//! Both the token exchange and the management client build their reqwest
//! client here so they carry the same User-Agent and request timeout.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// Per-request timeout applied when callers do not pick their own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Returns the User-Agent sent on every request.
///
/// Format: `zitauth/{version} ({os}-{arch})`
pub fn user_agent() -> String {
	format!(
		"zitauth/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}

/// Creates a client builder carrying the standard User-Agent.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Builds a client whose requests are bounded by `timeout`.
pub fn new_client_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
	tracing::debug!(timeout_ms = timeout.as_millis() as u64, "building HTTP client");
	builder().timeout(timeout).build()
}

/// Builds a client with [`DEFAULT_TIMEOUT`].
pub fn new_client() -> Result<Client, reqwest::Error> {
	new_client_with_timeout(DEFAULT_TIMEOUT)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_expected_shape() {
		let ua = user_agent();
		assert!(ua.starts_with("zitauth/"));
		assert!(ua.contains(env!("CARGO_PKG_VERSION")));
		assert!(ua.ends_with(')'));
	}

	#[test]
	fn default_timeout_is_ten_seconds() {
		assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(10));
	}

	#[test]
	fn client_builds_with_custom_timeout() {
		assert!(new_client_with_timeout(Duration::from_millis(250)).is_ok());
	}
}
