// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bearer token bootstrap.
//!
//! A run obtains exactly one token, either by waiting for a token file that
//! another process writes ([`poll::wait_for_token`]) or by an OAuth2
//! client-credentials exchange ([`oauth::ClientCredentials`]). The token is
//! never refreshed.

pub mod error;
pub mod oauth;
pub mod poll;

pub use error::{CredentialError, Result};
pub use oauth::{ClientCredentials, TokenResponse, DEFAULT_SCOPE};
pub use poll::{wait_for_token, FileTokenSource, PollConfig, TokenSource};
pub use zitauth_common_secret::SecretString;

/// The two interchangeable strategies.
#[derive(Debug, Clone)]
pub enum Bootstrap {
	TokenFile {
		source: FileTokenSource,
		poll: PollConfig,
	},
	ClientCredentials(ClientCredentials),
}

impl Bootstrap {
	pub fn token_file(path: impl Into<std::path::PathBuf>, poll: PollConfig) -> Self {
		Self::TokenFile {
			source: FileTokenSource::new(path),
			poll,
		}
	}

	/// Obtain the bearer token for this run.
	pub async fn acquire(&self) -> Result<SecretString> {
		match self {
			Bootstrap::TokenFile { source, poll } => {
				tracing::info!(path = %source.path().display(), "waiting for token file");
				wait_for_token(source, *poll).await
			}
			Bootstrap::ClientCredentials(creds) => {
				tracing::info!("performing client-credentials exchange");
				Ok(creds.exchange().await?.access_token)
			}
		}
	}
}
