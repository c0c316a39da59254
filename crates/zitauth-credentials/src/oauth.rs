// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OAuth2 client-credentials exchange against `{base}/oauth/v2/token`.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use zitauth_common_secret::SecretString;

use crate::error::{CredentialError, Result};

/// Scope granting access to the management API.
pub const DEFAULT_SCOPE: &str = "openid profile email urn:zitadel:iam:org:project:id:zitadel:aud";

const TOKEN_PATH: &str = "/oauth/v2/token";

/// Successful token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
	pub access_token: SecretString,
	#[serde(default)]
	pub token_type: String,
	#[serde(default)]
	pub expires_in: u64,
	#[serde(default)]
	pub scope: Option<String>,
}

/// A machine user's client id/secret pair.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
	base_url: String,
	client_id: String,
	client_secret: SecretString,
	scope: String,
	timeout: Duration,
}

impl ClientCredentials {
	pub fn new(
		base_url: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: SecretString,
	) -> Self {
		Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
			client_id: client_id.into(),
			client_secret,
			scope: DEFAULT_SCOPE.to_string(),
			timeout: zitauth_common_http::DEFAULT_TIMEOUT,
		}
	}

	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = scope.into();
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn token_endpoint(&self) -> String {
		format!("{}{TOKEN_PATH}", self.base_url)
	}

	/// Perform the exchange with a fresh client bounded by the configured timeout.
	pub async fn exchange(&self) -> Result<TokenResponse> {
		let http = zitauth_common_http::new_client_with_timeout(self.timeout)?;
		self.exchange_with(&http).await
	}

	/// Perform the exchange on a caller-provided client. One request, no retry.
	#[instrument(skip_all, fields(client_id = %self.client_id))]
	pub async fn exchange_with(&self, http: &reqwest::Client) -> Result<TokenResponse> {
		let url = self.token_endpoint();
		debug!(url = %url, "requesting client-credentials token");

		let form = [
			("grant_type", "client_credentials"),
			("client_id", self.client_id.as_str()),
			("client_secret", self.client_secret.expose()),
			("scope", self.scope.as_str()),
		];

		let response = http.post(&url).form(&form).send().await?;
		let status = response.status();
		let body = response.text().await?;

		if status != StatusCode::OK {
			warn!(status = %status, "token request rejected");
			return Err(CredentialError::TokenRequest {
				status: status.as_u16(),
				body,
			});
		}

		let token: TokenResponse = serde_json::from_str(&body).map_err(CredentialError::Decode)?;
		if token.access_token.is_empty() {
			return Err(CredentialError::EmptyToken);
		}

		info!(
			expires_in = token.expires_in,
			token_type = %token.token_type,
			"obtained access token"
		);
		Ok(token)
	}
}
