// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
	/// The token source never produced a non-empty token within the polling budget.
	#[error("token not available from {source_name} after {attempts} attempts: {reason}")]
	TokenUnavailable {
		source_name: String,
		attempts: u32,
		reason: String,
	},

	#[error("token request failed: {0}")]
	Transport(#[from] reqwest::Error),

	#[error("token request failed with status {status}: {body}")]
	TokenRequest { status: u16, body: String },

	#[error("failed to decode token response: {0}")]
	Decode(#[source] serde_json::Error),

	#[error("token endpoint returned an empty access token")]
	EmptyToken,
}

pub type Result<T> = std::result::Result<T, CredentialError>;
