// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the management client.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
	/// The base URL is not an absolute http(s) URL.
	#[error("invalid base URL '{url}': {reason}")]
	InvalidBaseUrl { url: String, reason: String },

	/// The org id is not a valid HTTP header value.
	#[error("invalid value for header {name}: {reason}")]
	InvalidHeader { name: &'static str, reason: String },

	/// The underlying HTTP client could not be constructed.
	#[error("failed to build HTTP client: {0}")]
	ClientBuild(#[source] reqwest::Error),

	/// The request could not be sent or the response could not be read.
	#[error("{endpoint}: request failed: {source}")]
	Transport {
		endpoint: String,
		#[source]
		source: reqwest::Error,
	},

	/// The server answered with status >= 400. `body` is the raw response text.
	#[error("{endpoint}: server returned {status}: {body}")]
	Status {
		endpoint: String,
		status: u16,
		body: String,
	},

	/// The response body did not match the expected shape.
	#[error("{endpoint}: failed to decode response: {source}")]
	Decode {
		endpoint: String,
		#[source]
		source: serde_json::Error,
	},

	/// A local file (e.g. a logo) could not be read. No request was sent.
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

impl ApiError {
	/// HTTP status for [`ApiError::Status`], `None` otherwise.
	pub fn status(&self) -> Option<u16> {
		match self {
			ApiError::Status { status, .. } => Some(*status),
			_ => None,
		}
	}

	pub fn is_status(&self) -> bool {
		matches!(self, ApiError::Status { .. })
	}

	pub fn is_decode(&self) -> bool {
		matches!(self, ApiError::Decode { .. })
	}

	pub fn is_transport(&self) -> bool {
		matches!(self, ApiError::Transport { .. })
	}
}

pub type Result<T> = std::result::Result<T, ApiError>;
