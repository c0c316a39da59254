// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacted string wrapper for credentials.
//!
//! Bearer tokens and OAuth client secrets flow through config loading, the
//! credential bootstrap and every API request. [`SecretString`] keeps them out
//! of `Debug`/`Display` output (and therefore out of `tracing` fields), wipes
//! the buffer on drop, and only hands out the value through [`SecretString::expose`].
//!
//! ```
//! use zitauth_common_secret::SecretString;
//!
//! let token = SecretString::new("pat-123");
//! assert_eq!(format!("{token}"), "[REDACTED]");
//! assert_eq!(token.expose(), "pat-123");
//! ```

use std::fmt;

use zeroize::Zeroize;

/// Placeholder printed wherever a secret would otherwise appear.
pub const REDACTED: &str = "[REDACTED]";

/// A string credential that never prints its contents.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			inner: value.into(),
		}
	}

	/// Access the raw value. Call sites opt in explicitly.
	pub fn expose(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Returns a copy with surrounding whitespace removed.
	pub fn trimmed(&self) -> Self {
		Self::new(self.inner.trim())
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SecretString").field(&REDACTED).finish()
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

#[cfg(feature = "serde")]
mod serde_impl {
	use super::{SecretString, REDACTED};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	impl Serialize for SecretString {
		fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
			serializer.serialize_str(REDACTED)
		}
	}

	impl<'de> Deserialize<'de> for SecretString {
		fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
			String::deserialize(deserializer).map(SecretString::new)
		}
	}
}
