// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Organization login policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Passwordless (passkey) login mode.
///
/// Written in config files as an absent or empty string, `"allowed"` or
/// `"required"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PasswordlessType {
	#[default]
	Disabled,
	Allowed,
	Required,
}

impl PasswordlessType {
	pub fn as_str(&self) -> &'static str {
		match self {
			PasswordlessType::Disabled => "",
			PasswordlessType::Allowed => "allowed",
			PasswordlessType::Required => "required",
		}
	}

	/// Value understood by the management API.
	///
	/// The API has no separate "required" mode, so it maps onto allowed.
	pub(crate) fn to_wire(self) -> &'static str {
		match self {
			PasswordlessType::Disabled => "PASSWORDLESS_TYPE_NOT_ALLOWED",
			PasswordlessType::Allowed | PasswordlessType::Required => "PASSWORDLESS_TYPE_ALLOWED",
		}
	}

	pub(crate) fn from_wire(value: &str) -> Self {
		match value {
			"PASSWORDLESS_TYPE_ALLOWED" => PasswordlessType::Allowed,
			_ => PasswordlessType::Disabled,
		}
	}
}

impl fmt::Display for PasswordlessType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PasswordlessType::Disabled => f.write_str("disabled"),
			other => f.write_str(other.as_str()),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePasswordlessTypeError(String);

impl fmt::Display for ParsePasswordlessTypeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"invalid passwordless type '{}': expected \"\", \"allowed\" or \"required\"",
			self.0
		)
	}
}

impl std::error::Error for ParsePasswordlessTypeError {}

impl FromStr for PasswordlessType {
	type Err = ParsePasswordlessTypeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"" | "disabled" => Ok(PasswordlessType::Disabled),
			"allowed" => Ok(PasswordlessType::Allowed),
			"required" => Ok(PasswordlessType::Required),
			_ => Err(ParsePasswordlessTypeError(s.to_string())),
		}
	}
}

impl Serialize for PasswordlessType {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for PasswordlessType {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = Option::<String>::deserialize(deserializer)?;
		match raw {
			None => Ok(PasswordlessType::Disabled),
			Some(value) => value.parse().map_err(serde::de::Error::custom),
		}
	}
}

/// Authentication options applied to one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginPolicyConfig {
	/// Shows the self-registration button on the login page.
	pub allow_register: bool,
	pub allow_username_password: bool,
	pub allow_external_idp: bool,
	pub force_mfa: bool,
	/// Only applies the MFA requirement to local password logins.
	pub force_mfa_local_only: bool,
	pub hide_password_reset: bool,
	/// Report a generic error for unknown usernames.
	pub ignore_unknown_usernames: bool,
	/// Resolve the organization from the email domain at login.
	pub allow_domain_discovery: bool,
	pub disable_login_with_email: bool,
	pub disable_login_with_phone: bool,
	#[serde(skip_serializing_if = "is_disabled")]
	pub passwordless_type: PasswordlessType,
	#[serde(skip_serializing_if = "String::is_empty")]
	pub default_redirect_uri: String,
}

fn is_disabled(value: &PasswordlessType) -> bool {
	*value == PasswordlessType::Disabled
}

impl Default for LoginPolicyConfig {
	fn default() -> Self {
		Self {
			allow_register: false,
			allow_username_password: true,
			allow_external_idp: false,
			force_mfa: false,
			force_mfa_local_only: false,
			hide_password_reset: false,
			ignore_unknown_usernames: false,
			allow_domain_discovery: false,
			disable_login_with_email: false,
			disable_login_with_phone: true,
			passwordless_type: PasswordlessType::Disabled,
			default_redirect_uri: String::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn default_disables_registration_and_phone_login() {
		let policy = LoginPolicyConfig::default();
		assert!(!policy.allow_register);
		assert!(policy.allow_username_password);
		assert!(policy.disable_login_with_phone);
		assert!(!policy.disable_login_with_email);
		assert_eq!(policy.passwordless_type, PasswordlessType::Disabled);
		assert!(policy.default_redirect_uri.is_empty());
	}

	#[test]
	fn passwordless_reads_config_values() {
		let policy: LoginPolicyConfig =
			serde_json::from_str(r#"{"passwordlessType": "required"}"#).unwrap();
		assert_eq!(policy.passwordless_type, PasswordlessType::Required);

		let policy: LoginPolicyConfig = serde_json::from_str(r#"{"passwordlessType": ""}"#).unwrap();
		assert_eq!(policy.passwordless_type, PasswordlessType::Disabled);

		let policy: LoginPolicyConfig = serde_json::from_str(r#"{"passwordlessType": null}"#).unwrap();
		assert_eq!(policy.passwordless_type, PasswordlessType::Disabled);
	}

	#[test]
	fn unknown_passwordless_value_is_rejected() {
		let err = serde_json::from_str::<LoginPolicyConfig>(r#"{"passwordlessType": "sometimes"}"#)
			.unwrap_err();
		assert!(err.to_string().contains("sometimes"));
	}

	#[test]
	fn disabled_passwordless_is_omitted() {
		let value = serde_json::to_value(LoginPolicyConfig::default()).unwrap();
		assert!(value.get("passwordlessType").is_none());
		assert!(value.get("defaultRedirectUri").is_none());
		assert_eq!(value["disableLoginWithPhone"], true);
	}

	#[test]
	fn wire_mapping_collapses_required() {
		assert_eq!(PasswordlessType::Disabled.to_wire(), "PASSWORDLESS_TYPE_NOT_ALLOWED");
		assert_eq!(PasswordlessType::Required.to_wire(), "PASSWORDLESS_TYPE_ALLOWED");
		assert_eq!(
			PasswordlessType::from_wire("PASSWORDLESS_TYPE_ALLOWED"),
			PasswordlessType::Allowed
		);
		assert_eq!(PasswordlessType::from_wire("bogus"), PasswordlessType::Disabled);
	}

	proptest! {
		#[test]
		fn parse_accepts_any_case(upper in proptest::bool::ANY, idx in 0usize..3) {
			let names = ["", "allowed", "required"];
			let name = if upper { names[idx].to_uppercase() } else { names[idx].to_string() };
			let parsed: PasswordlessType = name.parse().unwrap();
			prop_assert_eq!(parsed.as_str(), names[idx]);
		}
	}
}
