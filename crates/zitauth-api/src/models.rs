// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resource records returned by the client.
//!
//! These mirror remote resources for the duration of one call; nothing here
//! is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zitauth_common_secret::SecretString;

/// Change metadata the server attaches to every resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDetails {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sequence: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub creation_date: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub change_date: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub resource_owner: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
	pub id: String,
	#[serde(default)]
	pub name: String,
	/// Assigned by the server, e.g. `acme.localhost`.
	#[serde(default)]
	pub primary_domain: String,
	#[serde(default)]
	pub state: String,
	#[serde(default)]
	pub details: ObjectDetails,
}

impl Organization {
	pub fn created_at(&self) -> Option<DateTime<Utc>> {
		self.details.creation_date
	}

	pub fn changed_at(&self) -> Option<DateTime<Utc>> {
		self.details.change_date
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDetails {
	/// Reported as a decimal string by the server.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub total_result: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub view_timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationList {
	#[serde(default)]
	pub details: ListDetails,
	#[serde(default)]
	pub result: Vec<Organization>,
}

impl OrganizationList {
	pub fn find_by_name(&self, name: &str) -> Option<&Organization> {
		self.result.iter().find(|org| org.name == name)
	}

	/// Server-reported total, falling back to the number of returned entries.
	pub fn total(&self) -> u64 {
		total_or_len(&self.details, self.result.len())
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
	pub id: String,
	pub name: String,
}

/// An OIDC application. The client secret is only ever returned by the
/// create call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
	pub id: String,
	pub name: String,
	pub client_id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub client_secret: Option<SecretString>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub id: String,
	pub username: String,
	#[serde(default)]
	pub state: String,
	#[serde(default)]
	pub preferred_login_name: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub first_name: String,
	#[serde(default)]
	pub last_name: String,
	#[serde(default)]
	pub details: ObjectDetails,
}

impl User {
	pub fn created_at(&self) -> Option<DateTime<Utc>> {
		self.details.creation_date
	}

	pub fn changed_at(&self) -> Option<DateTime<Utc>> {
		self.details.change_date
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserList {
	pub details: ListDetails,
	pub result: Vec<User>,
}

impl UserList {
	pub fn find_by_username(&self, username: &str) -> Option<&User> {
		self.result.iter().find(|user| user.username == username)
	}

	pub fn total(&self) -> u64 {
		total_or_len(&self.details, self.result.len())
	}
}

/// Input for creating a human user.
#[derive(Debug, Clone)]
pub struct NewUser {
	pub username: String,
	pub email: String,
	pub first_name: String,
	pub last_name: String,
	pub password: SecretString,
}

impl NewUser {
	pub fn display_name(&self) -> String {
		format!("{} {}", self.first_name, self.last_name)
			.trim()
			.to_string()
	}
}

fn total_or_len(details: &ListDetails, len: usize) -> u64 {
	details
		.total_result
		.as_deref()
		.and_then(|t| t.parse().ok())
		.unwrap_or(len as u64)
}
