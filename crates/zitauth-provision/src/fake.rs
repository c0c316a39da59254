// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory [`IdentityApi`] that records calls and fails on request.

use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use zitauth_api::{
	ApiError, Application, BrandingConfig, IdentityApi, LoginPolicyConfig, NewUser, Organization,
	OrganizationList, Project, SecretString, User, UserList,
};

#[derive(Default)]
pub(crate) struct FakeApi {
	calls: Mutex<Vec<String>>,
	failures: Vec<String>,
	next_id: AtomicU32,
}

impl FakeApi {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fail every call whose recorded form starts with `prefix`.
	pub fn fail_when(mut self, prefix: &str) -> Self {
		self.failures.push(prefix.to_string());
		self
	}

	pub fn calls(&self) -> Vec<String> {
		self.calls.lock().unwrap().clone()
	}

	pub fn count(&self, prefix: &str) -> usize {
		self.calls().iter().filter(|c| c.starts_with(prefix)).count()
	}

	fn record(&self, call: String) -> zitauth_api::Result<()> {
		let failing = self.failures.iter().any(|f| call.starts_with(f.as_str()));
		self.calls.lock().unwrap().push(call.clone());
		if failing {
			return Err(ApiError::Status {
				endpoint: call,
				status: 500,
				body: r#"{"code":13,"message":"internal"}"#.to_string(),
			});
		}
		Ok(())
	}

	fn id(&self, prefix: &str) -> String {
		let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
		format!("{prefix}-{n}")
	}
}

#[async_trait]
impl IdentityApi for FakeApi {
	async fn create_organization(&self, name: &str) -> zitauth_api::Result<Organization> {
		self.record(format!("create_organization {name}"))?;
		Ok(Organization {
			id: self.id("org"),
			name: name.to_string(),
			primary_domain: format!("{}.localhost", name.to_lowercase()),
			state: "ORG_STATE_ACTIVE".to_string(),
			..Organization::default()
		})
	}

	async fn get_organization(&self, org_id: &str) -> zitauth_api::Result<Organization> {
		self.record(format!("get_organization {org_id}"))?;
		Ok(Organization {
			id: org_id.to_string(),
			..Organization::default()
		})
	}

	async fn list_organizations(&self) -> zitauth_api::Result<OrganizationList> {
		self.record("list_organizations".to_string())?;
		Ok(OrganizationList::default())
	}

	async fn create_user(&self, org_id: &str, user: &NewUser) -> zitauth_api::Result<User> {
		self.record(format!("create_user {org_id} {}", user.username))?;
		Ok(User {
			id: self.id("user"),
			username: user.username.clone(),
			state: "USER_STATE_ACTIVE".to_string(),
			preferred_login_name: user.username.clone(),
			email: user.email.clone(),
			first_name: user.first_name.clone(),
			last_name: user.last_name.clone(),
			..User::default()
		})
	}

	async fn list_users(&self) -> zitauth_api::Result<UserList> {
		self.record("list_users".to_string())?;
		Ok(UserList::default())
	}

	async fn delete_user(&self, user_id: &str) -> zitauth_api::Result<()> {
		self.record(format!("delete_user {user_id}"))
	}

	async fn create_project(&self, org_id: &str, name: &str) -> zitauth_api::Result<Project> {
		self.record(format!("create_project {org_id} {name}"))?;
		Ok(Project {
			id: self.id("project"),
			name: name.to_string(),
		})
	}

	async fn create_oidc_web_application(
		&self,
		org_id: &str,
		project_id: &str,
		name: &str,
		redirect_uris: &[String],
	) -> zitauth_api::Result<Application> {
		self.record(format!(
			"create_oidc_web_application {org_id} {project_id} {name} {}",
			redirect_uris.join(",")
		))?;
		let id = self.id("app");
		Ok(Application {
			client_id: format!("{id}@{project_id}"),
			id,
			name: name.to_string(),
			client_secret: Some(SecretString::new("fake-secret")),
		})
	}

	async fn grant_user_to_project(
		&self,
		org_id: &str,
		project_id: &str,
		user_id: &str,
	) -> zitauth_api::Result<()> {
		self.record(format!("grant_user_to_project {org_id} {project_id} {user_id}"))
	}

	async fn grant_org_to_project(
		&self,
		org_id: &str,
		project_id: &str,
		granted_org_id: &str,
	) -> zitauth_api::Result<()> {
		self.record(format!(
			"grant_org_to_project {org_id} {project_id} {granted_org_id}"
		))
	}

	async fn set_org_branding(
		&self,
		org_id: &str,
		branding: &BrandingConfig,
	) -> zitauth_api::Result<()> {
		self.record(format!("set_org_branding {org_id} {}", branding.primary_color))
	}

	async fn update_org_colors(
		&self,
		org_id: &str,
		branding: &BrandingConfig,
	) -> zitauth_api::Result<()> {
		self.record(format!("update_org_colors {org_id} {}", branding.primary_color))
	}

	async fn upload_org_logo(&self, org_id: &str, path: &Path) -> zitauth_api::Result<()> {
		self.record(format!("upload_org_logo {org_id} {}", path.display()))
	}

	async fn activate_branding(&self, org_id: &str) -> zitauth_api::Result<()> {
		self.record(format!("activate_branding {org_id}"))
	}

	async fn set_org_login_policy(
		&self,
		org_id: &str,
		_policy: &LoginPolicyConfig,
	) -> zitauth_api::Result<()> {
		self.record(format!("set_org_login_policy {org_id}"))
	}

	async fn get_org_login_policy(&self, org_id: &str) -> zitauth_api::Result<LoginPolicyConfig> {
		self.record(format!("get_org_login_policy {org_id}"))?;
		Ok(LoginPolicyConfig::default())
	}
}
