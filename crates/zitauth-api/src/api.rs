// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::Path;

use async_trait::async_trait;

use crate::branding::BrandingConfig;
use crate::error::Result;
use crate::login_policy::LoginPolicyConfig;
use crate::models::{Application, NewUser, Organization, OrganizationList, Project, User, UserList};

/// Operations against the identity system.
///
/// Provisioning flows depend on this trait rather than on a concrete HTTP
/// client. Calls are not idempotent; repeating a create either fails with a
/// conflict or creates a duplicate, depending on the server.
#[async_trait]
pub trait IdentityApi: Send + Sync {
	/// Create an organization and read it back for its server-assigned fields.
	async fn create_organization(&self, name: &str) -> Result<Organization>;

	async fn get_organization(&self, org_id: &str) -> Result<Organization>;

	/// All organizations visible to the caller (requires admin rights).
	async fn list_organizations(&self) -> Result<OrganizationList>;

	/// Import a human user into `org_id` with a verified email and a
	/// password that does not need changing.
	async fn create_user(&self, org_id: &str, user: &NewUser) -> Result<User>;

	async fn list_users(&self) -> Result<UserList>;

	async fn delete_user(&self, user_id: &str) -> Result<()>;

	async fn create_project(&self, org_id: &str, name: &str) -> Result<Project>;

	/// Create a web OIDC application. The returned client secret is only
	/// available from this call.
	async fn create_oidc_web_application(
		&self,
		org_id: &str,
		project_id: &str,
		name: &str,
		redirect_uris: &[String],
	) -> Result<Application>;

	async fn grant_user_to_project(&self, org_id: &str, project_id: &str, user_id: &str)
		-> Result<()>;

	/// Share `project_id` (owned by `org_id`) with `granted_org_id`.
	async fn grant_org_to_project(
		&self,
		org_id: &str,
		project_id: &str,
		granted_org_id: &str,
	) -> Result<()>;

	/// Create the organization's custom label policy.
	async fn set_org_branding(&self, org_id: &str, branding: &BrandingConfig) -> Result<()>;

	/// Update an existing custom label policy.
	async fn update_org_colors(&self, org_id: &str, branding: &BrandingConfig) -> Result<()>;

	/// Upload `path` as both the logo and the icon of the label policy.
	async fn upload_org_logo(&self, org_id: &str, path: &Path) -> Result<()>;

	/// Publish the preview label policy.
	async fn activate_branding(&self, org_id: &str) -> Result<()>;

	async fn set_org_login_policy(&self, org_id: &str, policy: &LoginPolicyConfig) -> Result<()>;

	async fn get_org_login_policy(&self, org_id: &str) -> Result<LoginPolicyConfig>;
}
