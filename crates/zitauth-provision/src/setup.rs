// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Single-organization setup: one org, one project, one web application.

use tracing::{info, instrument};
use zitauth_api::{Application, IdentityApi, NewUser, Organization, Project, User};

use crate::error::{Result, Step, StepContext};

#[derive(Debug, Clone)]
pub struct SetupResult {
	pub organization: Organization,
	pub project: Project,
	pub application: Application,
}

/// Create an organization, a project inside it and a web OIDC application
/// in that project. Stops at the first failure; nothing is rolled back.
#[instrument(skip_all, fields(org = %org_name, project = %project_name))]
pub async fn setup_org_with_app(
	api: &dyn IdentityApi,
	org_name: &str,
	project_name: &str,
	app_name: &str,
	redirect_uris: &[String],
) -> Result<SetupResult> {
	let organization = api
		.create_organization(org_name)
		.await
		.step(Step::CreateOrganization)?;
	info!(org_id = %organization.id, "organization ready");

	let project = api
		.create_project(&organization.id, project_name)
		.await
		.step(Step::CreateProject)?;
	info!(project_id = %project.id, "project ready");

	let application = api
		.create_oidc_web_application(&organization.id, &project.id, app_name, redirect_uris)
		.await
		.step(Step::CreateApplication)?;
	info!(client_id = %application.client_id, "application ready");

	Ok(SetupResult {
		organization,
		project,
		application,
	})
}

/// Create a user in `org_id` and grant it access to `project_id`.
#[instrument(skip_all, fields(org_id = %org_id, username = %user.username))]
pub async fn create_user_with_grant(
	api: &dyn IdentityApi,
	org_id: &str,
	project_id: &str,
	user: &NewUser,
) -> Result<User> {
	let created = api.create_user(org_id, user).await.step(Step::CreateUser)?;
	api.grant_user_to_project(org_id, project_id, &created.id)
		.await
		.step(Step::GrantUser)?;
	info!(user_id = %created.id, "user created and granted");
	Ok(created)
}
