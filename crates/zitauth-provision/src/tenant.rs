// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared platform application with one organization per tenant.
//!
//! The platform organization owns a project and a single web application.
//! Each tenant gets its own organization, is granted the platform project,
//! and then receives the default branding. Users of every tenant sign in
//! through the same client id.

use std::fmt;

use tracing::{info, instrument, warn};
use zitauth_api::{Application, IdentityApi, NewUser, Organization, Project, User};

use crate::error::{ProvisionError, Result, Step, StepContext};
use crate::theme::ThemeAssets;

#[derive(Debug, Clone)]
pub struct PlatformSetup {
	pub platform_org: Organization,
	pub project: Project,
	pub shared_app: Application,
	pub redirect_uris: Vec<String>,
}

/// Optional branding steps run after a tenant is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandingStep {
	LoadConfig,
	SetBranding,
	UploadLogo,
	Activate,
}

impl fmt::Display for BrandingStep {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			BrandingStep::LoadConfig => "load branding config",
			BrandingStep::SetBranding => "set branding",
			BrandingStep::UploadLogo => "upload logo",
			BrandingStep::Activate => "activate branding",
		})
	}
}

/// A branding step that failed without aborting tenant creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandingWarning {
	pub step: BrandingStep,
	pub message: String,
}

impl fmt::Display for BrandingWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "failed to {}: {}", self.step, self.message)
	}
}

#[derive(Debug, Clone)]
pub struct TenantSetup {
	pub organization: Organization,
	pub warnings: Vec<BrandingWarning>,
}

impl TenantSetup {
	pub fn is_fully_branded(&self) -> bool {
		self.warnings.is_empty()
	}
}

/// Result of onboarding one tenant in a batch.
#[derive(Debug)]
pub struct TenantOutcome {
	pub name: String,
	pub result: Result<TenantSetup>,
}

/// Create the platform organization, its project and the shared application.
#[instrument(skip_all, fields(platform = %platform_name))]
pub async fn setup_platform_app(
	api: &dyn IdentityApi,
	platform_name: &str,
	project_name: &str,
	app_name: &str,
	redirect_uris: &[String],
) -> Result<PlatformSetup> {
	let platform_org = api
		.create_organization(platform_name)
		.await
		.step(Step::CreateOrganization)?;
	info!(org_id = %platform_org.id, "platform organization ready");

	let project = api
		.create_project(&platform_org.id, project_name)
		.await
		.step(Step::CreateProject)?;

	let shared_app = api
		.create_oidc_web_application(&platform_org.id, &project.id, app_name, redirect_uris)
		.await
		.step(Step::CreateApplication)?;
	info!(client_id = %shared_app.client_id, "shared application ready");

	Ok(PlatformSetup {
		platform_org,
		project,
		shared_app,
		redirect_uris: redirect_uris.to_vec(),
	})
}

/// Create a tenant organization and grant it the platform project.
///
/// Branding runs afterwards and is best effort: failures are logged and
/// returned in [`TenantSetup::warnings`].
#[instrument(skip_all, fields(tenant = %tenant_name))]
pub async fn add_tenant(
	api: &dyn IdentityApi,
	platform: &PlatformSetup,
	tenant_name: &str,
	theme: &ThemeAssets,
) -> Result<TenantSetup> {
	let organization = api
		.create_organization(tenant_name)
		.await
		.step(Step::CreateOrganization)?;
	info!(
		org_id = %organization.id,
		primary_domain = %organization.primary_domain,
		"tenant organization created"
	);

	api.grant_org_to_project(
		&platform.platform_org.id,
		&platform.project.id,
		&organization.id,
	)
	.await
	.step(Step::GrantProject)?;
	info!(org_id = %organization.id, "platform project granted to tenant");

	let warnings = apply_branding(api, &organization.id, theme).await;

	Ok(TenantSetup {
		organization,
		warnings,
	})
}

async fn apply_branding(
	api: &dyn IdentityApi,
	org_id: &str,
	theme: &ThemeAssets,
) -> Vec<BrandingWarning> {
	let mut warnings = Vec::new();

	let branding = match theme.load_branding().await {
		Ok(branding) => branding,
		Err(err) => {
			note(&mut warnings, org_id, BrandingStep::LoadConfig, err.to_string());
			return warnings;
		}
	};

	if let Err(err) = api.set_org_branding(org_id, &branding).await {
		note(&mut warnings, org_id, BrandingStep::SetBranding, err.to_string());
	}

	match theme.logo().await {
		Some(logo) => {
			if let Err(err) = api.upload_org_logo(org_id, logo).await {
				note(&mut warnings, org_id, BrandingStep::UploadLogo, err.to_string());
			}
		}
		None => warn!(path = %theme.logo_file.display(), "no logo found, skipping upload"),
	}

	if let Err(err) = api.activate_branding(org_id).await {
		note(&mut warnings, org_id, BrandingStep::Activate, err.to_string());
	}

	warnings
}

fn note(warnings: &mut Vec<BrandingWarning>, org_id: &str, step: BrandingStep, message: String) {
	warn!(org_id, step = %step, error = %message, "branding step failed");
	warnings.push(BrandingWarning { step, message });
}

/// Run [`add_tenant`] for each name in order. A failed tenant is recorded
/// and the next one is still attempted.
pub async fn onboard_tenants<S: AsRef<str>>(
	api: &dyn IdentityApi,
	platform: &PlatformSetup,
	names: &[S],
	theme: &ThemeAssets,
) -> Vec<TenantOutcome> {
	let mut outcomes = Vec::with_capacity(names.len());
	for name in names {
		let name = name.as_ref();
		let result = add_tenant(api, platform, name, theme).await;
		if let Err(err) = &result {
			warn!(tenant = name, error = %err, "tenant onboarding failed, continuing");
		}
		outcomes.push(TenantOutcome {
			name: name.to_string(),
			result,
		});
	}
	outcomes
}

/// Create a user inside a tenant organization with access to the platform
/// project.
#[instrument(skip_all, fields(tenant = %tenant.organization.name, username = %user.username))]
pub async fn create_tenant_user(
	api: &dyn IdentityApi,
	platform: &PlatformSetup,
	tenant: &TenantSetup,
	user: &NewUser,
) -> Result<User> {
	let tenant_id = &tenant.organization.id;
	let created = api
		.create_user(tenant_id, user)
		.await
		.step(Step::CreateUser)?;
	api.grant_user_to_project(tenant_id, &platform.project.id, &created.id)
		.await
		.step(Step::GrantUser)?;
	info!(user_id = %created.id, "tenant user created");
	Ok(created)
}

/// Successful tenants of a batch.
pub fn succeeded(outcomes: &[TenantOutcome]) -> impl Iterator<Item = &TenantSetup> {
	outcomes.iter().filter_map(|o| o.result.as_ref().ok())
}

/// Failed tenants of a batch with their errors.
pub fn failed(outcomes: &[TenantOutcome]) -> impl Iterator<Item = (&str, &ProvisionError)> {
	outcomes
		.iter()
		.filter_map(|o| o.result.as_ref().err().map(|e| (o.name.as_str(), e)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fake::FakeApi;
	use std::path::Path;
	use zitauth_api::SecretString;

	fn theme_in(dir: &Path) -> ThemeAssets {
		ThemeAssets::new(dir.join("branding.json"), dir.join("logo.svg"))
	}

	async fn platform(api: &FakeApi) -> PlatformSetup {
		setup_platform_app(
			api,
			"Platform",
			"Platform Project",
			"Shared App",
			&["http://localhost:3000/auth/callback".to_string()],
		)
		.await
		.unwrap()
	}

	#[tokio::test]
	async fn platform_setup_keeps_redirects() {
		let api = FakeApi::new();
		let platform = platform(&api).await;
		assert_eq!(platform.platform_org.name, "Platform");
		assert_eq!(platform.redirect_uris.len(), 1);
		assert!(platform.shared_app.client_id.ends_with(&platform.project.id));
	}

	#[tokio::test]
	async fn tenant_is_granted_and_branded() {
		let dir = tempfile::tempdir().unwrap();
		let theme = theme_in(dir.path());
		std::fs::write(&theme.logo_file, "<svg/>").unwrap();

		let api = FakeApi::new();
		let platform = platform(&api).await;
		let tenant = add_tenant(&api, &platform, "Tesla", &theme).await.unwrap();

		assert!(tenant.is_fully_branded());
		let org_id = &tenant.organization.id;
		assert_eq!(
			&api.calls()[3..],
			&[
				"create_organization Tesla".to_string(),
				format!(
					"grant_org_to_project {} {} {org_id}",
					platform.platform_org.id, platform.project.id
				),
				format!("set_org_branding {org_id} #5469d4"),
				format!("upload_org_logo {org_id} {}", theme.logo_file.display()),
				format!("activate_branding {org_id}"),
			]
		);
	}

	#[tokio::test]
	async fn branding_failures_are_warnings() {
		let dir = tempfile::tempdir().unwrap();
		let api = FakeApi::new()
			.fail_when("set_org_branding")
			.fail_when("activate_branding");
		let platform = platform(&api).await;

		let tenant = add_tenant(&api, &platform, "Acme", &theme_in(dir.path()))
			.await
			.unwrap();

		let steps: Vec<_> = tenant.warnings.iter().map(|w| w.step).collect();
		assert_eq!(steps, vec![BrandingStep::SetBranding, BrandingStep::Activate]);
		assert_eq!(api.count("upload_org_logo"), 0);
	}

	#[tokio::test]
	async fn bad_branding_file_skips_remaining_branding() {
		let dir = tempfile::tempdir().unwrap();
		let theme = theme_in(dir.path());
		std::fs::write(&theme.branding_file, "{").unwrap();

		let api = FakeApi::new();
		let platform = platform(&api).await;
		let tenant = add_tenant(&api, &platform, "Acme", &theme).await.unwrap();

		assert_eq!(tenant.warnings.len(), 1);
		assert_eq!(tenant.warnings[0].step, BrandingStep::LoadConfig);
		assert_eq!(api.count("set_org_branding"), 0);
		assert_eq!(api.count("activate_branding"), 0);
	}

	#[tokio::test]
	async fn failed_grant_aborts_tenant() {
		let dir = tempfile::tempdir().unwrap();
		let api = FakeApi::new().fail_when("grant_org_to_project");
		let platform = platform(&api).await;

		let err = add_tenant(&api, &platform, "Acme", &theme_in(dir.path()))
			.await
			.unwrap_err();
		assert_eq!(err.step(), Some(Step::GrantProject));
		assert_eq!(api.count("set_org_branding"), 0);
	}

	#[tokio::test]
	async fn one_failed_tenant_does_not_stop_the_batch() {
		let dir = tempfile::tempdir().unwrap();
		let api = FakeApi::new().fail_when("create_organization Tesla");
		let platform = platform(&api).await;

		let outcomes = onboard_tenants(
			&api,
			&platform,
			&["Tesla", "SpaceX", "Boring"],
			&theme_in(dir.path()),
		)
		.await;

		assert_eq!(outcomes.len(), 3);
		let ok: Vec<_> = succeeded(&outcomes)
			.map(|t| t.organization.name.as_str())
			.collect();
		assert_eq!(ok, vec!["SpaceX", "Boring"]);
		let bad: Vec<_> = failed(&outcomes).map(|(name, _)| name).collect();
		assert_eq!(bad, vec!["Tesla"]);
		assert_eq!(api.count("grant_org_to_project"), 2);
	}

	#[tokio::test]
	async fn failed_grant_does_not_stop_later_grants() {
		let dir = tempfile::tempdir().unwrap();
		// Platform setup allocates org-1, project-2 and app-3; Tesla becomes org-4.
		let tesla_grant = "grant_org_to_project org-1 project-2 org-4";
		let api = FakeApi::new().fail_when(tesla_grant);
		let platform = platform(&api).await;

		let outcomes = onboard_tenants(
			&api,
			&platform,
			&["Tesla", "SpaceX", "Boring"],
			&theme_in(dir.path()),
		)
		.await;

		let grants: Vec<_> = api
			.calls()
			.into_iter()
			.filter(|c| c.starts_with("grant_org_to_project"))
			.collect();
		assert_eq!(grants.len(), 3);
		assert_eq!(grants[0], tesla_grant);

		let bad: Vec<_> = failed(&outcomes).map(|(name, e)| (name, e.step())).collect();
		assert_eq!(bad, vec![("Tesla", Some(Step::GrantProject))]);
		let ok: Vec<_> = succeeded(&outcomes)
			.map(|t| t.organization.name.as_str())
			.collect();
		assert_eq!(ok, vec!["SpaceX", "Boring"]);
	}

	#[tokio::test]
	async fn tenant_user_lives_in_tenant_org() {
		let dir = tempfile::tempdir().unwrap();
		let api = FakeApi::new();
		let platform = platform(&api).await;
		let tenant = add_tenant(&api, &platform, "Tesla", &theme_in(dir.path()))
			.await
			.unwrap();

		let user = NewUser {
			username: "alice".to_string(),
			email: "alice@tesla.example".to_string(),
			first_name: "Alice".to_string(),
			last_name: "Smith".to_string(),
			password: SecretString::new("Password1!"),
		};
		let created = create_tenant_user(&api, &platform, &tenant, &user)
			.await
			.unwrap();

		let org_id = &tenant.organization.id;
		assert!(api.calls().contains(&format!("create_user {org_id} alice")));
		assert_eq!(
			api.calls().last().unwrap(),
			&format!(
				"grant_user_to_project {org_id} {} {}",
				platform.project.id, created.id
			)
		);
	}
}
