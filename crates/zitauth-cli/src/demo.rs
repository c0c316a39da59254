// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end demo flows: single organization setup and multi-tenant onboarding.

use anyhow::{Context, Result};
use clap::Args;
use tracing::warn;

use zitauth_api::{Application, IdentityApi, NewUser, SecretString};
use zitauth_config::ZitauthConfig;
use zitauth_provision::{
	create_tenant_user, create_user_with_grant, oauth_url_examples, onboard_tenants,
	setup_org_with_app, setup_platform_app, unique_suffix, with_suffix, ThemeAssets,
	DEFAULT_REDIRECT_URI,
};

const DEMO_PASSWORD: &str = "Password1!";
const RULE: &str = "============================================================";

#[derive(Args, Debug, Clone)]
pub struct SetupArgs {
	/// Organization name (default: TestOrg-HHMMSS)
	#[arg(long)]
	pub org: Option<String>,
	#[arg(long, default_value = "Main Project")]
	pub project: String,
	#[arg(long, default_value = "Web Application")]
	pub app: String,
	/// Redirect URI (repeatable)
	#[arg(long = "redirect-uri", default_value = DEFAULT_REDIRECT_URI)]
	pub redirect_uris: Vec<String>,
	/// Skip creating the demo user
	#[arg(long)]
	pub no_user: bool,
}

impl Default for SetupArgs {
	fn default() -> Self {
		Self {
			org: None,
			project: "Main Project".to_string(),
			app: "Web Application".to_string(),
			redirect_uris: vec![DEFAULT_REDIRECT_URI.to_string()],
			no_user: false,
		}
	}
}

#[derive(Args, Debug, Clone)]
pub struct MultiTenantArgs {
	/// Platform organization name (default: Platform-HHMMSS)
	#[arg(long)]
	pub platform: Option<String>,
	#[arg(long, default_value = "Platform Project")]
	pub project: String,
	#[arg(long, default_value = "Shared Web App")]
	pub app: String,
	/// Redirect URI (repeatable)
	#[arg(long = "redirect-uri", default_value = DEFAULT_REDIRECT_URI)]
	pub redirect_uris: Vec<String>,
	/// Tenant names; a time suffix is appended to each
	#[arg(long = "tenant", default_values = ["Tesla", "SpaceX", "Boring"])]
	pub tenants: Vec<String>,
}

fn demo_user(name: &str, suffix: &str, first_name: &str, last_name: &str) -> NewUser {
	let username = with_suffix(name, suffix);
	NewUser {
		email: format!("{username}@example.com"),
		username,
		first_name: first_name.to_string(),
		last_name: last_name.to_string(),
		password: SecretString::new(DEMO_PASSWORD),
	}
}

fn print_credentials(app: &Application) {
	println!("\n{RULE}");
	println!("IMPORTANT: save these credentials, the secret is shown only once");
	println!("{RULE}");
	println!("Client ID:     {}", app.client_id);
	match &app.client_secret {
		Some(secret) => println!("Client Secret: {}", secret.expose()),
		None => println!("Client Secret: (none returned)"),
	}
	println!("{RULE}");
}

pub async fn setup(api: &dyn IdentityApi, args: SetupArgs) -> Result<()> {
	let suffix = unique_suffix();
	let org_name = args
		.org
		.unwrap_or_else(|| with_suffix("TestOrg", &suffix));

	let result = setup_org_with_app(api, &org_name, &args.project, &args.app, &args.redirect_uris)
		.await
		.context("organization setup failed")?;

	println!("Organization: {} ({})", result.organization.name, result.organization.id);
	println!("Project:      {} ({})", result.project.name, result.project.id);
	println!("Application:  {} ({})", result.application.name, result.application.id);
	print_credentials(&result.application);

	if !args.no_user {
		let user = demo_user("john.doe", &suffix, "John", "Doe");
		let created = create_user_with_grant(
			api,
			&result.organization.id,
			&result.project.id,
			&user,
		)
		.await
		.context("demo user creation failed")?;
		println!("\nUser {} ({}) created and granted access", created.username, created.id);
		println!("Password: {DEMO_PASSWORD}");
	}
	Ok(())
}

pub async fn multi_tenant(
	api: &dyn IdentityApi,
	config: &ZitauthConfig,
	args: MultiTenantArgs,
) -> Result<()> {
	let suffix = unique_suffix();
	let platform_name = args
		.platform
		.unwrap_or_else(|| with_suffix("Platform", &suffix));

	let platform = setup_platform_app(api, &platform_name, &args.project, &args.app, &args.redirect_uris)
		.await
		.context("platform setup failed")?;
	println!(
		"Platform: {} ({}), project {}",
		platform.platform_org.name, platform.platform_org.id, platform.project.id
	);
	print_credentials(&platform.shared_app);
	println!("All tenants sign in with this client id.");

	let theme = ThemeAssets::new(&config.theme.branding_file, &config.theme.logo_file);
	let names: Vec<String> = args
		.tenants
		.iter()
		.map(|name| with_suffix(name, &suffix))
		.collect();
	let outcomes = onboard_tenants(api, &platform, &names, &theme).await;

	let mut first_tenant = None;
	for outcome in &outcomes {
		match &outcome.result {
			Ok(tenant) => {
				println!(
					"\nTenant {}: org {} domain {}",
					outcome.name, tenant.organization.id, tenant.organization.primary_domain
				);
				for warning in &tenant.warnings {
					println!("  warning: {warning}");
				}
				first_tenant.get_or_insert(tenant);
			}
			Err(err) => println!("\nTenant {} failed: {err}", outcome.name),
		}
	}

	let Some(tenant) = first_tenant else {
		anyhow::bail!("no tenant could be onboarded");
	};

	let user = demo_user("alice", &suffix, "Alice", "Smith");
	match create_tenant_user(api, &platform, tenant, &user).await {
		Ok(created) => println!(
			"\nUser {} created in {} and granted the platform project",
			created.username, tenant.organization.name
		),
		Err(err) => warn!(error = %err, "demo tenant user could not be created"),
	}

	let urls = oauth_url_examples(&platform, tenant, &config.api.base_url)
		.context("failed to build authorize URLs")?;
	println!("\n{RULE}");
	println!("FRONTEND INTEGRATION - tenant {}", tenant.organization.name);
	println!("{RULE}");
	println!("By organization id:\n  {}", urls.by_org_id);
	println!("By primary domain:\n  {}", urls.by_primary_domain);
	println!("{RULE}");
	Ok(())
}
