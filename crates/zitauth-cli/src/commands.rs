// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Single-call subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;
use tracing::warn;

use zitauth_api::{IdentityApi, LoginPolicyConfig};
use zitauth_config::ZitauthConfig;
use zitauth_provision::ThemeAssets;

#[derive(Subcommand, Debug)]
pub enum LoginPolicyCommand {
	/// Show an organization's login policy
	Get {
		org_id: String,
	},
	/// Apply a login policy (defaults unless --file is given)
	Set {
		org_id: String,
		/// JSON file with login policy settings
		#[arg(long)]
		file: Option<PathBuf>,
	},
}

#[derive(Subcommand, Debug)]
pub enum BrandingCommand {
	/// Apply the theme's branding and logo, then activate it
	Apply {
		org_id: String,
		/// Update an existing label policy instead of creating one
		#[arg(long)]
		update: bool,
	},
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

pub async fn create_org(api: &dyn IdentityApi, name: &str) -> Result<()> {
	let org = api
		.create_organization(name)
		.await
		.context("failed to create organization")?;
	println!("Organization created");
	println!("  ID:             {}", org.id);
	println!("  Name:           {}", org.name);
	println!("  Primary domain: {}", org.primary_domain);
	Ok(())
}

pub async fn list_orgs(api: &dyn IdentityApi, json: bool) -> Result<()> {
	let list = api
		.list_organizations()
		.await
		.context("failed to list organizations")?;
	if json {
		return print_json(&list);
	}

	println!("{} organization(s)", list.total());
	for org in &list.result {
		println!("  {:<20} {:<30} {}", org.id, org.name, org.primary_domain);
	}
	Ok(())
}

pub async fn list_users(api: &dyn IdentityApi, json: bool) -> Result<()> {
	let list = api.list_users().await.context("failed to list users")?;
	if json {
		return print_json(&list);
	}

	println!("{} user(s)", list.total());
	for user in &list.result {
		println!(
			"  {:<20} {:<30} {:<30} {}",
			user.id, user.username, user.email, user.state
		);
	}
	Ok(())
}

pub async fn delete_user(api: &dyn IdentityApi, user_id: &str) -> Result<()> {
	api.delete_user(user_id)
		.await
		.with_context(|| format!("failed to delete user {user_id}"))?;
	println!("User {user_id} deleted");
	Ok(())
}

pub async fn login_policy(api: &dyn IdentityApi, command: LoginPolicyCommand) -> Result<()> {
	match command {
		LoginPolicyCommand::Get { org_id } => {
			let policy = api
				.get_org_login_policy(&org_id)
				.await
				.context("failed to read login policy")?;
			print_json(&policy)
		}
		LoginPolicyCommand::Set { org_id, file } => {
			let policy = match file {
				Some(path) => read_login_policy(&path)?,
				None => LoginPolicyConfig::default(),
			};
			api.set_org_login_policy(&org_id, &policy)
				.await
				.context("failed to set login policy")?;
			println!("Login policy applied to {org_id}");
			println!("  Registration allowed: {}", policy.allow_register);
			println!("  Passwordless:         {}", policy.passwordless_type);
			Ok(())
		}
	}
}

fn read_login_policy(path: &Path) -> Result<LoginPolicyConfig> {
	let data = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read {}", path.display()))?;
	serde_json::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))
}

/// Unlike tenant onboarding, every step here is mandatory.
pub async fn branding(
	api: &dyn IdentityApi,
	config: &ZitauthConfig,
	command: BrandingCommand,
) -> Result<()> {
	let BrandingCommand::Apply { org_id, update } = command;
	let theme = ThemeAssets::new(&config.theme.branding_file, &config.theme.logo_file);

	let branding = theme.load_branding().await?;
	if update {
		api.update_org_colors(&org_id, &branding)
			.await
			.context("failed to update branding")?;
	} else {
		api.set_org_branding(&org_id, &branding)
			.await
			.context("failed to set branding")?;
	}

	match theme.logo().await {
		Some(logo) => api
			.upload_org_logo(&org_id, logo)
			.await
			.context("failed to upload logo")?,
		None => warn!(path = %theme.logo_file.display(), "no logo found, skipping upload"),
	}

	api.activate_branding(&org_id)
		.await
		.context("failed to activate branding")?;
	println!("Branding applied and activated for {org_id}");
	Ok(())
}
