// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! zitauth - provision organizations, applications and users in an identity
//! management system.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use zitauth_api::ManagementClient;
use zitauth_common_secret::SecretString;
use zitauth_config::{load_config, CliOverrides, CredentialMode, LogFormat, LogLevel, ZitauthConfig};
use zitauth_credentials::{Bootstrap, ClientCredentials, PollConfig};

mod commands;
mod demo;

/// zitauth - identity provisioning toolkit
#[derive(Parser, Debug)]
#[command(name = "zitauth", version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Identity system base URL [env: ZITAUTH_BASE_URL]
	#[arg(long)]
	base_url: Option<String>,

	/// Wait for a bearer token in this file [env: ZITAUTH_TOKEN_PATH]
	#[arg(long)]
	token_path: Option<PathBuf>,

	/// Machine user client id [env: ZITAUTH_CLIENT_ID]
	#[arg(long)]
	client_id: Option<String>,

	/// Machine user client secret [env: ZITAUTH_CLIENT_SECRET]
	#[arg(long)]
	client_secret: Option<String>,

	/// Log level (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Create an organization with a project, web application and demo user
	Setup(demo::SetupArgs),
	/// Create a shared platform application and onboard tenant organizations
	MultiTenant(demo::MultiTenantArgs),
	/// Create a single organization
	CreateOrg {
		name: String,
	},
	/// List organizations
	ListOrgs {
		/// Output as JSON
		#[arg(long)]
		json: bool,
	},
	/// List users
	ListUsers {
		/// Output as JSON
		#[arg(long)]
		json: bool,
	},
	/// Delete a user
	DeleteUser {
		user_id: String,
	},
	/// Read or change an organization's login policy
	LoginPolicy {
		#[command(subcommand)]
		command: commands::LoginPolicyCommand,
	},
	/// Manage an organization's branding
	Branding {
		#[command(subcommand)]
		command: commands::BrandingCommand,
	},
}

impl From<&Args> for CliOverrides {
	fn from(args: &Args) -> Self {
		CliOverrides {
			base_url: args.base_url.clone(),
			client_id: args.client_id.clone(),
			client_secret: args.client_secret.clone().map(SecretString::new),
			token_path: args.token_path.clone(),
			log_level: args.log_level.clone(),
			json_logs: args.json_logs,
		}
	}
}

fn log_level_to_tracing(level: LogLevel) -> tracing::Level {
	match level {
		LogLevel::Trace => tracing::Level::TRACE,
		LogLevel::Debug => tracing::Level::DEBUG,
		LogLevel::Info => tracing::Level::INFO,
		LogLevel::Warn => tracing::Level::WARN,
		LogLevel::Error => tracing::Level::ERROR,
	}
}

fn init_tracing(logging: &zitauth_config::LoggingConfig) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("zitauth={}", log_level_to_tracing(logging.level))));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}

/// Pick the token strategy the configuration selects.
fn bootstrap(config: &ZitauthConfig) -> Result<Bootstrap> {
	let mode = config
		.credential_mode()
		.context("no credentials configured")?;

	Ok(match mode {
		CredentialMode::TokenFile {
			path,
			max_attempts,
			delay,
		} => Bootstrap::token_file(
			path,
			PollConfig {
				max_attempts,
				delay,
			},
		),
		CredentialMode::ClientCredentials {
			client_id,
			client_secret,
		} => Bootstrap::ClientCredentials(
			ClientCredentials::new(config.api.base_url.clone(), client_id, client_secret)
				.with_scope(config.api.scope.clone())
				.with_timeout(config.api.request_timeout),
		),
	})
}

async fn connect(config: &ZitauthConfig) -> Result<ManagementClient> {
	let token = bootstrap(config)?
		.acquire()
		.await
		.context("failed to obtain access token")?;

	ManagementClient::with_timeout(&config.api.base_url, token, config.api.request_timeout)
		.context("failed to create management client")
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	let config = load_config(args.config.as_deref(), CliOverrides::from(&args))
		.context("failed to load configuration")?;

	init_tracing(&config.logging);
	info!(base_url = %config.api.base_url, "starting zitauth");

	let client = connect(&config).await?;

	match args.command {
		None => demo::setup(&client, demo::SetupArgs::default()).await,
		Some(Command::Setup(setup)) => demo::setup(&client, setup).await,
		Some(Command::MultiTenant(mt)) => demo::multi_tenant(&client, &config, mt).await,
		Some(Command::CreateOrg { name }) => commands::create_org(&client, &name).await,
		Some(Command::ListOrgs { json }) => commands::list_orgs(&client, json).await,
		Some(Command::ListUsers { json }) => commands::list_users(&client, json).await,
		Some(Command::DeleteUser { user_id }) => commands::delete_user(&client, &user_id).await,
		Some(Command::LoginPolicy { command }) => commands::login_policy(&client, command).await,
		Some(Command::Branding { command }) => commands::branding(&client, &config, command).await,
	}
}
