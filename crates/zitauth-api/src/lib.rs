// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed client for the identity management and admin APIs.
//!
//! [`IdentityApi`] is the capability trait the provisioning flows are written
//! against; [`ManagementClient`] is its HTTP implementation.
//!
//! ```no_run
//! use zitauth_api::{IdentityApi, ManagementClient, SecretString};
//!
//! # async fn run() -> zitauth_api::Result<()> {
//! let client = ManagementClient::new("http://localhost:8080", SecretString::new("token"))?;
//! let org = client.create_organization("Acme").await?;
//! println!("{} -> {}", org.name, org.primary_domain);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod branding;
pub mod client;
pub mod error;
pub mod login_policy;
pub mod models;
mod wire;

pub use api::IdentityApi;
pub use branding::BrandingConfig;
pub use client::{normalize_base_url, ManagementClient, ORG_HEADER};
pub use error::{ApiError, Result};
pub use login_policy::{LoginPolicyConfig, PasswordlessType};
pub use models::{
	Application, ListDetails, NewUser, ObjectDetails, Organization, OrganizationList, Project, User,
	UserList,
};
pub use zitauth_common_secret::SecretString;
