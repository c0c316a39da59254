// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provisioning flows built on [`zitauth_api::IdentityApi`].
//!
//! Every flow issues its client calls one after another. Mandatory steps
//! abort with a [`ProvisionError`] naming the step; tenant branding is best
//! effort. Already-created resources are never rolled back.

pub mod authorize;
pub mod error;
pub mod naming;
pub mod setup;
pub mod tenant;
pub mod theme;

#[cfg(test)]
mod fake;

pub use authorize::{oauth_url_examples, OAuthUrlExamples, DEFAULT_REDIRECT_URI};
pub use error::{ProvisionError, Result, Step};
pub use naming::{unique_suffix, with_suffix};
pub use setup::{create_user_with_grant, setup_org_with_app, SetupResult};
pub use tenant::{
	add_tenant, create_tenant_user, onboard_tenants, setup_platform_app, BrandingStep,
	BrandingWarning, PlatformSetup, TenantOutcome, TenantSetup,
};
pub use theme::{load_branding_config, ThemeAssets, DEFAULT_BRANDING_FILE, DEFAULT_LOGO_FILE};
