// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example authorize URLs a frontend would use to sign a tenant's users in
//! through the shared application.

use url::Url;

use crate::tenant::{PlatformSetup, TenantSetup};

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/auth/callback";
const STATE_PLACEHOLDER: &str = "YOUR_RANDOM_STATE";
const BASE_SCOPE: &str = "openid email profile";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthUrlExamples {
	pub client_id: String,
	pub redirect_uri: String,
	/// Scopes the login to the tenant's organization id.
	pub by_org_id: String,
	/// Scopes the login to the tenant's primary domain.
	pub by_primary_domain: String,
}

/// Build both authorize URL variants for `tenant`.
///
/// Uses the platform's first redirect URI, or [`DEFAULT_REDIRECT_URI`].
pub fn oauth_url_examples(
	platform: &PlatformSetup,
	tenant: &TenantSetup,
	base_url: &str,
) -> Result<OAuthUrlExamples, url::ParseError> {
	let client_id = platform.shared_app.client_id.clone();
	let redirect_uri = platform
		.redirect_uris
		.first()
		.cloned()
		.unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());

	let org_scope = format!("{BASE_SCOPE} urn:zitadel:iam:org:id:{}", tenant.organization.id);
	let domain_scope = format!(
		"{BASE_SCOPE} urn:zitadel:iam:org:domain:primary:{}",
		tenant.organization.primary_domain
	);

	Ok(OAuthUrlExamples {
		by_org_id: authorize_url(base_url, &client_id, &redirect_uri, &org_scope)?,
		by_primary_domain: authorize_url(base_url, &client_id, &redirect_uri, &domain_scope)?,
		client_id,
		redirect_uri,
	})
}

fn authorize_url(
	base_url: &str,
	client_id: &str,
	redirect_uri: &str,
	scope: &str,
) -> Result<String, url::ParseError> {
	let mut url = Url::parse(&format!(
		"{}/oauth/v2/authorize",
		base_url.trim_end_matches('/')
	))?;
	url.query_pairs_mut()
		.append_pair("client_id", client_id)
		.append_pair("redirect_uri", redirect_uri)
		.append_pair("response_type", "code")
		.append_pair("scope", scope)
		.append_pair("state", STATE_PLACEHOLDER);
	Ok(url.into())
}
