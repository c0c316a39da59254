// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request and response bodies as the management API spells them.

use serde::{Deserialize, Serialize};

use crate::login_policy::{LoginPolicyConfig, PasswordlessType};
use crate::models::{ListDetails, ObjectDetails, Organization, User, UserList};

#[derive(Debug, Serialize)]
pub(crate) struct AddOrgRequest<'a> {
	pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddOrgResponse {
	pub id: String,
	#[serde(default)]
	pub details: ObjectDetails,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetMyOrgResponse {
	pub org: Organization,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchQuery {
	pub queries: Vec<serde_json::Value>,
}

impl SearchQuery {
	pub fn all() -> Self {
		Self { queries: Vec::new() }
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImportHumanUserRequest<'a> {
	pub user_name: &'a str,
	pub profile: ImportProfile<'a>,
	pub email: ImportEmail<'a>,
	pub password: &'a str,
	pub password_change_required: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImportProfile<'a> {
	pub first_name: &'a str,
	pub last_name: &'a str,
	pub display_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImportEmail<'a> {
	pub email: &'a str,
	pub is_email_verified: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImportHumanUserResponse {
	pub user_id: String,
	#[serde(default)]
	pub details: ObjectDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserView {
	pub id: String,
	#[serde(default)]
	pub details: ObjectDetails,
	#[serde(default)]
	pub state: String,
	#[serde(default)]
	pub user_name: String,
	#[serde(default)]
	pub preferred_login_name: String,
	#[serde(default)]
	pub human: Option<HumanView>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HumanView {
	#[serde(default)]
	pub profile: ProfileView,
	#[serde(default)]
	pub email: EmailView,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileView {
	#[serde(default)]
	pub first_name: String,
	#[serde(default)]
	pub last_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EmailView {
	#[serde(default)]
	pub email: String,
}

impl From<UserView> for User {
	fn from(view: UserView) -> Self {
		let human = view.human.unwrap_or_default();
		User {
			id: view.id,
			username: view.user_name,
			state: view.state,
			preferred_login_name: view.preferred_login_name,
			email: human.email.email,
			first_name: human.profile.first_name,
			last_name: human.profile.last_name,
			details: view.details,
		}
	}
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListUsersResponse {
	#[serde(default)]
	pub details: ListDetails,
	#[serde(default)]
	pub result: Vec<UserView>,
}

impl From<ListUsersResponse> for UserList {
	fn from(response: ListUsersResponse) -> Self {
		UserList {
			details: response.details,
			result: response.result.into_iter().map(User::from).collect(),
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddProjectRequest<'a> {
	pub name: &'a str,
	pub project_role_assertion: bool,
	pub project_role_check: bool,
	pub has_project_check: bool,
	pub private_labeling_setting: &'static str,
}

impl<'a> AddProjectRequest<'a> {
	pub fn new(name: &'a str) -> Self {
		Self {
			name,
			project_role_assertion: false,
			project_role_check: false,
			has_project_check: false,
			private_labeling_setting: "PRIVATE_LABELING_SETTING_UNSPECIFIED",
		}
	}
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddProjectResponse {
	pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddOidcAppRequest<'a> {
	pub name: &'a str,
	pub redirect_uris: &'a [String],
	pub response_types: [&'static str; 1],
	pub grant_types: [&'static str; 2],
	pub app_type: &'static str,
	pub auth_method_type: &'static str,
	pub post_logout_redirect_uris: [&'static str; 0],
	pub version: &'static str,
	pub dev_mode: bool,
	pub access_token_type: &'static str,
	pub access_token_role_assertion: bool,
	pub id_token_role_assertion: bool,
	pub id_token_userinfo_assertion: bool,
	pub clock_skew: &'static str,
}

impl<'a> AddOidcAppRequest<'a> {
	pub fn web(name: &'a str, redirect_uris: &'a [String]) -> Self {
		Self {
			name,
			redirect_uris,
			response_types: ["OIDC_RESPONSE_TYPE_CODE"],
			grant_types: [
				"OIDC_GRANT_TYPE_AUTHORIZATION_CODE",
				"OIDC_GRANT_TYPE_REFRESH_TOKEN",
			],
			app_type: "OIDC_APP_TYPE_WEB",
			auth_method_type: "OIDC_AUTH_METHOD_TYPE_BASIC",
			post_logout_redirect_uris: [],
			version: "OIDC_VERSION_1_0",
			dev_mode: redirect_uris.iter().any(|uri| uri.starts_with("http://")),
			access_token_type: "OIDC_TOKEN_TYPE_BEARER",
			access_token_role_assertion: true,
			id_token_role_assertion: true,
			id_token_userinfo_assertion: true,
			clock_skew: "0s",
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddOidcAppResponse {
	pub app_id: String,
	pub client_id: String,
	#[serde(default)]
	pub client_secret: Option<zitauth_common_secret::SecretString>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddUserGrantRequest<'a> {
	pub project_id: &'a str,
	pub role_keys: [&'static str; 0],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddProjectGrantRequest<'a> {
	pub granted_org_id: &'a str,
	pub role_keys: [&'static str; 0],
}

/// Login policy as sent to and returned by the management API.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginPolicyWire {
	#[serde(default)]
	pub allow_username_password: bool,
	#[serde(default)]
	pub allow_register: bool,
	#[serde(default)]
	pub allow_external_idp: bool,
	#[serde(default)]
	pub force_mfa: bool,
	#[serde(default)]
	pub force_mfa_local_only: bool,
	#[serde(default)]
	pub passwordless_type: String,
	#[serde(default)]
	pub hide_password_reset: bool,
	#[serde(default)]
	pub ignore_unknown_usernames: bool,
	#[serde(default)]
	pub default_redirect_uri: String,
	#[serde(default)]
	pub allow_domain_discovery: bool,
	#[serde(default)]
	pub disable_login_with_email: bool,
	#[serde(default)]
	pub disable_login_with_phone: bool,
}

impl From<&LoginPolicyConfig> for LoginPolicyWire {
	fn from(config: &LoginPolicyConfig) -> Self {
		Self {
			allow_username_password: config.allow_username_password,
			allow_register: config.allow_register,
			allow_external_idp: config.allow_external_idp,
			force_mfa: config.force_mfa,
			force_mfa_local_only: config.force_mfa_local_only,
			passwordless_type: config.passwordless_type.to_wire().to_string(),
			hide_password_reset: config.hide_password_reset,
			ignore_unknown_usernames: config.ignore_unknown_usernames,
			default_redirect_uri: config.default_redirect_uri.clone(),
			allow_domain_discovery: config.allow_domain_discovery,
			disable_login_with_email: config.disable_login_with_email,
			disable_login_with_phone: config.disable_login_with_phone,
		}
	}
}

impl From<LoginPolicyWire> for LoginPolicyConfig {
	fn from(wire: LoginPolicyWire) -> Self {
		Self {
			allow_register: wire.allow_register,
			allow_username_password: wire.allow_username_password,
			allow_external_idp: wire.allow_external_idp,
			force_mfa: wire.force_mfa,
			force_mfa_local_only: wire.force_mfa_local_only,
			hide_password_reset: wire.hide_password_reset,
			ignore_unknown_usernames: wire.ignore_unknown_usernames,
			allow_domain_discovery: wire.allow_domain_discovery,
			disable_login_with_email: wire.disable_login_with_email,
			disable_login_with_phone: wire.disable_login_with_phone,
			passwordless_type: PasswordlessType::from_wire(&wire.passwordless_type),
			default_redirect_uri: wire.default_redirect_uri,
		}
	}
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetLoginPolicyResponse {
	pub policy: LoginPolicyWire,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn oidc_app_dev_mode_follows_redirect_scheme() {
		let http = vec!["http://localhost:3000/auth/callback".to_string()];
		assert!(AddOidcAppRequest::web("Web Application", &http).dev_mode);

		let https = vec!["https://app.example.com/auth/callback".to_string()];
		assert!(!AddOidcAppRequest::web("Web Application", &https).dev_mode);
	}

	#[test]
	fn oidc_app_body_uses_api_enums() {
		let uris = vec!["http://localhost:3000/auth/callback".to_string()];
		let value = serde_json::to_value(AddOidcAppRequest::web("Web Application", &uris)).unwrap();
		assert_eq!(value["responseTypes"][0], "OIDC_RESPONSE_TYPE_CODE");
		assert_eq!(value["grantTypes"][1], "OIDC_GRANT_TYPE_REFRESH_TOKEN");
		assert_eq!(value["appType"], "OIDC_APP_TYPE_WEB");
		assert_eq!(value["authMethodType"], "OIDC_AUTH_METHOD_TYPE_BASIC");
		assert_eq!(value["accessTokenType"], "OIDC_TOKEN_TYPE_BEARER");
		assert_eq!(value["clockSkew"], "0s");
		assert_eq!(value["version"], "OIDC_VERSION_1_0");
		assert_eq!(value["idTokenUserinfoAssertion"], true);
	}

	#[test]
	fn project_body_disables_role_checks() {
		let value = serde_json::to_value(AddProjectRequest::new("Main Project")).unwrap();
		assert_eq!(value["projectRoleAssertion"], false);
		assert_eq!(value["projectRoleCheck"], false);
		assert_eq!(value["hasProjectCheck"], false);
		assert_eq!(
			value["privateLabelingSetting"],
			"PRIVATE_LABELING_SETTING_UNSPECIFIED"
		);
	}

	#[test]
	fn user_view_flattens_human_profile() {
		let view: UserView = serde_json::from_value(serde_json::json!({
			"id": "u1",
			"state": "USER_STATE_ACTIVE",
			"userName": "john.doe",
			"preferredLoginName": "john.doe@acme.localhost",
			"human": {
				"profile": {"firstName": "John", "lastName": "Doe"},
				"email": {"email": "john@example.com", "isEmailVerified": true}
			}
		}))
		.unwrap();
		let user = User::from(view);
		assert_eq!(user.username, "john.doe");
		assert_eq!(user.first_name, "John");
		assert_eq!(user.email, "john@example.com");
	}

	#[test]
	fn machine_user_has_empty_profile() {
		let view: UserView =
			serde_json::from_value(serde_json::json!({"id": "m1", "userName": "svc"})).unwrap();
		let user = User::from(view);
		assert!(user.email.is_empty());
		assert!(user.first_name.is_empty());
	}

	#[test]
	fn login_policy_round_trips_through_wire() {
		let config = LoginPolicyConfig {
			allow_register: true,
			passwordless_type: PasswordlessType::Allowed,
			default_redirect_uri: "https://app.example.com".to_string(),
			..LoginPolicyConfig::default()
		};
		let wire = LoginPolicyWire::from(&config);
		assert_eq!(wire.passwordless_type, "PASSWORDLESS_TYPE_ALLOWED");
		assert_eq!(LoginPolicyConfig::from(wire), config);
	}
}
