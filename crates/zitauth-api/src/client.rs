// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! reqwest implementation of [`IdentityApi`].

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use url::Url;
use zitauth_common_secret::SecretString;

use crate::api::IdentityApi;
use crate::branding::BrandingConfig;
use crate::error::{ApiError, Result};
use crate::login_policy::LoginPolicyConfig;
use crate::models::{Application, NewUser, Organization, OrganizationList, Project, User, UserList};
use crate::wire::{
	AddOidcAppRequest, AddOidcAppResponse, AddOrgRequest, AddOrgResponse, AddProjectGrantRequest,
	AddProjectRequest, AddProjectResponse, AddUserGrantRequest, GetLoginPolicyResponse,
	GetMyOrgResponse, ImportEmail, ImportHumanUserRequest, ImportHumanUserResponse, ImportProfile,
	ListUsersResponse, LoginPolicyWire, SearchQuery,
};

/// Header selecting the organization a management call acts on.
pub const ORG_HEADER: &str = "x-zitadel-orgid";

const ACTIVE_USER_STATE: &str = "USER_STATE_ACTIVE";
const LABEL_POLICY_PATH: &str = "/management/v1/policies/label";
const LOGIN_POLICY_PATH: &str = "/management/v1/policies/login";
const LABEL_ASSETS_PATH: &str = "/assets/v1/org/policy/label";

/// Client for the management and admin APIs.
///
/// Base URL, token and connection pool are fixed at construction. Every call
/// issues exactly one request (two for [`IdentityApi::create_organization`]
/// and [`IdentityApi::upload_org_logo`]) and never retries.
#[derive(Debug, Clone)]
pub struct ManagementClient {
	base_url: String,
	token: SecretString,
	http: reqwest::Client,
}

impl ManagementClient {
	/// Build a client with the default 10 second request timeout.
	pub fn new(base_url: &str, token: SecretString) -> Result<Self> {
		let http = zitauth_common_http::new_client().map_err(ApiError::ClientBuild)?;
		Self::with_http_client(base_url, token, http)
	}

	pub fn with_timeout(base_url: &str, token: SecretString, timeout: Duration) -> Result<Self> {
		let http =
			zitauth_common_http::new_client_with_timeout(timeout).map_err(ApiError::ClientBuild)?;
		Self::with_http_client(base_url, token, http)
	}

	/// Use a caller-prepared reqwest client.
	pub fn with_http_client(
		base_url: &str,
		token: SecretString,
		http: reqwest::Client,
	) -> Result<Self> {
		Ok(Self {
			base_url: normalize_base_url(base_url)?,
			token,
			http,
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn request(&self, method: Method, path: &str, org_id: Option<&str>) -> Result<RequestBuilder> {
		let url = format!("{}{path}", self.base_url);
		debug!(method = %method, url = %url, "sending request");

		let mut req = self
			.http
			.request(method, url)
			.bearer_auth(self.token.expose())
			.header(ACCEPT, "application/json");

		if let Some(org_id) = org_id {
			let value = HeaderValue::from_str(org_id).map_err(|e| ApiError::InvalidHeader {
				name: ORG_HEADER,
				reason: e.to_string(),
			})?;
			req = req.header(ORG_HEADER, value);
		}
		Ok(req)
	}

	/// Send `req` and return the body text of a successful response.
	async fn send(&self, endpoint: &str, req: RequestBuilder) -> Result<String> {
		let transport = |source| ApiError::Transport {
			endpoint: endpoint.to_string(),
			source,
		};

		let response = req.send().await.map_err(transport)?;
		let status = response.status();
		let body = response.text().await.map_err(transport)?;

		if status.as_u16() >= 400 {
			warn!(endpoint, status = status.as_u16(), "request failed");
			return Err(ApiError::Status {
				endpoint: endpoint.to_string(),
				status: status.as_u16(),
				body,
			});
		}
		Ok(body)
	}

	async fn call<B, T>(
		&self,
		method: Method,
		path: &str,
		org_id: Option<&str>,
		body: Option<&B>,
	) -> Result<T>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		let endpoint = format!("{method} {path}");
		let text = self.call_raw(method, path, org_id, body).await?;
		decode(&endpoint, &text)
	}

	async fn call_raw<B>(
		&self,
		method: Method,
		path: &str,
		org_id: Option<&str>,
		body: Option<&B>,
	) -> Result<String>
	where
		B: Serialize + ?Sized,
	{
		let endpoint = format!("{method} {path}");
		let mut req = self.request(method, path, org_id)?;
		if let Some(body) = body {
			req = req.json(body);
		}
		self.send(&endpoint, req).await
	}

	async fn upload_asset(&self, org_id: &str, kind: &str, file_name: &str, bytes: Vec<u8>) -> Result<()> {
		let path = format!("{LABEL_ASSETS_PATH}/{kind}");
		let endpoint = format!("POST {path}");

		let part = Part::bytes(bytes)
			.file_name(file_name.to_string())
			.mime_str(mime_for(file_name))
			.map_err(|source| ApiError::Transport {
				endpoint: endpoint.clone(),
				source,
			})?;
		let form = Form::new().part("file", part);

		let req = self.request(Method::POST, &path, Some(org_id))?.multipart(form);
		self.send(&endpoint, req).await?;
		Ok(())
	}
}

#[async_trait]
impl IdentityApi for ManagementClient {
	#[instrument(skip_all, fields(name = %name))]
	async fn create_organization(&self, name: &str) -> Result<Organization> {
		let created: AddOrgResponse = self
			.call(
				Method::POST,
				"/management/v1/orgs",
				None,
				Some(&AddOrgRequest { name }),
			)
			.await?;
		info!(org_id = %created.id, "created organization");

		match self.get_organization(&created.id).await {
			Ok(org) => Ok(org),
			Err(err) => {
				warn!(org_id = %created.id, error = %err, "could not read back organization");
				Ok(Organization {
					id: created.id,
					name: name.to_string(),
					details: created.details,
					..Organization::default()
				})
			}
		}
	}

	#[instrument(skip_all, fields(org_id = %org_id))]
	async fn get_organization(&self, org_id: &str) -> Result<Organization> {
		let response: GetMyOrgResponse = self
			.call::<(), _>(Method::GET, "/management/v1/orgs/me", Some(org_id), None)
			.await?;
		Ok(response.org)
	}

	#[instrument(skip_all)]
	async fn list_organizations(&self) -> Result<OrganizationList> {
		let list: OrganizationList = self
			.call(
				Method::POST,
				"/admin/v1/orgs/_search",
				None,
				Some(&SearchQuery::all()),
			)
			.await?;
		debug!(count = list.result.len(), "listed organizations");
		Ok(list)
	}

	#[instrument(skip_all, fields(org_id = %org_id, username = %user.username))]
	async fn create_user(&self, org_id: &str, user: &NewUser) -> Result<User> {
		let body = ImportHumanUserRequest {
			user_name: &user.username,
			profile: ImportProfile {
				first_name: &user.first_name,
				last_name: &user.last_name,
				display_name: user.display_name(),
			},
			email: ImportEmail {
				email: &user.email,
				is_email_verified: true,
			},
			password: user.password.expose(),
			password_change_required: false,
		};

		let created: ImportHumanUserResponse = self
			.call(
				Method::POST,
				"/management/v1/users/human/_import",
				Some(org_id),
				Some(&body),
			)
			.await?;
		info!(user_id = %created.user_id, "created user");

		Ok(User {
			id: created.user_id,
			username: user.username.clone(),
			state: ACTIVE_USER_STATE.to_string(),
			preferred_login_name: user.username.clone(),
			email: user.email.clone(),
			first_name: user.first_name.clone(),
			last_name: user.last_name.clone(),
			details: created.details,
		})
	}

	#[instrument(skip_all)]
	async fn list_users(&self) -> Result<UserList> {
		let response: ListUsersResponse = self
			.call(
				Method::POST,
				"/management/v1/users/_search",
				None,
				Some(&SearchQuery::all()),
			)
			.await?;
		Ok(response.into())
	}

	#[instrument(skip_all, fields(user_id = %user_id))]
	async fn delete_user(&self, user_id: &str) -> Result<()> {
		let path = format!("/management/v1/users/{user_id}");
		self.call_raw::<()>(Method::DELETE, &path, None, None).await?;
		info!("deleted user");
		Ok(())
	}

	#[instrument(skip_all, fields(org_id = %org_id, name = %name))]
	async fn create_project(&self, org_id: &str, name: &str) -> Result<Project> {
		let created: AddProjectResponse = self
			.call(
				Method::POST,
				"/management/v1/projects",
				Some(org_id),
				Some(&AddProjectRequest::new(name)),
			)
			.await?;
		info!(project_id = %created.id, "created project");
		Ok(Project {
			id: created.id,
			name: name.to_string(),
		})
	}

	#[instrument(skip_all, fields(org_id = %org_id, project_id = %project_id, name = %name))]
	async fn create_oidc_web_application(
		&self,
		org_id: &str,
		project_id: &str,
		name: &str,
		redirect_uris: &[String],
	) -> Result<Application> {
		let path = format!("/management/v1/projects/{project_id}/apps/oidc");
		let body = AddOidcAppRequest::web(name, redirect_uris);
		let created: AddOidcAppResponse = self
			.call(Method::POST, &path, Some(org_id), Some(&body))
			.await?;
		info!(app_id = %created.app_id, client_id = %created.client_id, "created application");

		Ok(Application {
			id: created.app_id,
			name: name.to_string(),
			client_id: created.client_id,
			client_secret: created.client_secret.filter(|s| !s.is_empty()),
		})
	}

	#[instrument(skip_all, fields(org_id = %org_id, project_id = %project_id, user_id = %user_id))]
	async fn grant_user_to_project(
		&self,
		org_id: &str,
		project_id: &str,
		user_id: &str,
	) -> Result<()> {
		let path = format!("/management/v1/users/{user_id}/grants");
		let body = AddUserGrantRequest {
			project_id,
			role_keys: [],
		};
		self.call_raw(Method::POST, &path, Some(org_id), Some(&body))
			.await?;
		info!("granted user access to project");
		Ok(())
	}

	#[instrument(skip_all, fields(org_id = %org_id, project_id = %project_id, granted_org_id = %granted_org_id))]
	async fn grant_org_to_project(
		&self,
		org_id: &str,
		project_id: &str,
		granted_org_id: &str,
	) -> Result<()> {
		let path = format!("/management/v1/projects/{project_id}/grants");
		let body = AddProjectGrantRequest {
			granted_org_id,
			role_keys: [],
		};
		self.call_raw(Method::POST, &path, Some(org_id), Some(&body))
			.await?;
		info!("granted organization access to project");
		Ok(())
	}

	#[instrument(skip_all, fields(org_id = %org_id))]
	async fn set_org_branding(&self, org_id: &str, branding: &BrandingConfig) -> Result<()> {
		self.call_raw(Method::POST, LABEL_POLICY_PATH, Some(org_id), Some(branding))
			.await?;
		info!("set label policy");
		Ok(())
	}

	#[instrument(skip_all, fields(org_id = %org_id))]
	async fn update_org_colors(&self, org_id: &str, branding: &BrandingConfig) -> Result<()> {
		self.call_raw(Method::PUT, LABEL_POLICY_PATH, Some(org_id), Some(branding))
			.await?;
		info!("updated label policy");
		Ok(())
	}

	#[instrument(skip_all, fields(org_id = %org_id, path = %path.display()))]
	async fn upload_org_logo(&self, org_id: &str, path: &Path) -> Result<()> {
		let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let file_name = path
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_else(|| "logo".to_string());

		self.upload_asset(org_id, "logo", &file_name, bytes.clone())
			.await?;
		self.upload_asset(org_id, "icon", &file_name, bytes).await?;
		info!("uploaded logo and icon");
		Ok(())
	}

	#[instrument(skip_all, fields(org_id = %org_id))]
	async fn activate_branding(&self, org_id: &str) -> Result<()> {
		let path = format!("{LABEL_POLICY_PATH}/_activate");
		self.call_raw(Method::POST, &path, Some(org_id), Some(&serde_json::json!({})))
			.await?;
		info!("activated label policy");
		Ok(())
	}

	#[instrument(skip_all, fields(org_id = %org_id))]
	async fn set_org_login_policy(&self, org_id: &str, policy: &LoginPolicyConfig) -> Result<()> {
		let body = LoginPolicyWire::from(policy);
		self.call_raw(Method::POST, LOGIN_POLICY_PATH, Some(org_id), Some(&body))
			.await?;
		info!(allow_register = policy.allow_register, "set login policy");
		Ok(())
	}

	#[instrument(skip_all, fields(org_id = %org_id))]
	async fn get_org_login_policy(&self, org_id: &str) -> Result<LoginPolicyConfig> {
		let response: GetLoginPolicyResponse = self
			.call::<(), _>(Method::GET, LOGIN_POLICY_PATH, Some(org_id), None)
			.await?;
		Ok(response.policy.into())
	}
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T> {
	serde_json::from_str(body).map_err(|source| ApiError::Decode {
		endpoint: endpoint.to_string(),
		source,
	})
}

/// Strip trailing slashes and require an absolute http(s) URL.
pub fn normalize_base_url(raw: &str) -> Result<String> {
	let trimmed = raw.trim().trim_end_matches('/');
	let invalid = |reason: String| ApiError::InvalidBaseUrl {
		url: raw.to_string(),
		reason,
	};

	if trimmed.is_empty() {
		return Err(invalid("empty".to_string()));
	}
	let parsed = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
	match parsed.scheme() {
		"http" | "https" => Ok(trimmed.to_string()),
		other => Err(invalid(format!("unsupported scheme '{other}'"))),
	}
}

fn mime_for(file_name: &str) -> &'static str {
	let ext = Path::new(file_name)
		.extension()
		.and_then(|e| e.to_str())
		.map(|e| e.to_ascii_lowercase());
	match ext.as_deref() {
		Some("svg") => "image/svg+xml",
		Some("png") => "image/png",
		Some("jpg") | Some("jpeg") => "image/jpeg",
		Some("gif") => "image/gif",
		_ => "application/octet-stream",
	}
}
