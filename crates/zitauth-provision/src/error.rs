// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use zitauth_api::ApiError;

/// A mandatory provisioning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	CreateOrganization,
	CreateProject,
	CreateApplication,
	CreateUser,
	GrantUser,
	GrantProject,
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Step::CreateOrganization => "create organization",
			Step::CreateProject => "create project",
			Step::CreateApplication => "create application",
			Step::CreateUser => "create user",
			Step::GrantUser => "grant user to project",
			Step::GrantProject => "grant project to organization",
		};
		f.write_str(s)
	}
}

#[derive(Debug, Error)]
pub enum ProvisionError {
	#[error("failed to {step}: {source}")]
	Step {
		step: Step,
		#[source]
		source: ApiError,
	},

	#[error("failed to read branding file {path}: {source}")]
	BrandingRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse branding file {path}: {source}")]
	BrandingParse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}

impl ProvisionError {
	/// The failed step, for errors raised by a client call.
	pub fn step(&self) -> Option<Step> {
		match self {
			ProvisionError::Step { step, .. } => Some(*step),
			_ => None,
		}
	}

	pub fn api_error(&self) -> Option<&ApiError> {
		match self {
			ProvisionError::Step { source, .. } => Some(source),
			_ => None,
		}
	}
}

pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Attach the step name to a client error.
pub(crate) trait StepContext<T> {
	fn step(self, step: Step) -> Result<T>;
}

impl<T> StepContext<T> for std::result::Result<T, ApiError> {
	fn step(self, step: Step) -> Result<T> {
		self.map_err(|source| ProvisionError::Step { step, source })
	}
}
