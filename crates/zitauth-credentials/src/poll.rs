// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bounded polling for a token written by another process.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};
use zitauth_common_secret::SecretString;

use crate::error::{CredentialError, Result};

/// Where a pre-provisioned token is read from.
#[async_trait]
pub trait TokenSource: Send + Sync {
	/// Human-readable location, used in logs and errors.
	fn describe(&self) -> String;

	/// Read the raw (untrimmed) content.
	async fn read(&self) -> std::io::Result<String>;
}

/// A plaintext token file, typically written by the identity system's
/// first-instance setup.
#[derive(Debug, Clone)]
pub struct FileTokenSource {
	path: PathBuf,
}

impl FileTokenSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &std::path::Path {
		&self.path
	}
}

#[async_trait]
impl TokenSource for FileTokenSource {
	fn describe(&self) -> String {
		format!("file {}", self.path.display())
	}

	async fn read(&self) -> std::io::Result<String> {
		tokio::fs::read_to_string(&self.path).await
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
	pub max_attempts: u32,
	/// Sleep between attempts. Not applied after the final attempt.
	pub delay: Duration,
}

impl Default for PollConfig {
	fn default() -> Self {
		Self {
			max_attempts: 20,
			delay: Duration::from_secs(2),
		}
	}
}

/// Read `source` until it yields non-whitespace content or the attempt budget
/// runs out.
///
/// Returns the trimmed token on the first non-empty read and performs no
/// further reads. After `max_attempts` unsuccessful reads fails with
/// [`CredentialError::TokenUnavailable`] carrying the last read error.
#[instrument(skip_all, fields(source = %source.describe(), max_attempts = poll.max_attempts))]
pub async fn wait_for_token(source: &dyn TokenSource, poll: PollConfig) -> Result<SecretString> {
	let mut last_reason = String::from("token source is empty");

	for attempt in 1..=poll.max_attempts {
		match source.read().await {
			Ok(content) => {
				let token = SecretString::new(content).trimmed();
				if !token.is_empty() {
					info!(attempt, "token found");
					return Ok(token);
				}
				debug!(attempt, "token source is empty");
				last_reason = String::from("token source is empty");
			}
			Err(e) => {
				debug!(attempt, error = %e, "token source not readable yet");
				last_reason = e.to_string();
			}
		}

		if attempt < poll.max_attempts {
			tokio::time::sleep(poll.delay).await;
		}
	}

	warn!(reason = %last_reason, "gave up waiting for token");
	Err(CredentialError::TokenUnavailable {
		source_name: source.describe(),
		attempts: poll.max_attempts,
		reason: last_reason,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::sync::atomic::{AtomicU32, Ordering};

	/// Returns scripted responses and counts reads.
	struct ScriptedSource {
		reads: AtomicU32,
		ready_on: Option<u32>,
		content: String,
	}

	impl ScriptedSource {
		fn ready_on(attempt: u32, content: impl Into<String>) -> Self {
			Self {
				reads: AtomicU32::new(0),
				ready_on: Some(attempt),
				content: content.into(),
			}
		}

		fn never_ready() -> Self {
			Self {
				reads: AtomicU32::new(0),
				ready_on: None,
				content: String::new(),
			}
		}

		fn reads(&self) -> u32 {
			self.reads.load(Ordering::SeqCst)
		}
	}

	#[async_trait]
	impl TokenSource for ScriptedSource {
		fn describe(&self) -> String {
			"scripted".to_string()
		}

		async fn read(&self) -> std::io::Result<String> {
			let n = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
			match self.ready_on {
				Some(ready) if n >= ready => Ok(self.content.clone()),
				_ if n % 2 == 0 => Ok("   \n".to_string()),
				_ => Err(std::io::Error::new(std::io::ErrorKind::NotFound, "not written yet")),
			}
		}
	}

	fn fast(max_attempts: u32) -> PollConfig {
		PollConfig {
			max_attempts,
			delay: Duration::from_millis(1),
		}
	}

	#[test]
	fn default_poll_budget_is_twenty_by_two_seconds() {
		let poll = PollConfig::default();
		assert_eq!(poll.max_attempts, 20);
		assert_eq!(poll.delay, Duration::from_secs(2));
	}

	#[tokio::test]
	async fn returns_trimmed_token_and_stops_reading() {
		let source = ScriptedSource::ready_on(4, "\n  pat-abc123 \n");
		let token = wait_for_token(&source, fast(20)).await.unwrap();
		assert_eq!(token.expose(), "pat-abc123");
		assert_eq!(source.reads(), 4);
	}

	#[tokio::test]
	async fn immediate_token_needs_one_read() {
		let source = ScriptedSource::ready_on(1, "pat");
		wait_for_token(&source, fast(20)).await.unwrap();
		assert_eq!(source.reads(), 1);
	}

	#[tokio::test]
	async fn exhausts_exactly_max_attempts() {
		let source = ScriptedSource::never_ready();
		let err = wait_for_token(&source, fast(5)).await.unwrap_err();
		assert_eq!(source.reads(), 5);
		match err {
			CredentialError::TokenUnavailable { attempts, .. } => assert_eq!(attempts, 5),
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[tokio::test]
	async fn surfaces_last_read_error() {
		// Odd-numbered reads fail, so the 3rd (final) read carries the error.
		let source = ScriptedSource::never_ready();
		let err = wait_for_token(&source, fast(3)).await.unwrap_err();
		match err {
			CredentialError::TokenUnavailable { reason, .. } => {
				assert!(reason.contains("not written yet"))
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[tokio::test]
	async fn token_arriving_on_last_attempt_is_accepted() {
		let source = ScriptedSource::ready_on(3, "late-token");
		let token = wait_for_token(&source, fast(3)).await.unwrap();
		assert_eq!(token.expose(), "late-token");
	}

	#[tokio::test]
	async fn reads_real_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("admin.pat");
		std::fs::write(&path, "file-token\n").unwrap();

		let token = wait_for_token(&FileTokenSource::new(&path), fast(2))
			.await
			.unwrap();
		assert_eq!(token.expose(), "file-token");
	}

	#[tokio::test]
	async fn missing_file_reports_path() {
		let dir = tempfile::tempdir().unwrap();
		let source = FileTokenSource::new(dir.path().join("missing.pat"));
		let err = wait_for_token(&source, fast(2)).await.unwrap_err();
		assert!(err.to_string().contains("missing.pat"));
	}

	#[tokio::test]
	async fn file_written_while_polling_is_picked_up() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("admin.pat");
		let writer_path = path.clone();

		let writer = tokio::spawn(async move {
			tokio::time::sleep(Duration::from_millis(30)).await;
			tokio::fs::write(&writer_path, "written-later").await.unwrap();
		});

		let poll = PollConfig {
			max_attempts: 200,
			delay: Duration::from_millis(5),
		};
		let token = wait_for_token(&FileTokenSource::new(&path), poll).await.unwrap();
		writer.await.unwrap();
		assert_eq!(token.expose(), "written-later");
	}

	proptest! {
		#[test]
		fn padded_token_is_trimmed_after_exactly_k_reads(
			token in "[A-Za-z0-9._-]{1,48}",
			lead in "[ \t\n\r]{0,6}",
			trail in "[ \t\n\r]{0,6}",
			k in 1u32..=6,
		) {
			let source = ScriptedSource::ready_on(k, format!("{lead}{token}{trail}"));
			let poll = PollConfig {
				max_attempts: 6,
				delay: Duration::ZERO,
			};
			let runtime = tokio::runtime::Builder::new_current_thread()
				.enable_time()
				.build()
				.unwrap();
			let found = runtime.block_on(wait_for_token(&source, poll)).unwrap();
			prop_assert_eq!(found.expose(), token.as_str());
			prop_assert_eq!(source.reads(), k);
		}
	}
}
