// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Suffixes that keep demo resource names unique between runs.

use chrono::{Local, NaiveTime, Timelike};

/// Current local time as `HHMMSS`.
pub fn unique_suffix() -> String {
	suffix_at(Local::now().time())
}

pub fn suffix_at(time: NaiveTime) -> String {
	format!("{:02}{:02}{:02}", time.hour(), time.minute(), time.second())
}

/// `name-HHMMSS`
pub fn with_suffix(name: &str, suffix: &str) -> String {
	format!("{name}-{suffix}")
}
