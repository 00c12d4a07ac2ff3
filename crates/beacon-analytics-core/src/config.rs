// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Host-level analytics configuration handed to every adaptor on start.

use std::time::Duration;

/// Settings the host shares with all adaptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsConfig {
	/// Flush interval adaptors should apply to their vendor SDK, if any.
	pub flush_interval_for_adaptors: Option<Duration>,
}

impl AnalyticsConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the flush interval for adaptors (builder pattern).
	pub fn with_flush_interval_for_adaptors(mut self, interval: Duration) -> Self {
		self.flush_interval_for_adaptors = Some(interval);
		self
	}
}
