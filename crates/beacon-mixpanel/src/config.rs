// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mixpanel configuration section.

use std::time::Duration;

use beacon_analytics_core::InstallType;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::limits::{LimitsPreset, SanitationLimits};
use crate::token::MixpanelToken;

/// One partial view of the `[mixpanel]` section, as produced by a single source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MixpanelConfigLayer {
	pub token: Option<MixpanelToken>,
	pub enabled_install_types: Option<Vec<InstallType>>,
	pub flush_interval_secs: Option<u64>,
	pub limits: Option<LimitsPreset>,
	pub max_key_length: Option<usize>,
	pub max_string_value_length: Option<usize>,
}

impl MixpanelConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.token.is_some() {
			self.token = other.token;
		}
		if other.enabled_install_types.is_some() {
			self.enabled_install_types = other.enabled_install_types;
		}
		if other.flush_interval_secs.is_some() {
			self.flush_interval_secs = other.flush_interval_secs;
		}
		if other.limits.is_some() {
			self.limits = other.limits;
		}
		if other.max_key_length.is_some() {
			self.max_key_length = other.max_key_length;
		}
		if other.max_string_value_length.is_some() {
			self.max_string_value_length = other.max_string_value_length;
		}
	}

	pub fn finalize(self) -> Result<MixpanelConfig, ConfigError> {
		let token = self
			.token
			.filter(|token| !token.is_empty())
			.ok_or_else(|| ConfigError::MissingField("mixpanel.token".to_string()))?;

		let mut limits = self.limits.unwrap_or_default().limits();
		if let Some(max_key_length) = self.max_key_length {
			limits.max_key_length = max_key_length;
		}
		if let Some(max_string_value_length) = self.max_string_value_length {
			limits.max_string_value_length = max_string_value_length;
		}
		limits.validate().map_err(ConfigError::Validation)?;

		let flush_interval = match self.flush_interval_secs {
			Some(0) => {
				return Err(ConfigError::Validation(
					"flush_interval_secs must be positive".to_string(),
				))
			}
			Some(secs) => Some(Duration::from_secs(secs)),
			None => None,
		};

		Ok(MixpanelConfig {
			token,
			enabled_install_types: self
				.enabled_install_types
				.unwrap_or_else(|| InstallType::ALL.to_vec()),
			flush_interval,
			limits,
		})
	}
}

/// Resolved Mixpanel configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MixpanelConfig {
	pub token: MixpanelToken,
	pub enabled_install_types: Vec<InstallType>,
	/// Overrides the host's adaptor flush interval when set.
	pub flush_interval: Option<Duration>,
	pub limits: SanitationLimits,
}

impl MixpanelConfig {
	/// Standard limits, every install type, no flush override.
	pub fn new(token: impl Into<MixpanelToken>) -> Self {
		Self {
			token: token.into(),
			enabled_install_types: InstallType::ALL.to_vec(),
			flush_interval: None,
			limits: SanitationLimits::standard(),
		}
	}
}
