// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Length ceilings applied to event parameters before they reach Mixpanel.

use serde::{Deserialize, Serialize};

/// Key ceiling of the standard preset.
pub const STANDARD_MAX_KEY_LENGTH: usize = 40;

/// Key ceiling of the extended-keys preset.
pub const EXTENDED_MAX_KEY_LENGTH: usize = 255;

/// String value ceiling shared by every preset.
pub const MAX_STRING_VALUE_LENGTH: usize = 100;

/// How key and value ceilings are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationPolicy {
	/// Key and string value are checked separately, one diagnostic each.
	Independent,
	/// A pair over either ceiling has both key and value clipped, with a
	/// single diagnostic for the pair.
	Combined,
}

/// Sanitation ceilings for one adaptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitationLimits {
	pub max_key_length: usize,
	pub max_string_value_length: usize,
	pub policy: TruncationPolicy,
}

impl SanitationLimits {
	/// Independent checks with custom ceilings.
	pub const fn new(max_key_length: usize, max_string_value_length: usize) -> Self {
		Self {
			max_key_length,
			max_string_value_length,
			policy: TruncationPolicy::Independent,
		}
	}

	/// 40-character keys, 100-character string values.
	pub const fn standard() -> Self {
		Self::new(STANDARD_MAX_KEY_LENGTH, MAX_STRING_VALUE_LENGTH)
	}

	/// 255-character keys, 100-character string values.
	pub const fn extended_keys() -> Self {
		Self::new(EXTENDED_MAX_KEY_LENGTH, MAX_STRING_VALUE_LENGTH)
	}

	/// Standard ceilings checked as a pair.
	pub const fn combined() -> Self {
		Self::standard().with_policy(TruncationPolicy::Combined)
	}

	pub const fn with_policy(mut self, policy: TruncationPolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Returns a description of the first unusable ceiling, if any.
	pub fn validate(&self) -> Result<(), String> {
		if self.max_key_length == 0 {
			return Err("max_key_length must be positive".to_string());
		}
		if self.max_string_value_length == 0 {
			return Err("max_string_value_length must be positive".to_string());
		}
		Ok(())
	}
}

impl Default for SanitationLimits {
	fn default() -> Self {
		Self::standard()
	}
}

/// Named sanitation preset, selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitsPreset {
	#[default]
	Standard,
	ExtendedKeys,
	Combined,
}

impl LimitsPreset {
	pub fn limits(&self) -> SanitationLimits {
		match self {
			LimitsPreset::Standard => SanitationLimits::standard(),
			LimitsPreset::ExtendedKeys => SanitationLimits::extended_keys(),
			LimitsPreset::Combined => SanitationLimits::combined(),
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			LimitsPreset::Standard => "standard",
			LimitsPreset::ExtendedKeys => "extended_keys",
			LimitsPreset::Combined => "combined",
		}
	}
}

impl std::fmt::Display for LimitsPreset {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for LimitsPreset {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"standard" => Ok(LimitsPreset::Standard),
			"extended_keys" => Ok(LimitsPreset::ExtendedKeys),
			"combined" => Ok(LimitsPreset::Combined),
			other => Err(format!("unknown limits preset '{other}'")),
		}
	}
}
