// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for building and configuring the Mixpanel adaptor.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for adaptor construction.
pub type Result<T> = std::result::Result<T, MixpanelError>;

/// Errors that can occur while building a [`crate::MixpanelAdaptor`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MixpanelError {
	/// No project token was supplied.
	#[error("Mixpanel project token is required")]
	MissingToken,

	/// No vendor SDK was supplied.
	#[error("Mixpanel SDK handle is required")]
	MissingSdk,

	/// A sanitation ceiling is unusable.
	#[error("invalid sanitation limits: {0}")]
	InvalidLimits(String),
}

/// Errors that can occur while loading and validating [`crate::MixpanelConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	#[error("missing required field: {0}")]
	MissingField(String),

	#[error("validation error: {0}")]
	Validation(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_are_descriptive() {
		assert_eq!(
			MixpanelError::MissingToken.to_string(),
			"Mixpanel project token is required"
		);
		assert_eq!(
			MixpanelError::InvalidLimits("max_key_length must be positive".to_string()).to_string(),
			"invalid sanitation limits: max_key_length must be positive"
		);
	}

	#[test]
	fn config_errors_name_the_key() {
		let err = ConfigError::InvalidValue {
			key: "BEACON_MIXPANEL_LIMITS".to_string(),
			message: "unknown limits preset 'huge'".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"invalid value for BEACON_MIXPANEL_LIMITS: unknown limits preset 'huge'"
		);
		assert_eq!(
			ConfigError::MissingField("mixpanel.token".to_string()).to_string(),
			"missing required field: mixpanel.token"
		);
	}
}
