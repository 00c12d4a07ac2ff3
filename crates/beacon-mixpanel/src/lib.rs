// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mixpanel adaptor for Beacon analytics.
//!
//! [`MixpanelAdaptor`] plugs into the host's [`AnalyticsAdaptor`] contract and
//! forwards events, user properties and user IDs to a Mixpanel SDK. Before an
//! event leaves the process its parameters are sanitized against Mixpanel's
//! limits:
//!
//! - keys and string values are clipped to [`SanitationLimits`]
//! - values Mixpanel cannot represent are dropped
//! - every fix is logged against the event name
//!
//! # Example
//!
//! ```ignore
//! use beacon_mixpanel::{load_config, MixpanelAdaptor};
//!
//! let config = load_config("/etc/beacon/analytics.toml")?;
//! let adaptor = MixpanelAdaptor::from_config(&config, sdk)?;
//! ```
//!
//! [`AnalyticsAdaptor`]: beacon_analytics_core::AnalyticsAdaptor

pub mod adaptor;
pub mod config;
pub mod error;
pub mod limits;
pub mod sanitize;
pub mod sdk;
pub mod sources;
pub mod token;
pub mod value;

pub use adaptor::{MixpanelAdaptor, MixpanelAdaptorBuilder};
pub use config::{MixpanelConfig, MixpanelConfigLayer};
pub use error::{ConfigError, MixpanelError, Result};
pub use limits::{
	LimitsPreset, SanitationLimits, TruncationPolicy, EXTENDED_MAX_KEY_LENGTH,
	MAX_STRING_VALUE_LENGTH, STANDARD_MAX_KEY_LENGTH,
};
pub use sanitize::{sanitize_parameters, MixpanelProperties, SanitationIssue, Sanitized};
pub use sdk::{MixpanelInstance, MixpanelSdk, SharedMixpanelInstance, SharedMixpanelSdk};
pub use sources::{
	load_config, load_config_from, ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource,
};
pub use token::MixpanelToken;
pub use value::{MixpanelValue, UnsupportedParameterType};
