// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, TOML files and environment variables.

use std::path::PathBuf;

use beacon_analytics_core::InstallType;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::config::{MixpanelConfig, MixpanelConfigLayer};
use crate::error::ConfigError;
use crate::limits::LimitsPreset;
use crate::token::MixpanelToken;

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<MixpanelConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<MixpanelConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(MixpanelConfigLayer {
			enabled_install_types: Some(InstallType::ALL.to_vec()),
			limits: Some(LimitsPreset::default()),
			..Default::default()
		})
	}
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
	#[serde(default)]
	mixpanel: MixpanelConfigLayer,
}

/// TOML file source reading the `[mixpanel]` section.
///
/// A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<MixpanelConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(MixpanelConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!("parsed mixpanel layer from TOML");
		Ok(file.mixpanel)
	}
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Environment variable source.
///
/// Convention: BEACON_MIXPANEL_<FIELD>
pub struct EnvSource {
	lookup: EnvLookup,
}

impl EnvSource {
	/// Reads the process environment.
	pub fn new() -> Self {
		Self::with_lookup(|name| std::env::var(name).ok())
	}

	/// Reads variables through `lookup` instead of the process environment.
	pub fn with_lookup(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
		Self {
			lookup: Box::new(lookup),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		(self.lookup)(name).filter(|s| !s.is_empty())
	}

	fn parsed<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
	where
		T: std::str::FromStr,
		T::Err: std::fmt::Display,
	{
		match self.var(name) {
			Some(v) => v
				.trim()
				.parse()
				.map(Some)
				.map_err(|e: T::Err| ConfigError::InvalidValue {
					key: name.to_string(),
					message: format!("invalid value '{v}': {e}"),
				}),
			None => Ok(None),
		}
	}

	fn install_types(&self, name: &str) -> Result<Option<Vec<InstallType>>, ConfigError> {
		let Some(v) = self.var(name) else {
			return Ok(None);
		};
		v.split(',')
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(|s| {
				s.parse::<InstallType>()
					.map_err(|message| ConfigError::InvalidValue {
						key: name.to_string(),
						message,
					})
			})
			.collect::<Result<Vec<_>, _>>()
			.map(Some)
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<MixpanelConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(MixpanelConfigLayer {
			token: self.var("BEACON_MIXPANEL_TOKEN").map(MixpanelToken::new),
			enabled_install_types: self.install_types("BEACON_MIXPANEL_ENABLED_INSTALL_TYPES")?,
			flush_interval_secs: self.parsed("BEACON_MIXPANEL_FLUSH_INTERVAL_SECS")?,
			limits: self.parsed("BEACON_MIXPANEL_LIMITS")?,
			max_key_length: self.parsed("BEACON_MIXPANEL_MAX_KEY_LENGTH")?,
			max_string_value_length: self.parsed("BEACON_MIXPANEL_MAX_STRING_VALUE_LENGTH")?,
		})
	}
}

/// Load configuration from defaults, the TOML file at `path`, and the environment.
pub fn load_config(path: impl Into<PathBuf>) -> Result<MixpanelConfig, ConfigError> {
	load_config_from(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(path)),
		Box::new(EnvSource::new()),
	])
}

/// Merge `sources` in precedence order and finalize the result.
pub fn load_config_from(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<MixpanelConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = MixpanelConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	merged.finalize()
}
