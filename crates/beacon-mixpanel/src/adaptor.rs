// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mixpanel adaptor for the Beacon analytics host.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use beacon_analytics_core::{
	AnalyticsAdaptor, AnalyticsAdaptorWithWriteOnlyUserId, AnalyticsConfig, AnalyticsError,
	InstallType, Parameters, TrimmedEvent, TrimmedUserProperty,
};
use tracing::{debug, info, warn};

use crate::config::MixpanelConfig;
use crate::error::{MixpanelError, Result};
use crate::limits::SanitationLimits;
use crate::sanitize::{sanitize_parameters, MixpanelProperties};
use crate::sdk::{SharedMixpanelInstance, SharedMixpanelSdk};
use crate::token::MixpanelToken;
use crate::value::MixpanelValue;

/// Builder for constructing a [`MixpanelAdaptor`].
pub struct MixpanelAdaptorBuilder {
	token: Option<MixpanelToken>,
	sdk: Option<SharedMixpanelSdk>,
	enabled_install_types: Vec<InstallType>,
	flush_interval: Option<Duration>,
	limits: SanitationLimits,
}

impl MixpanelAdaptorBuilder {
	/// Creates a new builder enabled for every install type with standard limits.
	pub fn new() -> Self {
		Self {
			token: None,
			sdk: None,
			enabled_install_types: InstallType::ALL.to_vec(),
			flush_interval: None,
			limits: SanitationLimits::standard(),
		}
	}

	/// Sets the Mixpanel project token.
	pub fn token(mut self, token: impl Into<MixpanelToken>) -> Self {
		self.token = Some(token.into());
		self
	}

	/// Sets the SDK the adaptor initializes and falls back to.
	pub fn sdk(mut self, sdk: SharedMixpanelSdk) -> Self {
		self.sdk = Some(sdk);
		self
	}

	/// Restricts the install types the adaptor starts for.
	pub fn enabled_install_types(mut self, install_types: impl IntoIterator<Item = InstallType>) -> Self {
		self.enabled_install_types = install_types.into_iter().collect();
		self
	}

	/// Sets a flush interval that overrides the host's adaptor flush interval.
	pub fn flush_interval(mut self, interval: Duration) -> Self {
		self.flush_interval = Some(interval);
		self
	}

	/// Sets the sanitation limits applied to event parameters.
	pub fn limits(mut self, limits: SanitationLimits) -> Self {
		self.limits = limits;
		self
	}

	/// Builds the adaptor.
	pub fn build(self) -> Result<MixpanelAdaptor> {
		let token = self.token.ok_or(MixpanelError::MissingToken)?;
		if token.is_empty() {
			return Err(MixpanelError::MissingToken);
		}
		let sdk = self.sdk.ok_or(MixpanelError::MissingSdk)?;
		self.limits.validate().map_err(MixpanelError::InvalidLimits)?;

		debug!(
			enabled_install_types = ?self.enabled_install_types,
			max_key_length = self.limits.max_key_length,
			max_string_value_length = self.limits.max_string_value_length,
			policy = ?self.limits.policy,
			"Mixpanel adaptor configured"
		);

		Ok(MixpanelAdaptor {
			sdk,
			token,
			enabled_install_types: self.enabled_install_types,
			flush_interval: self.flush_interval,
			limits: self.limits,
			instance: RwLock::new(None),
		})
	}
}

impl Default for MixpanelAdaptorBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Forwards host analytics calls to Mixpanel, enforcing its size limits.
///
/// Until [`AnalyticsAdaptor::start_for`] succeeds, every call targets the
/// SDK's main instance. After it succeeds, calls target the session created
/// by `start_for`.
///
/// # Example
///
/// ```ignore
/// use beacon_mixpanel::{MixpanelAdaptor, SanitationLimits};
///
/// let adaptor = MixpanelAdaptor::builder()
///     .token("project-token")
///     .sdk(sdk)
///     .enabled_install_types([InstallType::FreshInstall])
///     .limits(SanitationLimits::extended_keys())
///     .build()?;
///
/// adaptor.start_for(InstallType::FreshInstall, &AnalyticsConfig::default()).await?;
///
/// let event = adaptor.trim_event(&EventName::new("paywall_shown"));
/// adaptor.track(&event, Some(&Parameters::new().insert("placement", "onboarding")));
/// ```
pub struct MixpanelAdaptor {
	sdk: SharedMixpanelSdk,
	token: MixpanelToken,
	enabled_install_types: Vec<InstallType>,
	flush_interval: Option<Duration>,
	limits: SanitationLimits,
	instance: RwLock<Option<SharedMixpanelInstance>>,
}

impl MixpanelAdaptor {
	/// Creates a new builder for constructing a MixpanelAdaptor.
	pub fn builder() -> MixpanelAdaptorBuilder {
		MixpanelAdaptorBuilder::new()
	}

	/// Builds an adaptor from resolved configuration.
	pub fn from_config(config: &MixpanelConfig, sdk: SharedMixpanelSdk) -> Result<Self> {
		let mut builder = Self::builder()
			.token(config.token.clone())
			.sdk(sdk)
			.enabled_install_types(config.enabled_install_types.iter().copied())
			.limits(config.limits);
		if let Some(interval) = config.flush_interval {
			builder = builder.flush_interval(interval);
		}
		builder.build()
	}

	pub fn limits(&self) -> &SanitationLimits {
		&self.limits
	}

	pub fn enabled_install_types(&self) -> &[InstallType] {
		&self.enabled_install_types
	}

	/// Returns true once `start_for` has created a session.
	pub fn is_initialized(&self) -> bool {
		self.instance
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.is_some()
	}

	/// Initializes the SDK session for `install_type`.
	///
	/// Fails without touching the SDK when the install type is not enabled.
	/// A second successful call creates a fresh session and replaces the first.
	pub fn initialize(
		&self,
		install_type: InstallType,
		host_flush_interval: Option<Duration>,
	) -> beacon_analytics_core::Result<()> {
		if !self.enabled_install_types.contains(&install_type) {
			info!(
				install_type = %install_type,
				"Mixpanel adaptor not enabled for install type"
			);
			return Err(AnalyticsError::UnsupportedInstallType { install_type });
		}

		let instance = self.sdk.initialize(self.token.expose(), false);

		if let Some(interval) = self.flush_interval.or(host_flush_interval) {
			instance.set_flush_interval(interval);
		}

		let previous = self
			.instance
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.replace(instance);
		if previous.is_some() {
			warn!("Mixpanel adaptor reinitialized, previous session replaced");
		}

		info!(
			install_type = %install_type,
			flush_interval_secs = self.flush_interval.or(host_flush_interval).map(|d| d.as_secs()),
			"Mixpanel adaptor started"
		);
		Ok(())
	}

	/// Sanitizes parameters for `event`, logging every issue found.
	pub fn sanitize(&self, event: &TrimmedEvent, params: &Parameters) -> MixpanelProperties {
		let sanitized = sanitize_parameters(params, &self.limits);
		for issue in &sanitized.issues {
			issue.log(event);
		}
		sanitized.properties
	}

	/// The session created by `start_for`, or the SDK's main instance.
	///
	/// Hosts use this for vendor-specific calls the adaptor does not wrap.
	pub fn instance(&self) -> SharedMixpanelInstance {
		let guard = self.instance.read().unwrap_or_else(PoisonError::into_inner);
		match guard.as_ref() {
			Some(instance) => Arc::clone(instance),
			None => {
				drop(guard);
				self.sdk.main_instance()
			}
		}
	}
}

#[async_trait]
impl AnalyticsAdaptor for MixpanelAdaptor {
	async fn start_for(
		&self,
		install_type: InstallType,
		config: &AnalyticsConfig,
	) -> beacon_analytics_core::Result<()> {
		self.initialize(install_type, config.flush_interval_for_adaptors)
	}

	fn track(&self, event: &TrimmedEvent, params: Option<&Parameters>) {
		let properties = params.map(|params| self.sanitize(event, params));
		self.instance().track(event.as_str(), properties);
	}

	fn set_user_property(&self, property: &TrimmedUserProperty, value: Option<&str>) {
		let Some(value) = value else {
			return;
		};
		self.instance()
			.people_set(property.as_str(), MixpanelValue::from(value));
	}

	fn as_write_only_user_id(&self) -> Option<&dyn AnalyticsAdaptorWithWriteOnlyUserId> {
		Some(self)
	}
}

impl AnalyticsAdaptorWithWriteOnlyUserId for MixpanelAdaptor {
	fn set_user_id(&self, user_id: Option<&str>) {
		let Some(user_id) = user_id else {
			return;
		};
		self.instance().identify(user_id);
	}
}

impl std::fmt::Debug for MixpanelAdaptor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MixpanelAdaptor")
			.field("token", &self.token)
			.field("enabled_install_types", &self.enabled_install_types)
			.field("flush_interval", &self.flush_interval)
			.field("limits", &self.limits)
			.field("initialized", &self.is_initialized())
			.finish()
	}
}
