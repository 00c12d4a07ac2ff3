// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Capability contract between the host framework and vendor adaptors.
//!
//! The host owns the lifecycle: it decides which adaptors run and calls
//! [`AnalyticsAdaptor::start_for`] once per process. After that it trims
//! identifiers through the adaptor and forwards events and user properties.
//!
//! Identity is a separate, optional capability. Hosts discover it with
//! [`AnalyticsAdaptor::as_write_only_user_id`] before calling
//! [`AnalyticsAdaptorWithWriteOnlyUserId::set_user_id`].
//!
//! # Example
//!
//! ```ignore
//! use beacon_analytics_core::{AnalyticsAdaptor, AnalyticsConfig, EventName, InstallType};
//!
//! adaptor.start_for(InstallType::FreshInstall, &AnalyticsConfig::default()).await?;
//!
//! let event = adaptor.trim_event(&EventName::new("paywall_shown"));
//! adaptor.track(&event, None);
//!
//! if let Some(identity) = adaptor.as_write_only_user_id() {
//!     identity.set_user_id(Some("user-42"));
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::identifier::{
	EventName, TrimmedEvent, TrimmedUserProperty, UserPropertyName, EVENT_NAME_MAX_LENGTH,
	USER_PROPERTY_NAME_MAX_LENGTH,
};
use crate::install::InstallType;
use crate::parameters::Parameters;

/// A vendor integration driven by the host analytics framework.
///
/// Tracking and property calls are fire-and-forget: implementations log
/// problems and never surface them to the caller.
#[async_trait]
pub trait AnalyticsAdaptor: Send + Sync + 'static {
	/// Starts the vendor integration for the given install type.
	///
	/// Must be called once per process, before concurrent tracking begins.
	async fn start_for(&self, install_type: InstallType, config: &AnalyticsConfig) -> Result<()>;

	/// Forwards an event with optional parameters.
	fn track(&self, event: &TrimmedEvent, params: Option<&Parameters>);

	/// Sets a user property. `None` is a no-op.
	fn set_user_property(&self, property: &TrimmedUserProperty, value: Option<&str>);

	/// Clips a raw event name to the adaptor's event name ceiling.
	fn trim_event(&self, event: &EventName) -> TrimmedEvent {
		event.trim(EVENT_NAME_MAX_LENGTH)
	}

	/// Clips a raw user property name to the adaptor's property name ceiling.
	fn trim_user_property(&self, property: &UserPropertyName) -> TrimmedUserProperty {
		property.trim(USER_PROPERTY_NAME_MAX_LENGTH)
	}

	/// Returns the write-only user ID capability, if supported.
	fn as_write_only_user_id(&self) -> Option<&dyn AnalyticsAdaptorWithWriteOnlyUserId> {
		None
	}
}

/// Optional capability for adaptors that can associate events with a user ID.
pub trait AnalyticsAdaptorWithWriteOnlyUserId: AnalyticsAdaptor {
	/// Sets the user ID. `None` is a no-op.
	fn set_user_id(&self, user_id: Option<&str>);
}

/// Type alias for a shared adaptor.
pub type SharedAnalyticsAdaptor = Arc<dyn AnalyticsAdaptor>;

/// An adaptor that accepts every call and forwards nothing.
///
/// Hosts use this when analytics is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAdaptor;

#[async_trait]
impl AnalyticsAdaptor for NoOpAdaptor {
	async fn start_for(&self, _install_type: InstallType, _config: &AnalyticsConfig) -> Result<()> {
		Ok(())
	}

	fn track(&self, _event: &TrimmedEvent, _params: Option<&Parameters>) {}

	fn set_user_property(&self, _property: &TrimmedUserProperty, _value: Option<&str>) {}
}
