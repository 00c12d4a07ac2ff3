// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The seam to the Mixpanel SDK.
//!
//! The SDK itself owns batching, delivery, retry and persistence. The adaptor
//! only needs the calls below; any client library exposing them can be
//! plugged in. The process-wide fallback instance is reached through
//! [`MixpanelSdk::main_instance`] on the injected SDK, never through a global.

use std::sync::Arc;
use std::time::Duration;

use crate::sanitize::MixpanelProperties;
use crate::value::MixpanelValue;

/// Entry points of the Mixpanel SDK.
#[cfg_attr(test, mockall::automock)]
pub trait MixpanelSdk: Send + Sync {
	/// Creates a session for `token`.
	fn initialize(&self, token: &str, track_automatic_events: bool) -> SharedMixpanelInstance;

	/// Returns the process-wide instance, creating it lazily if needed.
	fn main_instance(&self) -> SharedMixpanelInstance;
}

/// An initialized Mixpanel session.
///
/// Implementations must be safe to call from multiple threads; they are
/// expected to enqueue and return without blocking on the network.
#[cfg_attr(test, mockall::automock)]
pub trait MixpanelInstance: Send + Sync {
	fn set_flush_interval(&self, interval: Duration);

	fn track(&self, event: &str, properties: Option<MixpanelProperties>);

	fn identify(&self, distinct_id: &str);

	/// Sets a property on the current user's profile.
	fn people_set(&self, property: &str, value: MixpanelValue);
}

/// Type alias for a shared SDK handle.
pub type SharedMixpanelSdk = Arc<dyn MixpanelSdk>;

/// Type alias for a shared session handle.
pub type SharedMixpanelInstance = Arc<dyn MixpanelInstance>;
