// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Vendor-agnostic analytics contracts for Beacon.
//!
//! This crate defines what the host analytics framework hands to vendor
//! adaptors:
//!
//! - Event and user-property identifiers, with trimming to vendor ceilings
//! - The [`ParameterValue`] universe and the [`Parameters`] builder
//! - [`InstallType`] gating and the host [`AnalyticsConfig`]
//! - The [`AnalyticsAdaptor`] capability trait and the optional
//!   [`AnalyticsAdaptorWithWriteOnlyUserId`] identity capability

pub mod adaptor;
pub mod config;
pub mod error;
pub mod identifier;
pub mod install;
pub mod parameters;
pub mod text;

pub use adaptor::{
	AnalyticsAdaptor, AnalyticsAdaptorWithWriteOnlyUserId, NoOpAdaptor, SharedAnalyticsAdaptor,
};
pub use config::AnalyticsConfig;
pub use error::{AnalyticsError, Result};
pub use identifier::{
	EventName, TrimmedEvent, TrimmedUserProperty, UserPropertyName, EVENT_NAME_MAX_LENGTH,
	USER_PROPERTY_NAME_MAX_LENGTH,
};
pub use install::InstallType;
pub use parameters::{ParameterValue, Parameters};
pub use text::{grapheme_len, truncate_graphemes};
