// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types surfaced to the host framework by adaptors.

use thiserror::Error;

use crate::install::InstallType;

/// Errors an adaptor may return to the host.
///
/// Tracking and property calls never return errors; only starting an adaptor
/// can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
	/// The adaptor is not enabled for the current install type.
	#[error("adaptor is not enabled for install type '{install_type}'")]
	UnsupportedInstallType { install_type: InstallType },
}

/// Result type alias for adaptor operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
