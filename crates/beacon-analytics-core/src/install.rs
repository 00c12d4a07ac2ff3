// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Install type classification used to gate adaptors.

use serde::{Deserialize, Serialize};

/// How the current process was installed.
///
/// Adaptors carry an allow-list of install types and refuse to start for any
/// other type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallType {
	/// First launch after a fresh install.
	FreshInstall,
	/// First launch after an application update.
	Update,
	/// Install detected as a reinstall on a device seen before.
	Reinstall,
}

impl InstallType {
	/// Every install type, in declaration order.
	pub const ALL: [InstallType; 3] = [
		InstallType::FreshInstall,
		InstallType::Update,
		InstallType::Reinstall,
	];

	/// Returns the string representation ("fresh_install", "update" or "reinstall").
	pub fn as_str(&self) -> &'static str {
		match self {
			InstallType::FreshInstall => "fresh_install",
			InstallType::Update => "update",
			InstallType::Reinstall => "reinstall",
		}
	}
}

impl std::fmt::Display for InstallType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for InstallType {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"fresh_install" => Ok(InstallType::FreshInstall),
			"update" => Ok(InstallType::Update),
			"reinstall" => Ok(InstallType::Reinstall),
			other => Err(format!("unknown install type '{other}'")),
		}
	}
}
