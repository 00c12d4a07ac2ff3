// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacted wrapper for the Mixpanel project token.
//!
//! The token never appears in `Debug`, `Display` or serialized output and is
//! zeroized on drop. Call [`MixpanelToken::expose`] at the single place the
//! SDK needs it.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Placeholder printed instead of the token.
pub const REDACTED: &str = "[REDACTED]";

/// A Mixpanel project token.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MixpanelToken {
	inner: String,
}

impl MixpanelToken {
	pub fn new(token: impl Into<String>) -> Self {
		Self {
			inner: token.into(),
		}
	}

	/// Explicitly access the raw token.
	pub fn expose(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.trim().is_empty()
	}
}

impl fmt::Debug for MixpanelToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("MixpanelToken").field(&REDACTED).finish()
	}
}

impl fmt::Display for MixpanelToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl PartialEq for MixpanelToken {
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl Eq for MixpanelToken {}

impl From<&str> for MixpanelToken {
	fn from(token: &str) -> Self {
		Self::new(token)
	}
}

impl From<String> for MixpanelToken {
	fn from(token: String) -> Self {
		Self::new(token)
	}
}

impl Serialize for MixpanelToken {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(REDACTED)
	}
}

impl<'de> Deserialize<'de> for MixpanelToken {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer).map(Self::new)
	}
}
