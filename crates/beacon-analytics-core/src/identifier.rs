// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event and user-property identifiers.
//!
//! Raw identifiers ([`EventName`], [`UserPropertyName`]) come from the host
//! taxonomy. Adaptors trim them once, upstream of every vendor call, into
//! [`TrimmedEvent`] and [`TrimmedUserProperty`] so naming stays uniform no
//! matter which vendor is active.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::text::{grapheme_len, truncate_graphemes};

/// Maximum length of an event name after trimming.
pub const EVENT_NAME_MAX_LENGTH: usize = 40;

/// Maximum length of a user property name after trimming.
pub const USER_PROPERTY_NAME_MAX_LENGTH: usize = 24;

/// A raw event name as defined by the host taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventName(String);

impl EventName {
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Clips the name to `max_length` characters.
	pub fn trim(&self, max_length: usize) -> TrimmedEvent {
		TrimmedEvent(trim_identifier(&self.0, max_length, "event"))
	}
}

impl fmt::Display for EventName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for EventName {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl From<String> for EventName {
	fn from(name: String) -> Self {
		Self(name)
	}
}

/// An event name already clipped to the active adaptor's ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrimmedEvent(String);

impl TrimmedEvent {
	pub fn as_str(&self) -> &str {
		&self.0
	}

}

impl fmt::Display for TrimmedEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A raw user property name as defined by the host taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserPropertyName(String);

impl UserPropertyName {
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Clips the name to `max_length` characters.
	pub fn trim(&self, max_length: usize) -> TrimmedUserProperty {
		TrimmedUserProperty(trim_identifier(&self.0, max_length, "user property"))
	}
}

impl fmt::Display for UserPropertyName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for UserPropertyName {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl From<String> for UserPropertyName {
	fn from(name: String) -> Self {
		Self(name)
	}
}

/// A user property name already clipped to the active adaptor's ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrimmedUserProperty(String);

impl TrimmedUserProperty {
	pub fn as_str(&self) -> &str {
		&self.0
	}

}

impl fmt::Display for TrimmedUserProperty {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

fn trim_identifier(raw: &str, max_length: usize, kind: &'static str) -> String {
	match truncate_graphemes(raw, max_length) {
		Cow::Borrowed(name) => name.to_string(),
		Cow::Owned(trimmed) => {
			warn!(
				kind,
				original = %raw,
				original_length = grapheme_len(raw),
				trimmed = %trimmed,
				max_length,
				"Trimmed identifier to maximum length"
			);
			trimmed
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn short_event_name_is_unchanged() {
		let trimmed = EventName::new("app_open").trim(EVENT_NAME_MAX_LENGTH);
		assert_eq!(trimmed.as_str(), "app_open");
	}

	#[test]
	fn long_event_name_is_clipped_to_forty() {
		let raw = "a".repeat(41);
		let trimmed = EventName::new(raw).trim(EVENT_NAME_MAX_LENGTH);
		assert_eq!(trimmed.as_str().chars().count(), 40);
	}

	#[test]
	fn event_name_keeps_flag_at_boundary_whole() {
		let raw = format!("{}\u{1F1F7}\u{1F1F4}", "k".repeat(39));
		let trimmed = EventName::new(raw.clone()).trim(EVENT_NAME_MAX_LENGTH);
		assert_eq!(trimmed.as_str(), raw);

		let trimmed = EventName::new(format!("{raw}_tail")).trim(EVENT_NAME_MAX_LENGTH);
		assert_eq!(trimmed.as_str(), raw);
	}

	#[test]
	fn user_property_counts_decomposed_accents_once() {
		let raw = "e\u{301}".repeat(30);
		let trimmed = UserPropertyName::new(raw).trim(USER_PROPERTY_NAME_MAX_LENGTH);
		assert_eq!(trimmed.as_str(), "e\u{301}".repeat(24));
	}

	#[test]
	fn long_user_property_is_clipped_to_twenty_four() {
		let raw = "subscription_tier_at_signup_time";
		let trimmed = UserPropertyName::new(raw).trim(USER_PROPERTY_NAME_MAX_LENGTH);
		assert_eq!(trimmed.as_str(), "subscription_tier_at_sig");
	}

	#[test]
	fn display_matches_inner_string() {
		let event = EventName::from("purchase");
		assert_eq!(event.to_string(), "purchase");
		assert_eq!(event.trim(40).to_string(), "purchase");
	}

	#[test]
	fn event_name_deserializes_transparently() {
		let event: EventName = serde_json::from_str(r#""onboarding_done""#).unwrap();
		assert_eq!(event.as_str(), "onboarding_done");
	}

	proptest! {
		#[test]
		fn trimmed_event_is_prefix_within_limit(raw in "[a-z_]{0,80}") {
			let trimmed = EventName::new(raw.clone()).trim(EVENT_NAME_MAX_LENGTH);
			prop_assert!(trimmed.as_str().chars().count() <= EVENT_NAME_MAX_LENGTH);
			prop_assert!(raw.starts_with(trimmed.as_str()));
		}

		#[test]
		fn trimmed_user_property_is_prefix_within_limit(raw in "[a-z_]{0,80}") {
			let trimmed = UserPropertyName::new(raw.clone()).trim(USER_PROPERTY_NAME_MAX_LENGTH);
			prop_assert!(trimmed.as_str().chars().count() <= USER_PROPERTY_NAME_MAX_LENGTH);
			prop_assert!(raw.starts_with(trimmed.as_str()));
		}
	}
}
