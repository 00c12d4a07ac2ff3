// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Conversion of host parameters into Mixpanel properties.
//!
//! [`sanitize_parameters`] is pure: it returns the properties to forward and
//! the list of problems it fixed along the way. The adaptor logs each
//! [`SanitationIssue`] against the event being tracked.
//!
//! Rules, applied to every pair:
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | key over `max_key_length` | key clipped, diagnostic |
//! | string value over `max_string_value_length` | value clipped, diagnostic |
//! | value outside the Mixpanel universe | pair dropped, diagnostic |
//! | two keys clip to the same key | later key in order wins, diagnostic |
//!
//! Non-string values are never length-clipped, including strings inside lists.

use std::borrow::Cow;
use std::collections::BTreeMap;

use beacon_analytics_core::{truncate_graphemes, ParameterValue, Parameters, TrimmedEvent};
use tracing::{error, warn};

use crate::limits::{SanitationLimits, TruncationPolicy};
use crate::value::MixpanelValue;

/// Properties in the shape the Mixpanel SDK accepts.
pub type MixpanelProperties = BTreeMap<String, MixpanelValue>;

/// A problem found and fixed while sanitizing one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitationIssue {
	/// The key exceeded the key ceiling.
	KeyTruncated { key: String, trimmed_key: String },

	/// A string value exceeded the value ceiling.
	ValueTruncated {
		key: String,
		value: String,
		trimmed_value: String,
	},

	/// Combined policy: the pair exceeded a ceiling and was clipped as a whole.
	PairTruncated {
		key: String,
		trimmed_key: String,
		value: Option<String>,
		trimmed_value: Option<String>,
	},

	/// The value has no Mixpanel representation; the pair was dropped.
	UnsupportedValue {
		key: String,
		trimmed_key: String,
		kind: &'static str,
	},

	/// Two keys clipped to the same key; the earlier value was replaced.
	KeyCollision {
		trimmed_key: String,
		replaced_key: String,
		key: String,
	},
}

impl SanitationIssue {
	/// Emits the diagnostic for this issue, naming `event`.
	pub fn log(&self, event: &TrimmedEvent) {
		match self {
			SanitationIssue::KeyTruncated { key, trimmed_key } => {
				error!(
					event = %event,
					key = %key,
					trimmed_key = %trimmed_key,
					"Trimmed parameter key"
				);
			}
			SanitationIssue::ValueTruncated {
				key,
				value,
				trimmed_value,
			} => {
				error!(
					event = %event,
					key = %key,
					value = %value,
					trimmed_value = %trimmed_value,
					"Trimmed parameter value"
				);
			}
			SanitationIssue::PairTruncated {
				key,
				trimmed_key,
				value,
				trimmed_value,
			} => {
				error!(
					event = %event,
					key = %key,
					trimmed_key = %trimmed_key,
					value = value.as_deref().unwrap_or(""),
					trimmed_value = trimmed_value.as_deref().unwrap_or(""),
					"Trimmed parameter"
				);
			}
			SanitationIssue::UnsupportedValue {
				key,
				trimmed_key,
				kind,
			} => {
				error!(
					event = %event,
					key = %key,
					trimmed_key = %trimmed_key,
					kind,
					"Unsupported parameter value, skipping"
				);
			}
			SanitationIssue::KeyCollision {
				trimmed_key,
				replaced_key,
				key,
			} => {
				warn!(
					event = %event,
					trimmed_key = %trimmed_key,
					replaced_key = %replaced_key,
					key = %key,
					"Trimmed parameter keys collided, keeping the later value"
				);
			}
		}
	}
}

/// Result of sanitizing a parameter map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sanitized {
	pub properties: MixpanelProperties,
	pub issues: Vec<SanitationIssue>,
}

/// Converts host parameters into Mixpanel properties within `limits`.
pub fn sanitize_parameters(params: &Parameters, limits: &SanitationLimits) -> Sanitized {
	let mut out = Sanitized::default();
	// trimmed key -> original key, for collision reporting
	let mut origins: BTreeMap<String, String> = BTreeMap::new();

	for (key, value) in params {
		let Some((trimmed_key, converted)) = sanitize_pair(key, value, limits, &mut out.issues)
		else {
			continue;
		};

		if let Some(replaced_key) = origins.insert(trimmed_key.clone(), key.clone()) {
			out.issues.push(SanitationIssue::KeyCollision {
				trimmed_key: trimmed_key.clone(),
				replaced_key,
				key: key.clone(),
			});
		}
		out.properties.insert(trimmed_key, converted);
	}

	out
}

fn sanitize_pair(
	key: &str,
	value: &ParameterValue,
	limits: &SanitationLimits,
	issues: &mut Vec<SanitationIssue>,
) -> Option<(String, MixpanelValue)> {
	let trimmed_key = truncate_graphemes(key, limits.max_key_length);
	let key_clipped = matches!(trimmed_key, Cow::Owned(_));

	if key_clipped && limits.policy == TruncationPolicy::Independent {
		issues.push(SanitationIssue::KeyTruncated {
			key: key.to_string(),
			trimmed_key: trimmed_key.to_string(),
		});
	}

	let (converted, value_clipped) = match value {
		ParameterValue::String(s) => {
			let trimmed_value = truncate_graphemes(s, limits.max_string_value_length);
			let clipped = matches!(trimmed_value, Cow::Owned(_));
			if clipped && limits.policy == TruncationPolicy::Independent {
				issues.push(SanitationIssue::ValueTruncated {
					key: trimmed_key.to_string(),
					value: s.clone(),
					trimmed_value: trimmed_value.to_string(),
				});
			}
			(MixpanelValue::String(trimmed_value.into_owned()), clipped)
		}
		other => match MixpanelValue::try_from(other) {
			Ok(converted) => (converted, false),
			Err(err) => {
				issues.push(SanitationIssue::UnsupportedValue {
					key: key.to_string(),
					trimmed_key: trimmed_key.into_owned(),
					kind: err.kind,
				});
				return None;
			}
		},
	};

	if limits.policy == TruncationPolicy::Combined && (key_clipped || value_clipped) {
		issues.push(SanitationIssue::PairTruncated {
			key: key.to_string(),
			trimmed_key: trimmed_key.to_string(),
			value: value.as_str().map(str::to_string),
			trimmed_value: converted.as_str().map(str::to_string),
		});
	}

	Some((trimmed_key.into_owned(), converted))
}

#[cfg(test)]
mod tests {
	use super::*;
	use beacon_analytics_core::grapheme_len;
	use chrono::{TimeZone, Utc};
	use proptest::prelude::*;
	use std::collections::BTreeMap as Map;

	fn standard() -> SanitationLimits {
		SanitationLimits::standard()
	}

	#[test]
	fn valid_pairs_pass_through_unchanged() {
		let params = Parameters::new()
			.insert("screen", "paywall")
			.insert("price", 9.99)
			.insert("count", 3)
			.insert("trial", true);

		let out = sanitize_parameters(&params, &standard());

		assert!(out.issues.is_empty());
		assert_eq!(out.properties.len(), 4);
		assert_eq!(
			out.properties.get("screen"),
			Some(&MixpanelValue::String("paywall".to_string()))
		);
		assert_eq!(out.properties.get("price"), Some(&MixpanelValue::Double(9.99)));
		assert_eq!(out.properties.get("count"), Some(&MixpanelValue::Int(3)));
		assert_eq!(out.properties.get("trial"), Some(&MixpanelValue::Bool(true)));
	}

	#[test]
	fn key_of_41_chars_is_clipped_to_40_with_one_issue() {
		let key = "k".repeat(41);
		let params = Parameters::new().insert(key.clone(), 1);

		let out = sanitize_parameters(&params, &standard());

		let forwarded: Vec<&String> = out.properties.keys().collect();
		assert_eq!(forwarded.len(), 1);
		assert_eq!(forwarded[0].chars().count(), 40);
		assert_eq!(
			out.issues,
			vec![SanitationIssue::KeyTruncated {
				key,
				trimmed_key: "k".repeat(40),
			}]
		);
	}

	#[test]
	fn long_string_value_is_clipped_to_100() {
		let value = "v".repeat(150);
		let params = Parameters::new().insert("note", value.clone());

		let out = sanitize_parameters(&params, &standard());

		assert_eq!(
			out.properties.get("note"),
			Some(&MixpanelValue::String("v".repeat(100)))
		);
		assert_eq!(
			out.issues,
			vec![SanitationIssue::ValueTruncated {
				key: "note".to_string(),
				value,
				trimmed_value: "v".repeat(100),
			}]
		);
	}

	#[test]
	fn strings_inside_lists_are_not_clipped() {
		let long = "x".repeat(150);
		let params = Parameters::new().insert("tags", vec![long.clone()]);

		let out = sanitize_parameters(&params, &standard());

		assert!(out.issues.is_empty());
		assert_eq!(
			out.properties.get("tags"),
			Some(&MixpanelValue::List(vec![MixpanelValue::String(long)]))
		);
	}

	#[test]
	fn unsupported_value_is_dropped_without_short_circuit() {
		let params = Parameters::new()
			.insert("ok", "short")
			.insert("bad", ParameterValue::Bytes(vec![1, 2, 3]))
			.insert("zz_after", 2);

		let out = sanitize_parameters(&params, &standard());

		assert_eq!(out.properties.len(), 2);
		assert!(out.properties.contains_key("ok"));
		assert!(out.properties.contains_key("zz_after"));
		assert!(!out.properties.contains_key("bad"));
		assert_eq!(
			out.issues,
			vec![SanitationIssue::UnsupportedValue {
				key: "bad".to_string(),
				trimmed_key: "bad".to_string(),
				kind: "bytes",
			}]
		);
	}

	#[test]
	fn long_key_with_unsupported_value_reports_both() {
		let key = "m".repeat(45);
		let params = Parameters::new().insert(key.clone(), ParameterValue::Map(Map::new()));

		let out = sanitize_parameters(&params, &standard());

		assert!(out.properties.is_empty());
		assert_eq!(out.issues.len(), 2);
		assert!(matches!(out.issues[0], SanitationIssue::KeyTruncated { .. }));
		assert!(matches!(
			out.issues[1],
			SanitationIssue::UnsupportedValue { kind: "map", .. }
		));
	}

	#[test]
	fn long_key_and_long_value_report_independently() {
		let key = "k".repeat(50);
		let params = Parameters::new().insert(key, "v".repeat(120));

		let out = sanitize_parameters(&params, &standard());

		assert_eq!(out.issues.len(), 2);
		assert!(matches!(out.issues[0], SanitationIssue::KeyTruncated { .. }));
		assert!(matches!(out.issues[1], SanitationIssue::ValueTruncated { .. }));
	}

	#[test]
	fn extended_keys_preset_allows_long_keys() {
		let key = "k".repeat(200);
		let params = Parameters::new().insert(key.clone(), 1);

		let out = sanitize_parameters(&params, &SanitationLimits::extended_keys());

		assert!(out.issues.is_empty());
		assert!(out.properties.contains_key(&key));
	}

	#[test]
	fn combined_policy_emits_single_issue_per_pair() {
		let key = "k".repeat(50);
		let params = Parameters::new().insert(key.clone(), "v".repeat(120));

		let out = sanitize_parameters(&params, &SanitationLimits::combined());

		assert_eq!(
			out.issues,
			vec![SanitationIssue::PairTruncated {
				key,
				trimmed_key: "k".repeat(40),
				value: Some("v".repeat(120)),
				trimmed_value: Some("v".repeat(100)),
			}]
		);
		assert_eq!(
			out.properties.get(&"k".repeat(40)),
			Some(&MixpanelValue::String("v".repeat(100)))
		);
	}

	#[test]
	fn combined_policy_drops_unsupported_instead_of_aborting() {
		let params = Parameters::new()
			.insert("ok", "short")
			.insert("bad", ParameterValue::Null);

		let out = sanitize_parameters(&params, &SanitationLimits::combined());

		assert_eq!(out.properties.len(), 1);
		assert_eq!(out.issues.len(), 1);
		assert!(matches!(
			out.issues[0],
			SanitationIssue::UnsupportedValue { kind: "null", .. }
		));
	}

	#[test]
	fn colliding_trimmed_keys_keep_later_value() {
		let prefix = "p".repeat(40);
		let first = format!("{prefix}_a");
		let second = format!("{prefix}_b");
		let params = Parameters::new()
			.insert(first.clone(), 1)
			.insert(second.clone(), 2);

		let out = sanitize_parameters(&params, &standard());

		assert_eq!(out.properties.len(), 1);
		assert_eq!(out.properties.get(&prefix), Some(&MixpanelValue::Int(2)));
		assert!(out.issues.contains(&SanitationIssue::KeyCollision {
			trimmed_key: prefix,
			replaced_key: first,
			key: second,
		}));
	}

	#[test]
	fn combined_policy_names_non_string_value_as_absent() {
		let key = "k".repeat(50);
		let params = Parameters::new().insert(key.clone(), 7);

		let out = sanitize_parameters(&params, &SanitationLimits::combined());

		assert_eq!(
			out.issues,
			vec![SanitationIssue::PairTruncated {
				key,
				trimmed_key: "k".repeat(40),
				value: None,
				trimmed_value: None,
			}]
		);
	}

	#[test]
	fn non_string_scalars_are_never_length_clipped() {
		let date = Utc.with_ymd_and_hms(2031, 12, 31, 23, 59, 59).unwrap();
		let params = Parameters::new()
			.insert("big_uint", u64::MAX)
			.insert("big_int", i64::MIN)
			.insert("double", f64::MAX)
			.insert("flag", false)
			.insert("when", date)
			.insert("numbers", vec![u64::MAX; 150]);

		let out = sanitize_parameters(&params, &SanitationLimits::new(1, 1));

		assert!(out.issues.is_empty());
		assert_eq!(out.properties.len(), 6);
		assert_eq!(out.properties.get("big_uint"), Some(&MixpanelValue::UInt(u64::MAX)));
		assert_eq!(out.properties.get("big_int"), Some(&MixpanelValue::Int(i64::MIN)));
		assert_eq!(out.properties.get("double"), Some(&MixpanelValue::Double(f64::MAX)));
		assert_eq!(out.properties.get("flag"), Some(&MixpanelValue::Bool(false)));
		assert_eq!(out.properties.get("when"), Some(&MixpanelValue::Date(date)));
		assert_eq!(
			out.properties.get("numbers"),
			Some(&MixpanelValue::List(vec![MixpanelValue::UInt(u64::MAX); 150]))
		);
	}

	#[test]
	fn decomposed_accents_under_ceiling_pass_unchanged() {
		let value = "e\u{301}".repeat(60);
		let params = Parameters::new().insert("note", value.clone());

		let out = sanitize_parameters(&params, &standard());

		assert!(out.issues.is_empty());
		assert_eq!(out.properties.get("note"), Some(&MixpanelValue::String(value)));
	}

	#[test]
	fn flag_at_key_boundary_is_not_split() {
		let key = format!("{}\u{1F1F7}\u{1F1F4}", "k".repeat(39));
		let params = Parameters::new()
			.insert(key.clone(), 1)
			.insert(format!("{key}_suffix"), 2);

		let out = sanitize_parameters(&params, &standard());

		assert_eq!(out.properties.keys().collect::<Vec<_>>(), vec![&key]);
		assert!(matches!(
			out.issues.as_slice(),
			[
				SanitationIssue::KeyTruncated { trimmed_key, .. },
				SanitationIssue::KeyCollision { .. },
			] if *trimmed_key == key
		));
	}

	#[test]
	fn empty_parameters_produce_empty_properties() {
		let out = sanitize_parameters(&Parameters::new(), &standard());
		assert!(out.properties.is_empty());
		assert!(out.issues.is_empty());
	}

	proptest! {
		#[test]
		fn forwarded_keys_never_exceed_ceiling(keys in proptest::collection::vec("[a-z]{1,80}", 1..10)) {
			let params: Parameters = keys.iter().map(|k| (k.clone(), 1)).collect();
			let out = sanitize_parameters(&params, &standard());
			for key in out.properties.keys() {
				prop_assert!(grapheme_len(key) <= 40);
			}
		}

		#[test]
		fn forwarded_strings_never_exceed_ceiling(value in "\\PC{0,200}") {
			let params = Parameters::new().insert("v", value.clone());
			let out = sanitize_parameters(&params, &standard());
			let forwarded = out.properties.get("v").and_then(MixpanelValue::as_str).unwrap_or_default();
			prop_assert!(grapheme_len(forwarded) <= 100);
			prop_assert!(value.starts_with(forwarded));
		}

		#[test]
		fn one_issue_per_overlong_key(len in 41usize..120) {
			let params = Parameters::new().insert("k".repeat(len), true);
			let out = sanitize_parameters(&params, &standard());
			prop_assert_eq!(out.issues.len(), 1);
			prop_assert_eq!(out.properties.keys().next().map(|k| k.len()), Some(40));
		}

		#[test]
		fn integers_are_never_altered(n in any::<i64>()) {
			let params = Parameters::new().insert("n", n);
			let out = sanitize_parameters(&params, &standard());
			prop_assert_eq!(out.properties.get("n"), Some(&MixpanelValue::Int(n)));
			prop_assert!(out.issues.is_empty());
		}
	}
}
