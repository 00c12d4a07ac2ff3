// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Grapheme-aware string truncation shared by identifier trimming and
//! parameter sanitation.
//!
//! Ceilings count user-perceived characters (extended grapheme clusters), so a
//! flag emoji or a letter with a combining accent counts once and is never split.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;

/// Truncates `value` to at most `max_graphemes` grapheme clusters.
///
/// Returns the input borrowed when it already fits, so callers can tell whether
/// truncation happened by matching on [`Cow::Owned`].
///
/// # Example
///
/// ```
/// use beacon_analytics_core::truncate_graphemes;
///
/// assert_eq!(truncate_graphemes("checkout_started", 8), "checkout");
/// assert_eq!(truncate_graphemes("cafe\u{301}", 4), "cafe\u{301}");
/// ```
pub fn truncate_graphemes(value: &str, max_graphemes: usize) -> Cow<'_, str> {
	match value.grapheme_indices(true).nth(max_graphemes) {
		Some((byte_idx, _)) => Cow::Owned(value[..byte_idx].to_string()),
		None => Cow::Borrowed(value),
	}
}

/// Returns the length of `value` in grapheme clusters.
pub fn grapheme_len(value: &str) -> usize {
	value.graphemes(true).count()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn short_input_is_borrowed() {
		let out = truncate_graphemes("abc", 5);
		assert!(matches!(out, Cow::Borrowed("abc")));
	}

	#[test]
	fn exact_length_is_borrowed() {
		let out = truncate_graphemes("abcde", 5);
		assert!(matches!(out, Cow::Borrowed(_)));
	}

	#[test]
	fn long_input_is_owned_and_clipped() {
		let out = truncate_graphemes("abcdefgh", 5);
		assert!(matches!(out, Cow::Owned(_)));
		assert_eq!(out, "abcde");
	}

	#[test]
	fn multibyte_boundaries_are_respected() {
		let out = truncate_graphemes("żółć gęślą", 4);
		assert_eq!(out, "żółć");
	}

	#[test]
	fn decomposed_accents_count_once() {
		let value = "e\u{301}".repeat(60);
		assert_eq!(grapheme_len(&value), 60);
		assert!(matches!(truncate_graphemes(&value, 100), Cow::Borrowed(_)));

		let out = truncate_graphemes(&value, 40);
		assert_eq!(out, "e\u{301}".repeat(40));
	}

	#[test]
	fn flag_at_boundary_is_kept_whole() {
		let value = format!("{}\u{1F1F7}\u{1F1F4}", "k".repeat(39));
		assert_eq!(grapheme_len(&value), 40);
		assert!(matches!(truncate_graphemes(&value, 40), Cow::Borrowed(_)));

		let out = truncate_graphemes(&value, 39);
		assert_eq!(out, "k".repeat(39));

		let longer = format!("{value}k");
		assert_eq!(truncate_graphemes(&longer, 40), value);
	}

	#[test]
	fn zero_limit_yields_empty() {
		assert_eq!(truncate_graphemes("abc", 0), "");
		assert_eq!(truncate_graphemes("", 0), "");
	}

	proptest! {
		#[test]
		fn result_never_exceeds_limit(value in "\\PC{0,80}", max in 0usize..60) {
			let out = truncate_graphemes(&value, max);
			prop_assert!(grapheme_len(&out) <= max);
		}

		#[test]
		fn result_is_prefix_of_input(value in "\\PC{0,80}", max in 0usize..60) {
			let out = truncate_graphemes(&value, max);
			prop_assert!(value.starts_with(out.as_ref()));
		}

		#[test]
		fn clipped_output_has_exact_limit(value in "[a-z]{41,120}") {
			let out = truncate_graphemes(&value, 40);
			prop_assert_eq!(grapheme_len(&out), 40);
		}
	}
}
