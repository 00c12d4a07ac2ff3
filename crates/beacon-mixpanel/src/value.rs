// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The value universe accepted by the Mixpanel SDK.
//!
//! Mixpanel accepts strings, numbers, booleans, dates and homogeneous lists of
//! those scalars. Host values outside that set (maps, raw bytes, nulls, nested
//! or mixed lists) fail conversion with [`UnsupportedParameterType`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use beacon_analytics_core::ParameterValue;

/// A property value Mixpanel accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MixpanelValue {
	String(String),
	Int(i64),
	UInt(u64),
	Double(f64),
	Bool(bool),
	Date(DateTime<Utc>),
	List(Vec<MixpanelValue>),
}

/// The scalar family a value belongs to; lists must not mix families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScalarFamily {
	Text,
	Number,
	Bool,
	Date,
}

impl MixpanelValue {
	/// Short name of the value's kind, used in diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			MixpanelValue::String(_) => "string",
			MixpanelValue::Int(_) => "int",
			MixpanelValue::UInt(_) => "uint",
			MixpanelValue::Double(_) => "double",
			MixpanelValue::Bool(_) => "bool",
			MixpanelValue::Date(_) => "date",
			MixpanelValue::List(_) => "list",
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			MixpanelValue::String(s) => Some(s),
			_ => None,
		}
	}

	fn family(&self) -> Option<ScalarFamily> {
		match self {
			MixpanelValue::String(_) => Some(ScalarFamily::Text),
			MixpanelValue::Int(_) | MixpanelValue::UInt(_) | MixpanelValue::Double(_) => {
				Some(ScalarFamily::Number)
			}
			MixpanelValue::Bool(_) => Some(ScalarFamily::Bool),
			MixpanelValue::Date(_) => Some(ScalarFamily::Date),
			MixpanelValue::List(_) => None,
		}
	}
}

impl From<&str> for MixpanelValue {
	fn from(value: &str) -> Self {
		MixpanelValue::String(value.to_string())
	}
}

impl From<String> for MixpanelValue {
	fn from(value: String) -> Self {
		MixpanelValue::String(value)
	}
}

/// A host parameter value has no Mixpanel representation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported parameter type '{kind}'")]
pub struct UnsupportedParameterType {
	/// What was rejected, e.g. "map" or "mixed list".
	pub kind: &'static str,
}

impl TryFrom<&ParameterValue> for MixpanelValue {
	type Error = UnsupportedParameterType;

	fn try_from(value: &ParameterValue) -> Result<Self, Self::Error> {
		match value {
			ParameterValue::String(s) => Ok(MixpanelValue::String(s.clone())),
			ParameterValue::Int(i) => Ok(MixpanelValue::Int(*i)),
			ParameterValue::UInt(u) => Ok(MixpanelValue::UInt(*u)),
			ParameterValue::Float(f) => Ok(MixpanelValue::Double(*f)),
			ParameterValue::Bool(b) => Ok(MixpanelValue::Bool(*b)),
			ParameterValue::Date(d) => Ok(MixpanelValue::Date(*d)),
			ParameterValue::List(items) => convert_list(items),
			ParameterValue::Map(_) | ParameterValue::Bytes(_) | ParameterValue::Null => {
				Err(UnsupportedParameterType { kind: value.kind() })
			}
		}
	}
}

impl TryFrom<ParameterValue> for MixpanelValue {
	type Error = UnsupportedParameterType;

	fn try_from(value: ParameterValue) -> Result<Self, Self::Error> {
		MixpanelValue::try_from(&value)
	}
}

fn convert_list(items: &[ParameterValue]) -> Result<MixpanelValue, UnsupportedParameterType> {
	let mut converted = Vec::with_capacity(items.len());
	let mut list_family = None;

	for item in items {
		if matches!(item, ParameterValue::List(_)) {
			return Err(UnsupportedParameterType {
				kind: "nested list",
			});
		}

		let value = MixpanelValue::try_from(item)?;
		let family = value.family();
		match list_family {
			None => list_family = family,
			Some(expected) if family != Some(expected) => {
				return Err(UnsupportedParameterType { kind: "mixed list" });
			}
			Some(_) => {}
		}
		converted.push(value);
	}

	Ok(MixpanelValue::List(converted))
}
