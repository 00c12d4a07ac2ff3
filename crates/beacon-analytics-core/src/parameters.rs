// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Vendor-agnostic event parameters.
//!
//! [`ParameterValue`] is the host's value universe. It is deliberately wider
//! than what any single vendor accepts; each adaptor converts the values it
//! supports and drops the rest.

use std::collections::btree_map;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// A single event parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
	String(String),
	Int(i64),
	UInt(u64),
	Float(f64),
	Bool(bool),
	Date(DateTime<Utc>),
	List(Vec<ParameterValue>),
	Map(BTreeMap<String, ParameterValue>),
	Bytes(Vec<u8>),
	Null,
}

impl ParameterValue {
	/// Short name of the value's kind, used in diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			ParameterValue::String(_) => "string",
			ParameterValue::Int(_) => "int",
			ParameterValue::UInt(_) => "uint",
			ParameterValue::Float(_) => "float",
			ParameterValue::Bool(_) => "bool",
			ParameterValue::Date(_) => "date",
			ParameterValue::List(_) => "list",
			ParameterValue::Map(_) => "map",
			ParameterValue::Bytes(_) => "bytes",
			ParameterValue::Null => "null",
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			ParameterValue::String(s) => Some(s),
			_ => None,
		}
	}
}

impl From<String> for ParameterValue {
	fn from(value: String) -> Self {
		ParameterValue::String(value)
	}
}

impl From<&str> for ParameterValue {
	fn from(value: &str) -> Self {
		ParameterValue::String(value.to_string())
	}
}

impl From<i64> for ParameterValue {
	fn from(value: i64) -> Self {
		ParameterValue::Int(value)
	}
}

impl From<i32> for ParameterValue {
	fn from(value: i32) -> Self {
		ParameterValue::Int(i64::from(value))
	}
}

impl From<u64> for ParameterValue {
	fn from(value: u64) -> Self {
		ParameterValue::UInt(value)
	}
}

impl From<u32> for ParameterValue {
	fn from(value: u32) -> Self {
		ParameterValue::UInt(u64::from(value))
	}
}

impl From<f64> for ParameterValue {
	fn from(value: f64) -> Self {
		ParameterValue::Float(value)
	}
}

impl From<bool> for ParameterValue {
	fn from(value: bool) -> Self {
		ParameterValue::Bool(value)
	}
}

impl From<DateTime<Utc>> for ParameterValue {
	fn from(value: DateTime<Utc>) -> Self {
		ParameterValue::Date(value)
	}
}

impl<T: Into<ParameterValue>> From<Vec<T>> for ParameterValue {
	fn from(values: Vec<T>) -> Self {
		ParameterValue::List(values.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<ParameterValue>> From<Option<T>> for ParameterValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(ParameterValue::Null, Into::into)
	}
}

/// A builder and container for event parameters.
///
/// Keys are unique; inserting an existing key replaces its value. Iteration
/// is in key order so diagnostics are deterministic.
///
/// # Example
///
/// ```
/// use beacon_analytics_core::Parameters;
///
/// let params = Parameters::new()
///     .insert("screen", "paywall")
///     .insert("price", 9.99)
///     .insert("trial", true);
///
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
	inner: BTreeMap<String, ParameterValue>,
}

impl Parameters {
	pub fn new() -> Self {
		Self {
			inner: BTreeMap::new(),
		}
	}

	/// Inserts a key-value pair.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<ParameterValue>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn get(&self, key: &str) -> Option<&ParameterValue> {
		self.inner.get(key)
	}

	pub fn iter(&self) -> btree_map::Iter<'_, String, ParameterValue> {
		self.inner.iter()
	}
}

impl<'a> IntoIterator for &'a Parameters {
	type Item = (&'a String, &'a ParameterValue);
	type IntoIter = btree_map::Iter<'a, String, ParameterValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.inner.iter()
	}
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
	K: Into<String>,
	V: Into<ParameterValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			inner: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}
