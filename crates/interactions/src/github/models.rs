//! Response bodies of the GitHub projects API, trimmed to the fields in use.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// GitHub ids are numbers; test doubles and older payloads use strings.
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	match Value::deserialize(deserializer)? {
		Value::String(s) => Ok(s),
		Value::Number(n) => Ok(n.to_string()),
		other => Err(serde::de::Error::custom(format!("expected a string or numeric id, got {other}"))),
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
	#[serde(deserialize_with = "id_string")]
	pub id: String,
	pub name: String,
	pub number: u64,
	pub columns_url: String,
	#[serde(default)]
	pub html_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Column {
	#[serde(deserialize_with = "id_string")]
	pub id: String,
	#[serde(default)]
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Card {
	#[serde(deserialize_with = "id_string")]
	pub id: String,
	#[serde(default)]
	pub note: Option<String>,
	/// API URL of the column currently holding the card.
	#[serde(default)]
	pub column_url: Option<String>,
	#[serde(default)]
	pub archived: bool,
}

impl Card {
	/// Whether the card sits in the column with id `column_id`.
	pub fn is_in_column(&self, column_id: &str) -> bool {
		self.column_url
			.as_deref()
			.and_then(|url| url.trim_end_matches('/').rsplit('/').next())
			.is_some_and(|last| last == column_id)
	}
}
