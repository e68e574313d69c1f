use std::fmt;

use serde::{Deserialize, Serialize};

/// A row as delivered by a data provider, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
	pub category: Option<String>,
	pub grouping: Option<String>,
	pub demographic: Option<String>,
	pub description: Option<String>,
}
impl RawRow {
	pub fn new(category: &str, grouping: &str, demographic: &str, description: &str) -> Self {
		Self {
			category: Some(category.to_string()),
			grouping: Some(grouping.to_string()),
			demographic: Some(demographic.to_string()),
			description: Some(description.to_string()),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
	pub category: String,
	pub grouping: String,
	pub demographic: String,
	pub description: String,
}
impl Record {
	/// Returns `None` when category, grouping, or demographic is missing or blank.
	/// A missing description is treated as empty.
	pub fn from_raw(row: RawRow) -> Option<Self> {
		let category = required(row.category)?;
		let grouping = required(row.grouping)?;
		let demographic = required(row.demographic)?;
		let description = row.description.map(|value| value.trim().to_string()).unwrap_or_default();

		Some(Self { category, grouping, demographic, description })
	}

	pub fn pathway(&self) -> Pathway {
		Pathway {
			category: self.category.clone(),
			grouping: self.grouping.clone(),
			demographic: self.demographic.clone(),
		}
	}

	/// All four fields joined by a single space.
	pub fn joined_fields(&self) -> String {
		format!("{} {} {} {}", self.category, self.grouping, self.demographic, self.description)
	}
}

/// The unit of deduplication and of "already shown". Descriptions do not take part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Pathway {
	pub category: String,
	pub grouping: String,
	pub demographic: String,
}
impl fmt::Display for Pathway {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} → {} → {}", self.category, self.grouping, self.demographic)
	}
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
	records: Vec<Record>,
	skipped: usize,
}
impl Dataset {
	/// Malformed rows are counted and dropped; they never fail the load.
	pub fn from_rows<I>(rows: I) -> Self
	where
		I: IntoIterator<Item = RawRow>,
	{
		let mut records = Vec::new();
		let mut skipped = 0_usize;

		for row in rows {
			match Record::from_raw(row) {
				Some(record) => records.push(record),
				None => skipped += 1,
			}
		}

		Self { records, skipped }
	}

	pub fn records(&self) -> &[Record] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn skipped(&self) -> usize {
		self.skipped
	}
}

fn required(value: Option<String>) -> Option<String> {
	let value = value?;
	let trimmed = value.trim();

	if trimmed.is_empty() {
		return None;
	}

	Some(trimmed.to_string())
}
