use serde_json::Value;

use crate::{Error, Result};
use pathway_config::Columns;
use pathway_domain::RawRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
	pub category: usize,
	pub grouping: usize,
	pub demographic: usize,
	pub description: Option<usize>,
}
impl ColumnIndex {
	/// Locates each field in a header row by case-insensitive alias match. Description is
	/// optional; the other three columns are required.
	pub fn resolve(header: &[String], columns: &Columns) -> Result<Self> {
		let find = |aliases: &[String]| {
			header.iter().position(|name| {
				let name = name.trim().to_lowercase();

				aliases.iter().any(|alias| alias.trim().to_lowercase() == name)
			})
		};
		let required = |label: &str, aliases: &[String]| {
			find(aliases).ok_or_else(|| Error::InvalidResponse {
				message: format!("Header row has no {label} column (looked for {aliases:?})."),
			})
		};

		Ok(Self {
			category: required("category", &columns.category)?,
			grouping: required("grouping", &columns.grouping)?,
			demographic: required("demographic", &columns.demographic)?,
			description: find(&columns.description),
		})
	}

	pub fn row(&self, cells: &[String]) -> RawRow {
		RawRow {
			category: cells.get(self.category).cloned(),
			grouping: cells.get(self.grouping).cloned(),
			demographic: cells.get(self.demographic).cloned(),
			description: self.description.and_then(|index| cells.get(index).cloned()),
		}
	}
}

/// Parses a values payload: either `{ "values": [[...], ...] }` or a bare array of arrays. The
/// first row is the header.
pub fn rows_from_payload(payload: &Value, columns: &Columns) -> Result<Vec<RawRow>> {
	let values = payload
		.get("values")
		.unwrap_or(payload)
		.as_array()
		.ok_or_else(|| Error::InvalidResponse {
			message: "Payload must be an array of rows or an object with a values array."
				.to_string(),
		})?;
	let mut rows = values.iter().map(cells);
	let Some(header) = rows.next() else { return Ok(Vec::new()) };
	let index = ColumnIndex::resolve(&header, columns)?;

	Ok(rows.map(|cells| index.row(&cells)).collect())
}

fn cells(row: &Value) -> Vec<String> {
	let Some(items) = row.as_array() else { return Vec::new() };

	items
		.iter()
		.map(|cell| match cell {
			Value::String(text) => text.clone(),
			Value::Null => String::new(),
			other => other.to_string(),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_headers_case_insensitively() {
		let header: Vec<String> = ["Description", " CATEGORY ", "Group", "Demographics"]
			.iter()
			.map(|name| name.to_string())
			.collect();
		let index = ColumnIndex::resolve(&header, &Columns::default()).expect("resolve failed");

		assert_eq!(
			index,
			ColumnIndex { category: 1, grouping: 2, demographic: 3, description: Some(0) }
		);
	}

	#[test]
	fn missing_required_column_is_an_error() {
		let header = vec!["Category".to_string(), "Grouping".to_string()];
		let err = ColumnIndex::resolve(&header, &Columns::default()).expect_err("expected error");

		assert!(err.to_string().contains("demographic"));
	}
}
