use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use crate::{Error, Result};

/// Matches any of a list of terms on word boundaries, so "car" never matches inside
/// "cartography".
#[derive(Debug, Clone)]
pub struct TermMatcher {
	regex: Option<Regex>,
}
impl TermMatcher {
	pub fn new<S>(label: &str, terms: &[S]) -> Result<Self>
	where
		S: AsRef<str>,
	{
		let mut alternatives = Vec::new();

		for term in terms {
			let normalized = normalize_text(term.as_ref());

			if normalized.is_empty() {
				continue;
			}

			alternatives.push(regex::escape(&normalized).replace(' ', r"\s+"));
		}

		if alternatives.is_empty() {
			return Ok(Self { regex: None });
		}

		// Longest first so a multi-word term wins over its own prefix.
		alternatives.sort_by(|lhs, rhs| rhs.len().cmp(&lhs.len()).then_with(|| lhs.cmp(rhs)));
		alternatives.dedup();

		let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
		let regex = RegexBuilder::new(&pattern)
			.case_insensitive(true)
			.build()
			.map_err(|source| Error::TermMatcher { label: label.to_string(), source })?;

		Ok(Self { regex: Some(regex) })
	}

	pub fn is_match(&self, text: &str) -> bool {
		self.regex.as_ref().map(|regex| regex.is_match(text)).unwrap_or(false)
	}

	pub fn is_empty(&self) -> bool {
		self.regex.is_none()
	}
}

/// Lower-cases, turns every non-alphanumeric character into a separator, and collapses runs of
/// separators into one space.
pub fn normalize_text(text: &str) -> String {
	let mut out = String::with_capacity(text.len());

	for ch in text.chars() {
		if ch.is_alphanumeric() {
			out.extend(ch.to_lowercase());
		} else {
			out.push(' ');
		}
	}

	out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether `phrase` occurs in `text` on word boundaries. Both must already be normalized.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
	!phrase.is_empty() && format!(" {text} ").contains(&format!(" {phrase} "))
}

/// Unique tokens in first-seen order.
pub fn tokenize(text: &str) -> Vec<String> {
	let normalized = normalize_text(text);
	let mut out = Vec::new();
	let mut seen = HashSet::new();

	for token in normalized.split(' ') {
		if token.is_empty() {
			continue;
		}
		if seen.insert(token) {
			out.push(token.to_string());
		}
	}

	out
}
