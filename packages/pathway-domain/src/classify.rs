use std::{
	collections::{BTreeSet, HashSet},
	fmt,
};

use serde::Serialize;

use crate::{
	Result,
	text::{self, TermMatcher},
};
use pathway_config::Config;

/// Digest of a query's content words. Follow-ups that share content words share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CoreQueryKey(String);
impl CoreQueryKey {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn prefix(&self) -> &str {
		let len = self.0.len().min(12);

		&self.0[..len]
	}
}
impl fmt::Display for CoreQueryKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[derive(Debug, Clone)]
pub struct QueryClass {
	pub raw: String,
	pub wants_biased_cluster: bool,
	pub is_follow_up: bool,
	pub core_key: CoreQueryKey,
	/// Normalized text handed to the scorer, with follow-up cue words removed.
	pub search_text: String,
}

pub struct QueryClassifier {
	explicit_request: TermMatcher,
	follow_up: TermMatcher,
	cue_words: HashSet<String>,
	stop_words: HashSet<String>,
	min_token_chars: usize,
}
impl QueryClassifier {
	pub fn new(cfg: &Config) -> Result<Self> {
		let explicit_request = TermMatcher::new(
			"biased cluster explicit request",
			&cfg.scoring.biased_cluster.explicit_request_terms,
		)?;
		let follow_up = TermMatcher::new("follow-up", &cfg.classifier.follow_up_phrases)?;
		let mut cue_words = HashSet::new();

		for phrase in cfg.classifier.follow_up_phrases.iter().chain(&cfg.classifier.noise_words) {
			cue_words.extend(text::tokenize(phrase));
		}

		let stop_words =
			cfg.classifier.stop_words.iter().flat_map(|word| text::tokenize(word)).collect();

		Ok(Self {
			explicit_request,
			follow_up,
			cue_words,
			stop_words,
			min_token_chars: cfg.classifier.min_token_chars,
		})
	}

	pub fn classify(&self, query: &str) -> QueryClass {
		let is_follow_up = self.is_follow_up_query(query);
		let search_text = if is_follow_up {
			self.strip_follow_up_noise(query)
		} else {
			text::normalize_text(query)
		};

		QueryClass {
			raw: query.trim().to_string(),
			wants_biased_cluster: self.is_biased_cluster_query(query),
			is_follow_up,
			core_key: self.core_query_key(query),
			search_text,
		}
	}

	pub fn is_biased_cluster_query(&self, query: &str) -> bool {
		self.explicit_request.is_match(&text::normalize_text(query))
	}

	pub fn is_follow_up_query(&self, query: &str) -> bool {
		self.follow_up.is_match(&text::normalize_text(query))
	}

	pub fn core_query_key(&self, query: &str) -> CoreQueryKey {
		let normalized = text::normalize_text(query);
		let content: BTreeSet<&str> = normalized
			.split(' ')
			.filter(|token| token.chars().count() >= self.min_token_chars)
			.filter(|token| !self.stop_words.contains(*token))
			.collect();
		let joined = content.into_iter().collect::<Vec<_>>().join(" ");

		CoreQueryKey(blake3::hash(joined.as_bytes()).to_hex().to_string())
	}

	/// Leaves only the substantive words of a follow-up, e.g. "more home improvement options"
	/// becomes "home improvement". Non-follow-up queries are only normalized.
	pub fn strip_follow_up_noise(&self, query: &str) -> String {
		let normalized = text::normalize_text(query);

		if !self.follow_up.is_match(&normalized) {
			return normalized;
		}

		normalized
			.split(' ')
			.filter(|token| !token.is_empty() && !self.cue_words.contains(*token))
			.collect::<Vec<_>>()
			.join(" ")
	}
}
