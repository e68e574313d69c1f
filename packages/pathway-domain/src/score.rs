use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
	Record, Result,
	text::{self, TermMatcher},
};
use pathway_config::Scoring;

/// A query prepared once per search and shared across every record scored for it.
#[derive(Debug, Clone)]
pub struct ScoringQuery {
	normalized: String,
	tokens: Vec<String>,
	wants_biased_cluster: bool,
}
impl ScoringQuery {
	pub fn new(query: &str, wants_biased_cluster: bool) -> Self {
		let normalized = text::normalize_text(query);
		let tokens = text::tokenize(&normalized);

		Self { normalized, tokens, wants_biased_cluster }
	}

	pub fn normalized(&self) -> &str {
		&self.normalized
	}

	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	pub fn wants_biased_cluster(&self) -> bool {
		self.wants_biased_cluster
	}

	/// Whether a normalized term appears as a token or, for multi-word terms, as a whole phrase.
	pub fn mentions(&self, term: &str) -> bool {
		if term.contains(' ') {
			return text::contains_phrase(&self.normalized, term);
		}

		self.tokens.iter().any(|token| token == term)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
	/// The record belongs to the biased cluster and the query did not ask for it.
	pub gated: bool,
	pub synonym: f32,
	pub demographic: f32,
	pub description: f32,
	pub phrase: f32,
	pub overlap: f32,
	pub multiplier: f32,
	pub total: f32,
}

pub struct Scorer {
	cluster: TermMatcher,
	synonyms: BTreeMap<String, Vec<String>>,
	category_weights: Vec<(String, f32)>,
	synonym_grouping_points: f32,
	synonym_category_points: f32,
	demographic_points: f32,
	description_points: f32,
	phrase_points: f32,
	overlap_points: f32,
	min_keyword_chars: usize,
}
impl Scorer {
	pub fn new(cfg: &Scoring) -> Result<Self> {
		let cluster = TermMatcher::new("biased cluster", &cfg.biased_cluster.terms)?;
		let synonyms = cfg
			.synonyms
			.iter()
			.map(|(term, phrases)| {
				let phrases = phrases.iter().map(|phrase| phrase.trim().to_lowercase()).collect();

				(text::normalize_text(term), phrases)
			})
			.collect();
		let category_weights = cfg
			.category_weights
			.iter()
			.map(|rule| (rule.contains.trim().to_lowercase(), rule.multiplier))
			.collect();

		Ok(Self {
			cluster,
			synonyms,
			category_weights,
			synonym_grouping_points: cfg.synonym_grouping_points,
			synonym_category_points: cfg.synonym_category_points,
			demographic_points: cfg.demographic_points,
			description_points: cfg.description_points,
			phrase_points: cfg.phrase_points,
			overlap_points: cfg.overlap_points,
			min_keyword_chars: cfg.min_keyword_chars,
		})
	}

	pub fn is_biased_record(&self, record: &Record) -> bool {
		// Every field match is also a match on the joined text, so one check covers both.
		self.cluster.is_match(&text::normalize_text(&record.joined_fields()))
	}

	pub fn score(&self, record: &Record, query: &ScoringQuery) -> f32 {
		self.explain(record, query).total
	}

	pub fn explain(&self, record: &Record, query: &ScoringQuery) -> ScoreBreakdown {
		if !query.wants_biased_cluster && self.is_biased_record(record) {
			return ScoreBreakdown { gated: true, multiplier: 0.0, ..Default::default() };
		}

		let category = record.category.to_lowercase();
		let grouping = record.grouping.to_lowercase();
		let demographic = record.demographic.to_lowercase();
		let description = record.description.to_lowercase();
		let joined = record.joined_fields().to_lowercase();
		let mut out = ScoreBreakdown::default();

		for (term, phrases) in &self.synonyms {
			if !query.mentions(term) {
				continue;
			}
			if phrases.iter().any(|phrase| grouping.contains(phrase.as_str())) {
				out.synonym += self.synonym_grouping_points;
			} else if phrases.iter().any(|phrase| category.contains(phrase.as_str())) {
				out.synonym += self.synonym_category_points;
			}
		}

		for token in query.tokens.iter().filter(|token| self.is_keyword(token)) {
			if demographic.contains(token.as_str()) {
				out.demographic += self.demographic_points;
			}
			if description.contains(token.as_str()) {
				out.description += self.description_points;
			}
			if joined.contains(token.as_str()) {
				out.overlap += self.overlap_points;
			}
		}

		if !query.normalized.is_empty() && text::normalize_text(&joined).contains(&query.normalized)
		{
			out.phrase = self.phrase_points;
		}

		out.multiplier = self.category_multiplier(&category);

		let additive = out.synonym + out.demographic + out.description + out.phrase + out.overlap;

		out.total = (additive * out.multiplier).max(0.0);

		out
	}

	fn is_keyword(&self, token: &str) -> bool {
		token.chars().count() >= self.min_keyword_chars
	}

	fn category_multiplier(&self, category: &str) -> f32 {
		self.category_weights
			.iter()
			.find(|(needle, _)| category.contains(needle.as_str()))
			.map(|(_, multiplier)| *multiplier)
			.unwrap_or(1.0)
	}
}
