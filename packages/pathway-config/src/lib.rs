mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	BiasedCluster, Cache, CategoryWeight, Classifier, Columns, Config, Format, Provider, Ranking,
	Scoring, Service, Session,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	match cfg.provider.kind.as_str() {
		"file" =>
			if cfg.provider.path.is_none() {
				return Err(Error::Validation {
					message: "provider.path must be set when provider.kind is file.".to_string(),
				});
			},
		"http" => {
			let url = cfg.provider.url.as_deref().unwrap_or_default();

			if !(url.starts_with("http://") || url.starts_with("https://")) {
				return Err(Error::Validation {
					message: "provider.url must be an http(s) URL when provider.kind is http."
						.to_string(),
				});
			}
		},
		_ => {
			return Err(Error::Validation {
				message: "provider.kind must be one of file or http.".to_string(),
			});
		},
	}

	if cfg.provider.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "provider.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.provider.default_headers.values().any(|value| !value.is_string()) {
		return Err(Error::Validation {
			message: "provider.default_headers values must be strings.".to_string(),
		});
	}

	for (label, aliases) in [
		("provider.columns.category", &cfg.provider.columns.category),
		("provider.columns.grouping", &cfg.provider.columns.grouping),
		("provider.columns.demographic", &cfg.provider.columns.demographic),
		("provider.columns.description", &cfg.provider.columns.description),
	] {
		if aliases.is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.cache.ttl_seconds == 0 {
		return Err(Error::Validation {
			message: "cache.ttl_seconds must be greater than zero.".to_string(),
		});
	}
	if cfg.cache.fetch_timeout_seconds == 0 {
		return Err(Error::Validation {
			message: "cache.fetch_timeout_seconds must be greater than zero.".to_string(),
		});
	}
	if cfg.classifier.follow_up_phrases.is_empty() {
		return Err(Error::Validation {
			message: "classifier.follow_up_phrases must be non-empty.".to_string(),
		});
	}

	let scoring = &cfg.scoring;

	for (label, points) in [
		("scoring.synonym_grouping_points", scoring.synonym_grouping_points),
		("scoring.synonym_category_points", scoring.synonym_category_points),
		("scoring.demographic_points", scoring.demographic_points),
		("scoring.description_points", scoring.description_points),
		("scoring.phrase_points", scoring.phrase_points),
		("scoring.overlap_points", scoring.overlap_points),
	] {
		if !points.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if points < 0.0 {
			return Err(Error::Validation { message: format!("{label} must be zero or greater.") });
		}
	}

	for rule in &scoring.category_weights {
		if rule.contains.is_empty() {
			return Err(Error::Validation {
				message: "scoring.category_weights.contains must be non-empty.".to_string(),
			});
		}
		if !rule.multiplier.is_finite() || rule.multiplier < 0.0 {
			return Err(Error::Validation {
				message:
					"scoring.category_weights.multiplier must be a finite number zero or greater."
						.to_string(),
			});
		}
	}

	if scoring.biased_cluster.terms.is_empty()
		!= scoring.biased_cluster.explicit_request_terms.is_empty()
	{
		return Err(Error::Validation {
			message: "scoring.biased_cluster.terms and scoring.biased_cluster.explicit_request_terms must both be set or both be empty."
				.to_string(),
		});
	}
	if !cfg.ranking.min_score.is_finite() || cfg.ranking.min_score <= 0.0 {
		return Err(Error::Validation {
			message: "ranking.min_score must be a finite number greater than zero.".to_string(),
		});
	}
	if cfg.ranking.max_results == 0 {
		return Err(Error::Validation {
			message: "ranking.max_results must be greater than zero.".to_string(),
		});
	}
	if cfg.ranking.per_category_cap == 0 {
		return Err(Error::Validation {
			message: "ranking.per_category_cap must be greater than zero.".to_string(),
		});
	}
	if cfg.session.page_size == 0 {
		return Err(Error::Validation {
			message: "session.page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.session.max_keys == 0 {
		return Err(Error::Validation {
			message: "session.max_keys must be greater than zero.".to_string(),
		});
	}
	if cfg.format.max_description_chars == 0 {
		return Err(Error::Validation {
			message: "format.max_description_chars must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.provider.path.as_deref().map(|path| path.as_os_str().is_empty()).unwrap_or(false) {
		cfg.provider.path = None;
	}
	if cfg.provider.url.as_deref().map(|url| url.trim().is_empty()).unwrap_or(false) {
		cfg.provider.url = None;
	}

	cfg.provider.kind = cfg.provider.kind.trim().to_lowercase();

	for terms in [
		&mut cfg.provider.columns.category,
		&mut cfg.provider.columns.grouping,
		&mut cfg.provider.columns.demographic,
		&mut cfg.provider.columns.description,
		&mut cfg.classifier.follow_up_phrases,
		&mut cfg.classifier.noise_words,
		&mut cfg.classifier.stop_words,
		&mut cfg.scoring.biased_cluster.terms,
		&mut cfg.scoring.biased_cluster.explicit_request_terms,
	] {
		normalize_terms(terms);
	}

	let synonyms = std::mem::take(&mut cfg.scoring.synonyms);

	for (term, mut phrases) in synonyms {
		let term = term.trim().to_lowercase();

		normalize_terms(&mut phrases);

		if term.is_empty() || phrases.is_empty() {
			continue;
		}

		cfg.scoring.synonyms.entry(term).or_default().extend(phrases);
	}

	for rule in &mut cfg.scoring.category_weights {
		rule.contains = rule.contains.trim().to_lowercase();
	}
}

fn normalize_terms(terms: &mut Vec<String>) {
	let mut out = Vec::with_capacity(terms.len());

	for term in terms.drain(..) {
		let term = term.trim().to_lowercase();

		if !term.is_empty() && !out.contains(&term) {
			out.push(term);
		}
	}

	*terms = out;
}
