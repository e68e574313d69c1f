mod diversity;

use std::cmp::Ordering;

use serde::Serialize;

use crate::Result;
use pathway_config::Config;
use pathway_domain::{Dataset, Pathway, Record, ScoreBreakdown, Scorer, ScoringQuery};

#[derive(Debug, Clone, Serialize)]
pub struct RankedRecord {
	pub record: Record,
	pub score: f32,
	pub breakdown: ScoreBreakdown,
}
impl RankedRecord {
	pub fn pathway(&self) -> Pathway {
		self.record.pathway()
	}
}

pub struct Ranker {
	scorer: Scorer,
	min_score: f32,
	max_results: usize,
	per_category_cap: usize,
}
impl Ranker {
	pub fn new(cfg: &Config) -> Result<Self> {
		Ok(Self {
			scorer: Scorer::new(&cfg.scoring)?,
			min_score: cfg.ranking.min_score,
			max_results: cfg.ranking.max_results as usize,
			per_category_cap: cfg.ranking.per_category_cap as usize,
		})
	}

	/// Every match worth showing for `query`, best first, independent of session memory.
	/// Ties keep dataset order, so a fixed snapshot always ranks the same way.
	pub fn rank(&self, dataset: &Dataset, query: &ScoringQuery) -> Vec<RankedRecord> {
		let mut scored = Vec::new();

		for (index, record) in dataset.records().iter().enumerate() {
			let mut breakdown = self.scorer.explain(record, query);

			if !breakdown.total.is_finite() {
				tracing::warn!(
					index,
					category = %record.category,
					"Non-finite score treated as zero."
				);

				breakdown.total = 0.0;
			}
			if breakdown.total > self.min_score {
				scored.push((index, breakdown));
			}
		}

		// `sort_by` is stable, so equal scores stay in dataset order.
		scored.sort_by(|(_, lhs), (_, rhs)| cmp_f32_desc(lhs.total, rhs.total));

		let candidates = scored.into_iter().map(|(index, breakdown)| RankedRecord {
			record: dataset.records()[index].clone(),
			score: breakdown.total,
			breakdown,
		});

		diversity::select_diverse(candidates, self.max_results, self.per_category_cap)
	}
}

pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}
