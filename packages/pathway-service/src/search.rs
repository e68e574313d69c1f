pub mod format;
pub mod ranking;

use serde::Serialize;

use crate::{CacheStatus, Error, PathwayService, RankedRecord, Result};
use pathway_domain::{QueryClass, ScoringQuery};

/// The sole result shape handed to any chat or HTTP layer.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
	pub success: bool,
	pub pathways: Vec<String>,
	pub message: String,
	pub matches_found: usize,
	pub total_available: usize,
	pub remaining: usize,
	pub exhausted: bool,
	pub is_follow_up: bool,
	pub core_key: String,
	pub items: Vec<PathwayItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathwayItem {
	pub pathway: String,
	pub category: String,
	pub grouping: String,
	pub demographic: String,
	/// Truncated description.
	pub description: String,
	pub score: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainResponse {
	pub query: String,
	pub search_text: String,
	pub wants_biased_cluster: bool,
	pub is_follow_up: bool,
	pub core_key: String,
	pub items: Vec<RankedRecord>,
}

impl PathwayService {
	/// Classifies, ranks, subtracts what this query already showed, and formats the next page.
	/// Failures come back as `success = false` results rather than errors.
	pub async fn search(&self, query: &str) -> SearchResult {
		let class = self.classifier.classify(query);

		match self.try_search(&class).await {
			Ok(result) => result,
			Err(err) => {
				tracing::warn!(core_key = class.core_key.prefix(), error = %err, "Search failed.");

				self.formatter.failure(&class, &err)
			},
		}
	}

	/// Ranked matches with score breakdowns. Does not touch session memory.
	pub async fn explain(&self, query: &str) -> Result<ExplainResponse> {
		let class = self.classifier.classify(query);

		ensure_query(&class)?;

		let snapshot = self.cache.get().await?;
		let prepared = ScoringQuery::new(&class.search_text, class.wants_biased_cluster);
		let items = self.ranker.rank(&snapshot.dataset, &prepared);

		Ok(ExplainResponse {
			query: class.raw,
			search_text: class.search_text,
			wants_biased_cluster: class.wants_biased_cluster,
			is_follow_up: class.is_follow_up,
			core_key: class.core_key.to_string(),
			items,
		})
	}

	/// Forgets what was shown for the query's core key.
	pub fn reset_session(&self, query: &str) -> bool {
		self.sessions.reset(&self.classifier.core_query_key(query))
	}

	pub fn clear_sessions(&self) {
		self.sessions.clear();
	}

	/// Drops the cached dataset's freshness and fetches again.
	pub async fn refresh(&self) -> Result<CacheStatus> {
		self.cache.invalidate().await;

		let snapshot = self.cache.get().await?;

		if snapshot.stale {
			return Err(Error::DataUnavailable {
				message: "Refresh failed; the previous dataset is still being served.".to_string(),
			});
		}

		self.cache.status().await.ok_or_else(|| Error::DataUnavailable {
			message: "Dataset missing after refresh.".to_string(),
		})
	}

	async fn try_search(&self, class: &QueryClass) -> Result<SearchResult> {
		ensure_query(class)?;

		let snapshot = self.cache.get().await?;
		let prepared = ScoringQuery::new(&class.search_text, class.wants_biased_cluster);
		let available = self.ranker.rank(&snapshot.dataset, &prepared);

		if available.is_empty() {
			tracing::info!(
				core_key = class.core_key.prefix(),
				follow_up = class.is_follow_up,
				"No pathways matched."
			);

			return Ok(self.formatter.no_matches(class));
		}

		let selection = self.sessions.select_new(
			&available,
			&class.core_key,
			self.cfg.session.page_size as usize,
		);

		tracing::info!(
			core_key = class.core_key.prefix(),
			follow_up = class.is_follow_up,
			stale = snapshot.stale,
			matches = available.len(),
			selected = selection.selected.len(),
			remaining = selection.remaining,
			exhausted = selection.exhausted,
			"Search completed."
		);

		Ok(self.formatter.selection(class, available.len(), &selection))
	}
}

fn ensure_query(class: &QueryClass) -> Result<()> {
	if class.raw.is_empty() {
		return Err(Error::InvalidRequest { message: "Query must be non-empty.".to_string() });
	}

	Ok(())
}
