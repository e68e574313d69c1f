use std::{
	sync::{Arc, Mutex},
	time::Duration,
};

use time::OffsetDateTime;
use tokio::{
	sync::{RwLock, watch},
	time::Instant,
};

use crate::{DataProvider, Error, Result};
use pathway_config::{Config, Provider};
use pathway_domain::Dataset;

#[derive(Debug, Clone)]
pub struct CacheSnapshot {
	pub dataset: Arc<Dataset>,
	/// The latest refresh failed and an older dataset is being served.
	pub stale: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStatus {
	pub rows: usize,
	pub skipped: usize,
	#[serde(with = "time::serde::rfc3339")]
	pub fetched_at: OffsetDateTime,
	pub age_secs: u64,
	pub expired: bool,
}

#[derive(Clone)]
struct CacheEntry {
	dataset: Arc<Dataset>,
	loaded_at: Instant,
	fetched_at: OffsetDateTime,
	invalidated: bool,
}

type RefreshOutcome = std::result::Result<Arc<Dataset>, String>;

/// A refresh running in its own task. Callers only hold a receiver, so dropping a caller never
/// cancels the fetch.
struct InFlight {
	outcome: watch::Receiver<Option<RefreshOutcome>>,
	deadline: Instant,
}

struct CacheInner {
	provider: Arc<dyn DataProvider>,
	provider_cfg: Provider,
	ttl: Duration,
	fetch_timeout: Duration,
	entry: RwLock<Option<CacheEntry>>,
	in_flight: Mutex<Option<InFlight>>,
}

/// Last successfully fetched dataset with a time-to-live. Concurrent misses share one fetch;
/// a failed fetch falls back to the previous dataset when there is one.
pub struct DataCache {
	inner: Arc<CacheInner>,
}
impl DataCache {
	pub fn new(cfg: &Config, provider: Arc<dyn DataProvider>) -> Self {
		Self {
			inner: Arc::new(CacheInner {
				provider,
				provider_cfg: cfg.provider.clone(),
				ttl: Duration::from_secs(cfg.cache.ttl_seconds),
				fetch_timeout: Duration::from_secs(cfg.cache.fetch_timeout_seconds),
				entry: RwLock::new(None),
				in_flight: Mutex::new(None),
			}),
		}
	}

	pub async fn get(&self) -> Result<CacheSnapshot> {
		if let Some(dataset) = self.inner.fresh_dataset().await {
			tracing::trace!(rows = dataset.len(), "Dataset cache hit.");

			return Ok(CacheSnapshot { dataset, stale: false });
		}

		let (receiver, deadline) = self.join_or_start_refresh();

		match wait_for_outcome(receiver, deadline, self.inner.fetch_timeout).await {
			Ok(dataset) => Ok(CacheSnapshot { dataset, stale: false }),
			Err(failure) => self.inner.fallback(&failure).await,
		}
	}

	/// Forces the next `get` to refetch. The current dataset stays available as a fallback.
	pub async fn invalidate(&self) {
		if let Some(entry) = self.inner.entry.write().await.as_mut() {
			entry.invalidated = true;
		}
	}

	pub async fn status(&self) -> Option<CacheStatus> {
		let guard = self.inner.entry.read().await;
		let entry = guard.as_ref()?;
		let age = entry.loaded_at.elapsed();

		Some(CacheStatus {
			rows: entry.dataset.len(),
			skipped: entry.dataset.skipped(),
			fetched_at: entry.fetched_at,
			age_secs: age.as_secs(),
			expired: entry.invalidated || age > self.inner.ttl,
		})
	}

	fn join_or_start_refresh(&self) -> (watch::Receiver<Option<RefreshOutcome>>, Instant) {
		let mut slot = self.inner.in_flight.lock().unwrap_or_else(|err| err.into_inner());

		// A closed channel with the slot still set means the refresh task died before reporting.
		if let Some(flight) = slot.as_ref().filter(|flight| flight.outcome.has_changed().is_ok()) {
			tracing::trace!("Joining in-flight dataset refresh.");

			return (flight.outcome.clone(), flight.deadline);
		}

		let (sender, receiver) = watch::channel(None);
		let deadline = Instant::now() + self.inner.fetch_timeout;

		*slot = Some(InFlight { outcome: receiver.clone(), deadline });

		tokio::spawn(self.inner.clone().refresh(sender));

		(receiver, deadline)
	}
}

impl CacheInner {
	async fn refresh(self: Arc<Self>, sender: watch::Sender<Option<RefreshOutcome>>) {
		let started = Instant::now();
		let fetch = self.provider.fetch(&self.provider_cfg);
		let outcome = match tokio::time::timeout(self.fetch_timeout, fetch).await {
			Ok(Ok(rows)) => {
				let dataset = Arc::new(Dataset::from_rows(rows));

				tracing::info!(
					rows = dataset.len(),
					skipped = dataset.skipped(),
					elapsed_ms = started.elapsed().as_millis() as u64,
					"Dataset refreshed."
				);

				if dataset.skipped() > 0 {
					tracing::warn!(skipped = dataset.skipped(), "Dropped malformed rows.");
				}

				*self.entry.write().await = Some(CacheEntry {
					dataset: dataset.clone(),
					loaded_at: Instant::now(),
					fetched_at: OffsetDateTime::now_utc(),
					invalidated: false,
				});

				Ok(dataset)
			},
			Ok(Err(err)) => Err(format!("Fetch failed: {err}")),
			Err(_) => Err(timeout_message(self.fetch_timeout)),
		};

		if let Err(failure) = &outcome {
			tracing::warn!(error = %failure, "Dataset refresh failed.");
		}

		// Publish before clearing the slot so a caller that joins in between still sees it.
		sender.send_replace(Some(outcome));

		*self.in_flight.lock().unwrap_or_else(|err| err.into_inner()) = None;
	}

	async fn fresh_dataset(&self) -> Option<Arc<Dataset>> {
		let guard = self.entry.read().await;
		let entry = guard.as_ref()?;

		if entry.invalidated || entry.loaded_at.elapsed() > self.ttl {
			return None;
		}

		Some(entry.dataset.clone())
	}

	async fn fallback(&self, failure: &str) -> Result<CacheSnapshot> {
		let guard = self.entry.read().await;

		match guard.as_ref() {
			Some(entry) => {
				let stale = entry.invalidated || entry.loaded_at.elapsed() > self.ttl;

				if stale {
					tracing::warn!(
						fetched_at = %entry.fetched_at,
						"Serving stale dataset after failed refresh."
					);
				}

				Ok(CacheSnapshot { dataset: entry.dataset.clone(), stale })
			},
			None => Err(Error::DataUnavailable { message: failure.to_string() }),
		}
	}
}

/// Waits for the shared refresh, but never past the deadline set when that refresh started.
async fn wait_for_outcome(
	mut receiver: watch::Receiver<Option<RefreshOutcome>>,
	deadline: Instant,
	fetch_timeout: Duration,
) -> RefreshOutcome {
	match tokio::time::timeout_at(deadline, receiver.wait_for(Option::is_some)).await {
		Ok(Ok(outcome)) => Option::clone(&outcome)
			.unwrap_or_else(|| Err("Refresh finished without a result.".to_string())),
		Ok(Err(_)) => Err("Refresh task ended without a result.".to_string()),
		Err(_) => Err(timeout_message(fetch_timeout)),
	}
}

fn timeout_message(fetch_timeout: Duration) -> String {
	format!("Fetch timed out after {}s.", fetch_timeout.as_secs())
}
