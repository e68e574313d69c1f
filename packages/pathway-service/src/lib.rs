pub mod cache;
pub mod search;
pub mod session;

mod error;

pub use cache::{CacheSnapshot, CacheStatus, DataCache};
pub use error::{Error, Result};
pub use search::{
	ExplainResponse, PathwayItem, SearchResult,
	format::ResponseFormatter,
	ranking::{RankedRecord, Ranker},
};
pub use session::{Selection, SessionTracker};

use std::{future::Future, pin::Pin, sync::Arc};

use pathway_config::{Config, Provider};
use pathway_domain::{QueryClassifier, RawRow};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of raw targeting rows. Column resolution happens behind this boundary.
pub trait DataProvider
where
	Self: Send + Sync,
{
	fn fetch<'a>(&'a self, cfg: &'a Provider) -> BoxFuture<'a, color_eyre::Result<Vec<RawRow>>>;
}

/// Owns the dataset cache and the per-query session memory. Construct once and share.
pub struct PathwayService {
	pub cfg: Config,
	classifier: QueryClassifier,
	ranker: Ranker,
	cache: DataCache,
	sessions: SessionTracker,
	formatter: ResponseFormatter,
}
impl PathwayService {
	pub fn new(cfg: Config) -> Result<Self> {
		Self::with_provider(cfg, Arc::new(DefaultProvider))
	}

	pub fn with_provider(cfg: Config, provider: Arc<dyn DataProvider>) -> Result<Self> {
		let classifier = QueryClassifier::new(&cfg)?;
		let ranker = Ranker::new(&cfg)?;
		let cache = DataCache::new(&cfg, provider);
		let sessions = SessionTracker::new(cfg.session.max_keys as usize);
		let formatter = ResponseFormatter::new(&cfg.format);

		Ok(Self { cfg, classifier, ranker, cache, sessions, formatter })
	}

	pub fn classifier(&self) -> &QueryClassifier {
		&self.classifier
	}

	pub fn cache(&self) -> &DataCache {
		&self.cache
	}

	pub fn sessions(&self) -> &SessionTracker {
		&self.sessions
	}
}

struct DefaultProvider;

impl DataProvider for DefaultProvider {
	fn fetch<'a>(&'a self, cfg: &'a Provider) -> BoxFuture<'a, color_eyre::Result<Vec<RawRow>>> {
		Box::pin(async move { Ok(pathway_providers::fetch_rows(cfg).await?) })
	}
}
