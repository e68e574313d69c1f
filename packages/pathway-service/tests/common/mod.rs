#![allow(dead_code)]

use std::{
	sync::{
		Arc,
		atomic::{AtomicBool, AtomicUsize, Ordering},
	},
	time::Duration,
};

use pathway_config::{Config, Provider};
use pathway_domain::RawRow;
use pathway_service::{BoxFuture, DataProvider, PathwayService};

pub struct StaticProvider {
	rows: Vec<RawRow>,
	calls: Arc<AtomicUsize>,
	failing: Arc<AtomicBool>,
	delay: Option<Duration>,
}
impl StaticProvider {
	pub fn new(rows: Vec<RawRow>) -> Self {
		Self {
			rows,
			calls: Arc::new(AtomicUsize::new(0)),
			failing: Arc::new(AtomicBool::new(false)),
			delay: None,
		}
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);

		self
	}

	pub fn calls(&self) -> Arc<AtomicUsize> {
		self.calls.clone()
	}

	pub fn failing(&self) -> Arc<AtomicBool> {
		self.failing.clone()
	}
}
impl DataProvider for StaticProvider {
	fn fetch<'a>(&'a self, _cfg: &'a Provider) -> BoxFuture<'a, color_eyre::Result<Vec<RawRow>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let rows = self.rows.clone();
		let failing = self.failing.load(Ordering::SeqCst);
		let delay = self.delay;

		Box::pin(async move {
			if let Some(delay) = delay {
				tokio::time::sleep(delay).await;
			}
			if failing {
				return Err(color_eyre::eyre::eyre!("Upstream sheet unavailable."));
			}

			Ok(rows)
		})
	}
}

pub fn config() -> Config {
	toml::from_str("[provider]\nkind = \"file\"\npath = \"unused.json\"\n")
		.expect("Failed to parse test config.")
}

pub fn row(category: &str, grouping: &str, demographic: &str, description: &str) -> RawRow {
	RawRow::new(category, grouping, demographic, description)
}

pub fn service_with(provider: StaticProvider) -> PathwayService {
	PathwayService::with_provider(config(), Arc::new(provider))
		.expect("Service must build from defaults.")
}

pub fn scenario_rows() -> Vec<RawRow> {
	vec![
		row("Automotive", "In Market for Auto", "Acura", ""),
		row("Home & Garden", "Hardware Store", "Home Improvement", ""),
	]
}

pub fn fitness_rows() -> Vec<RawRow> {
	vec![
		row("Health & Fitness", "Gyms", "Fitness Enthusiasts", "Regular gym visitors"),
		row("Travel", "Cruises", "Retirees", "Cruise bookings in the past year"),
		row("Interests", "Sports", "Runners", "Fitness fans who log runs"),
	]
}
