use std::{
	collections::{HashMap, HashSet},
	sync::Mutex,
};

use crate::RankedRecord;
use pathway_domain::{CoreQueryKey, Pathway};

#[derive(Debug, Clone, Default)]
pub struct Selection {
	/// Newly shown records, already recorded against the key.
	pub selected: Vec<RankedRecord>,
	/// Unseen pathways left after this selection.
	pub remaining: usize,
	/// Every available pathway had already been shown; `selected` is empty.
	pub exhausted: bool,
}

struct SessionEntry {
	shown: HashSet<Pathway>,
	last_used: u64,
}

#[derive(Default)]
struct SessionTable {
	entries: HashMap<CoreQueryKey, SessionEntry>,
	clock: u64,
}

/// Pathways already shown per core query key, bounded by least-recently-used eviction.
pub struct SessionTracker {
	max_keys: usize,
	table: Mutex<SessionTable>,
}
impl SessionTracker {
	pub fn new(max_keys: usize) -> Self {
		Self { max_keys: max_keys.max(1), table: Mutex::new(SessionTable::default()) }
	}

	/// Filters `available` to unseen pathways, takes up to `limit`, and marks them shown. The
	/// whole sequence runs under one lock so concurrent callers never select the same pathway.
	pub fn select_new(
		&self,
		available: &[RankedRecord],
		key: &CoreQueryKey,
		limit: usize,
	) -> Selection {
		let mut table = self.table.lock().unwrap_or_else(|err| err.into_inner());

		table.clock += 1;

		let now = table.clock;

		if !table.entries.contains_key(key) {
			evict_to_fit(&mut table.entries, self.max_keys);
		}

		let entry = table
			.entries
			.entry(key.clone())
			.or_insert_with(|| SessionEntry { shown: HashSet::new(), last_used: now });

		entry.last_used = now;

		let unseen: Vec<&RankedRecord> =
			available.iter().filter(|item| !entry.shown.contains(&item.pathway())).collect();

		if unseen.is_empty() {
			tracing::debug!(core_key = key.prefix(), "Session exhausted.");

			return Selection { selected: Vec::new(), remaining: 0, exhausted: true };
		}

		let take = limit.min(unseen.len());
		let selected: Vec<RankedRecord> =
			unseen[..take].iter().map(|item| (*item).clone()).collect();

		for item in &selected {
			entry.shown.insert(item.pathway());
		}

		Selection { remaining: unseen.len() - take, selected, exhausted: false }
	}

	pub fn shown(&self, key: &CoreQueryKey) -> HashSet<Pathway> {
		let table = self.table.lock().unwrap_or_else(|err| err.into_inner());

		table.entries.get(key).map(|entry| entry.shown.clone()).unwrap_or_default()
	}

	/// Returns whether the key had any session state.
	pub fn reset(&self, key: &CoreQueryKey) -> bool {
		let mut table = self.table.lock().unwrap_or_else(|err| err.into_inner());

		table.entries.remove(key).is_some()
	}

	pub fn clear(&self) {
		let mut table = self.table.lock().unwrap_or_else(|err| err.into_inner());

		table.entries.clear();
	}

	pub fn len(&self) -> usize {
		self.table.lock().unwrap_or_else(|err| err.into_inner()).entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

fn evict_to_fit(entries: &mut HashMap<CoreQueryKey, SessionEntry>, max_keys: usize) {
	while entries.len() >= max_keys {
		let Some(oldest) = entries
			.iter()
			.min_by_key(|(_, entry)| entry.last_used)
			.map(|(key, _)| key.clone())
		else {
			break;
		};

		entries.remove(&oldest);

		tracing::debug!(core_key = oldest.prefix(), "Evicted least recently used session.");
	}
}
