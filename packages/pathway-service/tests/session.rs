use std::{collections::HashSet, sync::Arc, thread};

use pathway_config::Config;
use pathway_domain::{QueryClassifier, Record, ScoreBreakdown};
use pathway_service::{RankedRecord, SessionTracker};

fn classifier() -> QueryClassifier {
	let cfg: Config = toml::from_str("[provider]\nkind = \"file\"\npath = \"unused.json\"\n")
		.expect("Failed to parse test config.");

	QueryClassifier::new(&cfg).expect("Classifier must build.")
}

fn available(count: usize) -> Vec<RankedRecord> {
	(0..count)
		.map(|i| RankedRecord {
			record: Record {
				category: format!("Category {i}"),
				grouping: "Grouping".to_string(),
				demographic: format!("Demographic {i}"),
				description: String::new(),
			},
			score: (count - i) as f32,
			breakdown: ScoreBreakdown::default(),
		})
		.collect()
}

#[test]
fn selects_in_order_and_reports_remaining() {
	let tracker = SessionTracker::new(50);
	let key = classifier().core_query_key("pet owners");
	let items = available(5);
	let first = tracker.select_new(&items, &key, 3);

	assert!(!first.exhausted);
	assert_eq!(first.remaining, 2);
	assert_eq!(first.selected[0].record.category, "Category 0");

	let second = tracker.select_new(&items, &key, 3);

	assert_eq!(second.selected.len(), 2);
	assert_eq!(second.remaining, 0);
	assert_eq!(second.selected[0].record.category, "Category 3");

	let third = tracker.select_new(&items, &key, 3);

	assert!(third.exhausted);
	assert!(third.selected.is_empty());
	assert_eq!(tracker.shown(&key).len(), 5);
}

#[test]
fn keys_are_tracked_independently() {
	let classifier = classifier();
	let tracker = SessionTracker::new(50);
	let items = available(2);
	let pets = classifier.core_query_key("pet owners");
	let travel = classifier.core_query_key("frequent travelers");

	tracker.select_new(&items, &pets, 3);

	assert!(tracker.select_new(&items, &pets, 3).exhausted);
	assert_eq!(tracker.select_new(&items, &travel, 3).selected.len(), 2);
}

#[test]
fn concurrent_callers_never_select_the_same_pathway() {
	let tracker = Arc::new(SessionTracker::new(50));
	let key = classifier().core_query_key("gardeners");
	let items = Arc::new(available(16));
	let handles: Vec<_> = (0..16)
		.map(|_| {
			let tracker = tracker.clone();
			let key = key.clone();
			let items = items.clone();

			thread::spawn(move || {
				tracker
					.select_new(&items, &key, 1)
					.selected
					.into_iter()
					.map(|item| item.pathway())
					.collect::<Vec<_>>()
			})
		})
		.collect();
	let mut seen = HashSet::new();

	for handle in handles {
		for pathway in handle.join().expect("thread panicked") {
			assert!(seen.insert(pathway), "Pathway selected twice.");
		}
	}

	assert_eq!(seen.len(), 16);
}

#[test]
fn least_recently_used_key_is_evicted() {
	let classifier = classifier();
	let tracker = SessionTracker::new(2);
	let items = available(4);
	let first = classifier.core_query_key("first audience");
	let second = classifier.core_query_key("second audience");
	let third = classifier.core_query_key("third audience");

	tracker.select_new(&items, &first, 1);
	tracker.select_new(&items, &second, 1);
	tracker.select_new(&items, &first, 1);
	tracker.select_new(&items, &third, 1);

	assert_eq!(tracker.len(), 2);
	assert_eq!(tracker.shown(&first).len(), 2);
	assert!(tracker.shown(&second).is_empty());
	assert_eq!(tracker.shown(&third).len(), 1);
}

#[test]
fn reset_forgets_one_key() {
	let tracker = SessionTracker::new(50);
	let key = classifier().core_query_key("bakers");
	let items = available(1);

	tracker.select_new(&items, &key, 3);

	assert!(tracker.reset(&key));
	assert!(!tracker.reset(&key));
	assert_eq!(tracker.select_new(&items, &key, 3).selected.len(), 1);
}
