use pathway_config::Config;
use pathway_domain::{Dataset, Pathway, QueryClassifier, RawRow, Record, Scorer, ScoringQuery};

fn config() -> Config {
	toml::from_str("[provider]\nkind = \"file\"\npath = \"rows.json\"\n")
		.expect("Failed to parse test config.")
}

fn classifier() -> QueryClassifier {
	QueryClassifier::new(&config()).expect("Classifier must build from defaults.")
}

#[test]
fn malformed_rows_are_skipped_not_fatal() {
	let rows = vec![
		RawRow::new("Home & Garden", "Hardware Store", "Home Improvement", "DIY shoppers"),
		RawRow { category: Some("Travel".to_string()), ..Default::default() },
		RawRow::new("  ", "Grouping", "Demographic", ""),
		RawRow {
			category: Some("Pets".to_string()),
			grouping: Some("Pet Owners".to_string()),
			demographic: Some("Dog Owners".to_string()),
			description: None,
		},
	];
	let dataset = Dataset::from_rows(rows);

	assert_eq!(dataset.len(), 2);
	assert_eq!(dataset.skipped(), 2);
	assert_eq!(dataset.records()[1].description, "");
}

#[test]
fn raw_rows_deserialize_from_json() {
	let row: RawRow = serde_json::from_value(serde_json::json!({
		"category": "Travel",
		"grouping": "Frequent Flyers",
		"demographic": "Business Travelers"
	}))
	.expect("Row must deserialize.");
	let record = Record::from_raw(row).expect("Row must be valid.");

	assert_eq!(record.pathway().to_string(), "Travel → Frequent Flyers → Business Travelers");
}

#[test]
fn pathway_ignores_description() {
	let lhs = Record::from_raw(RawRow::new("A", "B", "C", "first")).expect("valid");
	let rhs = Record::from_raw(RawRow::new("A", "B", "C", "second")).expect("valid");

	assert_ne!(lhs, rhs);
	assert_eq!(lhs.pathway(), rhs.pathway());
	assert_eq!(
		lhs.pathway(),
		Pathway {
			category: "A".to_string(),
			grouping: "B".to_string(),
			demographic: "C".to_string(),
		}
	);
}

#[test]
fn explicit_request_uses_whole_words() {
	let classifier = classifier();

	assert!(classifier.is_biased_cluster_query("car buyers"));
	assert!(classifier.is_biased_cluster_query("People shopping for a new Toyota"));
	assert!(!classifier.is_biased_cluster_query("cartography fans"));
	assert!(!classifier.is_biased_cluster_query("home improvement customers"));
}

#[test]
fn follow_up_cues_are_detected() {
	let classifier = classifier();

	assert!(classifier.is_follow_up_query("more home improvement options"));
	assert!(classifier.is_follow_up_query("Show me MORE"));
	assert!(classifier.is_follow_up_query("any other fitness audiences?"));
	assert!(!classifier.is_follow_up_query("fitness enthusiasts"));
	assert!(!classifier.is_follow_up_query("mothers of toddlers"));
}

#[test]
fn follow_up_noise_is_stripped_before_search() {
	let classifier = classifier();

	assert_eq!(
		classifier.strip_follow_up_noise("more home improvement options"),
		"home improvement"
	);
	assert_eq!(classifier.strip_follow_up_noise("Pet owners"), "pet owners");

	let class = classifier.classify("Show me more fitness enthusiasts");

	assert!(class.is_follow_up);
	assert_eq!(class.search_text, "fitness enthusiasts");
}

#[test]
fn core_key_ignores_order_and_stop_words() {
	let classifier = classifier();
	let base = classifier.core_query_key("home improvement customers");

	assert_eq!(base, classifier.core_query_key("improvement home"));
	assert_eq!(base, classifier.core_query_key("more home improvement options"));
	assert_eq!(base, classifier.core_query_key("HOME, improvement!"));
	assert_ne!(base, classifier.core_query_key("more home options"));
	assert_ne!(base, classifier.core_query_key("fitness enthusiasts"));
	assert_eq!(base.as_str().len(), 64);
	assert_eq!(base.prefix().len(), 12);
}

#[test]
fn biased_records_score_zero_for_unrelated_queries() {
	let cfg = config();
	let scorer = Scorer::new(&cfg.scoring).expect("Scorer must build.");
	let classifier = classifier();
	let biased = [
		Record::from_raw(RawRow::new("Automotive", "In Market for Auto", "Acura", "")),
		Record::from_raw(RawRow::new("Interests", "Motorsports", "Car Enthusiasts", "")),
		Record::from_raw(RawRow::new("Lifestyle", "Commuters", "Daily Drivers", "Owns a Honda")),
	];

	for query in ["home improvement customers", "luxury shoppers", "enthusiasts", "commuters"] {
		let class = classifier.classify(query);

		assert!(!class.wants_biased_cluster);

		let prepared = ScoringQuery::new(&class.search_text, class.wants_biased_cluster);

		for record in biased.iter().flatten() {
			assert!(scorer.is_biased_record(record));
			assert_eq!(scorer.score(record, &prepared), 0.0, "{query} scored {record:?}");
		}
	}
}

#[test]
fn cartography_does_not_trip_the_gate() {
	let scorer = Scorer::new(&config().scoring).expect("Scorer must build.");
	let record = Record::from_raw(RawRow::new("Interests", "Maps", "Cartography Fans", ""))
		.expect("valid");

	assert!(!scorer.is_biased_record(&record));
	assert!(scorer.score(&record, &ScoringQuery::new("cartography", false)) > 0.0);
}
