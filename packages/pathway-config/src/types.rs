use std::{collections::BTreeMap, path::PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub service: Service,
	pub provider: Provider,
	#[serde(default)]
	pub cache: Cache,
	#[serde(default)]
	pub classifier: Classifier,
	#[serde(default)]
	pub scoring: Scoring,
	#[serde(default)]
	pub ranking: Ranking,
	#[serde(default)]
	pub session: Session,
	#[serde(default)]
	pub format: Format,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Service {
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: "info".to_string() }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Provider {
	/// One of "file" or "http".
	pub kind: String,
	pub path: Option<PathBuf>,
	pub url: Option<String>,
	#[serde(default = "default_provider_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
	#[serde(default)]
	pub columns: Columns,
}

/// Header aliases used to locate each field in the first row of a values payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Columns {
	pub category: Vec<String>,
	pub grouping: Vec<String>,
	pub demographic: Vec<String>,
	pub description: Vec<String>,
}
impl Default for Columns {
	fn default() -> Self {
		Self {
			category: strings(&["category"]),
			grouping: strings(&["grouping", "group"]),
			demographic: strings(&["demographic", "demographics"]),
			description: strings(&["description", "desc"]),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Cache {
	pub ttl_seconds: u64,
	pub fetch_timeout_seconds: u64,
}
impl Default for Cache {
	fn default() -> Self {
		Self { ttl_seconds: 1_800, fetch_timeout_seconds: 30 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Classifier {
	/// Cues that mark a query as a request for more results. Matched on word boundaries.
	pub follow_up_phrases: Vec<String>,
	/// Words removed from follow-up queries before scoring, in addition to the cue words.
	pub noise_words: Vec<String>,
	/// Words ignored when computing the core query key.
	pub stop_words: Vec<String>,
	pub min_token_chars: usize,
}
impl Default for Classifier {
	fn default() -> Self {
		Self {
			follow_up_phrases: strings(&[
				"more",
				"other",
				"others",
				"another",
				"additional",
				"else",
				"different",
				"next",
				"show me more",
				"give me more",
			]),
			noise_words: strings(&[
				"show", "give", "me", "some", "any", "options", "option", "results", "please",
				"find", "get", "few",
			]),
			stop_words: strings(&[
				"more",
				"other",
				"others",
				"another",
				"additional",
				"else",
				"different",
				"next",
				"show",
				"give",
				"find",
				"get",
				"want",
				"need",
				"looking",
				"options",
				"option",
				"results",
				"some",
				"any",
				"few",
				"the",
				"and",
				"for",
				"with",
				"that",
				"this",
				"those",
				"these",
				"who",
				"what",
				"which",
				"are",
				"our",
				"your",
				"their",
				"them",
				"they",
				"you",
				"please",
				"also",
				"customers",
				"customer",
				"people",
				"audience",
				"audiences",
				"consumers",
				"users",
				"folks",
			]),
			min_token_chars: 3,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Scoring {
	pub synonym_grouping_points: f32,
	pub synonym_category_points: f32,
	pub demographic_points: f32,
	pub description_points: f32,
	pub phrase_points: f32,
	pub overlap_points: f32,
	/// Query tokens must be at least this many characters to earn keyword points.
	pub min_keyword_chars: usize,
	/// Query term to the canonical phrases it stands for in grouping or category text.
	pub synonyms: BTreeMap<String, Vec<String>>,
	/// Ordered rules; the first rule whose `contains` appears in the category wins.
	pub category_weights: Vec<CategoryWeight>,
	pub biased_cluster: BiasedCluster,
}
impl Default for Scoring {
	fn default() -> Self {
		Self {
			synonym_grouping_points: 500.0,
			synonym_category_points: 400.0,
			demographic_points: 300.0,
			description_points: 200.0,
			phrase_points: 100.0,
			overlap_points: 50.0,
			min_keyword_chars: 4,
			synonyms: default_synonyms(),
			category_weights: vec![
				CategoryWeight::new("household demographics", 0.6),
				CategoryWeight::new("demographic", 0.7),
				CategoryWeight::new("purchase", 1.3),
				CategoryWeight::new("in market", 1.3),
				CategoryWeight::new("behavior", 1.2),
				CategoryWeight::new("interest", 1.1),
			],
			biased_cluster: BiasedCluster::default(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryWeight {
	pub contains: String,
	pub multiplier: f32,
}
impl CategoryWeight {
	pub fn new(contains: &str, multiplier: f32) -> Self {
		Self { contains: contains.to_string(), multiplier }
	}
}

/// A topical group of records suppressed unless a query names it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BiasedCluster {
	pub label: String,
	/// Record-side terms. A record containing any of them belongs to the cluster.
	pub terms: Vec<String>,
	/// Query-side terms that count as an explicit request for the cluster.
	pub explicit_request_terms: Vec<String>,
}
impl Default for BiasedCluster {
	fn default() -> Self {
		Self {
			label: "automotive".to_string(),
			terms: strings(&[
				"automotive",
				"auto",
				"autos",
				"automobile",
				"car",
				"cars",
				"vehicle",
				"vehicles",
				"truck",
				"trucks",
				"suv",
				"dealership",
				"acura",
				"audi",
				"bmw",
				"chevrolet",
				"ford",
				"honda",
				"hyundai",
				"jeep",
				"kia",
				"lexus",
				"mazda",
				"mercedes",
				"nissan",
				"subaru",
				"tesla",
				"toyota",
				"volkswagen",
				"volvo",
			]),
			explicit_request_terms: strings(&[
				"automotive",
				"auto",
				"autos",
				"automobile",
				"car",
				"cars",
				"vehicle",
				"vehicles",
				"truck",
				"trucks",
				"suv",
				"dealership",
				"drivers",
				"acura",
				"audi",
				"bmw",
				"chevrolet",
				"ford",
				"honda",
				"hyundai",
				"jeep",
				"kia",
				"lexus",
				"mazda",
				"mercedes",
				"nissan",
				"subaru",
				"tesla",
				"toyota",
				"volkswagen",
				"volvo",
			]),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ranking {
	/// Records scoring at or below this value are dropped.
	pub min_score: f32,
	pub max_results: u32,
	pub per_category_cap: u32,
}
impl Default for Ranking {
	fn default() -> Self {
		Self { min_score: 0.01, max_results: 20, per_category_cap: 4 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Session {
	pub page_size: u32,
	pub max_keys: u32,
}
impl Default for Session {
	fn default() -> Self {
		Self { page_size: 3, max_keys: 50 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Format {
	pub max_description_chars: u32,
	pub ellipsis: String,
}
impl Default for Format {
	fn default() -> Self {
		Self { max_description_chars: 120, ellipsis: "...".to_string() }
	}
}

fn default_provider_timeout_ms() -> u64 {
	10_000
}

fn default_synonyms() -> BTreeMap<String, Vec<String>> {
	let table: &[(&str, &[&str])] = &[
		("fitness", &["health & fitness", "fitness", "sports & fitness"]),
		("gym", &["health & fitness", "fitness"]),
		("workout", &["health & fitness", "fitness"]),
		("wellness", &["health & wellness", "wellness"]),
		("home", &["home & garden", "home improvement"]),
		("improvement", &["home improvement"]),
		("diy", &["home improvement", "hardware"]),
		("garden", &["home & garden", "gardening"]),
		("gardening", &["home & garden", "gardening"]),
		("travel", &["travel"]),
		("travelers", &["travel"]),
		("vacation", &["travel"]),
		("pet", &["pets", "pet owners"]),
		("pets", &["pets", "pet owners"]),
		("dog", &["pets", "dog owners"]),
		("parents", &["parenting", "family"]),
		("moms", &["parenting", "family"]),
		("kids", &["parenting", "family"]),
		("investors", &["finance", "investing"]),
		("investing", &["finance", "investing"]),
		("finance", &["finance", "financial services"]),
		("students", &["education"]),
		("shoppers", &["shopping", "retail"]),
		("luxury", &["luxury"]),
		("food", &["food & dining", "cooking"]),
		("cooking", &["food & dining", "cooking"]),
		("tech", &["technology", "consumer electronics"]),
		("technology", &["technology", "consumer electronics"]),
		("gamers", &["gaming", "video games"]),
		("gaming", &["gaming", "video games"]),
		("car", &["in market for auto", "automotive"]),
		("cars", &["in market for auto", "automotive"]),
		("vehicle", &["in market for auto", "automotive"]),
		("auto", &["in market for auto", "automotive"]),
	];

	table
		.iter()
		.map(|(term, phrases)| (term.to_string(), strings(phrases)))
		.collect()
}

fn strings(values: &[&str]) -> Vec<String> {
	values.iter().map(|value| value.to_string()).collect()
}
