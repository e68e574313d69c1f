use std::collections::{HashMap, HashSet};

use crate::search::ranking::RankedRecord;
use pathway_domain::Pathway;

/// Walks candidates in order, skipping repeated pathways and categories that already filled
/// their cap, until `max_results` are accepted.
pub fn select_diverse<I>(
	candidates: I,
	max_results: usize,
	per_category_cap: usize,
) -> Vec<RankedRecord>
where
	I: IntoIterator<Item = RankedRecord>,
{
	let mut out = Vec::new();
	let mut seen_pathways: HashSet<Pathway> = HashSet::new();
	let mut per_category: HashMap<String, usize> = HashMap::new();

	if max_results == 0 {
		return out;
	}

	for candidate in candidates {
		let pathway = candidate.pathway();

		if seen_pathways.contains(&pathway) {
			continue;
		}

		let count = per_category.entry(candidate.record.category.clone()).or_default();

		if *count >= per_category_cap {
			continue;
		}

		*count += 1;

		seen_pathways.insert(pathway);
		out.push(candidate);

		if out.len() >= max_results {
			break;
		}
	}

	out
}
