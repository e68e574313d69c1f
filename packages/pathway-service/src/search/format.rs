use std::fmt::Write;

use unicode_segmentation::UnicodeSegmentation;

use crate::{
	Error, Selection,
	search::{PathwayItem, SearchResult},
};
use pathway_config::Format;
use pathway_domain::QueryClass;

const UNAVAILABLE_MESSAGE: &str =
	"The audience targeting data is unavailable right now. Please try again in a few minutes.";
const EMPTY_QUERY_MESSAGE: &str =
	"Describe the audience you want to reach, for example \"home improvement shoppers\".";

/// Turns selections into user-facing results. Success, exhausted, no-match, and failure each
/// get their own message.
pub struct ResponseFormatter {
	max_description_chars: usize,
	ellipsis: String,
}
impl ResponseFormatter {
	pub fn new(cfg: &Format) -> Self {
		Self {
			max_description_chars: cfg.max_description_chars as usize,
			ellipsis: cfg.ellipsis.clone(),
		}
	}

	pub fn selection(
		&self,
		class: &QueryClass,
		total_available: usize,
		selection: &Selection,
	) -> SearchResult {
		if selection.exhausted {
			return self.exhausted(class, total_available);
		}

		let items: Vec<PathwayItem> = selection
			.selected
			.iter()
			.map(|ranked| PathwayItem {
				pathway: ranked.pathway().to_string(),
				category: ranked.record.category.clone(),
				grouping: ranked.record.grouping.clone(),
				demographic: ranked.record.demographic.clone(),
				description: self.snippet(&ranked.record.description),
				score: ranked.score,
			})
			.collect();
		let count = items.len();
		let mut message = if class.is_follow_up {
			format!("Here are {count} more audience {} for \"{}\":\n", plural(count), class.raw)
		} else {
			format!("Found {count} audience {} for \"{}\":\n", plural(count), class.raw)
		};

		for (position, item) in items.iter().enumerate() {
			let _ = write!(message, "\n{}. {}", position + 1, item.pathway);

			if !item.description.is_empty() {
				let _ = write!(message, "\n   {}", item.description);
			}
		}

		if selection.remaining > 0 {
			let _ = write!(
				message,
				"\n\n{} more matching {} available. Ask for more to see them.",
				selection.remaining,
				plural(selection.remaining)
			);
		} else {
			message.push_str("\n\nThat covers every matching pathway for this request.");
		}

		SearchResult {
			success: true,
			pathways: items.iter().map(|item| item.pathway.clone()).collect(),
			message,
			matches_found: count,
			total_available,
			remaining: selection.remaining,
			exhausted: false,
			is_follow_up: class.is_follow_up,
			core_key: class.core_key.to_string(),
			items,
		}
	}

	pub fn exhausted(&self, class: &QueryClass, total_available: usize) -> SearchResult {
		let message = format!(
			"All {total_available} matching {} for \"{}\" have already been shown. Try describing the audience a different way, such as by interest, purchase intent, or life stage.",
			plural(total_available),
			class.raw
		);

		SearchResult {
			exhausted: true,
			total_available,
			..self.empty(class, message, true)
		}
	}

	pub fn no_matches(&self, class: &QueryClass) -> SearchResult {
		let message = format!(
			"No audience pathways matched \"{}\". Try broader or different terms, such as an interest, a purchase intent, or a demographic.",
			class.raw
		);

		self.empty(class, message, true)
	}

	pub fn failure(&self, class: &QueryClass, err: &Error) -> SearchResult {
		let message = match err {
			Error::InvalidRequest { .. } => EMPTY_QUERY_MESSAGE.to_string(),
			_ => UNAVAILABLE_MESSAGE.to_string(),
		};

		self.empty(class, message, false)
	}

	/// Caps a description at the configured number of graphemes, appending the ellipsis when
	/// anything was cut.
	pub fn snippet(&self, description: &str) -> String {
		let trimmed = description.trim();
		let mut graphemes = trimmed.graphemes(true);
		let kept: String = graphemes.by_ref().take(self.max_description_chars).collect();

		if graphemes.next().is_none() {
			return kept;
		}

		format!("{}{}", kept.trim_end(), self.ellipsis)
	}

	fn empty(&self, class: &QueryClass, message: String, success: bool) -> SearchResult {
		SearchResult {
			success,
			pathways: Vec::new(),
			message,
			matches_found: 0,
			total_available: 0,
			remaining: 0,
			exhausted: false,
			is_follow_up: class.is_follow_up,
			core_key: class.core_key.to_string(),
			items: Vec::new(),
		}
	}
}

fn plural(count: usize) -> &'static str {
	if count == 1 { "pathway" } else { "pathways" }
}
