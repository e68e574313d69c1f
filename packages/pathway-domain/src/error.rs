pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to compile {label} term matcher.")]
	TermMatcher { label: String, source: regex::Error },
}
