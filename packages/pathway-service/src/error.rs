pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Data unavailable: {message}")]
	DataUnavailable { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Config error: {message}")]
	Config { message: String },
}
impl From<pathway_domain::Error> for Error {
	fn from(err: pathway_domain::Error) -> Self {
		Self::Config { message: err.to_string() }
	}
}
