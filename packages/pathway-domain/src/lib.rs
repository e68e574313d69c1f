pub mod classify;
pub mod record;
pub mod score;
pub mod text;

mod error;

pub use classify::{CoreQueryKey, QueryClass, QueryClassifier};
pub use error::{Error, Result};
pub use record::{Dataset, Pathway, RawRow, Record};
pub use score::{ScoreBreakdown, Scorer, ScoringQuery};
