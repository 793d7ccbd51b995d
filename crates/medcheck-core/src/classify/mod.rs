pub mod engine;
pub mod outcome;

pub use engine::{annotate_rows, assign_grade, classify, composition_ratio, evaluate};
pub use outcome::{Evaluation, QualityReport, RecordFailure, RecordOutcome};
