use thiserror::Error;

use crate::formula::FormulaError;
use crate::world::RectParseError;

#[derive(Debug, Error)]
pub enum WaterError {
    #[error("invalid rect for water area {index}: {source}")]
    InvalidAreaRect {
        index: usize,
        source: RectParseError,
    },
    #[error("invalid current {axis} formula: {source}")]
    InvalidCurrentFormula {
        axis: &'static str,
        source: FormulaError,
    },
}
