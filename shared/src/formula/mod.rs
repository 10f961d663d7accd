//! Formula seam used by water currents.
//!
//! Levels describe currents as small expressions evaluated against the entity
//! being pushed. The water code only depends on the traits in this module;
//! [`ArithmeticCompiler`] is the evaluator the hosts ship with.

use std::fmt;

use thiserror::Error;

mod arithmetic;

pub use arithmetic::ArithmeticCompiler;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormulaError {
    #[error("empty formula")]
    Empty,
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("unexpected '{token}' at {pos}")]
    UnexpectedToken { token: String, pos: usize },
    #[error("unexpected end of formula")]
    UnexpectedEnd,
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("formula nests deeper than {0} levels")]
    TooDeep(usize),
}

/// Result of evaluating a formula.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FormulaValue {
    #[default]
    Null,
    Int(i64),
    Decimal(f64),
}

impl FormulaValue {
    /// Null converts to zero and decimals truncate toward zero.
    pub fn as_int(&self) -> i32 {
        match *self {
            FormulaValue::Null => 0,
            FormulaValue::Int(v) => v.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            FormulaValue::Decimal(v) => v as i32,
        }
    }

    pub fn as_decimal(&self) -> f64 {
        match *self {
            FormulaValue::Null => 0.0,
            FormulaValue::Int(v) => v as f64,
            FormulaValue::Decimal(v) => v,
        }
    }
}

impl From<i32> for FormulaValue {
    fn from(value: i32) -> Self {
        FormulaValue::Int(value as i64)
    }
}

impl From<f64> for FormulaValue {
    fn from(value: f64) -> Self {
        FormulaValue::Decimal(value)
    }
}

/// Anything a formula can read named values from.
pub trait FormulaEntity {
    fn query_value(&self, key: &str) -> FormulaValue;
}

pub trait Formula: Send + Sync + fmt::Debug {
    fn execute(&self, entity: &dyn FormulaEntity) -> FormulaValue;
}

pub trait FormulaCompiler {
    fn compile(&self, source: &str) -> Result<Box<dyn Formula>, FormulaError>;
}

/// A compiled formula kept together with the text it came from, so it can be
/// written back out unchanged.
#[derive(Debug)]
pub struct CompiledFormula {
    source: String,
    formula: Box<dyn Formula>,
}

impl CompiledFormula {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn execute(&self, entity: &dyn FormulaEntity) -> FormulaValue {
        self.formula.execute(entity)
    }
}

/// Compiles `source` when present. Blank sources mean "no formula".
pub fn compile_optional(
    compiler: &dyn FormulaCompiler,
    source: Option<&str>,
) -> Result<Option<CompiledFormula>, FormulaError> {
    let Some(source) = source.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };

    let formula = compiler.compile(source)?;
    Ok(Some(CompiledFormula {
        source: source.to_string(),
        formula,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_int_conversions() {
        assert_eq!(FormulaValue::Null.as_int(), 0);
        assert_eq!(FormulaValue::Int(-7).as_int(), -7);
        assert_eq!(FormulaValue::Decimal(2.9).as_int(), 2);
        assert_eq!(FormulaValue::Decimal(-2.9).as_int(), -2);
        assert_eq!(FormulaValue::Int(i64::MAX).as_int(), i32::MAX);
    }

    #[test]
    fn blank_sources_compile_to_nothing() {
        let compiler = ArithmeticCompiler;
        assert!(compile_optional(&compiler, None).unwrap().is_none());
        assert!(compile_optional(&compiler, Some("  ")).unwrap().is_none());
        let compiled = compile_optional(&compiler, Some("1 + 1")).unwrap().unwrap();
        assert_eq!(compiled.source(), "1 + 1");
    }
}
