//! Pattern compiler
//!
//! Turns MEI pattern markup into a match expression over kern records.
//!
//! # Overview
//!
//! The compiler follows a three-stage pipeline:
//! 1. **Parse**: Wrap fragments in the MEI template and parse with roxmltree
//! 2. **Normalize**: Build the canonical `PatternNode` tree, applying defaults
//! 3. **Compile**: Lower the tree to a single expression string
//!
//! # Basic Usage
//!
//! ```ignore
//! use kern_search::pattern::compile_markup;
//!
//! let compiled = compile_markup(r#"<note pname="c" oct="4"/><note pname="d" oct="4"/>"#)?;
//! println!("{}", compiled.expression);
//! ```

pub mod compile;
pub mod errors;
pub mod model;
pub mod normalize;

pub use compile::{compile, kern_pitch_letters, CompiledExpression, CompiledPattern};
pub use errors::PatternError;
pub use model::{
    Accidental, AccidentalSpec, DurationCode, DurationSpec, NoteSpec, OccurrenceBounds,
    PatternNode, PitchName, PitchSpec, Quantifier,
};
pub use normalize::{normalize_document, normalize_markup};

/// Compile pattern markup (fragment or full MEI document).
///
/// # Returns
///
/// * `Ok(CompiledPattern)` - Expression, canonical pattern and any fallbacks applied
/// * `Err(PatternError)` - Fatal error; no expression is produced
pub fn compile_markup(markup: &str) -> Result<CompiledPattern, PatternError> {
    let tree = normalize_markup(markup)?;
    Ok(compile(&tree))
}
