#![warn(missing_docs)]

//! Template-driven RTL generation engine
//!
//! Generates parameterized SystemVerilog modules for the BLE clock-data-
//! recovery chain from text templates with marked substitution spans. The
//! engine scans a template for named placeholder regions, resolves each name
//! through a dependency-aware, memoized resolver protocol, and quantizes
//! real-valued correction coefficients into fixed-point integers with a
//! shared power-of-two shift.
//!
//! Evaluation is single-threaded and synchronous: each invocation owns a
//! fresh [`Context`], renders depth-first to completion, and performs no
//! I/O. A failed render produces no output text.

pub mod context;
pub mod error;
pub mod module;
pub mod modules;
pub mod quantizer;
pub mod template;
pub mod value;

pub use context::{CoefficientFn, Context, Derivation};
pub use error::GenError;
pub use module::{
    find_module, registry, trim_trailing_blank_lines, GeneratorModule, RenderFn, ResolverSet,
};
pub use quantizer::{quantize_pair, CorrectionSet, MAX_SHIFT, QUANT_TOLERANCE};
pub use template::{render, ParsedTemplate, TemplateElement, TemplateParser};
pub use value::Value;
