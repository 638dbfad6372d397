//! Error types for RTL generation

use thiserror::Error;

/// Errors that can occur while rendering a generator module
///
/// Every variant is fatal to the invocation that raised it. A failed render
/// produces no output text.
#[derive(Debug, Error)]
pub enum GenError {
    /// Invalid or inconsistent numeric configuration
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A required parameter is absent from both the context and the base
    /// argument set
    #[error("missing required parameter `{0}`")]
    MissingParameter(String),

    /// Malformed or unmatched placeholder markers, or a placeholder with no
    /// registered resolver
    #[error("template syntax error at line {line}: {message}")]
    TemplateSyntax {
        /// Line number in the template where the error was detected
        line: usize,
        /// Description of the syntax issue
        message: String,
    },

    /// The coefficient quantization loop exceeded its iteration bound
    #[error("coefficient quantization did not converge after {max_shift} doublings (coefficients {re}, {im})")]
    QuantizationNonConvergence {
        /// Raw real correction coefficient
        re: f64,
        /// Raw imaginary correction coefficient
        im: f64,
        /// The iteration bound that was exhausted
        max_shift: u32,
    },
}
