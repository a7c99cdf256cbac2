//! Error types for binding generation.

use thiserror::Error;

/// Errors that can abort a generation run.
///
/// Every variant is fatal: the engine stops at the first error and no
/// output artifact exists for the run. A half-correct binding set would
/// compile and then misreport native failures, so there is no partial or
/// best-effort mode.
#[derive(Debug, Error)]
pub enum GenError {
    /// A function-description line did not match the grammar.
    #[error("invalid function line: {line}")]
    MalformedDescriptorLine {
        /// The offending line, leading/trailing whitespace removed.
        line: String,
    },

    /// A non-empty parameter list yielded no extractable parameter names.
    ///
    /// Treating this as zero parameters would silently generate wrappers
    /// calling through with the wrong arity, so it aborts instead.
    #[error("could not extract parameter names from signature: {signature}")]
    ArgumentExtractionFailure {
        /// The parameter-list text as written in the description.
        signature: String,
    },

    /// A return type matched none of the recognized classifications.
    #[error("unknown return type `{return_type}` on function `{function}`")]
    UnknownReturnType {
        /// The declared return type that could not be classified.
        return_type: String,
        /// The function whose declaration carried it.
        function: String,
    },
}
