//! One-pass generation over a function-description input.
//!
//! The engine owns line classification and the three output streams; the
//! descriptor parser is only consulted for function lines. Output order
//! equals input order, and the three streams advance in lockstep — one
//! fragment each per function line.

use tracing::{debug, info};

use crate::classify::ReturnClass;
use crate::descriptor::FunctionDescriptor;
use crate::emit::{
    RAW_DEFS_PREAMBLE, WRAPPER_DEFS_PREAMBLE, WRAPPER_IMPLS_PREAMBLE, raw_fragment,
    wrapper_def_fragment, wrapper_impl_fragment,
};
use crate::errors::GenError;

/// The three artifacts produced by one successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBindings {
    /// `cdef extern` declarations of the native functions (`_hdf5.pxd`).
    pub raw_defs: String,
    /// Declarations of the error-checking wrappers (`defs.pxd`).
    pub wrapper_defs: String,
    /// Implementations of the error-checking wrappers (`defs.pyx`).
    pub wrapper_impls: String,
}

/// Streaming processor for one generation run.
///
/// Classifies each input line as header directive, comment/blank, or
/// function description, and appends the resulting fragments to the three
/// stream buffers. All run state, including the current header grouping,
/// lives on this struct — concurrent or repeated runs cannot interfere.
pub struct LineProcessor {
    raw_defs: String,
    wrapper_defs: String,
    wrapper_impls: String,
    /// Header named by the most recent directive; scopes the raw
    /// declarations emitted after it.
    current_header: Option<String>,
    functions: usize,
}

impl LineProcessor {
    /// New processor with the three streams seeded with their preambles.
    pub fn new() -> Self {
        Self {
            raw_defs: RAW_DEFS_PREAMBLE.to_string(),
            wrapper_defs: WRAPPER_DEFS_PREAMBLE.to_string(),
            wrapper_impls: WRAPPER_IMPLS_PREAMBLE.to_string(),
            current_header: None,
            functions: 0,
        }
    }

    /// Header directive named by the most recent directive line, if any.
    pub fn current_header(&self) -> Option<&str> {
        self.current_header.as_deref()
    }

    /// Classify and process one input line.
    ///
    /// The directive check runs against the raw, untrimmed line: a
    /// directive must start in the first column, while function lines are
    /// indented under it.
    pub fn process_line(&mut self, raw_line: &str) -> Result<(), GenError> {
        let trimmed = raw_line.trim();

        let starts_flush = raw_line
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace() && c != '#');
        if starts_flush && !trimmed.is_empty() {
            let name = raw_line.trim_end();
            let name = name.split(':').next().unwrap_or(name);
            debug!(header = %name, "opening extern block");
            self.raw_defs
                .push_str(&format!("cdef extern from \"{name}.h\":\n"));
            self.current_header = Some(name.to_string());
            return Ok(());
        }

        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }

        let line = FunctionDescriptor::parse(trimmed)?;
        let class = ReturnClass::of(&line.return_type).ok_or_else(|| GenError::UnknownReturnType {
            return_type: line.return_type.clone(),
            function: line.name.clone(),
        })?;
        debug!(function = %line.name, class = ?class, "emitting fragments");

        self.raw_defs.push_str(&raw_fragment(&line));
        self.wrapper_defs.push_str(&wrapper_def_fragment(&line));
        self.wrapper_impls
            .push_str(&wrapper_impl_fragment(&line, class));
        self.functions += 1;
        Ok(())
    }

    /// Process every line of `input` in order.
    pub fn process(&mut self, input: &str) -> Result<(), GenError> {
        for line in input.lines() {
            self.process_line(line)?;
        }
        Ok(())
    }

    /// Consume the processor, yielding the finished artifacts.
    pub fn finish(self) -> GeneratedBindings {
        info!(functions = self.functions, "generation complete");
        GeneratedBindings {
            raw_defs: self.raw_defs,
            wrapper_defs: self.wrapper_defs,
            wrapper_impls: self.wrapper_impls,
        }
    }
}

impl Default for LineProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a full generation pass over a description input.
///
/// Either all three artifacts are produced, or the first grammar or
/// classification error aborts the run and nothing is produced.
pub fn generate(input: &str) -> Result<GeneratedBindings, GenError> {
    let mut processor = LineProcessor::new();
    processor.process(input)?;
    Ok(processor.finish())
}
