//! Parser for function-description lines.
//!
//! Parses lines like:
//! - `herr_t H5Fclose(hid_t file_id)`
//! - `1.8.0-1.10.0 hid_t H5Dget_offset(hid_t dset_id)`
//! - `MPI ERROR 1.8.12 int foo(char* a, size_t b)`

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::GenError;

lazy_static! {
    /// Grammar for one function-description line.
    ///
    /// All prefixes are optional and ordered: `MPI` marker, `ERROR` marker,
    /// minimum version, `-`-joined maximum version. The return type, function
    /// name and parenthesized parameter list are mandatory, and the whole
    /// line must match — trailing text after the closing parenthesis is a
    /// grammar error, not ignored.
    static ref FUNCTION_PATTERN: Regex = Regex::new(concat!(
        r"^(?P<mpi>MPI +)?",
        r"(?P<error>ERROR +)?",
        r"(?P<min_version>[0-9]+\.[0-9]+\.[0-9]+)?",
        r"(?:-(?P<max_version>[0-9]+\.[0-9]+\.[0-9]+))? *",
        r"(?P<code>(?:unsigned +)?[a-zA-Z_][a-zA-Z0-9_]*\**) +",
        r"(?P<fname>[a-zA-Z_][a-zA-Z0-9_]*) *",
        r"\((?P<sig>[a-zA-Z0-9_,* ]*)\)$",
    ))
    .expect("function grammar is a valid regex");

    /// One parameter inside a signature: type tokens with optional pointer
    /// asterisks, then the parameter name.
    static ref PARAM_PATTERN: Regex = Regex::new(
        r"(?:unsigned +)?[a-zA-Z_][a-zA-Z0-9_]*\** +[ *]*(?P<param>[a-zA-Z_][a-zA-Z0-9_]*)",
    )
    .expect("parameter grammar is a valid regex");
}

/// Inclusive version bound attached to a description line.
///
/// Displays in the tuple form the emitted `IF` conditions compare against
/// `HDF5_VERSION`, e.g. `(1, 8, 12)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Parse a `D.D.D` literal. The grammar admits arbitrarily many digits
    /// per component; anything that overflows `u32` is rejected here.
    fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts.next()?.parse().ok()?;
        Some(Self {
            major,
            minor,
            patch,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.major, self.minor, self.patch)
    }
}

/// Structured record for one function-description line.
///
/// ## Example
///
/// ```
/// use h5gen_lib::FunctionDescriptor;
///
/// let line = FunctionDescriptor::parse("MPI ERROR 1.8.12 int foo(char* a, size_t b)").unwrap();
/// assert!(line.mpi);
/// assert!(line.error);
/// assert_eq!(line.return_type, "int");
/// assert_eq!(line.name, "foo");
/// assert_eq!(line.signature, "char* a, size_t b");
/// assert_eq!(line.call_args, vec!["a", "b"]);
/// ```
///
/// ## Errors
///
/// Parsing fails with [`GenError::MalformedDescriptorLine`] when the line
/// does not match the grammar, and with
/// [`GenError::ArgumentExtractionFailure`] when a non-empty parameter list
/// yields no parameter names. There is no partial success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    /// Function is only available in an MPI-enabled (parallel) build.
    pub mpi: bool,
    /// An unclassifiable failure must escalate to a generic raise.
    pub error: bool,
    /// Inclusive minimum library version, if the function is gated.
    pub min_version: Option<Version>,
    /// Inclusive maximum library version, if the function is gated.
    pub max_version: Option<Version>,
    /// Declared return type, verbatim.
    pub return_type: String,
    /// Function identifier.
    pub name: String,
    /// Parameter list exactly as written (types, names, qualifiers).
    pub signature: String,
    /// Parameter names only, in declaration order.
    pub call_args: Vec<String>,
}

impl FunctionDescriptor {
    /// Parse one description line, with surrounding whitespace already
    /// removed by the caller.
    pub fn parse(line: &str) -> Result<Self, GenError> {
        let malformed = || GenError::MalformedDescriptorLine {
            line: line.to_string(),
        };
        let caps = FUNCTION_PATTERN.captures(line).ok_or_else(malformed)?;

        let min_version = match caps.name("min_version") {
            Some(m) => Some(Version::parse(m.as_str()).ok_or_else(malformed)?),
            None => None,
        };
        let max_version = match caps.name("max_version") {
            Some(m) => Some(Version::parse(m.as_str()).ok_or_else(malformed)?),
            None => None,
        };

        let signature = caps["sig"].to_string();
        let call_args = extract_call_args(&signature)?;

        Ok(Self {
            mpi: caps.name("mpi").is_some(),
            error: caps.name("error").is_some(),
            min_version,
            max_version,
            return_type: caps["code"].to_string(),
            name: caps["fname"].to_string(),
            signature,
            call_args,
        })
    }

    /// Call arguments comma-joined for use in a call expression.
    pub fn call_expr_args(&self) -> String {
        self.call_args.join(", ")
    }
}

/// Pull parameter names out of a raw parameter list.
///
/// The literal substring `const` is removed first, then each
/// "type tokens + name" group contributes its trailing identifier. A list
/// that is empty (including the C empty-list spelling `void`) yields no
/// names; any other list from which nothing can be extracted is an error
/// rather than a zero-argument call.
fn extract_call_args(signature: &str) -> Result<Vec<String>, GenError> {
    let stripped = signature.replace("const", "");
    let trimmed = stripped.trim();
    if trimmed.is_empty() || trimmed == "void" {
        return Ok(Vec::new());
    }

    let args: Vec<String> = PARAM_PATTERN
        .captures_iter(&stripped)
        .map(|caps| caps["param"].to_string())
        .collect();
    if args.is_empty() {
        return Err(GenError::ArgumentExtractionFailure {
            signature: signature.to_string(),
        });
    }
    Ok(args)
}
