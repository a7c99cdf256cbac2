//! Generator for the lowest-level Cython bindings to HDF5.
//!
//! The raw HDF5 C API reports failure through return values, so the raw
//! API is wrapped with "error wrappers": `cdef` functions with the same
//! names and signatures as their HDF5 equivalents that translate failing
//! return values into Python exceptions. This crate reads a line-oriented
//! description of the function surface and produces three synchronized
//! artifacts:
//!
//! - `_hdf5.pxd` — `cdef extern` declarations of the real HDF5 functions
//! - `defs.pxd` — declarations of the error wrappers
//! - `defs.pyx` — implementations of the error wrappers
//!
//! ## Input format
//!
//! The description file is line-oriented:
//!
//! - a non-indented, non-`#` line is a header directive opening a new
//!   `cdef extern from "<name>.h"` grouping in the raw declarations;
//! - blank lines and `#` comments are skipped;
//! - every other (indented) line describes one function:
//!
//! ```text
//! MPI ERROR 1.8.12 int foo(char* a, size_t b)
//! ```
//!
//! where `MPI` (parallel-build gate), `ERROR` (escalate unclassified
//! failures) and the `min[-max]` version bounds are optional prefixes in
//! that order. Annotations become nested Cython `IF` guards around the
//! emitted fragments.
//!
//! Generation is correct-or-nothing: the first grammar or classification
//! error aborts the run, because a half-correct binding set is worse than
//! a refused build.

pub mod classify;
pub mod descriptor;
mod emit;
pub mod engine;
pub mod errors;
pub mod guard;

pub use classify::ReturnClass;
pub use descriptor::{FunctionDescriptor, Version};
pub use engine::{GeneratedBindings, LineProcessor, generate};
pub use errors::GenError;
