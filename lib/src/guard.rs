//! Conditional-compilation wrapping for generated fragments.
//!
//! Availability annotations on a descriptor become nested Cython `IF`
//! blocks. Wrapping is a pure text transformation so guards compose and
//! can be tested without the rest of the engine.

use crate::descriptor::FunctionDescriptor;

/// Wrap `block` in `IF condition:`, indenting it one level.
///
/// Every line of the block gains four spaces of indentation, except that
/// nothing is appended after the block's final newline — otherwise each
/// wrap would leave a dangling indented line at the end of the fragment.
///
/// ## Examples
///
/// ```
/// use h5gen_lib::guard::wrap_in_guard;
///
/// let wrapped = wrap_in_guard("MPI", "int foo(char* a) except *\n");
/// assert_eq!(wrapped, "IF MPI:\n    int foo(char* a) except *\n");
/// ```
pub fn wrap_in_guard(condition: &str, block: &str) -> String {
    let newlines = block.matches('\n').count();
    let mut wrapped = String::with_capacity(block.len() + 4 * newlines + condition.len() + 8);
    wrapped.push_str("IF ");
    wrapped.push_str(condition);
    wrapped.push_str(":\n    ");

    let mut seen = 0;
    for ch in block.chars() {
        wrapped.push(ch);
        if ch == '\n' {
            seen += 1;
            if seen < newlines {
                wrapped.push_str("    ");
            }
        }
    }
    wrapped
}

/// Version condition for a descriptor's bounds, if any are present.
fn version_condition(line: &FunctionDescriptor) -> Option<String> {
    match (line.min_version, line.max_version) {
        (Some(min), Some(max)) => Some(format!(
            "HDF5_VERSION >= {min} and HDF5_VERSION <= {max}"
        )),
        (Some(min), None) => Some(format!("HDF5_VERSION >= {min}")),
        (None, Some(max)) => Some(format!("HDF5_VERSION <= {max}")),
        (None, None) => None,
    }
}

/// Apply the guards a descriptor calls for.
///
/// The version guard is applied first so that the MPI capability guard,
/// when present, ends up outermost.
pub fn apply_guards(line: &FunctionDescriptor, fragment: String) -> String {
    let mut block = fragment;
    if let Some(condition) = version_condition(line) {
        block = wrap_in_guard(&condition, &block);
    }
    if line.mpi {
        block = wrap_in_guard("MPI", &block);
    }
    block
}
