//! Fragment emitters for the three output artifacts.
//!
//! Every processed function line contributes one fragment to each artifact:
//! a raw `cdef extern` declaration, a wrapper declaration, and a wrapper
//! implementation. Fragments are plain text, already guard-wrapped, ready
//! to append to the owning stream.

use crate::classify::ReturnClass;
use crate::descriptor::FunctionDescriptor;
use crate::guard::apply_guards;

/// Preamble for the raw extern declarations artifact (`_hdf5.pxd`).
pub(crate) const RAW_DEFS_PREAMBLE: &str = "\
# cython: language_level=3
#
# Warning: this file is auto-generated by h5gen. DO NOT EDIT!
#

include \"config.pxi\"
from .api_types_hdf5 cimport *
from .api_types_ext cimport *

";

/// Preamble for the wrapper declarations artifact (`defs.pxd`).
pub(crate) const WRAPPER_DEFS_PREAMBLE: &str = "\
# cython: language_level=3
#
# Warning: this file is auto-generated by h5gen. DO NOT EDIT!
#

include \"config.pxi\"

from .api_types_hdf5 cimport *
from .api_types_ext cimport *

";

/// Preamble for the wrapper implementations artifact (`defs.pyx`).
pub(crate) const WRAPPER_IMPLS_PREAMBLE: &str = "\
# cython: language_level=3
#
# Warning: this file is auto-generated by h5gen. DO NOT EDIT!
#

include \"config.pxi\"
from .api_types_ext cimport *
from .api_types_hdf5 cimport *

from . cimport _hdf5

from ._errors cimport set_exception
";

/// Raw extern declaration, nested under the current `cdef extern` block.
pub(crate) fn raw_fragment(line: &FunctionDescriptor) -> String {
    let declaration = format!(
        "{} {}({}) except *\n",
        line.return_type, line.name, line.signature
    );
    indent_extern_block(&apply_guards(line, declaration))
}

/// Wrapper declaration for the safe-declarations artifact.
pub(crate) fn wrapper_def_fragment(line: &FunctionDescriptor) -> String {
    let declaration = format!(
        "cdef {} {}({}) except *\n",
        line.return_type, line.name, line.signature
    );
    apply_guards(line, declaration)
}

/// Wrapper implementation for the safe-implementations artifact.
///
/// The body suppresses the library's default error-reporting hook, calls
/// through to the native function, and applies the classification's failure
/// test. On failure, `set_exception` gets first claim on converting the
/// pending native error into a raised exception; the generic `RuntimeError`
/// fires only when it declined and the descriptor carried the `ERROR`
/// marker. The ordering decides which error wins when both could fire.
pub(crate) fn wrapper_impl_fragment(line: &FunctionDescriptor, class: ReturnClass) -> String {
    let condition = class.failure_condition();
    let retval = class.sentinel();
    let error = if line.error { "True" } else { "False" };

    let body = format!(
        "\
cdef {code} {fname}({sig}) except *:
    cdef {code} r
    _hdf5.H5Eset_auto(NULL, NULL)
    r = _hdf5.{fname}({args})
    if r{condition}:
        if set_exception():
            return <{code}>{retval}
        elif {error}:
            raise RuntimeError(\"Unspecified error in {fname} (return value {condition})\")
    return r

",
        code = line.return_type,
        fname = line.name,
        sig = line.signature,
        args = line.call_expr_args(),
        condition = condition,
        retval = retval,
        error = error,
    );
    apply_guards(line, body)
}

/// Prefix every non-blank line with two spaces, nesting the fragment under
/// its `cdef extern from` block. Blank (or whitespace-only) lines are left
/// untouched.
fn indent_extern_block(text: &str) -> String {
    text.split('\n')
        .map(|part| {
            if part.trim().is_empty() {
                part.to_string()
            } else {
                format!("  {part}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Version;

    fn close_fn() -> FunctionDescriptor {
        FunctionDescriptor {
            mpi: false,
            error: false,
            min_version: None,
            max_version: None,
            return_type: "herr_t".to_string(),
            name: "H5Fclose".to_string(),
            signature: "hid_t file_id".to_string(),
            call_args: vec!["file_id".to_string()],
        }
    }

    #[test]
    fn test_raw_fragment_is_indented_into_extern_block() {
        assert_eq!(
            raw_fragment(&close_fn()),
            "  herr_t H5Fclose(hid_t file_id) except *\n"
        );
    }

    #[test]
    fn test_raw_fragment_guards_nest_inside_indent() {
        let mut line = close_fn();
        line.mpi = true;
        assert_eq!(
            raw_fragment(&line),
            "  IF MPI:\n      herr_t H5Fclose(hid_t file_id) except *\n"
        );
    }

    #[test]
    fn test_wrapper_def_fragment() {
        assert_eq!(
            wrapper_def_fragment(&close_fn()),
            "cdef herr_t H5Fclose(hid_t file_id) except *\n"
        );
    }

    #[test]
    fn test_wrapper_impl_signed_status() {
        let fragment = wrapper_impl_fragment(&close_fn(), ReturnClass::SignedStatus);
        let expected = "\
cdef herr_t H5Fclose(hid_t file_id) except *:
    cdef herr_t r
    _hdf5.H5Eset_auto(NULL, NULL)
    r = _hdf5.H5Fclose(file_id)
    if r<0:
        if set_exception():
            return <herr_t>-1
        elif False:
            raise RuntimeError(\"Unspecified error in H5Fclose (return value <0)\")
    return r

";
        assert_eq!(fragment, expected);
    }

    #[test]
    fn test_wrapper_impl_pointer_class() {
        let mut line = close_fn();
        line.return_type = "void*".to_string();
        line.name = "H5allocate_memory".to_string();
        let fragment = wrapper_impl_fragment(&line, ReturnClass::Pointer);
        assert!(fragment.contains("if r==NULL:"));
        assert!(fragment.contains("return <void*>NULL"));
    }

    #[test]
    fn test_wrapper_impl_unsigned_class() {
        let mut line = close_fn();
        line.return_type = "size_t".to_string();
        let fragment = wrapper_impl_fragment(&line, ReturnClass::UnsignedStatus);
        assert!(fragment.contains("if r==0:"));
        assert!(fragment.contains("return <size_t>0"));
    }

    #[test]
    fn test_wrapper_impl_error_marker_renders_true() {
        let mut line = close_fn();
        line.error = true;
        let fragment = wrapper_impl_fragment(&line, ReturnClass::SignedStatus);
        assert!(fragment.contains("elif True:"));
        assert!(
            fragment
                .contains("raise RuntimeError(\"Unspecified error in H5Fclose (return value <0)\")")
        );
    }

    #[test]
    fn test_wrapper_impl_zero_argument_call() {
        let mut line = close_fn();
        line.signature = String::new();
        line.call_args = Vec::new();
        let fragment = wrapper_impl_fragment(&line, ReturnClass::SignedStatus);
        assert!(fragment.contains("r = _hdf5.H5Fclose()\n"));
    }

    #[test]
    fn test_wrapper_impl_guard_wrapping_indents_body() {
        let mut line = close_fn();
        line.mpi = true;
        line.min_version = Some(Version {
            major: 1,
            minor: 8,
            patch: 12,
        });
        let fragment = wrapper_impl_fragment(&line, ReturnClass::SignedStatus);
        assert!(fragment.starts_with("IF MPI:\n    IF HDF5_VERSION >= (1, 8, 12):\n        cdef"));
        assert!(fragment.contains("\n            return r\n"));
        // The blank separator line is indented along with the body.
        assert!(fragment.ends_with("return r\n        \n"));
    }
}
