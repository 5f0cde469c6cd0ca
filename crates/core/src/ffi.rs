//! C FFI bindings
//!
//! The caller owns every buffer: query the size with
//! `catena_graph_memory_requirement`, allocate, then call
//! `catena_graph_process`.

use core::ffi::{CStr, c_char};
use core::slice;

use crate::error::GraphError;
use crate::primitives::{Blake3Fast, Sha512Full};
use crate::registry::Registry;
use crate::variant::Graph;

pub const CATENA_GRAPH_OK: i32 = 0;
pub const CATENA_GRAPH_INVALID_PARAMETER: i32 = 1;
pub const CATENA_GRAPH_UNDERSIZED_BUFFER: i32 = 2;
pub const CATENA_GRAPH_ALLOCATION_FAILURE: i32 = 3;
pub const CATENA_GRAPH_PRIMITIVE_FAILURE: i32 = 4;
pub const CATENA_GRAPH_UNKNOWN_VARIANT: i32 = 5;
pub const CATENA_GRAPH_NULL_POINTER: i32 = -1;

fn status(err: &GraphError) -> i32 {
    match err {
        GraphError::InvalidParameter(_) => CATENA_GRAPH_INVALID_PARAMETER,
        GraphError::UndersizedBuffer { .. } => CATENA_GRAPH_UNDERSIZED_BUFFER,
        GraphError::AllocationFailure { .. } => CATENA_GRAPH_ALLOCATION_FAILURE,
        GraphError::Primitive(_) => CATENA_GRAPH_PRIMITIVE_FAILURE,
        GraphError::UnknownVariant(_) | GraphError::DuplicateVariant(_) => {
            CATENA_GRAPH_UNKNOWN_VARIANT
        }
    }
}

/// # Safety
/// `code` must point to a valid NUL-terminated string.
unsafe fn lookup(code: *const c_char) -> Result<Graph, GraphError> {
    let code = unsafe { CStr::from_ptr(code) };
    let code = code
        .to_str()
        .map_err(|_| GraphError::UnknownVariant(code.to_string_lossy().into_owned()))?;
    Registry::with_defaults().create(code)
}

/// Bytes of memory `catena_graph_process` needs for `garlic`
///
/// Uses 64-byte fast blocks. Returns 0 for an unknown variant or an
/// unrepresentable size.
#[unsafe(no_mangle)]
pub extern "C" fn catena_graph_memory_requirement(code: *const c_char, garlic: u8) -> u64 {
    if code.is_null() {
        return 0;
    }
    let requirement = unsafe { lookup(code) }
        .and_then(|graph| graph.memory_requirement(garlic, &Blake3Fast::default()));
    match requirement {
        Ok(bytes) => bytes as u64,
        Err(_) => 0,
    }
}

/// Evaluate a graph variant over caller-owned memory
/// - code: NUL-terminated short code, e.g. "GR3-Phi"
/// - x: 64-byte input digest
/// - memory: at least `catena_graph_memory_requirement` bytes
/// - out: 64-byte buffer for the result
///
/// Returns one of the `CATENA_GRAPH_*` status codes.
#[allow(clippy::too_many_arguments)]
#[unsafe(no_mangle)]
pub extern "C" fn catena_graph_process(
    code: *const c_char,
    x: *const u8,
    x_len: usize,
    lambda: u8,
    garlic: u8,
    salt: *const u8,
    salt_len: usize,
    memory: *mut u8,
    memory_len: usize,
    out: *mut u8,
    out_len: usize,
) -> i32 {
    if code.is_null() || x.is_null() || memory.is_null() || out.is_null() {
        return CATENA_GRAPH_NULL_POINTER;
    }
    if salt.is_null() && salt_len != 0 {
        return CATENA_GRAPH_NULL_POINTER;
    }

    unsafe {
        let graph = match lookup(code) {
            Ok(graph) => graph,
            Err(err) => return status(&err),
        };
        let x = slice::from_raw_parts(x, x_len);
        let salt = if salt_len == 0 {
            &[][..]
        } else {
            slice::from_raw_parts(salt, salt_len)
        };
        let memory = slice::from_raw_parts_mut(memory, memory_len);
        let out = slice::from_raw_parts_mut(out, out_len);

        let mut fast = Blake3Fast::default();
        match graph.process(&mut fast, &Sha512Full, x, lambda, garlic, salt, memory, out) {
            Ok(()) => CATENA_GRAPH_OK,
            Err(err) => status(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ptr;

    #[test]
    fn test_ffi_memory_requirement() {
        assert_eq!(
            catena_graph_memory_requirement(c"GR3-Phi".as_ptr(), 4),
            2 * 16 * 64
        );
        assert_eq!(catena_graph_memory_requirement(c"nope".as_ptr(), 4), 0);
        assert_eq!(catena_graph_memory_requirement(ptr::null(), 4), 0);
    }

    #[test]
    fn test_ffi_process_matches_library() {
        let x = [3u8; 64];
        let mut memory = vec![0u8; 2 * 16 * 64];
        let mut out = [0u8; 64];

        let code = catena_graph_process(
            c"GR3-Phi".as_ptr(),
            x.as_ptr(),
            x.len(),
            1,
            4,
            ptr::null(),
            0,
            memory.as_mut_ptr(),
            memory.len(),
            out.as_mut_ptr(),
            out.len(),
        );
        assert_eq!(code, CATENA_GRAPH_OK);

        let expected = crate::hash(Graph::Gr3Phi, &x, 1, 4, &[]).unwrap();
        assert_eq!(&out[..], &expected[..]);
    }

    #[test]
    fn test_ffi_status_codes() {
        let x = [0u8; 64];
        let mut memory = vec![0u8; 2 * 16 * 64 - 1];
        let mut out = [0u8; 64];

        let undersized = catena_graph_process(
            c"GR3-Phi".as_ptr(),
            x.as_ptr(),
            x.len(),
            1,
            4,
            ptr::null(),
            0,
            memory.as_mut_ptr(),
            memory.len(),
            out.as_mut_ptr(),
            out.len(),
        );
        assert_eq!(undersized, CATENA_GRAPH_UNDERSIZED_BUFFER);

        let below_min = catena_graph_process(
            c"GR3-Phi".as_ptr(),
            x.as_ptr(),
            x.len(),
            1,
            1,
            ptr::null(),
            0,
            memory.as_mut_ptr(),
            memory.len(),
            out.as_mut_ptr(),
            out.len(),
        );
        assert_eq!(below_min, CATENA_GRAPH_INVALID_PARAMETER);

        let unknown = catena_graph_process(
            c"Dragonfly".as_ptr(),
            x.as_ptr(),
            x.len(),
            1,
            4,
            ptr::null(),
            0,
            memory.as_mut_ptr(),
            memory.len(),
            out.as_mut_ptr(),
            out.len(),
        );
        assert_eq!(unknown, CATENA_GRAPH_UNKNOWN_VARIANT);

        let null = catena_graph_process(
            c"GR3-Phi".as_ptr(),
            ptr::null(),
            0,
            1,
            4,
            ptr::null(),
            0,
            memory.as_mut_ptr(),
            memory.len(),
            out.as_mut_ptr(),
            out.len(),
        );
        assert_eq!(null, CATENA_GRAPH_NULL_POINTER);
    }
}
