//! `extern "C"` exports seen by the host.
//!
//! This is the only place that touches raw pointers. Each entry point turns
//! its (pointer, length) pair into a bounded byte view, hands it to
//! [`run`], and writes the encoded result back only when `run` succeeded.
//! On `wasm32` every pointer and `usize` is a 32-bit linear-memory offset.

use std::mem::ManuallyDrop;
use std::slice;

use crate::codec::OutputEncoding;
use crate::error::{MedianError, MedianResult, STATUS_OK};
use crate::exec::run;

/// Reserve room for `count` `i32` elements and return the start offset.
///
/// The region is uninitialized and is never released by the module.
#[no_mangle]
pub extern "C" fn allocate(count: usize) -> *mut i32 {
    let mut buffer = ManuallyDrop::new(Vec::<i32>::with_capacity(count));
    let ptr = buffer.as_mut_ptr();
    tracing::debug!(count, "allocated sample region");
    ptr
}

/// Compute the median of the `i32` sample at `msg` and write it as a JSON
/// object `{"median": <number>}` into a freshly allocated buffer.
///
/// On success the buffer's offset is stored at `out_ptr`, its byte length at
/// `out_size_ptr`, and `0` is returned. On failure `-1` is returned and neither
/// slot is written.
///
/// # Safety
/// `msg` must point to `msg_len` readable bytes. `out_ptr` and `out_size_ptr`
/// must be writable pointer-sized slots; they need not be aligned.
#[no_mangle]
pub unsafe extern "C" fn exec(
    msg: *const u8,
    msg_len: usize,
    out_ptr: *mut *mut u8,
    out_size_ptr: *mut usize,
) -> i32 {
    into_status(unsafe { exec_structured(msg, msg_len, out_ptr, out_size_ptr) })
}

/// Compute the median of the `i32` sample at `msg` and write it as a raw
/// 8-byte `f64` at `out`.
///
/// Returns `0` on success and `-1` on failure, in which case `out` is untouched.
///
/// # Safety
/// `msg` must point to `msg_len` readable bytes and `out` to 8 writable bytes;
/// `out` need not be aligned.
#[no_mangle]
pub unsafe extern "C" fn exec_raw(msg: *const u8, msg_len: usize, out: *mut f64) -> i32 {
    into_status(unsafe { exec_raw_inner(msg, msg_len, out) })
}

unsafe fn exec_structured(
    msg: *const u8,
    msg_len: usize,
    out_ptr: *mut *mut u8,
    out_size_ptr: *mut usize,
) -> MedianResult<()> {
    if out_ptr.is_null() || out_size_ptr.is_null() {
        return Err(MedianError::NullPointer("output slot"));
    }
    let input = unsafe { input_view(msg, msg_len)? };
    let bytes = run(input, OutputEncoding::Structured)?.into_bytes();

    // Ownership moves to the host.
    let buffer: &'static mut [u8] = Box::leak(bytes.into_boxed_slice());
    unsafe {
        out_ptr.write_unaligned(buffer.as_mut_ptr());
        out_size_ptr.write_unaligned(buffer.len());
    }
    Ok(())
}

unsafe fn exec_raw_inner(msg: *const u8, msg_len: usize, out: *mut f64) -> MedianResult<()> {
    if out.is_null() {
        return Err(MedianError::NullPointer("output"));
    }
    let input = unsafe { input_view(msg, msg_len)? };
    let bytes = run(input, OutputEncoding::Raw)?.into_bytes();
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), out.cast::<u8>(), bytes.len());
    }
    Ok(())
}

unsafe fn input_view<'a>(msg: *const u8, msg_len: usize) -> MedianResult<&'a [u8]> {
    if msg_len == 0 {
        return Ok(&[]);
    }
    if msg.is_null() {
        return Err(MedianError::NullPointer("input"));
    }
    Ok(unsafe { slice::from_raw_parts(msg, msg_len) })
}

fn into_status(result: MedianResult<()>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(err) => {
            tracing::warn!(error = %err, "exec rejected input");
            err.status()
        }
    }
}
