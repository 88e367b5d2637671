//! C entry points for host applications that embed the toolkit.
//!
//! A call is a JSON string of the form `{"method": "calculate", "args": {"expr": "2 + 2"}}`. The
//! reply is a JSON-encoded tool result, allocated by this library; pass it to
//! [`mentor_bridge_free`] once it has been read.

use std::ffi::{c_char, CStr, CString};
use std::panic::catch_unwind;
use std::ptr;
use crate::bridge::call_json;

/// Handles a JSON-encoded bridge call.
///
/// Returns a null pointer only if `input` is null or the reply cannot be allocated.
///
/// # Safety
///
/// `input` must be null or point to a NUL-terminated string that stays valid for the duration of
/// the call.
#[no_mangle]
pub unsafe extern "C" fn mentor_bridge_call(input: *const c_char) -> *mut c_char {
    if input.is_null() {
        return ptr::null_mut();
    }

    let input = unsafe { CStr::from_ptr(input) }.to_string_lossy().into_owned();
    let reply = catch_unwind(|| call_json(&input)).unwrap_or_else(|_| {
        String::from(r#"{"success":false,"result":null,"explanation":"Internal error","error":"internal error"}"#)
    });

    // JSON escapes NUL, so the reply never contains one
    CString::new(reply).map_or(ptr::null_mut(), CString::into_raw)
}

/// Frees a reply returned by [`mentor_bridge_call`].
///
/// # Safety
///
/// `reply` must be null or a pointer returned by [`mentor_bridge_call`] that has not been freed.
#[no_mangle]
pub unsafe extern "C" fn mentor_bridge_free(reply: *mut c_char) {
    if reply.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(reply) });
}
