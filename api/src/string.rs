use std::ffi::{CStr, CString, c_char};
use std::path::Path;

use tiledb_sys::{tiledb_string_free, tiledb_string_t, tiledb_string_view};

use crate::error::{Error, Result};

/// Converts a Rust string argument into the NUL-terminated form
/// expected by the C API.
pub(crate) fn cstring(s: &str) -> Result<CString> {
    Ok(CString::new(s)?)
}

pub(crate) fn path_cstring(path: &Path) -> Result<CString> {
    let Some(s) = path.to_str() else {
        return Err(Error::InvalidArgument(format!(
            "path is not UTF-8: {}",
            path.display()
        )));
    };
    cstring(s)
}

/// Copies a string borrowed from a native handle.
///
/// # Safety
///
/// `ptr` must be NULL or point to a NUL-terminated string which is valid
/// for the duration of this call.
pub(crate) unsafe fn copy_cstr(ptr: *const c_char) -> Result<String> {
    if ptr.is_null() {
        return Err(Error::InvalidArgument("native string is NULL".to_owned()));
    }
    Ok(unsafe { CStr::from_ptr(ptr) }.to_str()?.to_owned())
}

/// Owns a `tiledb_string_t` produced by the library.
pub(crate) struct NativeString {
    ffi: *mut tiledb_string_t,
}

impl NativeString {
    pub(crate) fn from_raw(ffi: *mut tiledb_string_t) -> Self {
        NativeString { ffi }
    }

    pub(crate) fn contents(&self) -> Result<String> {
        if self.ffi.is_null() {
            return Ok(String::new());
        }
        let mut data: *const c_char = std::ptr::null();
        let mut length: usize = 0;
        let rc = unsafe { tiledb_string_view(self.ffi, &mut data, &mut length) };
        if rc != tiledb_sys::TILEDB_OK {
            return Err(Error::Native {
                operation: "viewing native string".to_owned(),
                message: format!("return code {rc}"),
            });
        }
        if data.is_null() || length == 0 {
            return Ok(String::new());
        }
        let bytes = unsafe { std::slice::from_raw_parts(data as *const u8, length) };
        Ok(std::str::from_utf8(bytes)?.to_owned())
    }
}

impl Drop for NativeString {
    fn drop(&mut self) {
        if !self.ffi.is_null() {
            let _ = unsafe { tiledb_string_free(&mut self.ffi) };
        }
    }
}
