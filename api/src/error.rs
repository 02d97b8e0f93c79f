use std::ffi::{CStr, NulError, c_char};
use std::path::PathBuf;
use std::str::Utf8Error;

use tiledb_common::InvalidDiscriminant;
use tiledb_common::datatype::{Datatype, DecodeError};
use tiledb_common::filter::FilterOptionError;
use tiledb_common::object::ObjectEntryError;
use tiledb_common::rc::ReturnCode;
use tiledb_sys::{TILEDB_OK, tiledb_error_free, tiledb_error_message, tiledb_error_t};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A native call failed; `message` is the library's own description.
    #[error("Error {operation}: {message}")]
    Native { operation: String, message: String },
    #[error("Error {0}: out of memory")]
    OutOfMemory(String),
    #[error("Error {0}: invalid context")]
    InvalidContext(String),
    #[error("String argument contains NUL: {0}")]
    Nul(#[from] NulError),
    #[error("Native string is not UTF-8: {0}")]
    Utf8(#[from] Utf8Error),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Datatype mismatch: {datatype} is not physically represented by {physical_type}")]
    DatatypeMismatch {
        datatype: Datatype,
        physical_type: &'static str,
    },
    #[error(transparent)]
    InvalidDiscriminant(#[from] InvalidDiscriminant),
    #[error("Value decoding error: {0}")]
    Decode(#[from] DecodeError),
    #[error("Filter option error: {0}")]
    FilterOption(#[from] FilterOptionError),
    #[error("Object walk error: {0}")]
    Visitor(#[from] ObjectEntryError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Path already exists: {}", .0.display())]
    PathExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classifies a failed return code which carries no context error.
    pub(crate) fn from_return_code(
        operation: &str,
        rc: ReturnCode,
        message: Option<String>,
    ) -> Self {
        match rc {
            ReturnCode::OutOfMemory => Error::OutOfMemory(operation.to_owned()),
            ReturnCode::InvalidContext => Error::InvalidContext(operation.to_owned()),
            rc => Error::Native {
                operation: operation.to_owned(),
                message: message.unwrap_or_else(|| format!("native call returned {rc:?}")),
            },
        }
    }
}

/// Owns a `tiledb_error_t` returned through an out-parameter.
pub(crate) struct NativeError {
    ffi: *mut tiledb_error_t,
}

impl NativeError {
    pub(crate) fn from_raw(ffi: *mut tiledb_error_t) -> Option<Self> {
        (!ffi.is_null()).then_some(NativeError { ffi })
    }

    pub(crate) fn message(&self) -> Result<String> {
        let mut msg: *const c_char = std::ptr::null();
        let rc = unsafe { tiledb_error_message(self.ffi, &mut msg) };
        if rc != TILEDB_OK || msg.is_null() {
            return Ok(String::new());
        }
        Ok(unsafe { CStr::from_ptr(msg) }.to_str()?.to_owned())
    }
}

impl Drop for NativeError {
    fn drop(&mut self) {
        unsafe { tiledb_error_free(&mut self.ffi) }
    }
}

/// Invokes a native function which reports failure through a
/// `tiledb_error_t` out-parameter rather than through a context.
pub(crate) fn error_out_call<F>(operation: &str, f: F) -> Result<()>
where
    F: FnOnce(*mut *mut tiledb_error_t) -> i32,
{
    let mut err = std::ptr::null_mut();
    let rc = ReturnCode::from(f(&mut err));
    let native = NativeError::from_raw(err);
    if rc.is_ok() {
        return Ok(());
    }
    let message = native.and_then(|e| e.message().ok());
    tracing::debug!(operation, ?rc, "Native call failed");
    Err(Error::from_return_code(operation, rc, message))
}
