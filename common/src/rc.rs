//! Classification of the `capi_return_t` codes returned by every
//! C API entry point.

pub const TILEDB_OK: i32 = 0;
pub const TILEDB_ERR: i32 = -1;
pub const TILEDB_OOM: i32 = -2;
pub const TILEDB_INVALID_CONTEXT: i32 = -3;
pub const TILEDB_INVALID_ERROR: i32 = -4;
pub const TILEDB_BUDGET_UNAVAILABLE: i32 = -5;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReturnCode {
    Ok,
    /// The call failed; the context holds an error describing why.
    Err,
    OutOfMemory,
    /// The context handle passed to the call was not valid, so no
    /// error could be recorded on it.
    InvalidContext,
    /// The error out-parameter passed to the call was not valid.
    InvalidError,
    BudgetUnavailable,
    Unknown(i32),
}

impl ReturnCode {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Returns whether the context's last error describes this failure.
    pub fn has_context_error(&self) -> bool {
        matches!(self, Self::Err | Self::BudgetUnavailable)
    }
}

impl From<i32> for ReturnCode {
    fn from(rc: i32) -> Self {
        match rc {
            TILEDB_OK => Self::Ok,
            TILEDB_ERR => Self::Err,
            TILEDB_OOM => Self::OutOfMemory,
            TILEDB_INVALID_CONTEXT => Self::InvalidContext,
            TILEDB_INVALID_ERROR => Self::InvalidError,
            TILEDB_BUDGET_UNAVAILABLE => Self::BudgetUnavailable,
            other => Self::Unknown(other),
        }
    }
}
