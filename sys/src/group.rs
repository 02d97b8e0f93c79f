use std::ffi::c_char;

use crate::types::*;

unsafe extern "C" {
    pub fn tiledb_group_create(ctx: *mut tiledb_ctx_t, group_uri: *const c_char) -> capi_return_t;
}
