use std::ffi::c_char;

use crate::types::*;

unsafe extern "C" {
    /// `config` may be NULL, in which case the default configuration is used.
    pub fn tiledb_ctx_alloc(
        config: *mut tiledb_config_t,
        ctx: *mut *mut tiledb_ctx_t,
    ) -> capi_return_t;
    pub fn tiledb_ctx_free(ctx: *mut *mut tiledb_ctx_t);

    pub fn tiledb_ctx_get_stats(
        ctx: *mut tiledb_ctx_t,
        stats_json: *mut *mut c_char,
    ) -> capi_return_t;
    pub fn tiledb_stats_free_str(out: *mut *mut c_char) -> capi_return_t;

    pub fn tiledb_ctx_get_config(
        ctx: *mut tiledb_ctx_t,
        config: *mut *mut tiledb_config_t,
    ) -> capi_return_t;

    /// `err` is set to NULL if there is no error.
    pub fn tiledb_ctx_get_last_error(
        ctx: *mut tiledb_ctx_t,
        err: *mut *mut tiledb_error_t,
    ) -> capi_return_t;

    pub fn tiledb_ctx_is_supported_fs(
        ctx: *mut tiledb_ctx_t,
        fs: tiledb_filesystem_t,
        is_supported: *mut i32,
    ) -> capi_return_t;

    pub fn tiledb_ctx_cancel_tasks(ctx: *mut tiledb_ctx_t) -> capi_return_t;

    pub fn tiledb_ctx_set_tag(
        ctx: *mut tiledb_ctx_t,
        key: *const c_char,
        value: *const c_char,
    ) -> capi_return_t;
}
