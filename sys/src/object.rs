use std::ffi::{c_char, c_void};

use crate::types::*;

unsafe extern "C" {
    pub fn tiledb_object_type(
        ctx: *mut tiledb_ctx_t,
        path: *const c_char,
        type_: *mut tiledb_object_t,
    ) -> capi_return_t;
    pub fn tiledb_object_remove(ctx: *mut tiledb_ctx_t, path: *const c_char) -> capi_return_t;
    pub fn tiledb_object_move(
        ctx: *mut tiledb_ctx_t,
        old_path: *const c_char,
        new_path: *const c_char,
    ) -> capi_return_t;

    /// Recursive traversal. `callback` receives `data` unchanged.
    pub fn tiledb_object_walk(
        ctx: *mut tiledb_ctx_t,
        path: *const c_char,
        order: tiledb_walk_order_t,
        callback: tiledb_object_visitor_t,
        data: *mut c_void,
    ) -> capi_return_t;
    /// Visits only the direct children of `path`.
    pub fn tiledb_object_ls(
        ctx: *mut tiledb_ctx_t,
        path: *const c_char,
        callback: tiledb_object_visitor_t,
        data: *mut c_void,
    ) -> capi_return_t;
}
