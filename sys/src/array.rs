use std::ffi::{c_char, c_void};

use crate::types::*;

unsafe extern "C" {
    pub fn tiledb_array_create(
        ctx: *mut tiledb_ctx_t,
        array_uri: *const c_char,
        schema: *const tiledb_array_schema_t,
    ) -> capi_return_t;
    pub fn tiledb_array_delete(ctx: *mut tiledb_ctx_t, uri: *const c_char) -> capi_return_t;
    pub fn tiledb_array_evolve(
        ctx: *mut tiledb_ctx_t,
        array_uri: *const c_char,
        evolution: *mut tiledb_array_schema_evolution_t,
    ) -> capi_return_t;

    pub fn tiledb_array_alloc(
        ctx: *mut tiledb_ctx_t,
        array_uri: *const c_char,
        array: *mut *mut tiledb_array_t,
    ) -> capi_return_t;
    pub fn tiledb_array_free(array: *mut *mut tiledb_array_t);

    pub fn tiledb_array_open(
        ctx: *mut tiledb_ctx_t,
        array: *mut tiledb_array_t,
        query_type: tiledb_query_type_t,
    ) -> capi_return_t;
    pub fn tiledb_array_close(ctx: *mut tiledb_ctx_t, array: *mut tiledb_array_t) -> capi_return_t;
    pub fn tiledb_array_is_open(
        ctx: *mut tiledb_ctx_t,
        array: *mut tiledb_array_t,
        is_open: *mut i32,
    ) -> capi_return_t;
    pub fn tiledb_array_get_query_type(
        ctx: *mut tiledb_ctx_t,
        array: *mut tiledb_array_t,
        query_type: *mut tiledb_query_type_t,
    ) -> capi_return_t;
    pub fn tiledb_array_get_schema(
        ctx: *mut tiledb_ctx_t,
        array: *mut tiledb_array_t,
        schema: *mut *mut tiledb_array_schema_t,
    ) -> capi_return_t;

    /// Writes the bounds of dimension `idx` to `domain`, which must hold two
    /// values of the dimension's type. `is_empty` is set to 1 if no cells
    /// have been written.
    pub fn tiledb_array_get_non_empty_domain_from_index(
        ctx: *mut tiledb_ctx_t,
        array: *mut tiledb_array_t,
        idx: u32,
        domain: *mut c_void,
        is_empty: *mut i32,
    ) -> capi_return_t;
}
