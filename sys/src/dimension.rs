use std::ffi::{c_char, c_void};

use crate::types::*;

unsafe extern "C" {
    /// `dim_domain` points to two values of `type_` and `tile_extent` to one;
    /// both are NULL for string dimensions.
    pub fn tiledb_dimension_alloc(
        ctx: *mut tiledb_ctx_t,
        name: *const c_char,
        type_: tiledb_datatype_t,
        dim_domain: *const c_void,
        tile_extent: *const c_void,
        dim: *mut *mut tiledb_dimension_t,
    ) -> capi_return_t;
    pub fn tiledb_dimension_free(dim: *mut *mut tiledb_dimension_t);

    pub fn tiledb_dimension_set_filter_list(
        ctx: *mut tiledb_ctx_t,
        dim: *mut tiledb_dimension_t,
        filter_list: *mut tiledb_filter_list_t,
    ) -> capi_return_t;
    pub fn tiledb_dimension_get_filter_list(
        ctx: *mut tiledb_ctx_t,
        dim: *mut tiledb_dimension_t,
        filter_list: *mut *mut tiledb_filter_list_t,
    ) -> capi_return_t;

    pub fn tiledb_dimension_set_cell_val_num(
        ctx: *mut tiledb_ctx_t,
        dim: *mut tiledb_dimension_t,
        cell_val_num: u32,
    ) -> capi_return_t;
    pub fn tiledb_dimension_get_cell_val_num(
        ctx: *mut tiledb_ctx_t,
        dim: *const tiledb_dimension_t,
        cell_val_num: *mut u32,
    ) -> capi_return_t;

    pub fn tiledb_dimension_get_name(
        ctx: *mut tiledb_ctx_t,
        dim: *const tiledb_dimension_t,
        name: *mut *const c_char,
    ) -> capi_return_t;
    pub fn tiledb_dimension_get_type(
        ctx: *mut tiledb_ctx_t,
        dim: *const tiledb_dimension_t,
        type_: *mut tiledb_datatype_t,
    ) -> capi_return_t;

    /// `domain` is set to NULL for string dimensions.
    pub fn tiledb_dimension_get_domain(
        ctx: *mut tiledb_ctx_t,
        dim: *const tiledb_dimension_t,
        domain: *mut *const c_void,
    ) -> capi_return_t;
    /// `tile_extent` is set to NULL if the dimension has none.
    pub fn tiledb_dimension_get_tile_extent(
        ctx: *mut tiledb_ctx_t,
        dim: *const tiledb_dimension_t,
        tile_extent: *mut *const c_void,
    ) -> capi_return_t;

    pub fn tiledb_dimension_dump_str(
        ctx: *mut tiledb_ctx_t,
        dim: *const tiledb_dimension_t,
        out: *mut *mut tiledb_string_t,
    ) -> capi_return_t;
}
