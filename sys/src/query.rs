use std::ffi::{c_char, c_void};

use crate::types::*;

unsafe extern "C" {
    pub fn tiledb_query_alloc(
        ctx: *mut tiledb_ctx_t,
        array: *mut tiledb_array_t,
        query_type: tiledb_query_type_t,
        query: *mut *mut tiledb_query_t,
    ) -> capi_return_t;
    pub fn tiledb_query_free(query: *mut *mut tiledb_query_t);

    pub fn tiledb_query_set_layout(
        ctx: *mut tiledb_ctx_t,
        query: *mut tiledb_query_t,
        layout: tiledb_layout_t,
    ) -> capi_return_t;
    pub fn tiledb_query_set_subarray_t(
        ctx: *mut tiledb_ctx_t,
        query: *mut tiledb_query_t,
        subarray: *const tiledb_subarray_t,
    ) -> capi_return_t;
    pub fn tiledb_query_set_condition(
        ctx: *mut tiledb_ctx_t,
        query: *mut tiledb_query_t,
        cond: *const tiledb_query_condition_t,
    ) -> capi_return_t;

    /// `buffer` and `buffer_size` must stay valid until the query completes.
    /// On read, `buffer_size` is updated with the number of bytes written.
    pub fn tiledb_query_set_data_buffer(
        ctx: *mut tiledb_ctx_t,
        query: *mut tiledb_query_t,
        name: *const c_char,
        buffer: *mut c_void,
        buffer_size: *mut u64,
    ) -> capi_return_t;
    pub fn tiledb_query_set_offsets_buffer(
        ctx: *mut tiledb_ctx_t,
        query: *mut tiledb_query_t,
        name: *const c_char,
        buffer: *mut u64,
        buffer_size: *mut u64,
    ) -> capi_return_t;
    pub fn tiledb_query_set_validity_buffer(
        ctx: *mut tiledb_ctx_t,
        query: *mut tiledb_query_t,
        name: *const c_char,
        buffer: *mut u8,
        buffer_size: *mut u64,
    ) -> capi_return_t;

    pub fn tiledb_query_submit(ctx: *mut tiledb_ctx_t, query: *mut tiledb_query_t) -> capi_return_t;
    pub fn tiledb_query_finalize(
        ctx: *mut tiledb_ctx_t,
        query: *mut tiledb_query_t,
    ) -> capi_return_t;
    pub fn tiledb_query_get_status(
        ctx: *mut tiledb_ctx_t,
        query: *mut tiledb_query_t,
        status: *mut tiledb_query_status_t,
    ) -> capi_return_t;

    pub fn tiledb_subarray_alloc(
        ctx: *mut tiledb_ctx_t,
        array: *const tiledb_array_t,
        subarray: *mut *mut tiledb_subarray_t,
    ) -> capi_return_t;
    pub fn tiledb_subarray_free(subarray: *mut *mut tiledb_subarray_t);

    /// `stride` must be NULL; strided ranges are not supported.
    pub fn tiledb_subarray_add_range(
        ctx: *mut tiledb_ctx_t,
        subarray: *mut tiledb_subarray_t,
        dim_idx: u32,
        start: *const c_void,
        end: *const c_void,
        stride: *const c_void,
    ) -> capi_return_t;
    pub fn tiledb_subarray_get_range_num(
        ctx: *mut tiledb_ctx_t,
        subarray: *const tiledb_subarray_t,
        dim_idx: u32,
        range_num: *mut u64,
    ) -> capi_return_t;
    /// The range bounds point into memory owned by the subarray.
    pub fn tiledb_subarray_get_range(
        ctx: *mut tiledb_ctx_t,
        subarray: *const tiledb_subarray_t,
        dim_idx: u32,
        range_idx: u64,
        start: *mut *const c_void,
        end: *mut *const c_void,
        stride: *mut *const c_void,
    ) -> capi_return_t;
}
