use std::ffi::c_void;

use crate::types::*;

unsafe extern "C" {
    pub fn tiledb_buffer_alloc(
        ctx: *mut tiledb_ctx_t,
        buffer: *mut *mut tiledb_buffer_t,
    ) -> capi_return_t;
    pub fn tiledb_buffer_free(buffer: *mut *mut tiledb_buffer_t);

    pub fn tiledb_buffer_set_type(
        ctx: *mut tiledb_ctx_t,
        buffer: *mut tiledb_buffer_t,
        datatype: tiledb_datatype_t,
    ) -> capi_return_t;
    pub fn tiledb_buffer_get_type(
        ctx: *mut tiledb_ctx_t,
        buffer: *const tiledb_buffer_t,
        datatype: *mut tiledb_datatype_t,
    ) -> capi_return_t;

    /// `data` points into memory owned by `buffer`.
    pub fn tiledb_buffer_get_data(
        ctx: *mut tiledb_ctx_t,
        buffer: *const tiledb_buffer_t,
        data: *mut *mut c_void,
        num_bytes: *mut u64,
    ) -> capi_return_t;
    /// The buffer does not copy `data`; it must outlive the buffer.
    pub fn tiledb_buffer_set_data(
        ctx: *mut tiledb_ctx_t,
        buffer: *mut tiledb_buffer_t,
        data: *mut c_void,
        size: u64,
    ) -> capi_return_t;

    pub fn tiledb_buffer_list_alloc(
        ctx: *mut tiledb_ctx_t,
        buffer_list: *mut *mut tiledb_buffer_list_t,
    ) -> capi_return_t;
    pub fn tiledb_buffer_list_free(buffer_list: *mut *mut tiledb_buffer_list_t);

    pub fn tiledb_buffer_list_get_num_buffers(
        ctx: *mut tiledb_ctx_t,
        buffer_list: *const tiledb_buffer_list_t,
        num_buffers: *mut u64,
    ) -> capi_return_t;
    pub fn tiledb_buffer_list_get_buffer(
        ctx: *mut tiledb_ctx_t,
        buffer_list: *const tiledb_buffer_list_t,
        buffer_idx: u64,
        buffer: *mut *mut tiledb_buffer_t,
    ) -> capi_return_t;
    pub fn tiledb_buffer_list_get_total_size(
        ctx: *mut tiledb_ctx_t,
        buffer_list: *const tiledb_buffer_list_t,
        total_size: *mut u64,
    ) -> capi_return_t;
    /// Copies every buffer into a newly allocated one.
    pub fn tiledb_buffer_list_flatten(
        ctx: *mut tiledb_ctx_t,
        buffer_list: *const tiledb_buffer_list_t,
        buffer: *mut *mut tiledb_buffer_t,
    ) -> capi_return_t;
}
