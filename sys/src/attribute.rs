use std::ffi::{c_char, c_void};

use crate::types::*;

unsafe extern "C" {
    pub fn tiledb_attribute_alloc(
        ctx: *mut tiledb_ctx_t,
        name: *const c_char,
        type_: tiledb_datatype_t,
        attr: *mut *mut tiledb_attribute_t,
    ) -> capi_return_t;
    pub fn tiledb_attribute_free(attr: *mut *mut tiledb_attribute_t);

    pub fn tiledb_attribute_set_nullable(
        ctx: *mut tiledb_ctx_t,
        attr: *mut tiledb_attribute_t,
        nullable: u8,
    ) -> capi_return_t;
    pub fn tiledb_attribute_get_nullable(
        ctx: *mut tiledb_ctx_t,
        attr: *mut tiledb_attribute_t,
        nullable: *mut u8,
    ) -> capi_return_t;

    pub fn tiledb_attribute_set_filter_list(
        ctx: *mut tiledb_ctx_t,
        attr: *mut tiledb_attribute_t,
        filter_list: *mut tiledb_filter_list_t,
    ) -> capi_return_t;
    pub fn tiledb_attribute_get_filter_list(
        ctx: *mut tiledb_ctx_t,
        attr: *mut tiledb_attribute_t,
        filter_list: *mut *mut tiledb_filter_list_t,
    ) -> capi_return_t;

    pub fn tiledb_attribute_set_cell_val_num(
        ctx: *mut tiledb_ctx_t,
        attr: *mut tiledb_attribute_t,
        cell_val_num: u32,
    ) -> capi_return_t;
    pub fn tiledb_attribute_get_cell_val_num(
        ctx: *mut tiledb_ctx_t,
        attr: *const tiledb_attribute_t,
        cell_val_num: *mut u32,
    ) -> capi_return_t;

    pub fn tiledb_attribute_get_name(
        ctx: *mut tiledb_ctx_t,
        attr: *const tiledb_attribute_t,
        name: *mut *const c_char,
    ) -> capi_return_t;
    pub fn tiledb_attribute_get_type(
        ctx: *mut tiledb_ctx_t,
        attr: *const tiledb_attribute_t,
        type_: *mut tiledb_datatype_t,
    ) -> capi_return_t;
    pub fn tiledb_attribute_get_cell_size(
        ctx: *mut tiledb_ctx_t,
        attr: *const tiledb_attribute_t,
        cell_size: *mut u64,
    ) -> capi_return_t;

    pub fn tiledb_attribute_dump_str(
        ctx: *mut tiledb_ctx_t,
        attr: *const tiledb_attribute_t,
        out: *mut *mut tiledb_string_t,
    ) -> capi_return_t;

    pub fn tiledb_attribute_set_fill_value(
        ctx: *mut tiledb_ctx_t,
        attr: *mut tiledb_attribute_t,
        value: *const c_void,
        size: u64,
    ) -> capi_return_t;
    /// `value` points into memory owned by `attr`.
    pub fn tiledb_attribute_get_fill_value(
        ctx: *mut tiledb_ctx_t,
        attr: *mut tiledb_attribute_t,
        value: *mut *const c_void,
        size: *mut u64,
    ) -> capi_return_t;

    pub fn tiledb_attribute_set_fill_value_nullable(
        ctx: *mut tiledb_ctx_t,
        attr: *mut tiledb_attribute_t,
        value: *const c_void,
        size: u64,
        validity: u8,
    ) -> capi_return_t;
    pub fn tiledb_attribute_get_fill_value_nullable(
        ctx: *mut tiledb_ctx_t,
        attr: *mut tiledb_attribute_t,
        value: *mut *const c_void,
        size: *mut u64,
        valid: *mut u8,
    ) -> capi_return_t;
}
