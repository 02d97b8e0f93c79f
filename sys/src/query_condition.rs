use std::ffi::{c_char, c_void};

use crate::types::*;

unsafe extern "C" {
    pub fn tiledb_query_condition_alloc(
        ctx: *mut tiledb_ctx_t,
        cond: *mut *mut tiledb_query_condition_t,
    ) -> capi_return_t;
    pub fn tiledb_query_condition_free(cond: *mut *mut tiledb_query_condition_t);

    /// `condition_value` may be NULL with a size of zero to compare against null.
    pub fn tiledb_query_condition_init(
        ctx: *mut tiledb_ctx_t,
        cond: *mut tiledb_query_condition_t,
        attribute_name: *const c_char,
        condition_value: *const c_void,
        condition_value_size: u64,
        op: tiledb_query_condition_op_t,
    ) -> capi_return_t;

    pub fn tiledb_query_condition_alloc_set_membership(
        ctx: *mut tiledb_ctx_t,
        field_name: *const c_char,
        data: *const c_void,
        data_size: u64,
        offsets: *const c_void,
        offsets_size: u64,
        op: tiledb_query_condition_op_t,
        cond: *mut *mut tiledb_query_condition_t,
    ) -> capi_return_t;

    pub fn tiledb_query_condition_combine(
        ctx: *mut tiledb_ctx_t,
        left_cond: *const tiledb_query_condition_t,
        right_cond: *const tiledb_query_condition_t,
        combination_op: tiledb_query_condition_combination_op_t,
        combined_cond: *mut *mut tiledb_query_condition_t,
    ) -> capi_return_t;
    pub fn tiledb_query_condition_negate(
        ctx: *mut tiledb_ctx_t,
        cond: *const tiledb_query_condition_t,
        negated_cond: *mut *mut tiledb_query_condition_t,
    ) -> capi_return_t;

    pub fn tiledb_query_condition_set_use_enumeration(
        ctx: *mut tiledb_ctx_t,
        cond: *const tiledb_query_condition_t,
        use_enumeration: i32,
    ) -> capi_return_t;
}
