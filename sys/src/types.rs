use std::ffi::{c_char, c_void};

pub type capi_return_t = i32;

pub type tiledb_array_type_t = u32;
pub type tiledb_datatype_t = u32;
pub type tiledb_filesystem_t = u32;
pub type tiledb_filter_option_t = u32;
pub type tiledb_filter_type_t = u32;
pub type tiledb_layout_t = u32;
pub type tiledb_object_t = u32;
pub type tiledb_query_condition_combination_op_t = u32;
pub type tiledb_query_condition_op_t = u32;
pub type tiledb_query_status_t = u32;
pub type tiledb_query_type_t = u32;
pub type tiledb_walk_order_t = u32;

pub const TILEDB_OK: capi_return_t = 0;
pub const TILEDB_ERR: capi_return_t = -1;
pub const TILEDB_OOM: capi_return_t = -2;
pub const TILEDB_VAR_NUM: u32 = u32::MAX;

macro_rules! opaque {
    ($($name:ident),+) => {
        $(
            #[repr(C)]
            pub struct $name {
                _unused: [u8; 0],
            }
        )+
    };
}

opaque!(
    tiledb_array_schema_evolution_t,
    tiledb_array_schema_t,
    tiledb_array_t,
    tiledb_attribute_t,
    tiledb_buffer_list_t,
    tiledb_buffer_t,
    tiledb_config_iter_t,
    tiledb_config_t,
    tiledb_ctx_t,
    tiledb_dimension_t,
    tiledb_domain_t,
    tiledb_error_t,
    tiledb_filter_list_t,
    tiledb_filter_t,
    tiledb_query_condition_t,
    tiledb_query_t,
    tiledb_string_t,
    tiledb_subarray_t
);

/// Callback invoked by `tiledb_object_walk` and `tiledb_object_ls`.
/// Returns `1` to continue, `0` to stop, and `-1` to stop with an error.
pub type tiledb_object_visitor_t = Option<
    unsafe extern "C" fn(
        path: *const c_char,
        object_type: tiledb_object_t,
        data: *mut c_void,
    ) -> i32,
>;

unsafe extern "C" {
    pub fn tiledb_version(major: *mut i32, minor: *mut i32, rev: *mut i32);

    pub fn tiledb_error_message(
        err: *mut tiledb_error_t,
        errmsg: *mut *const c_char,
    ) -> capi_return_t;
    pub fn tiledb_error_free(err: *mut *mut tiledb_error_t);

    /// The view is valid until the string handle is freed.
    pub fn tiledb_string_view(
        s: *mut tiledb_string_t,
        data: *mut *const c_char,
        length: *mut usize,
    ) -> capi_return_t;
    pub fn tiledb_string_free(s: *mut *mut tiledb_string_t) -> capi_return_t;
}
