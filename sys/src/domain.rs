use std::ffi::c_char;

use crate::types::*;

unsafe extern "C" {
    pub fn tiledb_domain_alloc(
        ctx: *mut tiledb_ctx_t,
        domain: *mut *mut tiledb_domain_t,
    ) -> capi_return_t;
    pub fn tiledb_domain_free(domain: *mut *mut tiledb_domain_t);

    pub fn tiledb_domain_get_type(
        ctx: *mut tiledb_ctx_t,
        domain: *const tiledb_domain_t,
        type_: *mut tiledb_datatype_t,
    ) -> capi_return_t;
    pub fn tiledb_domain_get_ndim(
        ctx: *mut tiledb_ctx_t,
        domain: *const tiledb_domain_t,
        ndim: *mut u32,
    ) -> capi_return_t;

    pub fn tiledb_domain_add_dimension(
        ctx: *mut tiledb_ctx_t,
        domain: *mut tiledb_domain_t,
        dim: *mut tiledb_dimension_t,
    ) -> capi_return_t;
    pub fn tiledb_domain_get_dimension_from_index(
        ctx: *mut tiledb_ctx_t,
        domain: *const tiledb_domain_t,
        index: u32,
        dim: *mut *mut tiledb_dimension_t,
    ) -> capi_return_t;
    pub fn tiledb_domain_get_dimension_from_name(
        ctx: *mut tiledb_ctx_t,
        domain: *const tiledb_domain_t,
        name: *const c_char,
        dim: *mut *mut tiledb_dimension_t,
    ) -> capi_return_t;
    pub fn tiledb_domain_has_dimension(
        ctx: *mut tiledb_ctx_t,
        domain: *const tiledb_domain_t,
        name: *const c_char,
        has_dim: *mut i32,
    ) -> capi_return_t;

    pub fn tiledb_domain_dump_str(
        ctx: *mut tiledb_ctx_t,
        domain: *const tiledb_domain_t,
        out: *mut *mut tiledb_string_t,
    ) -> capi_return_t;
}
