use std::ffi::c_char;

use crate::types::*;

unsafe extern "C" {
    pub fn tiledb_array_schema_alloc(
        ctx: *mut tiledb_ctx_t,
        array_type: tiledb_array_type_t,
        schema: *mut *mut tiledb_array_schema_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_free(schema: *mut *mut tiledb_array_schema_t);

    pub fn tiledb_array_schema_load(
        ctx: *mut tiledb_ctx_t,
        array_uri: *const c_char,
        schema: *mut *mut tiledb_array_schema_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_check(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
    ) -> capi_return_t;

    pub fn tiledb_array_schema_add_attribute(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        attr: *mut tiledb_attribute_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_get_attribute_num(
        ctx: *mut tiledb_ctx_t,
        schema: *const tiledb_array_schema_t,
        attribute_num: *mut u32,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_get_attribute_from_index(
        ctx: *mut tiledb_ctx_t,
        schema: *const tiledb_array_schema_t,
        index: u32,
        attr: *mut *mut tiledb_attribute_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_get_attribute_from_name(
        ctx: *mut tiledb_ctx_t,
        schema: *const tiledb_array_schema_t,
        name: *const c_char,
        attr: *mut *mut tiledb_attribute_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_has_attribute(
        ctx: *mut tiledb_ctx_t,
        schema: *const tiledb_array_schema_t,
        name: *const c_char,
        has_attr: *mut i32,
    ) -> capi_return_t;

    pub fn tiledb_array_schema_set_allows_dups(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        allows_dups: i32,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_get_allows_dups(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        allows_dups: *mut i32,
    ) -> capi_return_t;

    pub fn tiledb_array_schema_set_domain(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        domain: *mut tiledb_domain_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_get_domain(
        ctx: *mut tiledb_ctx_t,
        schema: *const tiledb_array_schema_t,
        domain: *mut *mut tiledb_domain_t,
    ) -> capi_return_t;

    pub fn tiledb_array_schema_set_capacity(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        capacity: u64,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_get_capacity(
        ctx: *mut tiledb_ctx_t,
        schema: *const tiledb_array_schema_t,
        capacity: *mut u64,
    ) -> capi_return_t;

    pub fn tiledb_array_schema_set_cell_order(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        cell_order: tiledb_layout_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_get_cell_order(
        ctx: *mut tiledb_ctx_t,
        schema: *const tiledb_array_schema_t,
        cell_order: *mut tiledb_layout_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_set_tile_order(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        tile_order: tiledb_layout_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_get_tile_order(
        ctx: *mut tiledb_ctx_t,
        schema: *const tiledb_array_schema_t,
        tile_order: *mut tiledb_layout_t,
    ) -> capi_return_t;

    pub fn tiledb_array_schema_set_coords_filter_list(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        filter_list: *mut tiledb_filter_list_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_get_coords_filter_list(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        filter_list: *mut *mut tiledb_filter_list_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_set_offsets_filter_list(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        filter_list: *mut tiledb_filter_list_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_get_offsets_filter_list(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        filter_list: *mut *mut tiledb_filter_list_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_set_validity_filter_list(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        filter_list: *mut tiledb_filter_list_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_get_validity_filter_list(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        filter_list: *mut *mut tiledb_filter_list_t,
    ) -> capi_return_t;

    pub fn tiledb_array_schema_get_array_type(
        ctx: *mut tiledb_ctx_t,
        schema: *const tiledb_array_schema_t,
        array_type: *mut tiledb_array_type_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_timestamp_range(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        lo: *mut u64,
        hi: *mut u64,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_get_version(
        ctx: *mut tiledb_ctx_t,
        schema: *mut tiledb_array_schema_t,
        version: *mut u32,
    ) -> capi_return_t;

    pub fn tiledb_array_schema_dump_str(
        ctx: *mut tiledb_ctx_t,
        schema: *const tiledb_array_schema_t,
        out: *mut *mut tiledb_string_t,
    ) -> capi_return_t;

    pub fn tiledb_array_schema_evolution_alloc(
        ctx: *mut tiledb_ctx_t,
        evolution: *mut *mut tiledb_array_schema_evolution_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_evolution_free(evolution: *mut *mut tiledb_array_schema_evolution_t);

    pub fn tiledb_array_schema_evolution_add_attribute(
        ctx: *mut tiledb_ctx_t,
        evolution: *mut tiledb_array_schema_evolution_t,
        attr: *mut tiledb_attribute_t,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_evolution_drop_attribute(
        ctx: *mut tiledb_ctx_t,
        evolution: *mut tiledb_array_schema_evolution_t,
        attribute_name: *const c_char,
    ) -> capi_return_t;
    pub fn tiledb_array_schema_evolution_set_timestamp_range(
        ctx: *mut tiledb_ctx_t,
        evolution: *mut tiledb_array_schema_evolution_t,
        lo: u64,
        hi: u64,
    ) -> capi_return_t;
}
