//! Owners of raw native handles.
//!
//! Each owner releases its handle exactly once, when dropped. Wrappers in
//! this crate pair an owner with the [Context](crate::Context) which
//! allocated it, so that the context outlives the handle.

macro_rules! native_handle {
    ($owner:ident, $ffi:ty, $free:path) => {
        pub(crate) struct $owner {
            ffi: *mut $ffi,
        }

        impl $owner {
            /// Takes ownership of a handle allocated by the library.
            pub(crate) fn owned(ffi: *mut $ffi) -> Self {
                tracing::trace!(handle = stringify!($ffi), ?ffi, "Acquired native handle");
                $owner { ffi }
            }

            pub(crate) fn capi(&self) -> *mut $ffi {
                self.ffi
            }
        }

        impl Drop for $owner {
            fn drop(&mut self) {
                tracing::trace!(
                    handle = stringify!($ffi),
                    ffi = ?self.ffi,
                    "Releasing native handle"
                );
                unsafe { $free(&mut self.ffi) };
            }
        }
    };
}

use tiledb_sys::*;

native_handle!(RawArray, tiledb_array_t, tiledb_array_free);
native_handle!(RawArraySchema, tiledb_array_schema_t, tiledb_array_schema_free);
native_handle!(
    RawArraySchemaEvolution,
    tiledb_array_schema_evolution_t,
    tiledb_array_schema_evolution_free
);
native_handle!(RawAttribute, tiledb_attribute_t, tiledb_attribute_free);
native_handle!(RawBuffer, tiledb_buffer_t, tiledb_buffer_free);
native_handle!(RawBufferList, tiledb_buffer_list_t, tiledb_buffer_list_free);
native_handle!(RawConfig, tiledb_config_t, tiledb_config_free);
native_handle!(RawConfigIter, tiledb_config_iter_t, tiledb_config_iter_free);
native_handle!(RawContext, tiledb_ctx_t, tiledb_ctx_free);
native_handle!(RawDimension, tiledb_dimension_t, tiledb_dimension_free);
native_handle!(RawDomain, tiledb_domain_t, tiledb_domain_free);
native_handle!(RawFilter, tiledb_filter_t, tiledb_filter_free);
native_handle!(RawFilterList, tiledb_filter_list_t, tiledb_filter_list_free);
native_handle!(RawQuery, tiledb_query_t, tiledb_query_free);
native_handle!(
    RawQueryCondition,
    tiledb_query_condition_t,
    tiledb_query_condition_free
);
native_handle!(RawSubarray, tiledb_subarray_t, tiledb_subarray_free);

// The native context is internally synchronized.
unsafe impl Send for RawContext {}
unsafe impl Sync for RawContext {}
