use tiledb_sys::*;

use crate::attribute::Attribute;
use crate::context::Context;
use crate::error::Result;
use crate::handle::RawArraySchemaEvolution;
use crate::string::cstring;

/// A set of changes applied to the schema of an existing array.
pub struct ArraySchemaEvolution {
    context: Context,
    raw: RawArraySchemaEvolution,
}

impl ArraySchemaEvolution {
    pub fn new(context: &Context) -> Result<Self> {
        let ffi = context.alloc_handle("allocating array schema evolution", |ctx, evo| unsafe {
            tiledb_array_schema_evolution_alloc(ctx, evo)
        })?;
        Ok(ArraySchemaEvolution {
            context: context.clone(),
            raw: RawArraySchemaEvolution::owned(ffi),
        })
    }

    fn capi(&self) -> *mut tiledb_array_schema_evolution_t {
        self.raw.capi()
    }

    pub fn add_attribute(&mut self, attribute: &Attribute) -> Result<()> {
        self.context
            .capi_call("adding attribute to schema evolution", |ctx| unsafe {
                tiledb_array_schema_evolution_add_attribute(ctx, self.capi(), attribute.capi())
            })
    }

    pub fn drop_attribute(&mut self, name: &str) -> Result<()> {
        let c_name = cstring(name)?;
        self.context
            .capi_call(&format!("dropping attribute '{name}' in schema evolution"), |ctx| unsafe {
                tiledb_array_schema_evolution_drop_attribute(ctx, self.capi(), c_name.as_ptr())
            })
    }

    /// Sets the timestamp range of the evolved schema; `lo` and `hi` are
    /// expected to be equal.
    pub fn set_timestamp_range(&mut self, lo: u64, hi: u64) -> Result<()> {
        self.context
            .capi_call("setting schema evolution timestamp range", |ctx| unsafe {
                tiledb_array_schema_evolution_set_timestamp_range(ctx, self.capi(), lo, hi)
            })
    }

    /// Applies the changes to the array at `uri`.
    pub fn evolve(&self, uri: &str) -> Result<()> {
        let c_uri = cstring(uri)?;
        tracing::debug!(uri, "Evolving array schema");
        self.context
            .capi_call(&format!("evolving schema of '{uri}'"), |ctx| unsafe {
                tiledb_array_evolve(ctx, c_uri.as_ptr(), self.capi())
            })
    }
}
