use std::ffi::c_void;

use num_traits::FromBytes;
use tiledb_common::array::QueryType;
use tiledb_common::datatype::{self, PhysicalType};
use tiledb_sys::*;

use crate::check_physical_type;
use crate::context::Context;
use crate::error::Result;
use crate::handle::{RawArray, RawArraySchema};
use crate::string::cstring;

pub mod schema;
pub mod schema_evolution;

pub use schema::ArraySchema;
pub use schema_evolution::ArraySchemaEvolution;

/// A handle to the array stored at a URI.
pub struct Array {
    context: Context,
    raw: RawArray,
    uri: String,
}

impl Array {
    /// Creates a new, empty array at `uri`.
    pub fn create(context: &Context, uri: &str, schema: &ArraySchema) -> Result<()> {
        let c_uri = cstring(uri)?;
        tracing::debug!(uri, "Creating array");
        context.capi_call(&format!("creating array '{uri}'"), |ctx| unsafe {
            tiledb_array_create(ctx, c_uri.as_ptr(), schema.capi())
        })
    }

    /// Deletes the array at `uri` and all of its data.
    pub fn delete(context: &Context, uri: &str) -> Result<()> {
        let c_uri = cstring(uri)?;
        tracing::debug!(uri, "Deleting array");
        context.capi_call(&format!("deleting array '{uri}'"), |ctx| unsafe {
            tiledb_array_delete(ctx, c_uri.as_ptr())
        })
    }

    /// Returns a closed handle to the array at `uri`.
    pub fn new(context: &Context, uri: &str) -> Result<Self> {
        let c_uri = cstring(uri)?;
        let ffi = context.alloc_handle(&format!("allocating array '{uri}'"), |ctx, array| unsafe {
            tiledb_array_alloc(ctx, c_uri.as_ptr(), array)
        })?;
        Ok(Array {
            context: context.clone(),
            raw: RawArray::owned(ffi),
            uri: uri.to_owned(),
        })
    }

    /// Returns a handle to the array at `uri` opened for `query_type`.
    pub fn open_new(context: &Context, uri: &str, query_type: QueryType) -> Result<Self> {
        let mut array = Self::new(context, uri)?;
        array.open(query_type)?;
        Ok(array)
    }

    pub(crate) fn capi(&self) -> *mut tiledb_array_t {
        self.raw.capi()
    }

    pub(crate) fn context(&self) -> &Context {
        &self.context
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn open(&mut self, query_type: QueryType) -> Result<()> {
        self.context
            .capi_call(&format!("opening array '{}' for {query_type}", self.uri), |ctx| unsafe {
                tiledb_array_open(ctx, self.capi(), query_type.into())
            })
    }

    pub fn close(&mut self) -> Result<()> {
        self.context
            .capi_call(&format!("closing array '{}'", self.uri), |ctx| unsafe {
                tiledb_array_close(ctx, self.capi())
            })
    }

    pub fn is_open(&self) -> Result<bool> {
        let mut is_open = 0;
        self.context.capi_call("checking whether array is open", |ctx| unsafe {
            tiledb_array_is_open(ctx, self.capi(), &mut is_open)
        })?;
        Ok(is_open != 0)
    }

    /// Returns the mode the array was opened in.
    pub fn query_type(&self) -> Result<QueryType> {
        let mut c_type = 0;
        self.context.capi_call("getting array query type", |ctx| unsafe {
            tiledb_array_get_query_type(ctx, self.capi(), &mut c_type)
        })?;
        Ok(QueryType::try_from(c_type)?)
    }

    /// Returns the schema of an open array.
    pub fn schema(&self) -> Result<ArraySchema> {
        let ffi = self
            .context
            .alloc_handle("getting array schema", |ctx, schema| unsafe {
                tiledb_array_get_schema(ctx, self.capi(), schema)
            })?;
        Ok(ArraySchema::from_raw(&self.context, RawArraySchema::owned(ffi)))
    }

    /// Returns the bounding box of the cells written along dimension
    /// `dim_idx`, or `None` if the array holds no data.
    ///
    /// The array must be open for reading, and `T` must be the physical
    /// type of the dimension.
    pub fn non_empty_domain<T>(&self, dim_idx: u32) -> Result<Option<[T; 2]>>
    where
        T: PhysicalType,
        <T as FromBytes>::Bytes: for<'a> TryFrom<&'a [u8]>,
    {
        let dimension_type = self
            .schema()?
            .domain()?
            .dimension_from_index(dim_idx)?
            .datatype()?;
        check_physical_type::<T>(dimension_type)?;

        let mut bytes = vec![0u8; 2 * size_of::<T>()];
        let mut is_empty: i32 = 0;
        self.context.capi_call(
            &format!("getting non-empty domain of dimension {dim_idx} of '{}'", self.uri),
            |ctx| unsafe {
                tiledb_array_get_non_empty_domain_from_index(
                    ctx,
                    self.capi(),
                    dim_idx,
                    bytes.as_mut_ptr() as *mut c_void,
                    &mut is_empty,
                )
            },
        )?;
        if is_empty != 0 {
            return Ok(None);
        }
        let mut values = datatype::values_iter::<T>(&bytes)?;
        match (values.next(), values.next()) {
            (Some(lo), Some(hi)) => Ok(Some([lo, hi])),
            _ => Ok(None),
        }
    }
}
