use std::collections::HashMap;
use std::ffi::c_void;
use std::marker::PhantomData;

use tiledb_common::array::{Layout, QueryStatus, QueryType};
use num_traits::FromBytes;
use tiledb_common::datatype::{self, Datatype, PhysicalType};
use tiledb_sys::*;

use crate::array::{Array, ArraySchema};
use crate::attribute::copy_native_bytes;
use crate::check_physical_type;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::handle::{RawQuery, RawSubarray};
use crate::string::cstring;

pub mod condition;

pub use condition::QueryCondition;

/// Sizes, in bytes, of the buffers attached to one field.
///
/// The library reads these before a query runs and overwrites them with
/// the number of bytes produced by a read. Each is boxed so that its
/// address remains valid as the map grows.
#[derive(Default)]
struct FieldSizes {
    data: Option<(Box<u64>, u64)>,
    offsets: Option<Box<u64>>,
    validity: Option<Box<u64>>,
}

/// A read or write of an open [Array].
///
/// Buffers attached to the query are borrowed for its whole lifetime, since
/// the library writes into them when the query is submitted.
pub struct Query<'a> {
    context: Context,
    raw: RawQuery,
    schema: ArraySchema,
    sizes: HashMap<String, FieldSizes>,
    _buffers: PhantomData<&'a mut [u8]>,
}

impl<'a> Query<'a> {
    pub fn new(array: &'a Array, query_type: QueryType) -> Result<Self> {
        let context = array.context();
        let ffi = context.alloc_handle(
            &format!("allocating {query_type} query"),
            |ctx, query| unsafe {
                tiledb_query_alloc(ctx, array.capi(), query_type.into(), query)
            },
        )?;
        Ok(Query {
            context: context.clone(),
            raw: RawQuery::owned(ffi),
            schema: array.schema()?,
            sizes: HashMap::new(),
            _buffers: PhantomData,
        })
    }

    fn capi(&self) -> *mut tiledb_query_t {
        self.raw.capi()
    }

    /// Returns the datatype of the attribute or dimension `name`.
    fn field_datatype(&self, name: &str) -> Result<Datatype> {
        if self.schema.has_attribute(name)? {
            return self.schema.attribute_from_name(name)?.datatype();
        }
        let domain = self.schema.domain()?;
        if domain.has_dimension(name)? {
            return domain.dimension_from_name(name)?.datatype();
        }
        Err(Error::InvalidArgument(format!("no field named '{name}'")))
    }

    pub fn set_layout(&mut self, layout: Layout) -> Result<()> {
        self.context.capi_call("setting query layout", |ctx| unsafe {
            tiledb_query_set_layout(ctx, self.capi(), layout.into())
        })
    }

    /// Attaches the values of field `name`.
    /// `T` must be the physical type of the field.
    pub fn set_data_buffer<T: PhysicalType>(
        &mut self,
        name: &str,
        data: &'a mut [T],
    ) -> Result<()> {
        check_physical_type::<T>(self.field_datatype(name)?)?;
        let c_name = cstring(name)?;
        let mut size = Box::new(std::mem::size_of_val(&*data) as u64);
        let size_ptr: *mut u64 = &mut *size;
        self.context
            .capi_call(&format!("setting data buffer for '{name}'"), |ctx| unsafe {
                tiledb_query_set_data_buffer(
                    ctx,
                    self.capi(),
                    c_name.as_ptr(),
                    data.as_mut_ptr() as *mut c_void,
                    size_ptr,
                )
            })?;
        self.sizes.entry(name.to_owned()).or_default().data =
            Some((size, size_of::<T>() as u64));
        Ok(())
    }

    /// Attaches the starting byte offset of each cell of a var-sized field.
    pub fn set_offsets_buffer(&mut self, name: &str, offsets: &'a mut [u64]) -> Result<()> {
        let c_name = cstring(name)?;
        let mut size = Box::new(std::mem::size_of_val(&*offsets) as u64);
        let size_ptr: *mut u64 = &mut *size;
        self.context
            .capi_call(&format!("setting offsets buffer for '{name}'"), |ctx| unsafe {
                tiledb_query_set_offsets_buffer(
                    ctx,
                    self.capi(),
                    c_name.as_ptr(),
                    offsets.as_mut_ptr(),
                    size_ptr,
                )
            })?;
        self.sizes.entry(name.to_owned()).or_default().offsets = Some(size);
        Ok(())
    }

    /// Attaches the validity of each cell of a nullable attribute.
    pub fn set_validity_buffer(&mut self, name: &str, validity: &'a mut [u8]) -> Result<()> {
        let c_name = cstring(name)?;
        let mut size = Box::new(validity.len() as u64);
        let size_ptr: *mut u64 = &mut *size;
        self.context
            .capi_call(&format!("setting validity buffer for '{name}'"), |ctx| unsafe {
                tiledb_query_set_validity_buffer(
                    ctx,
                    self.capi(),
                    c_name.as_ptr(),
                    validity.as_mut_ptr(),
                    size_ptr,
                )
            })?;
        self.sizes.entry(name.to_owned()).or_default().validity = Some(size);
        Ok(())
    }

    pub fn set_subarray(&mut self, subarray: &Subarray) -> Result<()> {
        self.context.capi_call("setting query subarray", |ctx| unsafe {
            tiledb_query_set_subarray_t(ctx, self.capi(), subarray.capi())
        })
    }

    /// Restricts a read to the cells which satisfy `condition`.
    pub fn set_condition(&mut self, condition: &QueryCondition) -> Result<()> {
        self.context.capi_call("setting query condition", |ctx| unsafe {
            tiledb_query_set_condition(ctx, self.capi(), condition.capi())
        })
    }

    pub fn submit(&mut self) -> Result<()> {
        tracing::trace!(fields = ?self.sizes.keys().collect::<Vec<_>>(), "Submitting query");
        self.context.capi_call("submitting query", |ctx| unsafe {
            tiledb_query_submit(ctx, self.capi())
        })
    }

    /// Flushes the internal state of a global order write.
    pub fn finalize(&mut self) -> Result<()> {
        self.context.capi_call("finalizing query", |ctx| unsafe {
            tiledb_query_finalize(ctx, self.capi())
        })
    }

    pub fn status(&self) -> Result<QueryStatus> {
        let mut c_status = 0;
        self.context.capi_call("getting query status", |ctx| unsafe {
            tiledb_query_get_status(ctx, self.capi(), &mut c_status)
        })?;
        Ok(QueryStatus::try_from(c_status)?)
    }

    /// Returns, for each field with buffers attached, the number of offsets
    /// and the number of data values which the last read produced.
    /// The offset count is zero for fixed-size fields.
    pub fn result_buffer_elements(&self) -> HashMap<String, (u64, u64)> {
        self.sizes
            .iter()
            .map(|(name, sizes)| {
                let offsets = sizes
                    .offsets
                    .as_ref()
                    .map_or(0, |o| **o / size_of::<u64>() as u64);
                let data = sizes
                    .data
                    .as_ref()
                    .map_or(0, |(bytes, value_size)| **bytes / value_size);
                (name.clone(), (offsets, data))
            })
            .collect()
    }

    /// Returns the number of validity values which the last read produced
    /// for `name`, if a validity buffer is attached.
    pub fn result_validity_elements(&self, name: &str) -> Option<u64> {
        self.sizes
            .get(name)
            .and_then(|s| s.validity.as_ref())
            .map(|v| **v)
    }
}

/// The ranges of each dimension which a query reads or writes.
pub struct Subarray<'a> {
    context: Context,
    raw: RawSubarray,
    schema: ArraySchema,
    _array: PhantomData<&'a Array>,
}

impl<'a> Subarray<'a> {
    pub fn new(array: &'a Array) -> Result<Self> {
        let context = array.context();
        let ffi = context.alloc_handle("allocating subarray", |ctx, subarray| unsafe {
            tiledb_subarray_alloc(ctx, array.capi(), subarray)
        })?;
        Ok(Subarray {
            context: context.clone(),
            raw: RawSubarray::owned(ffi),
            schema: array.schema()?,
            _array: PhantomData,
        })
    }

    fn capi(&self) -> *mut tiledb_subarray_t {
        self.raw.capi()
    }

    /// Checks that `T` is the physical type of dimension `dim_idx`, since
    /// the library reads as many bytes as that dimension's values occupy.
    fn check_dimension_type<T: PhysicalType>(&self, dim_idx: u32) -> Result<()> {
        let datatype = self
            .schema
            .domain()?
            .dimension_from_index(dim_idx)?
            .datatype()?;
        check_physical_type::<T>(datatype)
    }

    /// Adds the inclusive range `[start, end]` of dimension `dim_idx`.
    /// `T` must be the physical type of the dimension.
    pub fn add_range<T: PhysicalType>(&mut self, dim_idx: u32, start: T, end: T) -> Result<()> {
        self.check_dimension_type::<T>(dim_idx)?;
        let start = start.to_bytes();
        let end = end.to_bytes();
        self.context
            .capi_call(&format!("adding range to dimension {dim_idx}"), |ctx| unsafe {
                tiledb_subarray_add_range(
                    ctx,
                    self.capi(),
                    dim_idx,
                    start.as_ptr() as *const c_void,
                    end.as_ptr() as *const c_void,
                    std::ptr::null(),
                )
            })
    }

    /// Returns the number of ranges of dimension `dim_idx`. A dimension
    /// with no ranges added covers its whole domain with one range.
    pub fn range_num(&self, dim_idx: u32) -> Result<u64> {
        let mut num = 0;
        self.context
            .capi_call(&format!("getting range count of dimension {dim_idx}"), |ctx| unsafe {
                tiledb_subarray_get_range_num(ctx, self.capi(), dim_idx, &mut num)
            })?;
        Ok(num)
    }

    /// Returns range `range_idx` of dimension `dim_idx` as `[start, end]`.
    pub fn range<T>(&self, dim_idx: u32, range_idx: u64) -> Result<[T; 2]>
    where
        T: PhysicalType,
        <T as FromBytes>::Bytes: for<'b> TryFrom<&'b [u8]>,
    {
        self.check_dimension_type::<T>(dim_idx)?;
        let mut start: *const c_void = std::ptr::null();
        let mut end: *const c_void = std::ptr::null();
        let mut stride: *const c_void = std::ptr::null();
        self.context.capi_call(
            &format!("getting range {range_idx} of dimension {dim_idx}"),
            |ctx| unsafe {
                tiledb_subarray_get_range(
                    ctx,
                    self.capi(),
                    dim_idx,
                    range_idx,
                    &mut start,
                    &mut end,
                    &mut stride,
                )
            },
        )?;
        let size = size_of::<T>() as u64;
        let start = unsafe { copy_native_bytes(start, size) };
        let end = unsafe { copy_native_bytes(end, size) };
        Ok([
            datatype::single_value::<T>(&start)?,
            datatype::single_value::<T>(&end)?,
        ])
    }
}
