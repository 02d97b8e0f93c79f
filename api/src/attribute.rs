use std::ffi::{c_char, c_void};

use num_traits::FromBytes;
use tiledb_common::InvalidDiscriminant;
use tiledb_common::cell_val_num::CellValNum;
use tiledb_common::datatype::{self, Datatype, PhysicalType};
use tiledb_sys::*;

use crate::check_physical_type;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::filter::FilterList;
use crate::handle::{RawAttribute, RawFilterList};
use crate::string::{copy_cstr, cstring};

/// A named, typed field holding one value per cell of an array.
pub struct Attribute {
    context: Context,
    raw: RawAttribute,
}

impl Attribute {
    pub fn new(context: &Context, name: &str, datatype: Datatype) -> Result<Self> {
        let c_name = cstring(name)?;
        let ffi = context.alloc_handle(
            &format!("allocating attribute '{name}'"),
            |ctx, attr| unsafe {
                tiledb_attribute_alloc(ctx, c_name.as_ptr(), datatype.into(), attr)
            },
        )?;
        Ok(Self::from_raw(context, RawAttribute::owned(ffi)))
    }

    pub(crate) fn from_raw(context: &Context, raw: RawAttribute) -> Self {
        Attribute {
            context: context.clone(),
            raw,
        }
    }

    pub(crate) fn capi(&self) -> *mut tiledb_attribute_t {
        self.raw.capi()
    }

    pub fn name(&self) -> Result<String> {
        let mut name: *const c_char = std::ptr::null();
        self.context.capi_call("getting attribute name", |ctx| unsafe {
            tiledb_attribute_get_name(ctx, self.capi(), &mut name)
        })?;
        unsafe { copy_cstr(name) }
    }

    pub fn datatype(&self) -> Result<Datatype> {
        let mut c_type = 0;
        self.context.capi_call("getting attribute type", |ctx| unsafe {
            tiledb_attribute_get_type(ctx, self.capi(), &mut c_type)
        })?;
        Ok(Datatype::try_from(c_type)?)
    }

    pub fn set_nullable(&mut self, nullable: bool) -> Result<()> {
        self.context.capi_call("setting attribute nullability", |ctx| unsafe {
            tiledb_attribute_set_nullable(ctx, self.capi(), u8::from(nullable))
        })
    }

    pub fn is_nullable(&self) -> Result<bool> {
        let mut nullable: u8 = 0;
        self.context.capi_call("getting attribute nullability", |ctx| unsafe {
            tiledb_attribute_get_nullable(ctx, self.capi(), &mut nullable)
        })?;
        Ok(nullable != 0)
    }

    pub fn set_cell_val_num(&mut self, cell_val_num: CellValNum) -> Result<()> {
        self.context
            .capi_call("setting attribute cell value number", |ctx| unsafe {
                tiledb_attribute_set_cell_val_num(ctx, self.capi(), cell_val_num.into())
            })
    }

    pub fn cell_val_num(&self) -> Result<CellValNum> {
        let mut c_num = 0;
        self.context
            .capi_call("getting attribute cell value number", |ctx| unsafe {
                tiledb_attribute_get_cell_val_num(ctx, self.capi(), &mut c_num)
            })?;
        CellValNum::from_raw(c_num)
            .ok_or_else(|| InvalidDiscriminant::new("CellValNum", c_num).into())
    }

    /// Returns the size in bytes of one cell, or `u64::MAX` for var-sized cells.
    pub fn cell_size(&self) -> Result<u64> {
        let mut size = 0;
        self.context.capi_call("getting attribute cell size", |ctx| unsafe {
            tiledb_attribute_get_cell_size(ctx, self.capi(), &mut size)
        })?;
        Ok(size)
    }

    pub fn set_filter_list(&mut self, filter_list: &FilterList) -> Result<()> {
        self.context
            .capi_call("setting attribute filter list", |ctx| unsafe {
                tiledb_attribute_set_filter_list(ctx, self.capi(), filter_list.capi())
            })
    }

    pub fn filter_list(&self) -> Result<FilterList> {
        let ffi = self
            .context
            .alloc_handle("getting attribute filter list", |ctx, fl| unsafe {
                tiledb_attribute_get_filter_list(ctx, self.capi(), fl)
            })?;
        Ok(FilterList::from_raw(&self.context, RawFilterList::owned(ffi)))
    }

    /// Checks that `bytes` is the size of a fill value for this attribute:
    /// one cell for fixed-size attributes, any non-empty multiple of the
    /// value size for var-sized ones.
    fn check_fill_value_size(&self, bytes: &[u8]) -> Result<()> {
        let datatype = self.datatype()?;
        let expected = match self.cell_val_num()?.fixed() {
            Some(n) => datatype.size() * u64::from(n),
            None if !bytes.is_empty() && bytes.len() as u64 % datatype.size() == 0 => {
                return Ok(());
            }
            None => {
                return Err(Error::InvalidArgument(format!(
                    "fill value of {} bytes is not a whole number of {datatype} values",
                    bytes.len()
                )));
            }
        };
        if bytes.len() as u64 != expected {
            return Err(Error::InvalidArgument(format!(
                "fill value of {} bytes does not fill a cell of {expected} bytes",
                bytes.len()
            )));
        }
        Ok(())
    }

    /// Sets the value which reads return for cells never written.
    pub fn set_fill_value<T: PhysicalType>(&mut self, value: T) -> Result<()> {
        self.set_fill_values(&[value])
    }

    /// Sets a fill value holding several values per cell.
    pub fn set_fill_values<T: PhysicalType>(&mut self, values: &[T]) -> Result<()> {
        check_physical_type::<T>(self.datatype()?)?;
        self.set_fill_value_bytes(&datatype::to_bytes(values))
    }

    /// Sets the fill value from its raw bytes, as for string attributes.
    pub fn set_fill_value_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.check_fill_value_size(bytes)?;
        self.context.capi_call("setting attribute fill value", |ctx| unsafe {
            tiledb_attribute_set_fill_value(
                ctx,
                self.capi(),
                bytes.as_ptr() as *const c_void,
                bytes.len() as u64,
            )
        })
    }

    pub fn set_fill_value_nullable<T: PhysicalType>(
        &mut self,
        value: T,
        valid: bool,
    ) -> Result<()> {
        check_physical_type::<T>(self.datatype()?)?;
        self.set_fill_value_nullable_bytes(&value.to_bytes(), valid)
    }

    pub fn set_fill_value_nullable_bytes(&mut self, bytes: &[u8], valid: bool) -> Result<()> {
        self.check_fill_value_size(bytes)?;
        self.context
            .capi_call("setting nullable attribute fill value", |ctx| unsafe {
                tiledb_attribute_set_fill_value_nullable(
                    ctx,
                    self.capi(),
                    bytes.as_ptr() as *const c_void,
                    bytes.len() as u64,
                    u8::from(valid),
                )
            })
    }

    pub fn fill_value_bytes(&self) -> Result<Vec<u8>> {
        let mut value: *const c_void = std::ptr::null();
        let mut size: u64 = 0;
        self.context.capi_call("getting attribute fill value", |ctx| unsafe {
            tiledb_attribute_get_fill_value(ctx, self.capi(), &mut value, &mut size)
        })?;
        Ok(unsafe { copy_native_bytes(value, size) })
    }

    /// Returns the fill value of a single-valued attribute.
    pub fn fill_value<T>(&self) -> Result<T>
    where
        T: PhysicalType,
        <T as FromBytes>::Bytes: for<'a> TryFrom<&'a [u8]>,
    {
        check_physical_type::<T>(self.datatype()?)?;
        Ok(datatype::single_value::<T>(&self.fill_value_bytes()?)?)
    }

    pub fn fill_values<T>(&self) -> Result<Vec<T>>
    where
        T: PhysicalType,
        <T as FromBytes>::Bytes: for<'a> TryFrom<&'a [u8]>,
    {
        check_physical_type::<T>(self.datatype()?)?;
        Ok(datatype::values_iter::<T>(&self.fill_value_bytes()?)?.collect())
    }

    /// Returns the fill value and its validity.
    pub fn fill_value_nullable_bytes(&self) -> Result<(Vec<u8>, bool)> {
        let mut value: *const c_void = std::ptr::null();
        let mut size: u64 = 0;
        let mut valid: u8 = 0;
        self.context
            .capi_call("getting nullable attribute fill value", |ctx| unsafe {
                tiledb_attribute_get_fill_value_nullable(
                    ctx,
                    self.capi(),
                    &mut value,
                    &mut size,
                    &mut valid,
                )
            })?;
        Ok((unsafe { copy_native_bytes(value, size) }, valid != 0))
    }

    pub fn fill_value_nullable<T>(&self) -> Result<(T, bool)>
    where
        T: PhysicalType,
        <T as FromBytes>::Bytes: for<'a> TryFrom<&'a [u8]>,
    {
        check_physical_type::<T>(self.datatype()?)?;
        let (bytes, valid) = self.fill_value_nullable_bytes()?;
        Ok((datatype::single_value::<T>(&bytes)?, valid))
    }
}

/// Copies `size` bytes owned by a native handle.
///
/// # Safety
///
/// `ptr` must be NULL or valid for reads of `size` bytes.
pub(crate) unsafe fn copy_native_bytes(ptr: *const c_void, size: u64) -> Vec<u8> {
    if ptr.is_null() || size == 0 {
        return vec![];
    }
    unsafe { std::slice::from_raw_parts(ptr as *const u8, size as usize) }.to_vec()
}

impl_dump!(Attribute, tiledb_attribute_dump_str, "dumping attribute");
