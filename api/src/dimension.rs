use std::ffi::{c_char, c_void};

use num_traits::FromBytes;
use tiledb_common::InvalidDiscriminant;
use tiledb_common::cell_val_num::CellValNum;
use tiledb_common::datatype::{self, Datatype, PhysicalType};
use tiledb_sys::*;

use crate::attribute::copy_native_bytes;
use crate::check_physical_type;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::filter::FilterList;
use crate::handle::{RawDimension, RawFilterList};
use crate::string::{copy_cstr, cstring};

/// An axis of an array domain.
pub struct Dimension {
    context: Context,
    raw: RawDimension,
}

impl Dimension {
    /// Returns a dimension whose coordinates range over `[lo, hi]`.
    ///
    /// `T` must be the physical type of `datatype`.
    pub fn new<T: PhysicalType>(
        context: &Context,
        name: &str,
        datatype: Datatype,
        domain: [T; 2],
        tile_extent: Option<T>,
    ) -> Result<Self> {
        check_physical_type::<T>(datatype)?;
        if !datatype.is_allowed_dimension_type() || datatype.is_string_type() {
            return Err(Error::InvalidArgument(format!(
                "{datatype} is not a fixed-size dimension type"
            )));
        }
        if domain[0] > domain[1] {
            return Err(Error::InvalidArgument(format!(
                "dimension '{name}' has empty domain [{:?}, {:?}]",
                domain[0], domain[1]
            )));
        }

        let domain_bytes = datatype::to_bytes(&domain);
        let extent_bytes = tile_extent.map(|e| e.to_bytes());
        let extent_ptr = extent_bytes
            .as_ref()
            .map_or(std::ptr::null(), |e| e.as_ptr() as *const c_void);

        Self::alloc(
            context,
            name,
            datatype,
            domain_bytes.as_ptr() as *const c_void,
            extent_ptr,
        )
    }

    /// Returns a var-sized string dimension, which has neither a domain
    /// nor a tile extent.
    pub fn new_string(context: &Context, name: &str, datatype: Datatype) -> Result<Self> {
        if datatype != Datatype::StringAscii {
            return Err(Error::InvalidArgument(format!(
                "{datatype} is not a string dimension type"
            )));
        }
        Self::alloc(
            context,
            name,
            datatype,
            std::ptr::null(),
            std::ptr::null(),
        )
    }

    fn alloc(
        context: &Context,
        name: &str,
        datatype: Datatype,
        domain: *const c_void,
        tile_extent: *const c_void,
    ) -> Result<Self> {
        let c_name = cstring(name)?;
        let ffi = context.alloc_handle(
            &format!("allocating dimension '{name}'"),
            |ctx, dim| unsafe {
                tiledb_dimension_alloc(
                    ctx,
                    c_name.as_ptr(),
                    datatype.into(),
                    domain,
                    tile_extent,
                    dim,
                )
            },
        )?;
        Ok(Self::from_raw(context, RawDimension::owned(ffi)))
    }

    pub(crate) fn from_raw(context: &Context, raw: RawDimension) -> Self {
        Dimension {
            context: context.clone(),
            raw,
        }
    }

    pub(crate) fn capi(&self) -> *mut tiledb_dimension_t {
        self.raw.capi()
    }

    pub fn name(&self) -> Result<String> {
        let mut name: *const c_char = std::ptr::null();
        self.context.capi_call("getting dimension name", |ctx| unsafe {
            tiledb_dimension_get_name(ctx, self.capi(), &mut name)
        })?;
        unsafe { copy_cstr(name) }
    }

    pub fn datatype(&self) -> Result<Datatype> {
        let mut c_type = 0;
        self.context.capi_call("getting dimension type", |ctx| unsafe {
            tiledb_dimension_get_type(ctx, self.capi(), &mut c_type)
        })?;
        Ok(Datatype::try_from(c_type)?)
    }

    pub fn set_cell_val_num(&mut self, cell_val_num: CellValNum) -> Result<()> {
        self.context
            .capi_call("setting dimension cell value number", |ctx| unsafe {
                tiledb_dimension_set_cell_val_num(ctx, self.capi(), cell_val_num.into())
            })
    }

    pub fn cell_val_num(&self) -> Result<CellValNum> {
        let mut c_num = 0;
        self.context
            .capi_call("getting dimension cell value number", |ctx| unsafe {
                tiledb_dimension_get_cell_val_num(ctx, self.capi(), &mut c_num)
            })?;
        CellValNum::from_raw(c_num)
            .ok_or_else(|| InvalidDiscriminant::new("CellValNum", c_num).into())
    }

    /// Returns the bounds of the dimension, or `None` for string dimensions.
    pub fn domain<T>(&self) -> Result<Option<[T; 2]>>
    where
        T: PhysicalType,
        <T as FromBytes>::Bytes: for<'a> TryFrom<&'a [u8]>,
    {
        check_physical_type::<T>(self.datatype()?)?;
        let mut ptr: *const c_void = std::ptr::null();
        self.context.capi_call("getting dimension domain", |ctx| unsafe {
            tiledb_dimension_get_domain(ctx, self.capi(), &mut ptr)
        })?;
        if ptr.is_null() {
            return Ok(None);
        }
        let bytes = unsafe { copy_native_bytes(ptr, 2 * size_of::<T>() as u64) };
        let mut values = datatype::values_iter::<T>(&bytes)?;
        match (values.next(), values.next()) {
            (Some(lo), Some(hi)) => Ok(Some([lo, hi])),
            _ => Ok(None),
        }
    }

    /// Returns the tile extent, or `None` if the dimension has none.
    pub fn tile_extent<T>(&self) -> Result<Option<T>>
    where
        T: PhysicalType,
        <T as FromBytes>::Bytes: for<'a> TryFrom<&'a [u8]>,
    {
        check_physical_type::<T>(self.datatype()?)?;
        let mut ptr: *const c_void = std::ptr::null();
        self.context
            .capi_call("getting dimension tile extent", |ctx| unsafe {
                tiledb_dimension_get_tile_extent(ctx, self.capi(), &mut ptr)
            })?;
        if ptr.is_null() {
            return Ok(None);
        }
        let bytes = unsafe { copy_native_bytes(ptr, size_of::<T>() as u64) };
        Ok(Some(datatype::single_value::<T>(&bytes)?))
    }

    pub fn set_filter_list(&mut self, filter_list: &FilterList) -> Result<()> {
        self.context
            .capi_call("setting dimension filter list", |ctx| unsafe {
                tiledb_dimension_set_filter_list(ctx, self.capi(), filter_list.capi())
            })
    }

    pub fn filter_list(&self) -> Result<FilterList> {
        let ffi = self
            .context
            .alloc_handle("getting dimension filter list", |ctx, fl| unsafe {
                tiledb_dimension_get_filter_list(ctx, self.capi(), fl)
            })?;
        Ok(FilterList::from_raw(&self.context, RawFilterList::owned(ffi)))
    }
}

impl_dump!(Dimension, tiledb_dimension_dump_str, "dumping dimension");
