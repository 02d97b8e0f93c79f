use tiledb_common::datatype::Datatype;
use tiledb_sys::*;

use crate::context::Context;
use crate::dimension::Dimension;
use crate::error::Result;
use crate::handle::{RawDimension, RawDomain};
use crate::string::cstring;

/// The dimensions which together index the cells of an array.
pub struct Domain {
    context: Context,
    raw: RawDomain,
}

impl Domain {
    pub fn new(context: &Context) -> Result<Self> {
        let ffi = context.alloc_handle("allocating domain", |ctx, domain| unsafe {
            tiledb_domain_alloc(ctx, domain)
        })?;
        Ok(Self::from_raw(context, RawDomain::owned(ffi)))
    }

    /// Returns a domain of each of `dimensions`, in order.
    pub fn with_dimensions<'d, I>(context: &Context, dimensions: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'d Dimension>,
    {
        let mut domain = Self::new(context)?;
        domain.add_dimensions(dimensions)?;
        Ok(domain)
    }

    pub(crate) fn from_raw(context: &Context, raw: RawDomain) -> Self {
        Domain {
            context: context.clone(),
            raw,
        }
    }

    pub(crate) fn capi(&self) -> *mut tiledb_domain_t {
        self.raw.capi()
    }

    /// Returns the datatype shared by every dimension.
    /// This is an error if the dimensions have different datatypes.
    pub fn datatype(&self) -> Result<Datatype> {
        let mut c_type = 0;
        self.context.capi_call("getting domain type", |ctx| unsafe {
            tiledb_domain_get_type(ctx, self.capi(), &mut c_type)
        })?;
        Ok(Datatype::try_from(c_type)?)
    }

    pub fn num_dimensions(&self) -> Result<u32> {
        let mut ndim = 0;
        self.context
            .capi_call("getting number of dimensions", |ctx| unsafe {
                tiledb_domain_get_ndim(ctx, self.capi(), &mut ndim)
            })?;
        Ok(ndim)
    }

    pub fn add_dimension(&mut self, dimension: &Dimension) -> Result<()> {
        self.context.capi_call("adding dimension to domain", |ctx| unsafe {
            tiledb_domain_add_dimension(ctx, self.capi(), dimension.capi())
        })
    }

    pub fn add_dimensions<'d, I>(&mut self, dimensions: I) -> Result<()>
    where
        I: IntoIterator<Item = &'d Dimension>,
    {
        dimensions
            .into_iter()
            .try_for_each(|d| self.add_dimension(d))
    }

    pub fn dimension_from_index(&self, index: u32) -> Result<Dimension> {
        let ffi = self
            .context
            .alloc_handle(&format!("getting dimension {index}"), |ctx, dim| unsafe {
                tiledb_domain_get_dimension_from_index(ctx, self.capi(), index, dim)
            })?;
        Ok(Dimension::from_raw(&self.context, RawDimension::owned(ffi)))
    }

    pub fn dimension_from_name(&self, name: &str) -> Result<Dimension> {
        let c_name = cstring(name)?;
        let ffi = self
            .context
            .alloc_handle(&format!("getting dimension '{name}'"), |ctx, dim| unsafe {
                tiledb_domain_get_dimension_from_name(ctx, self.capi(), c_name.as_ptr(), dim)
            })?;
        Ok(Dimension::from_raw(&self.context, RawDimension::owned(ffi)))
    }

    pub fn has_dimension(&self, name: &str) -> Result<bool> {
        let c_name = cstring(name)?;
        let mut has: i32 = 0;
        self.context
            .capi_call(&format!("checking for dimension '{name}'"), |ctx| unsafe {
                tiledb_domain_has_dimension(ctx, self.capi(), c_name.as_ptr(), &mut has)
            })?;
        Ok(has != 0)
    }

    pub fn dimensions(&self) -> Result<Vec<Dimension>> {
        (0..self.num_dimensions()?)
            .map(|i| self.dimension_from_index(i))
            .collect()
    }
}

impl_dump!(Domain, tiledb_domain_dump_str, "dumping domain");
