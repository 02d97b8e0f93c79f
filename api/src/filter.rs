use std::ffi::c_void;

use tiledb_common::filter::{FilterOption, FilterOptionValue, FilterType};
use tiledb_sys::*;

use crate::context::Context;
use crate::error::Result;
use crate::handle::{RawFilter, RawFilterList};

/// A transformation applied to the tiles of a field as they are written.
pub struct Filter {
    context: Context,
    raw: RawFilter,
}

impl Filter {
    pub fn new(context: &Context, filter_type: FilterType) -> Result<Self> {
        let ffi = context.alloc_handle(
            &format!("allocating {filter_type} filter"),
            |ctx, f| unsafe {
                tiledb_filter_alloc(ctx, filter_type.into(), f)
            },
        )?;
        Ok(Filter {
            context: context.clone(),
            raw: RawFilter::owned(ffi),
        })
    }

    /// Returns a filter of `filter_type` with each of `options` set.
    pub fn with_options<I>(context: &Context, filter_type: FilterType, options: I) -> Result<Self>
    where
        I: IntoIterator<Item = FilterOptionValue>,
    {
        let mut filter = Self::new(context, filter_type)?;
        for value in options {
            filter.set_option(value)?;
        }
        Ok(filter)
    }

    pub(crate) fn capi(&self) -> *mut tiledb_filter_t {
        self.raw.capi()
    }

    pub fn filter_type(&self) -> Result<FilterType> {
        let mut c_type = 0;
        self.context.capi_call("getting filter type", |ctx| unsafe {
            tiledb_filter_get_type(ctx, self.capi(), &mut c_type)
        })?;
        Ok(FilterType::try_from(c_type)?)
    }

    /// Sets an option of this filter.
    ///
    /// The value is checked against the filter type before it is passed to
    /// the library, which reads exactly as many bytes as the option requires.
    pub fn set_option(&mut self, value: FilterOptionValue) -> Result<()> {
        value.validate(self.filter_type()?)?;
        let bytes = value.to_bytes();
        let option = value.option();
        self.context
            .capi_call(&format!("setting filter option {option}"), |ctx| unsafe {
                tiledb_filter_set_option(
                    ctx,
                    self.capi(),
                    option.into(),
                    bytes.as_ptr() as *const c_void,
                )
            })
    }

    pub fn get_option(&self, option: FilterOption) -> Result<FilterOptionValue> {
        let filter_type = self.filter_type()?;
        if !filter_type.accepts(option) {
            return Err(
                tiledb_common::filter::FilterOptionError::NotAccepted(filter_type, option).into(),
            );
        }
        let mut bytes = vec![0u8; option.value_size()];
        self.context
            .capi_call(&format!("getting filter option {option}"), |ctx| unsafe {
                tiledb_filter_get_option(
                    ctx,
                    self.capi(),
                    option.into(),
                    bytes.as_mut_ptr() as *mut c_void,
                )
            })?;
        Ok(FilterOptionValue::from_bytes(option, &bytes)?)
    }
}

/// An ordered pipeline of [Filter]s.
pub struct FilterList {
    context: Context,
    raw: RawFilterList,
}

impl FilterList {
    pub fn new(context: &Context) -> Result<Self> {
        let ffi = context.alloc_handle("allocating filter list", |ctx, fl| unsafe {
            tiledb_filter_list_alloc(ctx, fl)
        })?;
        Ok(Self::from_raw(context, RawFilterList::owned(ffi)))
    }

    /// Returns a list holding a default filter of each of `filter_types`.
    pub fn from_types<I>(context: &Context, filter_types: I) -> Result<Self>
    where
        I: IntoIterator<Item = FilterType>,
    {
        let mut list = Self::new(context)?;
        for filter_type in filter_types {
            list.add_filter(&Filter::new(context, filter_type)?)?;
        }
        Ok(list)
    }

    pub(crate) fn from_raw(context: &Context, raw: RawFilterList) -> Self {
        FilterList {
            context: context.clone(),
            raw,
        }
    }

    pub(crate) fn capi(&self) -> *mut tiledb_filter_list_t {
        self.raw.capi()
    }

    /// Appends a copy of `filter` to the end of the pipeline.
    pub fn add_filter(&mut self, filter: &Filter) -> Result<()> {
        self.context.capi_call("adding filter to filter list", |ctx| unsafe {
            tiledb_filter_list_add_filter(ctx, self.capi(), filter.capi())
        })
    }

    pub fn set_max_chunk_size(&mut self, max_chunk_size: u32) -> Result<()> {
        self.context
            .capi_call("setting filter list max chunk size", |ctx| unsafe {
                tiledb_filter_list_set_max_chunk_size(ctx, self.capi(), max_chunk_size)
            })
    }

    pub fn max_chunk_size(&self) -> Result<u32> {
        let mut size = 0;
        self.context
            .capi_call("getting filter list max chunk size", |ctx| unsafe {
                tiledb_filter_list_get_max_chunk_size(ctx, self.capi(), &mut size)
            })?;
        Ok(size)
    }

    pub fn num_filters(&self) -> Result<u32> {
        let mut n = 0;
        self.context
            .capi_call("getting number of filters", |ctx| unsafe {
                tiledb_filter_list_get_nfilters(ctx, self.capi(), &mut n)
            })?;
        Ok(n)
    }

    pub fn filter_from_index(&self, index: u32) -> Result<Filter> {
        let ffi = self
            .context
            .alloc_handle(&format!("getting filter {index}"), |ctx, f| unsafe {
                tiledb_filter_list_get_filter_from_index(ctx, self.capi(), index, f)
            })?;
        Ok(Filter {
            context: self.context.clone(),
            raw: RawFilter::owned(ffi),
        })
    }

    pub fn filters(&self) -> Result<Vec<Filter>> {
        (0..self.num_filters()?)
            .map(|i| self.filter_from_index(i))
            .collect()
    }
}
