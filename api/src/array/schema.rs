use tiledb_common::array::{ArrayType, Layout};
use tiledb_sys::*;

use crate::attribute::Attribute;
use crate::context::Context;
use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::filter::FilterList;
use crate::handle::{RawArraySchema, RawAttribute, RawDomain, RawFilterList};
use crate::string::cstring;

/// Describes the domain, attributes and layout of an array.
pub struct ArraySchema {
    context: Context,
    raw: RawArraySchema,
}

impl ArraySchema {
    pub fn new(context: &Context, array_type: ArrayType) -> Result<Self> {
        let ffi = context.alloc_handle(
            &format!("allocating {array_type} array schema"),
            |ctx, schema| unsafe {
                tiledb_array_schema_alloc(ctx, array_type.into(), schema)
            },
        )?;
        Ok(Self::from_raw(context, RawArraySchema::owned(ffi)))
    }

    /// Loads the schema of the array at `uri`.
    pub fn load(context: &Context, uri: &str) -> Result<Self> {
        let c_uri = cstring(uri)?;
        let ffi = context.alloc_handle(
            &format!("loading array schema of '{uri}'"),
            |ctx, schema| unsafe {
                tiledb_array_schema_load(ctx, c_uri.as_ptr(), schema)
            },
        )?;
        Ok(Self::from_raw(context, RawArraySchema::owned(ffi)))
    }

    pub(crate) fn from_raw(context: &Context, raw: RawArraySchema) -> Self {
        ArraySchema {
            context: context.clone(),
            raw,
        }
    }

    pub(crate) fn capi(&self) -> *mut tiledb_array_schema_t {
        self.raw.capi()
    }

    /// Validates the schema, returning the library's reason if it is not
    /// usable to create an array.
    pub fn check(&self) -> Result<()> {
        self.context.capi_call("checking array schema", |ctx| unsafe {
            tiledb_array_schema_check(ctx, self.capi())
        })
    }

    pub fn array_type(&self) -> Result<ArrayType> {
        let mut c_type = 0;
        self.context.capi_call("getting array type", |ctx| unsafe {
            tiledb_array_schema_get_array_type(ctx, self.capi(), &mut c_type)
        })?;
        Ok(ArrayType::try_from(c_type)?)
    }

    pub fn add_attribute(&mut self, attribute: &Attribute) -> Result<()> {
        self.context
            .capi_call("adding attribute to array schema", |ctx| unsafe {
                tiledb_array_schema_add_attribute(ctx, self.capi(), attribute.capi())
            })
    }

    pub fn add_attributes<'a, I>(&mut self, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Attribute>,
    {
        attributes
            .into_iter()
            .try_for_each(|a| self.add_attribute(a))
    }

    pub fn num_attributes(&self) -> Result<u32> {
        let mut n = 0;
        self.context
            .capi_call("getting number of attributes", |ctx| unsafe {
                tiledb_array_schema_get_attribute_num(ctx, self.capi(), &mut n)
            })?;
        Ok(n)
    }

    pub fn attribute_from_index(&self, index: u32) -> Result<Attribute> {
        let ffi = self
            .context
            .alloc_handle(&format!("getting attribute {index}"), |ctx, attr| unsafe {
                tiledb_array_schema_get_attribute_from_index(ctx, self.capi(), index, attr)
            })?;
        Ok(Attribute::from_raw(&self.context, RawAttribute::owned(ffi)))
    }

    pub fn attribute_from_name(&self, name: &str) -> Result<Attribute> {
        let c_name = cstring(name)?;
        let ffi = self
            .context
            .alloc_handle(&format!("getting attribute '{name}'"), |ctx, attr| unsafe {
                tiledb_array_schema_get_attribute_from_name(ctx, self.capi(), c_name.as_ptr(), attr)
            })?;
        Ok(Attribute::from_raw(&self.context, RawAttribute::owned(ffi)))
    }

    pub fn has_attribute(&self, name: &str) -> Result<bool> {
        let c_name = cstring(name)?;
        let mut has: i32 = 0;
        self.context
            .capi_call(&format!("checking for attribute '{name}'"), |ctx| unsafe {
                tiledb_array_schema_has_attribute(ctx, self.capi(), c_name.as_ptr(), &mut has)
            })?;
        Ok(has != 0)
    }

    pub fn attributes(&self) -> Result<Vec<Attribute>> {
        (0..self.num_attributes()?)
            .map(|i| self.attribute_from_index(i))
            .collect()
    }

    pub fn set_domain(&mut self, domain: &Domain) -> Result<()> {
        self.context.capi_call("setting array schema domain", |ctx| unsafe {
            tiledb_array_schema_set_domain(ctx, self.capi(), domain.capi())
        })
    }

    pub fn domain(&self) -> Result<Domain> {
        let ffi = self
            .context
            .alloc_handle("getting array schema domain", |ctx, domain| unsafe {
                tiledb_array_schema_get_domain(ctx, self.capi(), domain)
            })?;
        Ok(Domain::from_raw(&self.context, RawDomain::owned(ffi)))
    }

    /// Sets the number of cells in each data tile of a sparse array.
    pub fn set_capacity(&mut self, capacity: u64) -> Result<()> {
        self.context
            .capi_call("setting array schema capacity", |ctx| unsafe {
                tiledb_array_schema_set_capacity(ctx, self.capi(), capacity)
            })
    }

    pub fn capacity(&self) -> Result<u64> {
        let mut capacity = 0;
        self.context
            .capi_call("getting array schema capacity", |ctx| unsafe {
                tiledb_array_schema_get_capacity(ctx, self.capi(), &mut capacity)
            })?;
        Ok(capacity)
    }

    pub fn set_cell_order(&mut self, layout: Layout) -> Result<()> {
        if !layout.is_cell_order() {
            return Err(Error::InvalidArgument(format!(
                "{layout} is not a cell order"
            )));
        }
        self.context
            .capi_call("setting array schema cell order", |ctx| unsafe {
                tiledb_array_schema_set_cell_order(ctx, self.capi(), layout.into())
            })
    }

    pub fn cell_order(&self) -> Result<Layout> {
        let mut c_layout = 0;
        self.context
            .capi_call("getting array schema cell order", |ctx| unsafe {
                tiledb_array_schema_get_cell_order(ctx, self.capi(), &mut c_layout)
            })?;
        Ok(Layout::try_from(c_layout)?)
    }

    pub fn set_tile_order(&mut self, layout: Layout) -> Result<()> {
        if !layout.is_tile_order() {
            return Err(Error::InvalidArgument(format!(
                "{layout} is not a tile order"
            )));
        }
        self.context
            .capi_call("setting array schema tile order", |ctx| unsafe {
                tiledb_array_schema_set_tile_order(ctx, self.capi(), layout.into())
            })
    }

    pub fn tile_order(&self) -> Result<Layout> {
        let mut c_layout = 0;
        self.context
            .capi_call("getting array schema tile order", |ctx| unsafe {
                tiledb_array_schema_get_tile_order(ctx, self.capi(), &mut c_layout)
            })?;
        Ok(Layout::try_from(c_layout)?)
    }

    /// Sets whether a sparse array may hold several cells with the same
    /// coordinates.
    pub fn set_allows_dups(&mut self, allows_dups: bool) -> Result<()> {
        self.context
            .capi_call("setting array schema duplicates", |ctx| unsafe {
                tiledb_array_schema_set_allows_dups(ctx, self.capi(), i32::from(allows_dups))
            })
    }

    pub fn allows_dups(&self) -> Result<bool> {
        let mut allows_dups = 0;
        self.context
            .capi_call("getting array schema duplicates", |ctx| unsafe {
                tiledb_array_schema_get_allows_dups(ctx, self.capi(), &mut allows_dups)
            })?;
        Ok(allows_dups != 0)
    }

    /// Returns the timestamps between which this schema version is valid.
    pub fn timestamp_range(&self) -> Result<(u64, u64)> {
        let (mut lo, mut hi) = (0, 0);
        self.context
            .capi_call("getting array schema timestamp range", |ctx| unsafe {
                tiledb_array_schema_timestamp_range(ctx, self.capi(), &mut lo, &mut hi)
            })?;
        Ok((lo, hi))
    }

    /// Returns the format version of the schema.
    pub fn version(&self) -> Result<u32> {
        let mut version = 0;
        self.context
            .capi_call("getting array schema version", |ctx| unsafe {
                tiledb_array_schema_get_version(ctx, self.capi(), &mut version)
            })?;
        Ok(version)
    }
}

/// Setter and getter for one of the schema-wide filter lists.
macro_rules! schema_filter_list {
    ($set:ident, $get:ident, $c_set:ident, $c_get:ident, $what:literal) => {
        impl ArraySchema {
            #[doc = concat!("Sets the filters applied to ", $what, ".")]
            pub fn $set(&mut self, filter_list: &FilterList) -> Result<()> {
                self.context
                    .capi_call(concat!("setting ", $what, " filter list"), |ctx| unsafe {
                        $c_set(ctx, self.capi(), filter_list.capi())
                    })
            }

            pub fn $get(&self) -> Result<FilterList> {
                let ffi = self
                    .context
                    .alloc_handle(concat!("getting ", $what, " filter list"), |ctx, fl| unsafe {
                        $c_get(ctx, self.capi(), fl)
                    })?;
                Ok(FilterList::from_raw(&self.context, RawFilterList::owned(ffi)))
            }
        }
    };
}

schema_filter_list!(
    set_coords_filter_list,
    coords_filter_list,
    tiledb_array_schema_set_coords_filter_list,
    tiledb_array_schema_get_coords_filter_list,
    "coordinates"
);
schema_filter_list!(
    set_offsets_filter_list,
    offsets_filter_list,
    tiledb_array_schema_set_offsets_filter_list,
    tiledb_array_schema_get_offsets_filter_list,
    "var-sized offsets"
);
schema_filter_list!(
    set_validity_filter_list,
    validity_filter_list,
    tiledb_array_schema_set_validity_filter_list,
    tiledb_array_schema_get_validity_filter_list,
    "validity"
);

impl_dump!(ArraySchema, tiledb_array_schema_dump_str, "dumping array schema");
