//! Safe bindings to the TileDB C API.
//!
//! Each native handle is owned by exactly one Rust value, which releases it
//! when dropped. Every value holds a clone of the [Context] which created
//! it. Failed native calls become an [Error] whose message comes from the
//! context's last error.
//!
//! Definitions which do not require the native library, such as
//! [Datatype] and the query condition expression tree, are re-exported
//! from `tiledb-common`.

#[macro_use]
mod dump;

pub mod array;
pub mod attribute;
pub mod buffer;
pub mod config;
pub mod context;
pub mod dimension;
pub mod domain;
pub mod error;
pub mod filter;
mod handle;
pub mod object;
pub mod query;
mod string;

pub use array::{Array, ArraySchema, ArraySchemaEvolution};
pub use attribute::Attribute;
pub use buffer::{Buffer, BufferList};
pub use config::{Config, ConfigIter};
pub use context::{Context, version};
pub use dimension::Dimension;
pub use domain::Domain;
pub use dump::{Dump, DumpDisplay};
pub use error::{Error, Result};
pub use filter::{Filter, FilterList};
pub use query::{Query, QueryCondition, Subarray};

pub use tiledb_common::array::{ArrayType, Layout, QueryStatus, QueryType};
pub use tiledb_common::filesystem::Filesystem;
pub use tiledb_common::filter::{FilterOption, FilterOptionValue, FilterType};
pub use tiledb_common::object::{ObjectEntry, ObjectList, ObjectType, WalkOrder};
pub use tiledb_common::query::condition::{CombinationOp, QueryConditionExpr, QueryConditionOp};
pub use tiledb_common::{CellValNum, Datatype, PhysicalType};

/// Checks that `T` is the physical representation of `datatype`.
pub(crate) fn check_physical_type<T: PhysicalType>(datatype: Datatype) -> Result<()> {
    if T::is_compatible(datatype) {
        Ok(())
    } else {
        Err(Error::DatatypeMismatch {
            datatype,
            physical_type: std::any::type_name::<T>(),
        })
    }
}
