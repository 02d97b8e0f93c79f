//! Raw declarations of the TileDB C API entry points used by `tiledb-api`.
//!
//! Every function returns a `capi_return_t` unless noted otherwise.
//! Enumerations cross the boundary as their raw `u32` discriminant; the
//! Rust definitions live in `tiledb-common`.
#![allow(non_camel_case_types)]

mod array;
mod attribute;
mod buffer;
mod config;
mod context;
mod dimension;
mod domain;
mod filter;
mod group;
mod object;
mod query;
mod query_condition;
mod schema;
mod types;

pub use array::*;
pub use attribute::*;
pub use buffer::*;
pub use config::*;
pub use context::*;
pub use dimension::*;
pub use domain::*;
pub use filter::*;
pub use group::*;
pub use object::*;
pub use query::*;
pub use query_condition::*;
pub use schema::*;
pub use types::*;
