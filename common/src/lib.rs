//! Definitions shared by the TileDB bindings which do not require
//! the native library.
//!
//! Everything in this crate mirrors a type or constant of the TileDB C API
//! in plain Rust: enumerations carry their C discriminants, and the
//! helpers here decide sizes and encodings before any native call is made.

#[macro_use]
mod macros;

pub mod array;
pub mod cell_val_num;
pub mod datatype;
pub mod filesystem;
pub mod filter;
pub mod object;
pub mod query;
pub mod rc;

pub use cell_val_num::CellValNum;
pub use datatype::{Datatype, PhysicalType};

/// Error converting a raw C enumeration value into its Rust representation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Invalid discriminant for {type_name}: {value}")]
pub struct InvalidDiscriminant {
    pub type_name: &'static str,
    pub value: u64,
}

impl InvalidDiscriminant {
    pub fn new(type_name: &'static str, value: impl Into<u64>) -> Self {
        Self {
            type_name,
            value: value.into(),
        }
    }
}

/// Error parsing an enumeration from its canonical name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {type_name} name: '{input}'")]
pub struct ParseEnumError {
    pub type_name: &'static str,
    pub input: String,
}

#[cfg(any(test, feature = "proptest-strategies"))]
pub mod strategy;
