use std::fmt::{Display, Formatter, Result as FmtResult};
use std::num::NonZeroU32;

/// The native sentinel for a variable number of values per cell.
pub const VAR_NUM: u32 = u32::MAX;

/// Number of values held by each cell of an attribute or dimension.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CellValNum {
    /// Cells of this field each contain exactly one value.
    #[default]
    Single,
    /// Cells of this field each contain a fixed number of values.
    Fixed(NonZeroU32),
    /// Cells of this field each contain a variable number of values.
    Var,
}

impl CellValNum {
    /// Converts the raw value reported by the C API, which is never zero
    /// for a valid field.
    pub fn from_raw(cell_val_num: u32) -> Option<Self> {
        match cell_val_num {
            1 => Some(Self::Single),
            VAR_NUM => Some(Self::Var),
            n => Some(Self::Fixed(NonZeroU32::new(n)?)),
        }
    }

    pub fn is_var_sized(&self) -> bool {
        matches!(self, Self::Var)
    }

    /// Returns the number of values per cell, or `None` for var-sized cells.
    pub fn fixed(&self) -> Option<u32> {
        match self {
            Self::Single => Some(1),
            Self::Fixed(nz) => Some(nz.get()),
            Self::Var => None,
        }
    }
}

impl Display for CellValNum {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            CellValNum::Single => write!(f, "1"),
            CellValNum::Fixed(nz) => write!(f, "{nz}"),
            CellValNum::Var => write!(f, "var"),
        }
    }
}

impl From<CellValNum> for u32 {
    fn from(value: CellValNum) -> Self {
        match value {
            CellValNum::Single => 1,
            CellValNum::Fixed(nz) => nz.get(),
            CellValNum::Var => VAR_NUM,
        }
    }
}

impl TryFrom<u32> for CellValNum {
    type Error = crate::InvalidDiscriminant;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_raw(value).ok_or(crate::InvalidDiscriminant::new("CellValNum", value))
    }
}

/// Returns the starting offset of each var-sized cell given the cell
/// lengths, in bytes.
pub fn var_offsets<I>(lengths: I) -> Vec<u64>
where
    I: IntoIterator<Item = usize>,
{
    lengths
        .into_iter()
        .scan(0u64, |state, len| {
            let offset = *state;
            *state += len as u64;
            Some(offset)
        })
        .collect()
}
