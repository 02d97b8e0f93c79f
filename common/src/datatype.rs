//! The TileDB `tiledb_datatype_t` enumeration and the mapping from
//! each datatype onto the Rust scalar which physically represents it.

use std::fmt::Debug;

use num_traits::{FromBytes, ToBytes};

c_enum! {
    /// Logical type of the values of an attribute or dimension.
    pub enum Datatype {
        Int32 = 0 => "INT32",
        Int64 = 1 => "INT64",
        Float32 = 2 => "FLOAT32",
        Float64 = 3 => "FLOAT64",
        Char = 4 => "CHAR",
        Int8 = 5 => "INT8",
        UInt8 = 6 => "UINT8",
        Int16 = 7 => "INT16",
        UInt16 = 8 => "UINT16",
        UInt32 = 9 => "UINT32",
        UInt64 = 10 => "UINT64",
        StringAscii = 11 => "STRING_ASCII",
        StringUtf8 = 12 => "STRING_UTF8",
        StringUtf16 = 13 => "STRING_UTF16",
        StringUtf32 = 14 => "STRING_UTF32",
        StringUcs2 = 15 => "STRING_UCS2",
        StringUcs4 = 16 => "STRING_UCS4",
        Any = 17 => "ANY",
        DateTimeYear = 18 => "DATETIME_YEAR",
        DateTimeMonth = 19 => "DATETIME_MONTH",
        DateTimeWeek = 20 => "DATETIME_WEEK",
        DateTimeDay = 21 => "DATETIME_DAY",
        DateTimeHour = 22 => "DATETIME_HR",
        DateTimeMinute = 23 => "DATETIME_MIN",
        DateTimeSecond = 24 => "DATETIME_SEC",
        DateTimeMillisecond = 25 => "DATETIME_MS",
        DateTimeMicrosecond = 26 => "DATETIME_US",
        DateTimeNanosecond = 27 => "DATETIME_NS",
        DateTimePicosecond = 28 => "DATETIME_PS",
        DateTimeFemtosecond = 29 => "DATETIME_FS",
        DateTimeAttosecond = 30 => "DATETIME_AS",
        TimeHour = 31 => "TIME_HR",
        TimeMinute = 32 => "TIME_MIN",
        TimeSecond = 33 => "TIME_SEC",
        TimeMillisecond = 34 => "TIME_MS",
        TimeMicrosecond = 35 => "TIME_US",
        TimeNanosecond = 36 => "TIME_NS",
        TimePicosecond = 37 => "TIME_PS",
        TimeFemtosecond = 38 => "TIME_FS",
        TimeAttosecond = 39 => "TIME_AS",
        Blob = 40 => "BLOB",
        Boolean = 41 => "BOOL",
        GeometryWkb = 42 => "GEOM_WKB",
        GeometryWkt = 43 => "GEOM_WKT",
    }
}

impl Datatype {
    /// Returns the size in bytes of a single value of this type.
    pub const fn size(&self) -> u64 {
        match self {
            Datatype::Int8
            | Datatype::UInt8
            | Datatype::Char
            | Datatype::StringAscii
            | Datatype::StringUtf8
            | Datatype::Any
            | Datatype::Blob
            | Datatype::Boolean
            | Datatype::GeometryWkb
            | Datatype::GeometryWkt => 1,
            Datatype::Int16
            | Datatype::UInt16
            | Datatype::StringUtf16
            | Datatype::StringUcs2 => 2,
            Datatype::Int32
            | Datatype::UInt32
            | Datatype::Float32
            | Datatype::StringUtf32
            | Datatype::StringUcs4 => 4,
            // 64-bit numbers, datetimes and times
            _ => 8,
        }
    }

    pub const fn is_integral_type(&self) -> bool {
        matches!(
            self,
            Datatype::Int8
                | Datatype::Int16
                | Datatype::Int32
                | Datatype::Int64
                | Datatype::UInt8
                | Datatype::UInt16
                | Datatype::UInt32
                | Datatype::UInt64
                | Datatype::Boolean
        )
    }

    pub const fn is_real_type(&self) -> bool {
        matches!(self, Datatype::Float32 | Datatype::Float64)
    }

    pub const fn is_string_type(&self) -> bool {
        matches!(
            self,
            Datatype::StringAscii
                | Datatype::StringUtf8
                | Datatype::StringUtf16
                | Datatype::StringUtf32
                | Datatype::StringUcs2
                | Datatype::StringUcs4
        )
    }

    pub const fn is_datetime_type(&self) -> bool {
        matches!(
            self,
            Datatype::DateTimeYear
                | Datatype::DateTimeMonth
                | Datatype::DateTimeWeek
                | Datatype::DateTimeDay
                | Datatype::DateTimeHour
                | Datatype::DateTimeMinute
                | Datatype::DateTimeSecond
                | Datatype::DateTimeMillisecond
                | Datatype::DateTimeMicrosecond
                | Datatype::DateTimeNanosecond
                | Datatype::DateTimePicosecond
                | Datatype::DateTimeFemtosecond
                | Datatype::DateTimeAttosecond
        )
    }

    pub const fn is_time_type(&self) -> bool {
        matches!(
            self,
            Datatype::TimeHour
                | Datatype::TimeMinute
                | Datatype::TimeSecond
                | Datatype::TimeMillisecond
                | Datatype::TimeMicrosecond
                | Datatype::TimeNanosecond
                | Datatype::TimePicosecond
                | Datatype::TimeFemtosecond
                | Datatype::TimeAttosecond
        )
    }

    /// Returns whether values of this type are opaque bytes.
    pub const fn is_byte_type(&self) -> bool {
        matches!(
            self,
            Datatype::Blob | Datatype::GeometryWkb | Datatype::GeometryWkt
        )
    }

    /// Returns whether this type may be used for a dimension.
    pub const fn is_allowed_dimension_type(&self) -> bool {
        (self.is_integral_type() && !matches!(self, Datatype::Boolean))
            || self.is_real_type()
            || self.is_datetime_type()
            || self.is_time_type()
            || matches!(self, Datatype::StringAscii)
    }

    /// Returns whether values of this datatype can be represented by `T`.
    pub fn is_compatible_type<T: PhysicalType>(&self) -> bool {
        T::is_compatible(*self)
    }
}

/// A Rust scalar type which is the physical representation of
/// one or more [Datatype]s.
pub trait PhysicalType:
    Copy + Debug + PartialEq + PartialOrd + Send + Sync + ToBytes + FromBytes + 'static
{
    /// The datatype which is the canonical logical type for `Self`.
    const DATATYPE: Datatype;

    /// Returns whether values of `datatype` are physically represented by `Self`.
    fn is_compatible(datatype: Datatype) -> bool;

    /// Returns the native-endian byte representation of `self`.
    fn to_bytes(&self) -> Vec<u8> {
        ToBytes::to_ne_bytes(self).as_ref().to_vec()
    }
}

macro_rules! physical_type_impl {
    ($ty:ty, $canonical:expr, $($compatible:pat_param)|+) => {
        impl PhysicalType for $ty {
            const DATATYPE: Datatype = $canonical;

            fn is_compatible(datatype: Datatype) -> bool {
                matches!(datatype, $($compatible)|+)
            }
        }
    };
}

physical_type_impl!(i8, Datatype::Int8, Datatype::Int8 | Datatype::Char);
physical_type_impl!(i16, Datatype::Int16, Datatype::Int16);
physical_type_impl!(i32, Datatype::Int32, Datatype::Int32);
physical_type_impl!(f32, Datatype::Float32, Datatype::Float32);
physical_type_impl!(f64, Datatype::Float64, Datatype::Float64);
physical_type_impl!(u64, Datatype::UInt64, Datatype::UInt64);
physical_type_impl!(
    u8,
    Datatype::UInt8,
    Datatype::UInt8
        | Datatype::StringAscii
        | Datatype::StringUtf8
        | Datatype::Any
        | Datatype::Blob
        | Datatype::Boolean
        | Datatype::GeometryWkb
        | Datatype::GeometryWkt
);
physical_type_impl!(
    u16,
    Datatype::UInt16,
    Datatype::UInt16 | Datatype::StringUtf16 | Datatype::StringUcs2
);
physical_type_impl!(
    u32,
    Datatype::UInt32,
    Datatype::UInt32 | Datatype::StringUtf32 | Datatype::StringUcs4
);

impl PhysicalType for i64 {
    const DATATYPE: Datatype = Datatype::Int64;

    fn is_compatible(datatype: Datatype) -> bool {
        matches!(datatype, Datatype::Int64)
            || datatype.is_datetime_type()
            || datatype.is_time_type()
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Buffer of {0} bytes is not a multiple of the value size {1}")]
    SizeMismatch(usize, usize),
    #[error("Expected exactly one value, found {0}")]
    NotScalar(usize),
}

/// Returns an iterator over the values of type `T` packed into `bytes`
/// in native byte order.
pub fn values_iter<T>(bytes: &[u8]) -> Result<impl Iterator<Item = T> + '_, DecodeError>
where
    T: PhysicalType,
    <T as FromBytes>::Bytes: for<'a> TryFrom<&'a [u8]>,
{
    let value_size = std::mem::size_of::<T>();
    if bytes.len() % value_size != 0 {
        return Err(DecodeError::SizeMismatch(bytes.len(), value_size));
    }

    type B<T> = <T as FromBytes>::Bytes;

    Ok(bytes.chunks(value_size).map(|slice| {
        let Ok(array) = B::<T>::try_from(slice) else {
            // `chunks` yields slices of exactly `size_of::<T>()` bytes,
            // which is the length of `T::Bytes`
            unreachable!("Logic error: chunk length does not match FromBytes length")
        };
        T::from_ne_bytes(&array)
    }))
}

/// Decodes exactly one value of type `T` from `bytes`.
pub fn single_value<T>(bytes: &[u8]) -> Result<T, DecodeError>
where
    T: PhysicalType,
    <T as FromBytes>::Bytes: for<'a> TryFrom<&'a [u8]>,
{
    let mut values = values_iter::<T>(bytes)?;
    match (values.next(), values.next()) {
        (Some(v), None) => Ok(v),
        (None, _) => Err(DecodeError::NotScalar(0)),
        (Some(_), Some(_)) => Err(DecodeError::NotScalar(bytes.len() / std::mem::size_of::<T>())),
    }
}

/// Packs `values` back to back in native byte order.
pub fn to_bytes<T: PhysicalType>(values: &[T]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_bytes()).collect()
}

/// Evaluates `$action` with `$typename` aliased to the Rust type which
/// physically represents `$datatype`.
#[macro_export]
macro_rules! physical_type_go {
    ($datatype:expr, $typename:ident, $action:expr) => {{
        use $crate::datatype::Datatype;

        match $datatype {
            Datatype::Int8 | Datatype::Char => {
                type $typename = i8;
                $action
            }
            Datatype::Int16 => {
                type $typename = i16;
                $action
            }
            Datatype::Int32 => {
                type $typename = i32;
                $action
            }
            Datatype::Int64
            | Datatype::DateTimeYear
            | Datatype::DateTimeMonth
            | Datatype::DateTimeWeek
            | Datatype::DateTimeDay
            | Datatype::DateTimeHour
            | Datatype::DateTimeMinute
            | Datatype::DateTimeSecond
            | Datatype::DateTimeMillisecond
            | Datatype::DateTimeMicrosecond
            | Datatype::DateTimeNanosecond
            | Datatype::DateTimePicosecond
            | Datatype::DateTimeFemtosecond
            | Datatype::DateTimeAttosecond
            | Datatype::TimeHour
            | Datatype::TimeMinute
            | Datatype::TimeSecond
            | Datatype::TimeMillisecond
            | Datatype::TimeMicrosecond
            | Datatype::TimeNanosecond
            | Datatype::TimePicosecond
            | Datatype::TimeFemtosecond
            | Datatype::TimeAttosecond => {
                type $typename = i64;
                $action
            }
            Datatype::UInt8
            | Datatype::StringAscii
            | Datatype::StringUtf8
            | Datatype::Any
            | Datatype::Blob
            | Datatype::Boolean
            | Datatype::GeometryWkb
            | Datatype::GeometryWkt => {
                type $typename = u8;
                $action
            }
            Datatype::UInt16 | Datatype::StringUtf16 | Datatype::StringUcs2 => {
                type $typename = u16;
                $action
            }
            Datatype::UInt32 | Datatype::StringUtf32 | Datatype::StringUcs4 => {
                type $typename = u32;
                $action
            }
            Datatype::UInt64 => {
                type $typename = u64;
                $action
            }
            Datatype::Float32 => {
                type $typename = f32;
                $action
            }
            Datatype::Float64 => {
                type $typename = f64;
                $action
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn discriminants() {
        for (i, dt) in Datatype::ALL.iter().enumerate() {
            assert_eq!(i as u32, u32::from(*dt));
            assert_eq!(Ok(*dt), Datatype::try_from(i as u32));
        }
        assert!(Datatype::try_from(Datatype::ALL.len() as u32).is_err());
    }

    #[test]
    fn names() {
        assert_eq!("INT32", Datatype::Int32.to_string());
        assert_eq!("DATETIME_MS", Datatype::DateTimeMillisecond.to_string());
        assert_eq!(Ok(Datatype::GeometryWkt), "GEOM_WKT".parse());
        assert!("int32".parse::<Datatype>().is_err());
    }

    #[test]
    fn physical_size_matches_compatible_type() {
        for dt in Datatype::ALL {
            let physical_size = physical_type_go!(*dt, T, std::mem::size_of::<T>());
            assert_eq!(dt.size(), physical_size as u64, "{dt}");

            let compatible = physical_type_go!(*dt, T, dt.is_compatible_type::<T>());
            assert!(compatible, "{dt}");
        }
    }

    #[test]
    fn canonical_datatype_is_compatible() {
        fn check<T: PhysicalType>() {
            assert!(T::is_compatible(T::DATATYPE));
            assert_eq!(T::DATATYPE.size() as usize, std::mem::size_of::<T>());
        }
        check::<i8>();
        check::<i16>();
        check::<i32>();
        check::<i64>();
        check::<u8>();
        check::<u16>();
        check::<u32>();
        check::<u64>();
        check::<f32>();
        check::<f64>();
    }

    #[test]
    fn incompatible_types() {
        assert!(!i32::is_compatible(Datatype::UInt32));
        assert!(!f64::is_compatible(Datatype::Int64));
        assert!(!u8::is_compatible(Datatype::Int8));
        assert!(i64::is_compatible(Datatype::TimeNanosecond));
    }

    #[test]
    fn decode_size_mismatch() {
        let bytes = [0u8; 7];
        assert_eq!(
            Some(DecodeError::SizeMismatch(7, 4)),
            values_iter::<i32>(&bytes).err()
        );
        assert_eq!(Err(DecodeError::NotScalar(0)), single_value::<u64>(&[]));
        assert_eq!(
            Err(DecodeError::NotScalar(2)),
            single_value::<u16>(&[0, 1, 2, 3])
        );
    }

    proptest! {
        #[test]
        fn decode_packed_values(values in proptest::collection::vec(any::<i64>(), 0..64)) {
            let bytes = to_bytes(&values);
            prop_assert_eq!(bytes.len(), values.len() * 8);
            let decoded = values_iter::<i64>(&bytes).unwrap().collect::<Vec<_>>();
            prop_assert_eq!(values, decoded);
        }

        #[test]
        fn decode_single_value(value in any::<f32>()) {
            let decoded = single_value::<f32>(&value.to_bytes()).unwrap();
            prop_assert_eq!(value.to_bits(), decoded.to_bits());
        }
    }
}
