//! Filter kinds, their options, and the typed values those options take.
//!
//! Each [FilterOption] is read and written by the C API through an untyped
//! pointer whose pointee has exactly one width. [FilterOptionValue] pairs
//! the option with a value of that width so that a mismatch cannot reach
//! the native library.

use crate::datatype::Datatype;
use crate::InvalidDiscriminant;

c_enum! {
    pub enum FilterType {
        None = 0 => "NONE",
        Gzip = 1 => "GZIP",
        Zstd = 2 => "ZSTD",
        Lz4 = 3 => "LZ4",
        Rle = 4 => "RLE",
        Bzip2 = 5 => "BZIP2",
        DoubleDelta = 6 => "DOUBLE_DELTA",
        BitWidthReduction = 7 => "BIT_WIDTH_REDUCTION",
        BitShuffle = 8 => "BITSHUFFLE",
        ByteShuffle = 9 => "BYTESHUFFLE",
        PositiveDelta = 10 => "POSITIVE_DELTA",
        ChecksumMd5 = 12 => "CHECKSUM_MD5",
        ChecksumSha256 = 13 => "CHECKSUM_SHA256",
        Dictionary = 14 => "DICTIONARY_ENCODING",
        ScaleFloat = 15 => "SCALE_FLOAT",
        Xor = 16 => "XOR",
        WebP = 18 => "WEBP",
        Delta = 19 => "DELTA",
    }
}

c_enum! {
    pub enum FilterOption {
        CompressionLevel = 0 => "COMPRESSION_LEVEL",
        BitWidthMaxWindow = 1 => "BIT_WIDTH_MAX_WINDOW",
        PositiveDeltaMaxWindow = 2 => "POSITIVE_DELTA_MAX_WINDOW",
        ScaleFloatByteWidth = 3 => "SCALE_FLOAT_BYTEWIDTH",
        ScaleFloatFactor = 4 => "SCALE_FLOAT_FACTOR",
        ScaleFloatOffset = 5 => "SCALE_FLOAT_OFFSET",
        WebPQuality = 6 => "WEBP_QUALITY",
        WebPInputFormat = 7 => "WEBP_INPUT_FORMAT",
        WebPLossless = 8 => "WEBP_LOSSLESS",
        CompressionReinterpretDatatype = 9 => "COMPRESSION_REINTERPRET_DATATYPE",
    }
}

c_enum! {
    /// Pixel layout of data given to the WebP filter.
    pub enum WebPFilterInputFormat {
        None = 0 => "NONE",
        Rgb = 1 => "RGB",
        Bgr = 2 => "BGR",
        Rgba = 3 => "RGBA",
        Bgra = 4 => "BGRA",
    }
}

impl FilterType {
    /// Returns whether a filter of this type can be configured with `option`.
    pub fn accepts(&self, option: FilterOption) -> bool {
        use FilterOption as O;
        match option {
            O::CompressionLevel | O::CompressionReinterpretDatatype => matches!(
                self,
                FilterType::Gzip
                    | FilterType::Zstd
                    | FilterType::Lz4
                    | FilterType::Rle
                    | FilterType::Bzip2
                    | FilterType::DoubleDelta
                    | FilterType::Dictionary
                    | FilterType::Delta
            ),
            O::BitWidthMaxWindow => matches!(self, FilterType::BitWidthReduction),
            O::PositiveDeltaMaxWindow => matches!(self, FilterType::PositiveDelta),
            O::ScaleFloatByteWidth | O::ScaleFloatFactor | O::ScaleFloatOffset => {
                matches!(self, FilterType::ScaleFloat)
            }
            O::WebPQuality | O::WebPInputFormat | O::WebPLossless => {
                matches!(self, FilterType::WebP)
            }
        }
    }

    /// Returns the options which a filter of this type accepts.
    pub fn options(&self) -> impl Iterator<Item = FilterOption> + '_ {
        FilterOption::ALL.iter().copied().filter(|o| self.accepts(*o))
    }
}

impl FilterOption {
    /// Returns the width of the value which the C API reads or writes
    /// for this option.
    pub const fn value_size(&self) -> usize {
        match self {
            FilterOption::CompressionLevel => size_of::<i32>(),
            FilterOption::BitWidthMaxWindow | FilterOption::PositiveDeltaMaxWindow => {
                size_of::<u32>()
            }
            FilterOption::ScaleFloatByteWidth => size_of::<u64>(),
            FilterOption::ScaleFloatFactor | FilterOption::ScaleFloatOffset => size_of::<f64>(),
            FilterOption::WebPQuality => size_of::<f32>(),
            FilterOption::WebPInputFormat
            | FilterOption::WebPLossless
            | FilterOption::CompressionReinterpretDatatype => size_of::<u8>(),
        }
    }
}

/// An option of a filter together with its value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterOptionValue {
    CompressionLevel(i32),
    BitWidthMaxWindow(u32),
    PositiveDeltaMaxWindow(u32),
    /// One of 1, 2, 4 or 8.
    ScaleFloatByteWidth(u64),
    ScaleFloatFactor(f64),
    ScaleFloatOffset(f64),
    /// In `0.0..=100.0`.
    WebPQuality(f32),
    WebPInputFormat(WebPFilterInputFormat),
    WebPLossless(bool),
    CompressionReinterpretDatatype(Datatype),
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FilterOptionError {
    #[error("Filter '{0}' does not accept option '{1}'")]
    NotAccepted(FilterType, FilterOption),
    #[error("Invalid value for option '{0}': {1}")]
    InvalidValue(FilterOption, String),
    #[error("Option '{0}' expects {1} bytes, found {2}")]
    SizeMismatch(FilterOption, usize, usize),
    #[error(transparent)]
    InvalidDiscriminant(#[from] InvalidDiscriminant),
}

impl FilterOptionValue {
    pub fn option(&self) -> FilterOption {
        match self {
            Self::CompressionLevel(_) => FilterOption::CompressionLevel,
            Self::BitWidthMaxWindow(_) => FilterOption::BitWidthMaxWindow,
            Self::PositiveDeltaMaxWindow(_) => FilterOption::PositiveDeltaMaxWindow,
            Self::ScaleFloatByteWidth(_) => FilterOption::ScaleFloatByteWidth,
            Self::ScaleFloatFactor(_) => FilterOption::ScaleFloatFactor,
            Self::ScaleFloatOffset(_) => FilterOption::ScaleFloatOffset,
            Self::WebPQuality(_) => FilterOption::WebPQuality,
            Self::WebPInputFormat(_) => FilterOption::WebPInputFormat,
            Self::WebPLossless(_) => FilterOption::WebPLossless,
            Self::CompressionReinterpretDatatype(_) => {
                FilterOption::CompressionReinterpretDatatype
            }
        }
    }

    /// Checks that this value may be given to a filter of type `filter_type`.
    pub fn validate(&self, filter_type: FilterType) -> Result<(), FilterOptionError> {
        if !filter_type.accepts(self.option()) {
            return Err(FilterOptionError::NotAccepted(filter_type, self.option()));
        }
        match self {
            Self::ScaleFloatByteWidth(w) if !matches!(w, 1 | 2 | 4 | 8) => Err(
                FilterOptionError::InvalidValue(self.option(), format!("byte width {w}")),
            ),
            Self::WebPQuality(q) if !(0.0..=100.0).contains(q) => Err(
                FilterOptionError::InvalidValue(self.option(), format!("quality {q}")),
            ),
            _ => Ok(()),
        }
    }

    /// Returns the native-endian bytes which the C API expects for this value.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::CompressionLevel(v) => v.to_ne_bytes().to_vec(),
            Self::BitWidthMaxWindow(v) | Self::PositiveDeltaMaxWindow(v) => {
                v.to_ne_bytes().to_vec()
            }
            Self::ScaleFloatByteWidth(v) => v.to_ne_bytes().to_vec(),
            Self::ScaleFloatFactor(v) | Self::ScaleFloatOffset(v) => v.to_ne_bytes().to_vec(),
            Self::WebPQuality(v) => v.to_ne_bytes().to_vec(),
            Self::WebPInputFormat(f) => vec![u32::from(*f) as u8],
            Self::WebPLossless(b) => vec![u8::from(*b)],
            Self::CompressionReinterpretDatatype(dt) => vec![u32::from(*dt) as u8],
        }
    }

    /// Decodes the bytes written by the C API for `option`.
    pub fn from_bytes(option: FilterOption, bytes: &[u8]) -> Result<Self, FilterOptionError> {
        if bytes.len() != option.value_size() {
            return Err(FilterOptionError::SizeMismatch(
                option,
                option.value_size(),
                bytes.len(),
            ));
        }

        macro_rules! decode {
            ($ty:ty) => {{
                let mut array = [0u8; size_of::<$ty>()];
                array.copy_from_slice(bytes);
                <$ty>::from_ne_bytes(array)
            }};
        }

        Ok(match option {
            FilterOption::CompressionLevel => Self::CompressionLevel(decode!(i32)),
            FilterOption::BitWidthMaxWindow => Self::BitWidthMaxWindow(decode!(u32)),
            FilterOption::PositiveDeltaMaxWindow => Self::PositiveDeltaMaxWindow(decode!(u32)),
            FilterOption::ScaleFloatByteWidth => Self::ScaleFloatByteWidth(decode!(u64)),
            FilterOption::ScaleFloatFactor => Self::ScaleFloatFactor(decode!(f64)),
            FilterOption::ScaleFloatOffset => Self::ScaleFloatOffset(decode!(f64)),
            FilterOption::WebPQuality => Self::WebPQuality(decode!(f32)),
            FilterOption::WebPInputFormat => {
                Self::WebPInputFormat(WebPFilterInputFormat::try_from(bytes[0] as u32)?)
            }
            FilterOption::WebPLossless => Self::WebPLossless(bytes[0] != 0),
            FilterOption::CompressionReinterpretDatatype => {
                Self::CompressionReinterpretDatatype(Datatype::try_from(bytes[0] as u32)?)
            }
        })
    }
}
