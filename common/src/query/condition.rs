//! Query condition operators, and a plain Rust expression tree which
//! describes a whole condition before it is lowered into native handles.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::{BitAnd, BitOr, Not};

use crate::cell_val_num::var_offsets;
use crate::datatype::{Datatype, PhysicalType};

c_enum! {
    /// Comparison applied between a field and a value.
    pub enum QueryConditionOp {
        Less = 0 => "LT",
        LessEqual = 1 => "LE",
        Greater = 2 => "GT",
        GreaterEqual = 3 => "GE",
        Equal = 4 => "EQ",
        NotEqual = 5 => "NE",
        In = 6 => "IN",
        NotIn = 7 => "NOT_IN",
    }
}

c_enum! {
    /// Operator joining (or negating) query conditions.
    pub enum CombinationOp {
        And = 0 => "AND",
        Or = 1 => "OR",
        Not = 2 => "NOT",
    }
}

impl QueryConditionOp {
    /// Returns whether this operator compares against a set of values.
    pub fn is_set_membership(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EqualityOp {
    Less,
    LessEqual,
    Equal,
    NotEqual,
    GreaterEqual,
    Greater,
}

impl From<EqualityOp> for QueryConditionOp {
    fn from(op: EqualityOp) -> Self {
        match op {
            EqualityOp::Less => QueryConditionOp::Less,
            EqualityOp::LessEqual => QueryConditionOp::LessEqual,
            EqualityOp::Equal => QueryConditionOp::Equal,
            EqualityOp::NotEqual => QueryConditionOp::NotEqual,
            EqualityOp::GreaterEqual => QueryConditionOp::GreaterEqual,
            EqualityOp::Greater => QueryConditionOp::Greater,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SetMembershipOp {
    In,
    NotIn,
}

impl From<SetMembershipOp> for QueryConditionOp {
    fn from(op: SetMembershipOp) -> Self {
        match op {
            SetMembershipOp::In => QueryConditionOp::In,
            SetMembershipOp::NotIn => QueryConditionOp::NotIn,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NullnessOp {
    IsNull,
    NotNull,
}

impl From<NullnessOp> for QueryConditionOp {
    /// Nullness is tested by comparing against a null value.
    fn from(op: NullnessOp) -> Self {
        match op {
            NullnessOp::IsNull => QueryConditionOp::Equal,
            NullnessOp::NotNull => QueryConditionOp::NotEqual,
        }
    }
}

/// A binary combinator. Negation is its own node in [QueryConditionExpr].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BinaryCombinator {
    And,
    Or,
}

impl From<BinaryCombinator> for CombinationOp {
    fn from(op: BinaryCombinator) -> Self {
        match op {
            BinaryCombinator::And => CombinationOp::And,
            BinaryCombinator::Or => CombinationOp::Or,
        }
    }
}

/// A single value compared against a field.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    /// Raw bytes compared against a blob or string field.
    Bytes(Vec<u8>),
}

macro_rules! literal_from {
    ($($ty:ty => $variant:ident),+) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Literal::$variant(value)
                }
            }
        )+
    };
}

literal_from!(
    i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64,
    u8 => UInt8, u16 => UInt16, u32 => UInt32, u64 => UInt64,
    f32 => Float32, f64 => Float64, String => String
);

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_owned())
    }
}

impl From<&[u8]> for Literal {
    fn from(value: &[u8]) -> Self {
        Literal::Bytes(value.to_vec())
    }
}

impl Literal {
    /// Returns the bytes which are passed to the C API as the comparison value.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Literal::Int8(v) => v.to_bytes(),
            Literal::Int16(v) => v.to_bytes(),
            Literal::Int32(v) => v.to_bytes(),
            Literal::Int64(v) => v.to_bytes(),
            Literal::UInt8(v) => v.to_bytes(),
            Literal::UInt16(v) => v.to_bytes(),
            Literal::UInt32(v) => v.to_bytes(),
            Literal::UInt64(v) => v.to_bytes(),
            Literal::Float32(v) => v.to_bytes(),
            Literal::Float64(v) => v.to_bytes(),
            Literal::String(s) => s.as_bytes().to_vec(),
            Literal::Bytes(b) => b.clone(),
        }
    }

    /// Returns whether this value can be compared against a field of `datatype`.
    pub fn is_compatible(&self, datatype: Datatype) -> bool {
        match self {
            Literal::Int8(_) => i8::is_compatible(datatype),
            Literal::Int16(_) => i16::is_compatible(datatype),
            Literal::Int32(_) => i32::is_compatible(datatype),
            Literal::Int64(_) => i64::is_compatible(datatype),
            Literal::UInt8(_) => u8::is_compatible(datatype),
            Literal::UInt16(_) => u16::is_compatible(datatype),
            Literal::UInt32(_) => u32::is_compatible(datatype),
            Literal::UInt64(_) => u64::is_compatible(datatype),
            Literal::Float32(_) => f32::is_compatible(datatype),
            Literal::Float64(_) => f64::is_compatible(datatype),
            Literal::String(_) | Literal::Bytes(_) => {
                datatype.is_string_type() || datatype.is_byte_type() || datatype == Datatype::Char
            }
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Literal::Int8(v) => write!(f, "{v}"),
            Literal::Int16(v) => write!(f, "{v}"),
            Literal::Int32(v) => write!(f, "{v}"),
            Literal::Int64(v) => write!(f, "{v}"),
            Literal::UInt8(v) => write!(f, "{v}"),
            Literal::UInt16(v) => write!(f, "{v}"),
            Literal::UInt32(v) => write!(f, "{v}"),
            Literal::UInt64(v) => write!(f, "{v}"),
            Literal::Float32(v) => write!(f, "{v}"),
            Literal::Float64(v) => write!(f, "{v}"),
            Literal::String(s) => write!(f, "'{s}'"),
            Literal::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// The members of a set membership predicate.
#[derive(Clone, Debug, PartialEq)]
pub enum SetMembers {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    String(Vec<String>),
}

macro_rules! set_members_from {
    ($($ty:ty => $variant:ident),+) => {
        $(
            impl From<Vec<$ty>> for SetMembers {
                fn from(value: Vec<$ty>) -> Self {
                    SetMembers::$variant(value)
                }
            }

            impl<const N: usize> From<[$ty; N]> for SetMembers {
                fn from(value: [$ty; N]) -> Self {
                    SetMembers::$variant(value.to_vec())
                }
            }
        )+
    };
}

set_members_from!(
    i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64,
    u8 => UInt8, u16 => UInt16, u32 => UInt32, u64 => UInt64,
    f32 => Float32, f64 => Float64, String => String
);

impl<const N: usize> From<[&str; N]> for SetMembers {
    fn from(value: [&str; N]) -> Self {
        SetMembers::String(value.iter().map(|s| s.to_string()).collect())
    }
}

impl SetMembers {
    pub fn len(&self) -> usize {
        match self {
            SetMembers::Int8(v) => v.len(),
            SetMembers::Int16(v) => v.len(),
            SetMembers::Int32(v) => v.len(),
            SetMembers::Int64(v) => v.len(),
            SetMembers::UInt8(v) => v.len(),
            SetMembers::UInt16(v) => v.len(),
            SetMembers::UInt32(v) => v.len(),
            SetMembers::UInt64(v) => v.len(),
            SetMembers::Float32(v) => v.len(),
            SetMembers::Float64(v) => v.len(),
            SetMembers::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the members packed back to back, and the byte offset at
    /// which each member begins.
    pub fn to_bytes_and_offsets(&self) -> (Vec<u8>, Vec<u64>) {
        fn fixed<T: PhysicalType>(values: &[T]) -> (Vec<u8>, Vec<u64>) {
            let bytes = crate::datatype::to_bytes(values);
            let offsets = var_offsets(std::iter::repeat_n(size_of::<T>(), values.len()));
            (bytes, offsets)
        }

        match self {
            SetMembers::Int8(v) => fixed(v),
            SetMembers::Int16(v) => fixed(v),
            SetMembers::Int32(v) => fixed(v),
            SetMembers::Int64(v) => fixed(v),
            SetMembers::UInt8(v) => fixed(v),
            SetMembers::UInt16(v) => fixed(v),
            SetMembers::UInt32(v) => fixed(v),
            SetMembers::UInt64(v) => fixed(v),
            SetMembers::Float32(v) => fixed(v),
            SetMembers::Float64(v) => fixed(v),
            SetMembers::String(strs) => {
                let bytes = strs.iter().flat_map(|s| s.bytes()).collect::<Vec<u8>>();
                let offsets = var_offsets(strs.iter().map(|s| s.len()));
                (bytes, offsets)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Equality {
        field: String,
        op: EqualityOp,
        value: Literal,
    },
    SetMembership {
        field: String,
        op: SetMembershipOp,
        members: SetMembers,
    },
    Nullness {
        field: String,
        op: NullnessOp,
    },
}

impl Predicate {
    pub fn field(&self) -> &str {
        match self {
            Predicate::Equality { field, .. }
            | Predicate::SetMembership { field, .. }
            | Predicate::Nullness { field, .. } => field,
        }
    }

    pub fn operation(&self) -> QueryConditionOp {
        match self {
            Predicate::Equality { op, .. } => (*op).into(),
            Predicate::SetMembership { op, .. } => (*op).into(),
            Predicate::Nullness { op, .. } => (*op).into(),
        }
    }
}

/// A tree of predicates joined by combinators.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryConditionExpr {
    Cond(Predicate),
    Comb {
        lhs: Box<QueryConditionExpr>,
        rhs: Box<QueryConditionExpr>,
        op: BinaryCombinator,
    },
    Negate(Box<QueryConditionExpr>),
}

impl QueryConditionExpr {
    /// Begins a predicate on the named attribute or dimension.
    pub fn field<S: Into<String>>(name: S) -> FieldPredicateBuilder {
        FieldPredicateBuilder { field: name.into() }
    }

    pub fn and(self, rhs: QueryConditionExpr) -> Self {
        Self::Comb {
            lhs: Box::new(self),
            rhs: Box::new(rhs),
            op: BinaryCombinator::And,
        }
    }

    pub fn or(self, rhs: QueryConditionExpr) -> Self {
        Self::Comb {
            lhs: Box::new(self),
            rhs: Box::new(rhs),
            op: BinaryCombinator::Or,
        }
    }

    pub fn negate(self) -> Self {
        Self::Negate(Box::new(self))
    }

    /// Returns the predicates of this tree from left to right.
    pub fn predicates(&self) -> Vec<&Predicate> {
        match self {
            Self::Cond(p) => vec![p],
            Self::Comb { lhs, rhs, .. } => {
                let mut ps = lhs.predicates();
                ps.extend(rhs.predicates());
                ps
            }
            Self::Negate(e) => e.predicates(),
        }
    }
}

impl BitAnd for QueryConditionExpr {
    type Output = QueryConditionExpr;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for QueryConditionExpr {
    type Output = QueryConditionExpr;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl Not for QueryConditionExpr {
    type Output = QueryConditionExpr;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Predicate::Equality { field, op, value } => {
                write!(f, "{field} {} {value}", QueryConditionOp::from(*op).symbol())
            }
            Predicate::SetMembership { field, op, members } => {
                write!(
                    f,
                    "{field} {} ({} members)",
                    QueryConditionOp::from(*op).symbol(),
                    members.len()
                )
            }
            Predicate::Nullness { field, op } => match op {
                NullnessOp::IsNull => write!(f, "{field} IS NULL"),
                NullnessOp::NotNull => write!(f, "{field} IS NOT NULL"),
            },
        }
    }
}

impl Display for QueryConditionExpr {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Cond(p) => write!(f, "{p}"),
            Self::Comb { lhs, rhs, op } => {
                write!(f, "({lhs}) {} ({rhs})", CombinationOp::from(*op))
            }
            Self::Negate(e) => write!(f, "NOT ({e})"),
        }
    }
}

/// Builds a [Predicate] on one field.
pub struct FieldPredicateBuilder {
    field: String,
}

impl FieldPredicateBuilder {
    fn equality(self, op: EqualityOp, value: impl Into<Literal>) -> QueryConditionExpr {
        QueryConditionExpr::Cond(Predicate::Equality {
            field: self.field,
            op,
            value: value.into(),
        })
    }

    pub fn lt(self, value: impl Into<Literal>) -> QueryConditionExpr {
        self.equality(EqualityOp::Less, value)
    }

    pub fn le(self, value: impl Into<Literal>) -> QueryConditionExpr {
        self.equality(EqualityOp::LessEqual, value)
    }

    pub fn gt(self, value: impl Into<Literal>) -> QueryConditionExpr {
        self.equality(EqualityOp::Greater, value)
    }

    pub fn ge(self, value: impl Into<Literal>) -> QueryConditionExpr {
        self.equality(EqualityOp::GreaterEqual, value)
    }

    pub fn eq(self, value: impl Into<Literal>) -> QueryConditionExpr {
        self.equality(EqualityOp::Equal, value)
    }

    pub fn ne(self, value: impl Into<Literal>) -> QueryConditionExpr {
        self.equality(EqualityOp::NotEqual, value)
    }

    /// Compares the field with raw bytes, for blob fields or strings
    /// which are not UTF-8.
    pub fn eq_bytes(self, value: &[u8]) -> QueryConditionExpr {
        self.equality(EqualityOp::Equal, value)
    }

    pub fn is_in(self, members: impl Into<SetMembers>) -> QueryConditionExpr {
        QueryConditionExpr::Cond(Predicate::SetMembership {
            field: self.field,
            op: SetMembershipOp::In,
            members: members.into(),
        })
    }

    pub fn not_in(self, members: impl Into<SetMembers>) -> QueryConditionExpr {
        QueryConditionExpr::Cond(Predicate::SetMembership {
            field: self.field,
            op: SetMembershipOp::NotIn,
            members: members.into(),
        })
    }

    pub fn is_null(self) -> QueryConditionExpr {
        QueryConditionExpr::Cond(Predicate::Nullness {
            field: self.field,
            op: NullnessOp::IsNull,
        })
    }

    pub fn not_null(self) -> QueryConditionExpr {
        QueryConditionExpr::Cond(Predicate::Nullness {
            field: self.field,
            op: NullnessOp::NotNull,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type QC = QueryConditionExpr;

    #[test]
    fn builder() {
        let qc = QC::field("a1").gt(1i32) & !QC::field("a2").eq("i");
        let QC::Comb { lhs, rhs, op } = &qc else {
            panic!("Expected combination, found {qc:?}")
        };
        assert_eq!(BinaryCombinator::And, *op);
        assert_eq!(
            QC::Cond(Predicate::Equality {
                field: "a1".to_owned(),
                op: EqualityOp::Greater,
                value: Literal::Int32(1)
            }),
            **lhs
        );
        assert!(matches!(**rhs, QC::Negate(_)));

        let fields = qc.predicates().iter().map(|p| p.field()).collect::<Vec<_>>();
        assert_eq!(vec!["a1", "a2"], fields);
    }

    #[test]
    fn display() {
        let qc = (QC::field("x").le(3u64) | QC::field("y").is_null())
            & QC::field("z").not_in([1i8, 2]);
        assert_eq!(
            "((x <= 3) OR (y IS NULL)) AND (z NOT IN (2 members))",
            qc.to_string()
        );
    }

    #[test]
    fn predicate_operations() {
        assert_eq!(
            QueryConditionOp::NotEqual,
            QC::field("a").not_null().predicates()[0].operation()
        );
        assert_eq!(
            QueryConditionOp::In,
            QC::field("a").is_in(["x", "y"]).predicates()[0].operation()
        );
        assert!(QueryConditionOp::NotIn.is_set_membership());
        assert!(!QueryConditionOp::GreaterEqual.is_set_membership());
    }

    #[test]
    fn literal_compatibility() {
        assert!(Literal::from(1i64).is_compatible(Datatype::DateTimeSecond));
        assert!(Literal::from("abc").is_compatible(Datatype::StringAscii));
        assert!(!Literal::from("abc").is_compatible(Datatype::Int32));
        assert!(!Literal::from(1.0f32).is_compatible(Datatype::Float64));
        assert_eq!(7u16.to_ne_bytes().to_vec(), Literal::from(7u16).to_bytes());
        assert_eq!(b"abc".to_vec(), Literal::from("abc").to_bytes());
        assert!(Literal::from(&b"\xff"[..]).is_compatible(Datatype::Blob));
        assert_eq!(vec![0xff], Literal::from(&b"\xff"[..]).to_bytes());
    }

    #[test]
    fn fixed_members_layout() {
        let (bytes, offsets) = SetMembers::from([1i32, 2, 3]).to_bytes_and_offsets();
        assert_eq!(12, bytes.len());
        assert_eq!(vec![0, 4, 8], offsets);
    }

    #[test]
    fn string_members_layout() {
        let (bytes, offsets) = SetMembers::from(["i", "am", "", "string"]).to_bytes_and_offsets();
        assert_eq!(b"iamstring".to_vec(), bytes);
        assert_eq!(vec![0, 1, 3, 3], offsets);
    }

    #[test]
    fn empty_members() {
        let (bytes, offsets) = SetMembers::Float64(vec![]).to_bytes_and_offsets();
        assert!(bytes.is_empty());
        assert!(offsets.is_empty());
        assert!(SetMembers::String(vec![]).is_empty());
    }
}
