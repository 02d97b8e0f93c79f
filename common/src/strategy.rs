//! [proptest] strategies for the definitions in this crate.

use proptest::prelude::*;

use crate::array::{ArrayType, Layout};
use crate::datatype::Datatype;
use crate::filter::FilterType;
use crate::query::condition::{Literal, QueryConditionExpr, SetMembers};

macro_rules! arbitrary_c_enum {
    ($($name:ty),+) => {
        $(
            impl Arbitrary for $name {
                type Parameters = ();
                type Strategy = BoxedStrategy<$name>;

                fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
                    proptest::sample::select(<$name>::ALL).boxed()
                }
            }
        )+
    };
}

arbitrary_c_enum!(ArrayType, Datatype, FilterType, Layout);

/// Returns a strategy for values of the fixed-size types.
pub fn any_literal() -> impl Strategy<Value = Literal> {
    prop_oneof![
        any::<i8>().prop_map(Literal::from),
        any::<i32>().prop_map(Literal::from),
        any::<i64>().prop_map(Literal::from),
        any::<u16>().prop_map(Literal::from),
        any::<u64>().prop_map(Literal::from),
        any::<f64>().prop_map(Literal::from),
        "[a-z]{1,8}".prop_map(Literal::String),
    ]
}

/// Returns a strategy for non-empty sets of members.
pub fn any_set_members() -> impl Strategy<Value = SetMembers> {
    prop_oneof![
        proptest::collection::vec(any::<i32>(), 1..8).prop_map(SetMembers::Int32),
        proptest::collection::vec(any::<f32>(), 1..8).prop_map(SetMembers::Float32),
        proptest::collection::vec("[a-z]{1,8}", 1..8).prop_map(SetMembers::String),
    ]
}

/// Returns a strategy for query condition trees over the given field names.
pub fn query_condition_expr(fields: Vec<String>) -> impl Strategy<Value = QueryConditionExpr> {
    let field = proptest::sample::select(fields);
    let leaf = prop_oneof![
        (field.clone(), any_literal()).prop_map(|(f, v)| QueryConditionExpr::field(f).lt(v)),
        (field.clone(), any_literal()).prop_map(|(f, v)| QueryConditionExpr::field(f).eq(v)),
        (field.clone(), any_set_members())
            .prop_map(|(f, m)| QueryConditionExpr::field(f).is_in(m)),
        field.prop_map(|f| QueryConditionExpr::field(f).is_null()),
    ];
    leaf.prop_recursive(4, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l & r),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l | r),
            inner.prop_map(|e| !e),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn expr_predicates_use_given_fields(
            expr in query_condition_expr(vec!["a".to_owned(), "b".to_owned()])
        ) {
            for p in expr.predicates() {
                prop_assert!(p.field() == "a" || p.field() == "b");
            }
            prop_assert!(!expr.to_string().is_empty());
        }

        #[test]
        fn datatype_size_is_power_of_two(dt in any::<Datatype>()) {
            prop_assert!(dt.size().is_power_of_two());
        }
    }
}
