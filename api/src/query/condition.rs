//! Native query conditions, and their construction from a
//! [QueryConditionExpr] tree.

use std::ffi::c_void;

use tiledb_common::datatype::{self, PhysicalType};
use tiledb_common::query::condition::{
    CombinationOp, Predicate, QueryConditionExpr, QueryConditionOp, SetMembers,
};
use tiledb_sys::*;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::handle::RawQueryCondition;
use crate::string::cstring;

/// A filter on the cells returned by a read query.
pub struct QueryCondition {
    context: Context,
    raw: RawQueryCondition,
}

impl QueryCondition {
    /// Returns a condition comparing field `name` against `value`.
    pub fn new<T: PhysicalType>(
        context: &Context,
        name: &str,
        op: QueryConditionOp,
        value: T,
    ) -> Result<Self> {
        Self::new_bytes(context, name, op, &value.to_bytes())
    }

    /// Returns a condition comparing field `name` against the raw bytes
    /// of a value, as for string and blob fields.
    pub fn new_bytes(
        context: &Context,
        name: &str,
        op: QueryConditionOp,
        value: &[u8],
    ) -> Result<Self> {
        if op.is_set_membership() {
            return Err(Error::InvalidArgument(format!(
                "{op} requires a set of values"
            )));
        }
        Self::init(
            context,
            name,
            op,
            value.as_ptr() as *const c_void,
            value.len() as u64,
        )
    }

    /// Returns a condition which tests whether field `name` is null
    /// (`EQ`) or not null (`NE`).
    pub fn new_null(context: &Context, name: &str, op: QueryConditionOp) -> Result<Self> {
        if !matches!(op, QueryConditionOp::Equal | QueryConditionOp::NotEqual) {
            return Err(Error::InvalidArgument(format!(
                "{op} cannot be compared against null"
            )));
        }
        Self::init(context, name, op, std::ptr::null(), 0)
    }

    fn init(
        context: &Context,
        name: &str,
        op: QueryConditionOp,
        value: *const c_void,
        value_size: u64,
    ) -> Result<Self> {
        let c_name = cstring(name)?;
        let ffi = context.alloc_handle("allocating query condition", |ctx, cond| unsafe {
            tiledb_query_condition_alloc(ctx, cond)
        })?;
        let cond = Self::from_raw(context, RawQueryCondition::owned(ffi));
        context.capi_call(&format!("initializing query condition on '{name}'"), |ctx| unsafe {
            tiledb_query_condition_init(
                ctx,
                cond.capi(),
                c_name.as_ptr(),
                value,
                value_size,
                op.into(),
            )
        })?;
        Ok(cond)
    }

    /// Returns a condition which tests whether field `name` is one of
    /// `members` (`IN`) or none of them (`NOT_IN`).
    pub fn set_membership<M>(
        context: &Context,
        name: &str,
        op: QueryConditionOp,
        members: M,
    ) -> Result<Self>
    where
        M: Into<SetMembers>,
    {
        if !op.is_set_membership() {
            return Err(Error::InvalidArgument(format!(
                "{op} is not a set membership operator"
            )));
        }
        let members = members.into();
        if members.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "set membership condition on '{name}' has no members"
            )));
        }
        let (data, offsets) = members.to_bytes_and_offsets();
        let offsets = datatype::to_bytes(&offsets);

        let c_name = cstring(name)?;
        let ffi = context.alloc_handle(
            &format!("allocating set membership condition on '{name}'"),
            |ctx, cond| unsafe {
                tiledb_query_condition_alloc_set_membership(
                    ctx,
                    c_name.as_ptr(),
                    data.as_ptr() as *const c_void,
                    data.len() as u64,
                    offsets.as_ptr() as *const c_void,
                    offsets.len() as u64,
                    op.into(),
                    cond,
                )
            },
        )?;
        Ok(Self::from_raw(context, RawQueryCondition::owned(ffi)))
    }

    fn from_raw(context: &Context, raw: RawQueryCondition) -> Self {
        QueryCondition {
            context: context.clone(),
            raw,
        }
    }

    pub(crate) fn capi(&self) -> *mut tiledb_query_condition_t {
        self.raw.capi()
    }

    /// Returns a condition which joins `self` and `rhs` with `op`,
    /// which is `AND` or `OR`.
    pub fn combine(&self, op: CombinationOp, rhs: &QueryCondition) -> Result<Self> {
        if op == CombinationOp::Not {
            return Err(Error::InvalidArgument(
                "NOT is unary; use negate".to_owned(),
            ));
        }
        let ffi = self
            .context
            .alloc_handle(&format!("combining query conditions with {op}"), |ctx, cond| unsafe {
                tiledb_query_condition_combine(ctx, self.capi(), rhs.capi(), op.into(), cond)
            })?;
        Ok(Self::from_raw(&self.context, RawQueryCondition::owned(ffi)))
    }

    pub fn negate(&self) -> Result<Self> {
        let ffi = self
            .context
            .alloc_handle("negating query condition", |ctx, cond| unsafe {
                tiledb_query_condition_negate(ctx, self.capi(), cond)
            })?;
        Ok(Self::from_raw(&self.context, RawQueryCondition::owned(ffi)))
    }

    /// Sets whether values are compared against the enumeration of an
    /// enumerated attribute rather than its integer keys.
    pub fn set_use_enumeration(&mut self, use_enumeration: bool) -> Result<()> {
        self.context
            .capi_call("setting query condition enumeration use", |ctx| unsafe {
                tiledb_query_condition_set_use_enumeration(
                    ctx,
                    self.capi(),
                    i32::from(use_enumeration),
                )
            })
    }

    /// Lowers `expr` into a native condition, one handle per node.
    pub fn build(context: &Context, expr: &QueryConditionExpr) -> Result<Self> {
        match expr {
            QueryConditionExpr::Cond(predicate) => Self::from_predicate(context, predicate),
            QueryConditionExpr::Comb { lhs, rhs, op } => {
                let lhs = Self::build(context, lhs)?;
                let rhs = Self::build(context, rhs)?;
                lhs.combine((*op).into(), &rhs)
            }
            QueryConditionExpr::Negate(expr) => Self::build(context, expr)?.negate(),
        }
    }

    fn from_predicate(context: &Context, predicate: &Predicate) -> Result<Self> {
        match predicate {
            Predicate::Equality { field, op, value } => {
                Self::new_bytes(context, field, (*op).into(), &value.to_bytes())
            }
            Predicate::SetMembership { field, op, members } => {
                Self::set_membership(context, field, (*op).into(), members.clone())
            }
            Predicate::Nullness { field, op } => Self::new_null(context, field, (*op).into()),
        }
    }
}
