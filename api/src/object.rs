//! Inspection and traversal of the TileDB objects under a path.

use std::ops::ControlFlow;

use tiledb_common::object::{ObjectEntry, ObjectList, ObjectType, VisitorState, WalkOrder};
use tiledb_sys::*;

use crate::context::Context;
use crate::error::Result;
use crate::string::cstring;

/// Returns the kind of TileDB object at `path`, which is
/// [ObjectType::Invalid] if there is none.
pub fn object_type(context: &Context, path: &str) -> Result<ObjectType> {
    let c_path = cstring(path)?;
    let mut c_type = 0;
    context.capi_call(&format!("getting object type of '{path}'"), |ctx| unsafe {
        tiledb_object_type(ctx, c_path.as_ptr(), &mut c_type)
    })?;
    Ok(ObjectType::try_from(c_type)?)
}

/// Moves the object at `from` to `to`.
pub fn object_move(context: &Context, from: &str, to: &str) -> Result<()> {
    let c_from = cstring(from)?;
    let c_to = cstring(to)?;
    context.capi_call(&format!("moving object '{from}' to '{to}'"), |ctx| unsafe {
        tiledb_object_move(ctx, c_from.as_ptr(), c_to.as_ptr())
    })
}

/// Deletes the object at `path` and everything under it.
pub fn object_remove(context: &Context, path: &str) -> Result<()> {
    let c_path = cstring(path)?;
    context.capi_call(&format!("removing object '{path}'"), |ctx| unsafe {
        tiledb_object_remove(ctx, c_path.as_ptr())
    })
}

/// Creates an empty group at `uri`.
pub fn group_create(context: &Context, uri: &str) -> Result<()> {
    let c_uri = cstring(uri)?;
    context.capi_call(&format!("creating group '{uri}'"), |ctx| unsafe {
        tiledb_group_create(ctx, c_uri.as_ptr())
    })
}

/// Runs one native traversal with `visitor` behind the callback token,
/// returning the number of entries visited.
fn visit_with<F, W>(context: &Context, operation: &str, visitor: F, walk: W) -> Result<usize>
where
    F: FnMut(ObjectEntry) -> ControlFlow<()>,
    W: FnOnce(*mut tiledb_ctx_t, tiledb_object_visitor_t, *mut std::ffi::c_void) -> capi_return_t,
{
    let mut state = VisitorState::new(visitor);
    let callback = state.callback();
    let token = state.token();
    let walked = context.capi_call(operation, |ctx| walk(ctx, Some(callback), token));

    // An entry the visitor could not be given is the cause of the native
    // failure, so it takes precedence.
    let visited = state.finish()?;
    walked?;
    Ok(visited)
}

/// Visits every object under `path` recursively, in `order`, until
/// `visitor` returns [ControlFlow::Break].
///
/// A panic in `visitor` stops the walk and is resumed once the library
/// has returned.
pub fn object_walk<F>(context: &Context, path: &str, order: WalkOrder, visitor: F) -> Result<usize>
where
    F: FnMut(ObjectEntry) -> ControlFlow<()>,
{
    let c_path = cstring(path)?;
    visit_with(
        context,
        &format!("walking objects under '{path}'"),
        visitor,
        |ctx, callback, token| unsafe {
            tiledb_object_walk(ctx, c_path.as_ptr(), order.into(), callback, token)
        },
    )
}

/// Visits the objects directly under `path` until `visitor` returns
/// [ControlFlow::Break].
pub fn object_ls<F>(context: &Context, path: &str, visitor: F) -> Result<usize>
where
    F: FnMut(ObjectEntry) -> ControlFlow<()>,
{
    let c_path = cstring(path)?;
    visit_with(
        context,
        &format!("listing objects under '{path}'"),
        visitor,
        |ctx, callback, token| unsafe { tiledb_object_ls(ctx, c_path.as_ptr(), callback, token) },
    )
}

/// Returns every object under `path`, recursively, in `order`.
pub fn object_walk_collect(context: &Context, path: &str, order: WalkOrder) -> Result<ObjectList> {
    let mut list = ObjectList::default();
    object_walk(context, path, order, |entry| {
        list.push(entry);
        ControlFlow::Continue(())
    })?;
    Ok(list)
}

/// Returns the objects directly under `path`.
pub fn object_ls_collect(context: &Context, path: &str) -> Result<ObjectList> {
    let mut list = ObjectList::default();
    object_ls(context, path, |entry| {
        list.push(entry);
        ControlFlow::Continue(())
    })?;
    Ok(list)
}
