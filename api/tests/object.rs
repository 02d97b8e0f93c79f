use std::ops::ControlFlow;
use std::panic::AssertUnwindSafe;

use tiledb_api::object::{
    group_create, object_ls, object_ls_collect, object_move, object_remove, object_type,
    object_walk, object_walk_collect,
};
use tiledb_api::{Array, ArrayType, Context, ObjectType, WalkOrder};

/// Creates `root/group`, `root/group/inner` and `root/outer`, the latter
/// two being arrays.
fn create_tree(
    context: &Context,
    root: &std::path::Path,
) -> anyhow::Result<(String, String, String)> {
    let group = tiledb_test_support::uri_in(root, "group")?;
    let inner = tiledb_test_support::uri_in(root, "group/inner")?;
    let outer = tiledb_test_support::uri_in(root, "outer")?;

    group_create(context, &group)?;
    let schema = tiledb_test_support::canned_schema(context, ArrayType::Sparse)?;
    Array::create(context, &inner, &schema)?;
    Array::create(context, &outer, &schema)?;
    Ok((group, inner, outer))
}

#[test]
fn types() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dir = tiledb_test_support::temp_dir()?;
    let (group, inner, _) = create_tree(&context, dir.path())?;

    assert_eq!(ObjectType::Group, object_type(&context, &group)?);
    assert_eq!(ObjectType::Array, object_type(&context, &inner)?);
    assert_eq!(
        ObjectType::Invalid,
        object_type(&context, &tiledb_test_support::uri_in(dir.path(), "none")?)?
    );
    Ok(())
}

#[test]
fn walk() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dir = tiledb_test_support::temp_dir()?;
    let root = tiledb_test_support::uri_in(dir.path(), "")?;
    create_tree(&context, dir.path())?;

    let objects = object_walk_collect(&context, &root, WalkOrder::PreOrder)?;
    assert_eq!(3, objects.len());
    assert_eq!(1, objects.of_type(ObjectType::Group).count());
    assert_eq!(2, objects.of_type(ObjectType::Array).count());

    let position = |suffix: &str| {
        objects
            .paths()
            .position(|p| p.trim_end_matches('/').ends_with(suffix))
    };
    let group = position("/group").ok_or_else(|| anyhow::anyhow!("group not walked"))?;
    let inner = position("/group/inner").ok_or_else(|| anyhow::anyhow!("inner not walked"))?;
    assert!(group < inner);

    let post = object_walk_collect(&context, &root, WalkOrder::PostOrder)?;
    let position = |suffix: &str| {
        post.paths()
            .position(|p| p.trim_end_matches('/').ends_with(suffix))
    };
    assert!(position("/group/inner") < position("/group"));
    Ok(())
}

#[test]
fn ls() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dir = tiledb_test_support::temp_dir()?;
    let root = tiledb_test_support::uri_in(dir.path(), "")?;
    create_tree(&context, dir.path())?;

    let objects = object_ls_collect(&context, &root)?;
    assert_eq!(2, objects.len());
    assert!(
        objects
            .paths()
            .all(|p| !p.trim_end_matches('/').ends_with("/inner"))
    );
    Ok(())
}

#[test]
fn stop_early() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dir = tiledb_test_support::temp_dir()?;
    let root = tiledb_test_support::uri_in(dir.path(), "")?;
    create_tree(&context, dir.path())?;

    let mut seen = vec![];
    let visited = object_walk(&context, &root, WalkOrder::PreOrder, |entry| {
        seen.push(entry);
        ControlFlow::Break(())
    })?;
    assert_eq!(1, visited);
    assert_eq!(1, seen.len());

    let visited = object_ls(&context, &root, |_| ControlFlow::Continue(()))?;
    assert_eq!(2, visited);
    Ok(())
}

#[test]
fn visitor_panic_is_resumed() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dir = tiledb_test_support::temp_dir()?;
    let root = tiledb_test_support::uri_in(dir.path(), "")?;
    create_tree(&context, dir.path())?;

    let walked = std::panic::catch_unwind(AssertUnwindSafe(|| {
        object_walk(&context, &root, WalkOrder::PreOrder, |_| -> ControlFlow<()> {
            panic!("visitor failed")
        })
    }));
    let Err(payload) = walked else {
        anyhow::bail!("Expected the visitor panic to propagate");
    };
    assert_eq!(Some(&"visitor failed"), payload.downcast_ref::<&str>());

    // the context is still usable
    assert_eq!(3, object_walk_collect(&context, &root, WalkOrder::PreOrder)?.len());
    Ok(())
}

#[test]
fn move_and_remove() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dir = tiledb_test_support::temp_dir()?;
    let (group, _, outer) = create_tree(&context, dir.path())?;

    let moved = tiledb_test_support::uri_in(dir.path(), "moved")?;
    object_move(&context, &outer, &moved)?;
    assert_eq!(ObjectType::Invalid, object_type(&context, &outer)?);
    assert_eq!(ObjectType::Array, object_type(&context, &moved)?);

    object_remove(&context, &group)?;
    assert_eq!(ObjectType::Invalid, object_type(&context, &group)?);
    Ok(())
}
