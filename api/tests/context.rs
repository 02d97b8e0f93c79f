use tiledb_api::{ArraySchema, Attribute, Context, Datatype, Error, Filesystem};

#[test]
fn default_context() -> anyhow::Result<()> {
    let context = Context::new()?;
    assert_eq!(None, context.last_error()?);
    assert!(context.is_supported_fs(Filesystem::Memfs)?);
    context.cancel_tasks()?;
    Ok(())
}

#[test]
fn config_round_trip() -> anyhow::Result<()> {
    let context = Context::from_map([("sm.tile_cache_size", "4321")])?;
    assert_eq!(
        Some("4321".to_owned()),
        context.config()?.get("sm.tile_cache_size")?
    );
    Ok(())
}

#[test]
fn stats_are_json() -> anyhow::Result<()> {
    let context = Context::new()?;
    let stats = context.stats()?;
    assert!(stats.trim_start().starts_with('{'), "{stats}");
    Ok(())
}

#[test]
fn tags() -> anyhow::Result<()> {
    let context = Context::new()?;
    context.set_tag("x-tiledb-api-test", "tags")?;
    context.set_tags([("x-tiledb-api-test", "one"), ("x-tiledb-api-other", "two")])?;
    Ok(())
}

#[test]
fn tag_failure_is_an_error() -> anyhow::Result<()> {
    let context = Context::new()?;
    assert!(matches!(
        context.set_tags([("x-tiledb-api-test", "ok"), ("bad\0key", "value")]),
        Err(Error::Nul(_))
    ));
    Ok(())
}

#[test]
fn native_error_message() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dir = tiledb_test_support::temp_dir()?;
    let uri = tiledb_test_support::uri_in(dir.path(), "missing")?;

    let Err(e) = ArraySchema::load(&context, &uri) else {
        anyhow::bail!("Expected loading a missing schema to fail");
    };
    let Error::Native { operation, message } = &e else {
        anyhow::bail!("Expected a native error, found {e:?}");
    };
    assert!(operation.starts_with("loading array schema"), "{operation}");
    assert!(!message.is_empty());
    assert!(context.last_error()?.is_some());
    Ok(())
}

#[test]
fn shared_between_threads() -> anyhow::Result<()> {
    let context = Context::new()?;
    let handles = (0..4)
        .map(|i| {
            let context = context.clone();
            std::thread::spawn(move || -> tiledb_api::Result<String> {
                Attribute::new(&context, &format!("a{i}"), Datatype::Int32)?.name()
            })
        })
        .collect::<Vec<_>>();
    for (i, handle) in handles.into_iter().enumerate() {
        let name = handle.join().map_err(|_| anyhow::anyhow!("Thread panicked"))??;
        assert_eq!(format!("a{i}"), name);
    }
    Ok(())
}

#[test]
fn library_version() {
    let (major, minor, patch) = tiledb_api::version();
    assert!(major >= 2, "{major}.{minor}.{patch}");
}
