use tiledb_api::{
    Array, ArraySchema, ArraySchemaEvolution, ArrayType, Attribute, Context, Datatype, Dump,
    Error, FilterList, FilterType, Layout,
};
use tiledb_test_support::{INT_ATTRIBUTE, NULLABLE_ATTRIBUTE, STRING_ATTRIBUTE};

#[test]
fn canned_sparse_schema() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut schema = tiledb_test_support::canned_schema(&context, ArrayType::Sparse)?;

    assert_eq!(ArrayType::Sparse, schema.array_type()?);
    assert_eq!(3, schema.num_attributes()?);
    assert!(schema.has_attribute(STRING_ATTRIBUTE)?);
    assert!(!schema.has_attribute("nope")?);
    assert!(schema.attribute_from_name(NULLABLE_ATTRIBUTE)?.is_nullable()?);
    assert_eq!(INT_ATTRIBUTE, schema.attribute_from_index(0)?.name()?);
    assert_eq!(1, schema.domain()?.num_dimensions()?);
    assert_eq!(100, schema.capacity()?);
    assert_eq!(Layout::RowMajor, schema.cell_order()?);
    assert_eq!(Layout::RowMajor, schema.tile_order()?);

    let names = schema
        .attributes()?
        .iter()
        .map(Attribute::name)
        .collect::<tiledb_api::Result<Vec<_>>>()?;
    assert_eq!(vec![INT_ATTRIBUTE, STRING_ATTRIBUTE, NULLABLE_ATTRIBUTE], names);

    assert!(!schema.allows_dups()?);
    schema.set_allows_dups(true)?;
    assert!(schema.allows_dups()?);

    assert!(schema.dump_to_string()?.contains(STRING_ATTRIBUTE));
    Ok(())
}

#[test]
fn layouts() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut schema = ArraySchema::new(&context, ArrayType::Sparse)?;
    schema.set_cell_order(Layout::Hilbert)?;
    assert_eq!(Layout::Hilbert, schema.cell_order()?);

    assert!(matches!(
        schema.set_cell_order(Layout::Unordered),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        schema.set_tile_order(Layout::Hilbert),
        Err(Error::InvalidArgument(_))
    ));
    Ok(())
}

#[test]
fn filter_lists() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut schema = ArraySchema::new(&context, ArrayType::Dense)?;

    schema.set_coords_filter_list(&FilterList::from_types(&context, [FilterType::Gzip])?)?;
    schema.set_offsets_filter_list(&FilterList::from_types(
        &context,
        [FilterType::PositiveDelta, FilterType::Zstd],
    )?)?;
    schema.set_validity_filter_list(&FilterList::from_types(&context, [FilterType::Rle])?)?;

    assert_eq!(
        FilterType::Gzip,
        schema.coords_filter_list()?.filter_from_index(0)?.filter_type()?
    );
    assert_eq!(2, schema.offsets_filter_list()?.num_filters()?);
    assert_eq!(
        FilterType::Rle,
        schema.validity_filter_list()?.filter_from_index(0)?.filter_type()?
    );
    Ok(())
}

#[test]
fn check_rejects_incomplete_schema() -> anyhow::Result<()> {
    let context = Context::new()?;
    let schema = ArraySchema::new(&context, ArrayType::Dense)?;
    assert!(matches!(schema.check(), Err(Error::Native { .. })));
    Ok(())
}

#[test]
fn load() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dir = tiledb_test_support::temp_dir()?;
    let uri = tiledb_test_support::uri_in(dir.path(), "dense")?;
    Array::create(
        &context,
        &uri,
        &tiledb_test_support::canned_schema(&context, ArrayType::Dense)?,
    )?;

    let schema = ArraySchema::load(&context, &uri)?;
    assert_eq!(ArrayType::Dense, schema.array_type()?);
    assert_eq!(3, schema.num_attributes()?);
    assert!(schema.version()? > 0);
    let (lo, hi) = schema.timestamp_range()?;
    assert!(lo <= hi);
    Ok(())
}

#[test]
fn evolve() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dir = tiledb_test_support::temp_dir()?;
    let uri = tiledb_test_support::uri_in(dir.path(), "evolving")?;
    Array::create(
        &context,
        &uri,
        &tiledb_test_support::canned_schema(&context, ArrayType::Sparse)?,
    )?;

    let mut evolution = ArraySchemaEvolution::new(&context)?;
    evolution.add_attribute(&Attribute::new(&context, "a4", Datatype::Float64)?)?;
    evolution.drop_attribute(INT_ATTRIBUTE)?;
    evolution.evolve(&uri)?;

    let schema = ArraySchema::load(&context, &uri)?;
    assert!(schema.has_attribute("a4")?);
    assert!(!schema.has_attribute(INT_ATTRIBUTE)?);
    assert_eq!(3, schema.num_attributes()?);
    Ok(())
}
