use tiledb_api::{CellValNum, Context, Datatype, Dimension, Domain, Dump, Error};

#[test]
fn dimension_properties() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dim = Dimension::new(&context, "x", Datatype::Int32, [1i32, 10], Some(5))?;
    assert_eq!("x", dim.name()?);
    assert_eq!(Datatype::Int32, dim.datatype()?);
    assert_eq!(CellValNum::Single, dim.cell_val_num()?);
    assert_eq!(Some([1, 10]), dim.domain::<i32>()?);
    assert_eq!(Some(5), dim.tile_extent::<i32>()?);
    assert!(dim.to_string().contains('x'));
    Ok(())
}

#[test]
fn dimension_type_mismatch() -> anyhow::Result<()> {
    let context = Context::new()?;
    assert!(matches!(
        Dimension::new(&context, "x", Datatype::Float64, [0i32, 1], None),
        Err(Error::DatatypeMismatch { .. })
    ));

    let dim = Dimension::new(&context, "x", Datatype::Float64, [0.0f64, 1.0], None)?;
    assert!(matches!(
        dim.domain::<i64>(),
        Err(Error::DatatypeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn dimension_empty_domain() -> anyhow::Result<()> {
    let context = Context::new()?;
    assert!(matches!(
        Dimension::new(&context, "x", Datatype::Int64, [10i64, 1], None),
        Err(Error::InvalidArgument(_))
    ));
    Ok(())
}

#[test]
fn string_dimension() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dim = Dimension::new_string(&context, "s", Datatype::StringAscii)?;
    assert_eq!(CellValNum::Var, dim.cell_val_num()?);
    assert_eq!(None, dim.domain::<u8>()?);
    assert_eq!(None, dim.tile_extent::<u8>()?);

    assert!(matches!(
        Dimension::new_string(&context, "s", Datatype::Int32),
        Err(Error::InvalidArgument(_))
    ));
    Ok(())
}

#[test]
fn domain_dimensions() -> anyhow::Result<()> {
    let context = Context::new()?;
    let x = Dimension::new(&context, "x", Datatype::UInt64, [0u64, 99], Some(10))?;
    let y = Dimension::new(&context, "y", Datatype::UInt64, [0u64, 9], Some(10))?;
    let domain = Domain::with_dimensions(&context, [&x, &y])?;

    assert_eq!(2, domain.num_dimensions()?);
    assert_eq!(Datatype::UInt64, domain.datatype()?);
    assert!(domain.has_dimension("y")?);
    assert!(!domain.has_dimension("z")?);
    assert_eq!(
        Some([0u64, 9]),
        domain.dimension_from_name("y")?.domain::<u64>()?
    );
    assert_eq!("x", domain.dimension_from_index(0)?.name()?);

    let names = domain
        .dimensions()?
        .iter()
        .map(Dimension::name)
        .collect::<tiledb_api::Result<Vec<_>>>()?;
    assert_eq!(vec!["x", "y"], names);

    assert!(matches!(
        domain.dimension_from_index(2),
        Err(Error::Native { .. })
    ));
    assert!(domain.dump_to_string()?.contains('y'));
    Ok(())
}
