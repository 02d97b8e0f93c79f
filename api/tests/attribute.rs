use std::num::NonZeroU32;

use tiledb_api::{
    Attribute, CellValNum, Context, Datatype, Dump, DumpDisplay, Error, FilterList, FilterType,
};

#[test]
fn properties() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut attr = Attribute::new(&context, "a1", Datatype::Int64)?;
    assert_eq!("a1", attr.name()?);
    assert_eq!(Datatype::Int64, attr.datatype()?);
    assert_eq!(CellValNum::Single, attr.cell_val_num()?);
    assert_eq!(8, attr.cell_size()?);
    assert!(!attr.is_nullable()?);

    attr.set_nullable(true)?;
    assert!(attr.is_nullable()?);

    let three = CellValNum::Fixed(NonZeroU32::new(3).unwrap());
    attr.set_cell_val_num(three)?;
    assert_eq!(three, attr.cell_val_num()?);
    assert_eq!(24, attr.cell_size()?);
    Ok(())
}

#[test]
fn fill_value() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut attr = Attribute::new(&context, "a", Datatype::Int32)?;
    assert_eq!(i32::MIN, attr.fill_value::<i32>()?);

    attr.set_fill_value(7i32)?;
    assert_eq!(7, attr.fill_value::<i32>()?);
    assert_eq!(7i32.to_ne_bytes().to_vec(), attr.fill_value_bytes()?);
    Ok(())
}

#[test]
fn fill_value_type_mismatch() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut attr = Attribute::new(&context, "a", Datatype::Int32)?;
    assert!(matches!(
        attr.fill_value::<i64>(),
        Err(Error::DatatypeMismatch {
            datatype: Datatype::Int32,
            ..
        })
    ));
    assert!(matches!(
        attr.set_fill_value(1.0f64),
        Err(Error::DatatypeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn fill_value_fixed_cells() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut attr = Attribute::new(&context, "a", Datatype::UInt16)?;
    attr.set_cell_val_num(CellValNum::Fixed(NonZeroU32::new(3).unwrap()))?;

    assert!(matches!(
        attr.set_fill_value(1u16),
        Err(Error::InvalidArgument(_))
    ));

    attr.set_fill_values(&[1u16, 2, 3])?;
    assert_eq!(vec![1u16, 2, 3], attr.fill_values::<u16>()?);
    Ok(())
}

#[test]
fn fill_value_string() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut attr = Attribute::new(&context, "s", Datatype::StringAscii)?;
    attr.set_cell_val_num(CellValNum::Var)?;
    attr.set_fill_value_bytes(b"abc")?;
    assert_eq!(b"abc".to_vec(), attr.fill_value_bytes()?);
    Ok(())
}

#[test]
fn fill_value_nullable() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut attr = Attribute::new(&context, "n", Datatype::Int64)?;
    attr.set_nullable(true)?;

    attr.set_fill_value_nullable(5i64, false)?;
    assert_eq!((5, false), attr.fill_value_nullable::<i64>()?);

    attr.set_fill_value_nullable(6i64, true)?;
    assert_eq!(
        (6i64.to_ne_bytes().to_vec(), true),
        attr.fill_value_nullable_bytes()?
    );
    Ok(())
}

#[test]
fn filters() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut attr = Attribute::new(&context, "a", Datatype::Float64)?;
    assert_eq!(0, attr.filter_list()?.num_filters()?);

    let filters = FilterList::from_types(&context, [FilterType::ByteShuffle, FilterType::Zstd])?;
    attr.set_filter_list(&filters)?;

    let types = attr
        .filter_list()?
        .filters()?
        .iter()
        .map(|f| f.filter_type())
        .collect::<tiledb_api::Result<Vec<_>>>()?;
    assert_eq!(vec![FilterType::ByteShuffle, FilterType::Zstd], types);
    Ok(())
}

#[test]
fn dump() -> anyhow::Result<()> {
    let context = Context::new()?;
    let attr = Attribute::new(&context, "dumped", Datatype::UInt8)?;

    let dump = attr.dump_to_string()?;
    assert!(dump.contains("dumped"), "{dump}");
    assert_eq!(dump, attr.to_string());

    let dir = tiledb_test_support::temp_dir()?;
    let path = dir.path().join("attribute.txt");
    attr.dump(&path)?;
    assert_eq!(dump, std::fs::read_to_string(&path)?);
    assert!(matches!(attr.dump(&path), Err(Error::PathExists(_))));
    Ok(())
}

struct Undumpable;

impl Dump for Undumpable {
    fn dump_to_string(&self) -> tiledb_api::Result<String> {
        Err(Error::InvalidArgument("no description".to_owned()))
    }
}

#[test]
fn dump_failure_is_rendered() {
    assert_eq!(
        "<dump failed: Invalid argument: no description>",
        DumpDisplay(&Undumpable).to_string()
    );
}

#[test]
fn nul_in_name() -> anyhow::Result<()> {
    let context = Context::new()?;
    assert!(matches!(
        Attribute::new(&context, "a\0b", Datatype::Int32),
        Err(Error::Nul(_))
    ));
    Ok(())
}
