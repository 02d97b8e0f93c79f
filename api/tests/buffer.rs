use tiledb_api::{Buffer, BufferList, Context, Datatype};

#[test]
fn buffer_borrows_data() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut data = b"tiledb".to_vec();

    let mut buffer = Buffer::new(&context)?;
    buffer.set_datatype(Datatype::Char)?;
    assert_eq!(Datatype::Char, buffer.datatype()?);
    assert!(buffer.as_bytes()?.is_empty());

    buffer.set_data(&mut data)?;
    assert_eq!(b"tiledb", buffer.as_bytes()?);
    Ok(())
}

#[test]
fn empty_buffer_list() -> anyhow::Result<()> {
    let context = Context::new()?;
    let list = BufferList::new(&context)?;
    assert_eq!(0, list.num_buffers()?);
    assert_eq!(0, list.total_size()?);

    let mut out = vec![];
    assert_eq!(0, list.write_to(&mut out)?);
    assert!(out.is_empty());

    #[allow(deprecated)]
    let flat = list.flatten()?;
    assert!(flat.as_bytes()?.is_empty());
    Ok(())
}
