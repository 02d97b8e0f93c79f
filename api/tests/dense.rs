use tiledb_api::{
    Array, ArraySchema, ArrayType, Attribute, Context, Datatype, Dimension, Domain, Layout, Query,
    QueryType, Subarray,
};

const ROWS: &str = "rows";
const COLS: &str = "cols";
const ATTRIBUTE: &str = "a";

/// Creates a 4x4 dense array at `uri` holding `1..=16` in row-major order.
fn instance_dense_array(context: &Context, uri: &str) -> anyhow::Result<()> {
    let rows = Dimension::new(context, ROWS, Datatype::Int32, [1i32, 4], Some(2))?;
    let cols = Dimension::new(context, COLS, Datatype::Int32, [1i32, 4], Some(2))?;
    let domain = Domain::with_dimensions(context, [&rows, &cols])?;

    let mut schema = ArraySchema::new(context, ArrayType::Dense)?;
    schema.set_domain(&domain)?;
    schema.set_cell_order(Layout::RowMajor)?;
    schema.set_tile_order(Layout::RowMajor)?;
    schema.add_attribute(&Attribute::new(context, ATTRIBUTE, Datatype::Int32)?)?;
    schema.check()?;
    Array::create(context, uri, &schema)?;

    let mut data = (1..=16).collect::<Vec<i32>>();
    let array = Array::open_new(context, uri, QueryType::Write)?;
    let mut subarray = Subarray::new(&array)?;
    subarray.add_range(0, 1i32, 4i32)?;
    subarray.add_range(1, 1i32, 4i32)?;

    let mut query = Query::new(&array, QueryType::Write)?;
    query.set_layout(Layout::RowMajor)?;
    query.set_subarray(&subarray)?;
    query.set_data_buffer(ATTRIBUTE, &mut data)?;
    query.submit()?;
    query.finalize()?;
    Ok(())
}

/// Reads rows `[1, 2]` and columns `[2, 4]` in `layout`.
fn read_slice(context: &Context, uri: &str, layout: Layout) -> anyhow::Result<Vec<i32>> {
    let mut data = vec![0i32; 16];
    let array = Array::open_new(context, uri, QueryType::Read)?;
    let elements = {
        let mut subarray = Subarray::new(&array)?;
        subarray.add_range(0, 1i32, 2i32)?;
        subarray.add_range(1, 2i32, 4i32)?;

        let mut query = Query::new(&array, QueryType::Read)?;
        query.set_layout(layout)?;
        query.set_subarray(&subarray)?;
        query.set_data_buffer(ATTRIBUTE, &mut data)?;
        query.submit()?;
        query.result_buffer_elements()
    };

    let Some((_, n)) = elements.get(ATTRIBUTE) else {
        anyhow::bail!("No result size for '{ATTRIBUTE}'");
    };
    data.truncate(*n as usize);
    Ok(data)
}

#[test]
fn read_row_major() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dir = tiledb_test_support::temp_dir()?;
    let uri = tiledb_test_support::uri_in(dir.path(), "dense")?;
    instance_dense_array(&context, &uri)?;

    assert_eq!(
        vec![2, 3, 4, 6, 7, 8],
        read_slice(&context, &uri, Layout::RowMajor)?
    );
    Ok(())
}

#[test]
fn read_col_major() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dir = tiledb_test_support::temp_dir()?;
    let uri = tiledb_test_support::uri_in(dir.path(), "dense")?;
    instance_dense_array(&context, &uri)?;

    assert_eq!(
        vec![2, 6, 3, 7, 4, 8],
        read_slice(&context, &uri, Layout::ColumnMajor)?
    );
    Ok(())
}

#[test]
fn non_empty_domain() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dir = tiledb_test_support::temp_dir()?;
    let uri = tiledb_test_support::uri_in(dir.path(), "dense")?;
    instance_dense_array(&context, &uri)?;

    let array = Array::open_new(&context, &uri, QueryType::Read)?;
    assert_eq!(Some([1, 4]), array.non_empty_domain::<i32>(0)?);
    assert_eq!(Some([1, 4]), array.non_empty_domain::<i32>(1)?);
    assert!(array.non_empty_domain::<i32>(2).is_err());
    Ok(())
}
