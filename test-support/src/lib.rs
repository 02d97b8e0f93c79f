//! Arrays and schemas shared by the `tiledb-api` integration tests.

use std::path::Path;

use itertools::Itertools;
use tempfile::TempDir;
use tiledb_api::{
    Array, ArraySchema, ArrayType, Attribute, Context, Datatype, Dimension, Domain, Layout,
    Query, QueryCondition, QueryStatus, QueryType,
};
use tiledb_common::CellValNum;
use tiledb_common::cell_val_num::var_offsets;

/// Returns a new temporary directory, removed when dropped.
pub fn temp_dir() -> anyhow::Result<TempDir> {
    Ok(tempfile::Builder::new().prefix("tiledb-rs-").tempdir()?)
}

/// Returns the URI of `name` under `dir`.
pub fn uri_in(dir: &Path, name: &str) -> anyhow::Result<String> {
    let path = dir.join(name);
    let Some(uri) = path.to_str() else {
        anyhow::bail!("Temporary path is not UTF-8: {}", path.display());
    };
    Ok(uri.to_owned())
}

/// Field names of the canned schemas.
pub const DIMENSION: &str = "d";
pub const INT_ATTRIBUTE: &str = "a1";
pub const STRING_ATTRIBUTE: &str = "a2";
pub const NULLABLE_ATTRIBUTE: &str = "a3";

/// Returns attributes `a1` (`INT32`), `a2` (var-sized `STRING_UTF8`),
/// and `a3` (nullable `INT64`).
pub fn canned_attributes(context: &Context) -> anyhow::Result<Vec<Attribute>> {
    let a1 = Attribute::new(context, INT_ATTRIBUTE, Datatype::Int32)?;

    let mut a2 = Attribute::new(context, STRING_ATTRIBUTE, Datatype::StringUtf8)?;
    a2.set_cell_val_num(CellValNum::Var)?;

    let mut a3 = Attribute::new(context, NULLABLE_ATTRIBUTE, Datatype::Int64)?;
    a3.set_nullable(true)?;

    Ok(vec![a1, a2, a3])
}

/// Returns a schema of `array_type` with one `INT32` dimension `d` over
/// `[1, 100]` and the [canned_attributes].
pub fn canned_schema(context: &Context, array_type: ArrayType) -> anyhow::Result<ArraySchema> {
    let d = Dimension::new(context, DIMENSION, Datatype::Int32, [1i32, 100], Some(10))?;
    let domain = Domain::with_dimensions(context, [&d])?;

    let mut schema = ArraySchema::new(context, array_type)?;
    schema.set_domain(&domain)?;
    schema.set_cell_order(Layout::RowMajor)?;
    schema.set_tile_order(Layout::RowMajor)?;
    if array_type == ArrayType::Sparse {
        schema.set_capacity(100)?;
    }
    schema.add_attributes(&canned_attributes(context)?)?;
    schema.check()?;
    Ok(schema)
}

/// Cells of an array with the canned schema, in coordinate order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cells {
    pub d: Vec<i32>,
    pub a1: Vec<i32>,
    pub a2: Vec<String>,
    pub a3: Vec<Option<i64>>,
}

impl Cells {
    pub fn len(&self) -> usize {
        self.d.len()
    }

    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    /// Sorts the cells by coordinate.
    pub fn sorted(self) -> Self {
        let rows = itertools::izip!(self.d, self.a1, self.a2, self.a3)
            .sorted_by_key(|row| row.0)
            .collect::<Vec<_>>();
        let mut cells = Cells::default();
        for (d, a1, a2, a3) in rows {
            cells.d.push(d);
            cells.a1.push(a1);
            cells.a2.push(a2);
            cells.a3.push(a3);
        }
        cells
    }
}

/// Returns four cells: `a3` is null in the cell with coordinate 2.
pub fn canned_cells() -> Cells {
    Cells {
        d: vec![1, 2, 3, 4],
        a1: vec![1, 2, 3, 4],
        a2: ["alpha", "beta", "gamma", "delta"]
            .into_iter()
            .map(String::from)
            .collect(),
        a3: vec![Some(10), None, Some(30), Some(40)],
    }
}

/// Creates a sparse array with the canned schema at `uri` and writes `cells`.
pub fn create_sparse_array(context: &Context, uri: &str, cells: &Cells) -> anyhow::Result<()> {
    Array::create(context, uri, &canned_schema(context, ArrayType::Sparse)?)?;
    write_cells(context, uri, cells)
}

pub fn write_cells(context: &Context, uri: &str, cells: &Cells) -> anyhow::Result<()> {
    let mut d = cells.d.clone();
    let mut a1 = cells.a1.clone();
    let (mut a2_offsets, mut a2_data) = pack_strings(&cells.a2);
    let mut a3 = cells.a3.iter().map(|v| v.unwrap_or_default()).collect::<Vec<i64>>();
    let mut a3_validity = cells.a3.iter().map(|v| u8::from(v.is_some())).collect::<Vec<u8>>();

    let array = Array::open_new(context, uri, QueryType::Write)?;
    let mut query = Query::new(&array, QueryType::Write)?;
    query.set_layout(Layout::Unordered)?;
    query.set_data_buffer(DIMENSION, &mut d)?;
    query.set_data_buffer(INT_ATTRIBUTE, &mut a1)?;
    query.set_data_buffer(STRING_ATTRIBUTE, &mut a2_data)?;
    query.set_offsets_buffer(STRING_ATTRIBUTE, &mut a2_offsets)?;
    query.set_data_buffer(NULLABLE_ATTRIBUTE, &mut a3)?;
    query.set_validity_buffer(NULLABLE_ATTRIBUTE, &mut a3_validity)?;
    query.submit()?;
    query.finalize()?;
    Ok(())
}

/// Reads every cell of the array at `uri` which satisfies `condition`.
pub fn read_cells(
    context: &Context,
    uri: &str,
    condition: Option<&QueryCondition>,
) -> anyhow::Result<Cells> {
    const CAPACITY: usize = 1024;

    let mut d = vec![0i32; CAPACITY];
    let mut a1 = vec![0i32; CAPACITY];
    let mut a2_offsets = vec![0u64; CAPACITY];
    let mut a2_data = vec![0u8; CAPACITY * 16];
    let mut a3 = vec![0i64; CAPACITY];
    let mut a3_validity = vec![0u8; CAPACITY];

    let array = Array::open_new(context, uri, QueryType::Read)?;
    let elements = {
        let mut query = Query::new(&array, QueryType::Read)?;
        query.set_layout(Layout::Unordered)?;
        if let Some(condition) = condition {
            query.set_condition(condition)?;
        }
        query.set_data_buffer(DIMENSION, &mut d)?;
        query.set_data_buffer(INT_ATTRIBUTE, &mut a1)?;
        query.set_data_buffer(STRING_ATTRIBUTE, &mut a2_data)?;
        query.set_offsets_buffer(STRING_ATTRIBUTE, &mut a2_offsets)?;
        query.set_data_buffer(NULLABLE_ATTRIBUTE, &mut a3)?;
        query.set_validity_buffer(NULLABLE_ATTRIBUTE, &mut a3_validity)?;
        query.submit()?;

        let status = query.status()?;
        anyhow::ensure!(
            status == QueryStatus::Completed,
            "Read did not complete: {status}"
        );
        query.result_buffer_elements()
    };

    let num_cells = |field: &str| -> anyhow::Result<(usize, usize)> {
        let Some((offsets, data)) = elements.get(field) else {
            anyhow::bail!("No result sizes for field '{field}'");
        };
        Ok((*offsets as usize, *data as usize))
    };

    let (_, n) = num_cells(DIMENSION)?;
    d.truncate(n);
    a1.truncate(num_cells(INT_ATTRIBUTE)?.1);
    let (num_offsets, num_bytes) = num_cells(STRING_ATTRIBUTE)?;
    a2_offsets.truncate(num_offsets);
    a2_data.truncate(num_bytes);
    a3.truncate(num_cells(NULLABLE_ATTRIBUTE)?.1);

    let a3 = a3
        .into_iter()
        .zip(a3_validity)
        .map(|(value, valid)| (valid != 0).then_some(value))
        .collect();

    Ok(Cells {
        d,
        a1,
        a2: unpack_strings(&a2_offsets, &a2_data)?,
        a3,
    }
    .sorted())
}

/// Packs `strings` back to back, returning the offset of each and the bytes.
pub fn pack_strings(strings: &[String]) -> (Vec<u64>, Vec<u8>) {
    let offsets = var_offsets(strings.iter().map(String::len));
    let data = strings.iter().flat_map(|s| s.bytes()).collect();
    (offsets, data)
}

/// Splits `data` at each of `offsets`.
pub fn unpack_strings(offsets: &[u64], data: &[u8]) -> anyhow::Result<Vec<String>> {
    offsets
        .iter()
        .map(|o| *o as usize)
        .chain(std::iter::once(data.len()))
        .tuple_windows()
        .map(|(start, end)| {
            anyhow::ensure!(start <= end && end <= data.len(), "Invalid offsets");
            Ok(String::from_utf8(data[start..end].to_vec())?)
        })
        .process_results(|strings| strings.collect())
}
