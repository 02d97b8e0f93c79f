use proptest::prelude::*;
use tiledb_api::{
    Array, ArraySchema, ArrayType, Attribute, CombinationOp, Context, Datatype, Dimension, Domain,
    Error, Layout, Query, QueryCondition, QueryConditionExpr, QueryConditionOp, QueryType,
};
use tiledb_test_support::{Cells, DIMENSION, INT_ATTRIBUTE, NULLABLE_ATTRIBUTE, STRING_ATTRIBUTE};

/// An array holding the canned cells, removed when dropped.
struct CannedArray {
    context: Context,
    uri: String,
    _dir: tempfile::TempDir,
}

impl CannedArray {
    fn new() -> anyhow::Result<Self> {
        let context = Context::new()?;
        let dir = tiledb_test_support::temp_dir()?;
        let uri = tiledb_test_support::uri_in(dir.path(), "conditions")?;
        tiledb_test_support::create_sparse_array(
            &context,
            &uri,
            &tiledb_test_support::canned_cells(),
        )?;
        Ok(CannedArray {
            context,
            uri,
            _dir: dir,
        })
    }

    /// Returns the coordinates of the cells which satisfy `condition`.
    fn select(&self, condition: &QueryCondition) -> anyhow::Result<Vec<i32>> {
        let cells = tiledb_test_support::read_cells(&self.context, &self.uri, Some(condition))?;
        Ok(cells.d)
    }

    fn select_expr(&self, expr: &QueryConditionExpr) -> anyhow::Result<Vec<i32>> {
        self.select(&QueryCondition::build(&self.context, expr)?)
    }
}

#[test]
fn comparison() -> anyhow::Result<()> {
    let array = CannedArray::new()?;
    let context = &array.context;

    let gt = QueryCondition::new(context, INT_ATTRIBUTE, QueryConditionOp::Greater, 1i32)?;
    assert_eq!(vec![2, 3, 4], array.select(&gt)?);

    let le = QueryCondition::new(context, INT_ATTRIBUTE, QueryConditionOp::LessEqual, 2i32)?;
    assert_eq!(vec![1, 2], array.select(&le)?);

    let ne = QueryCondition::new(context, INT_ATTRIBUTE, QueryConditionOp::NotEqual, 3i32)?;
    assert_eq!(vec![1, 2, 4], array.select(&ne)?);
    Ok(())
}

#[test]
fn string_comparison() -> anyhow::Result<()> {
    let array = CannedArray::new()?;
    let eq = QueryCondition::new_bytes(
        &array.context,
        STRING_ATTRIBUTE,
        QueryConditionOp::Equal,
        b"beta",
    )?;
    assert_eq!(vec![2], array.select(&eq)?);
    Ok(())
}

#[test]
fn nullness() -> anyhow::Result<()> {
    let array = CannedArray::new()?;
    let context = &array.context;

    let is_null = QueryCondition::new_null(context, NULLABLE_ATTRIBUTE, QueryConditionOp::Equal)?;
    assert_eq!(vec![2], array.select(&is_null)?);

    let not_null =
        QueryCondition::new_null(context, NULLABLE_ATTRIBUTE, QueryConditionOp::NotEqual)?;
    assert_eq!(vec![1, 3, 4], array.select(&not_null)?);

    assert!(matches!(
        QueryCondition::new_null(context, NULLABLE_ATTRIBUTE, QueryConditionOp::Less),
        Err(Error::InvalidArgument(_))
    ));
    Ok(())
}

#[test]
fn combination() -> anyhow::Result<()> {
    let array = CannedArray::new()?;
    let context = &array.context;

    let lo = QueryCondition::new(context, INT_ATTRIBUTE, QueryConditionOp::GreaterEqual, 2i32)?;
    let hi = QueryCondition::new(context, INT_ATTRIBUTE, QueryConditionOp::Less, 4i32)?;
    assert_eq!(vec![2, 3], array.select(&lo.combine(CombinationOp::And, &hi)?)?);
    assert_eq!(vec![1, 2, 3, 4], array.select(&lo.combine(CombinationOp::Or, &hi)?)?);
    assert_eq!(vec![4], array.select(&hi.negate()?)?);

    assert!(matches!(
        lo.combine(CombinationOp::Not, &hi),
        Err(Error::InvalidArgument(_))
    ));
    Ok(())
}

#[test]
fn set_membership() -> anyhow::Result<()> {
    let array = CannedArray::new()?;
    let context = &array.context;

    let ints =
        QueryCondition::set_membership(context, INT_ATTRIBUTE, QueryConditionOp::In, [1i32, 3])?;
    assert_eq!(vec![1, 3], array.select(&ints)?);

    let strings = QueryCondition::set_membership(
        context,
        STRING_ATTRIBUTE,
        QueryConditionOp::NotIn,
        ["alpha", "delta"],
    )?;
    assert_eq!(vec![2, 3], array.select(&strings)?);

    assert!(matches!(
        QueryCondition::set_membership(context, INT_ATTRIBUTE, QueryConditionOp::Equal, [1i32]),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        QueryCondition::set_membership(
            context,
            INT_ATTRIBUTE,
            QueryConditionOp::In,
            Vec::<i32>::new()
        ),
        Err(Error::InvalidArgument(_))
    ));
    Ok(())
}

#[test]
fn build_expression() -> anyhow::Result<()> {
    let array = CannedArray::new()?;
    type Q = QueryConditionExpr;

    let expr = Q::field(INT_ATTRIBUTE).le(2i32) | Q::field(NULLABLE_ATTRIBUTE).is_null();
    assert_eq!(vec![1, 2], array.select_expr(&expr)?);

    let expr = !Q::field(INT_ATTRIBUTE).lt(3i32);
    assert_eq!(vec![3, 4], array.select_expr(&expr)?);

    let expr = Q::field(STRING_ATTRIBUTE).eq("gamma") & Q::field(NULLABLE_ATTRIBUTE).gt(15i64);
    assert_eq!(vec![3], array.select_expr(&expr)?);

    let expr = Q::field(NULLABLE_ATTRIBUTE).not_null() & Q::field(INT_ATTRIBUTE).not_in([4i32]);
    assert_eq!(vec![1, 3], array.select_expr(&expr)?);

    let expr = Q::field(STRING_ATTRIBUTE).eq_bytes(b"beta");
    assert_eq!(vec![2], array.select_expr(&expr)?);
    Ok(())
}

#[test]
fn use_enumeration_on_plain_attribute() -> anyhow::Result<()> {
    let array = CannedArray::new()?;
    let mut condition =
        QueryCondition::new(&array.context, INT_ATTRIBUTE, QueryConditionOp::Equal, 1i32)?;
    condition.set_use_enumeration(false)?;
    // an attribute without an enumeration compares its stored values either way
    assert_eq!(vec![1], array.select(&condition)?);

    condition.set_use_enumeration(true)?;
    assert_eq!(vec![1], array.select(&condition)?);
    Ok(())
}

const TIMESTAMP: &str = "t";
const TIMESTAMPS: [i64; 4] = [1623763941, 1623762932, 1623765583, 1623769000];

/// Creates a sparse array at `uri` with dimension `d` and a
/// `DATETIME_SEC` attribute holding [TIMESTAMPS] at coordinates `1..=4`.
fn instance_datetime_array(context: &Context, uri: &str) -> anyhow::Result<()> {
    let d = Dimension::new(context, DIMENSION, Datatype::Int32, [1i32, 100], Some(10))?;
    let mut schema = ArraySchema::new(context, ArrayType::Sparse)?;
    schema.set_domain(&Domain::with_dimensions(context, [&d])?)?;
    schema.add_attribute(&Attribute::new(context, TIMESTAMP, Datatype::DateTimeSecond)?)?;
    schema.check()?;
    Array::create(context, uri, &schema)?;

    let mut coords = vec![1i32, 2, 3, 4];
    let mut timestamps = TIMESTAMPS.to_vec();
    let array = Array::open_new(context, uri, QueryType::Write)?;
    let mut query = Query::new(&array, QueryType::Write)?;
    query.set_layout(Layout::Unordered)?;
    query.set_data_buffer(DIMENSION, &mut coords)?;
    query.set_data_buffer(TIMESTAMP, &mut timestamps)?;
    query.submit()?;
    query.finalize()?;
    Ok(())
}

/// Returns the sorted coordinates of the cells which satisfy `condition`.
fn select_datetime(
    context: &Context,
    uri: &str,
    condition: &QueryCondition,
) -> anyhow::Result<Vec<i32>> {
    let mut coords = vec![0i32; 16];
    let mut timestamps = vec![0i64; 16];
    let array = Array::open_new(context, uri, QueryType::Read)?;
    let elements = {
        let mut query = Query::new(&array, QueryType::Read)?;
        query.set_layout(Layout::Unordered)?;
        query.set_condition(condition)?;
        query.set_data_buffer(DIMENSION, &mut coords)?;
        query.set_data_buffer(TIMESTAMP, &mut timestamps)?;
        query.submit()?;
        query.result_buffer_elements()
    };
    let Some((_, n)) = elements.get(DIMENSION) else {
        anyhow::bail!("No result size for '{DIMENSION}'");
    };
    coords.truncate(*n as usize);
    coords.sort();
    Ok(coords)
}

#[test]
fn datetime_comparison() -> anyhow::Result<()> {
    let context = Context::new()?;
    let dir = tiledb_test_support::temp_dir()?;
    let uri = tiledb_test_support::uri_in(dir.path(), "datetime")?;
    instance_datetime_array(&context, &uri)?;

    let eq = QueryCondition::new(&context, TIMESTAMP, QueryConditionOp::Equal, 1623762932i64)?;
    assert_eq!(vec![2], select_datetime(&context, &uri, &eq)?);

    let le =
        QueryCondition::new(&context, TIMESTAMP, QueryConditionOp::LessEqual, 1623765583i64)?;
    assert_eq!(vec![1, 2, 3], select_datetime(&context, &uri, &le)?);

    type Q = QueryConditionExpr;
    let expr = Q::field(TIMESTAMP).gt(1623762932i64) & Q::field(TIMESTAMP).lt(1623769000i64);
    let between = QueryCondition::build(&context, &expr)?;
    assert_eq!(vec![1, 3], select_datetime(&context, &uri, &between)?);
    Ok(())
}

fn instance_threshold(array: &CannedArray, threshold: i32) -> anyhow::Result<()> {
    let cells = tiledb_test_support::canned_cells();
    let expected = cells
        .a1
        .into_iter()
        .zip(cells.d)
        .filter(|(a1, _)| *a1 > threshold)
        .map(|(_, d)| d)
        .collect::<Vec<i32>>();

    let condition =
        QueryCondition::new(&array.context, INT_ATTRIBUTE, QueryConditionOp::Greater, threshold)?;
    anyhow::ensure!(expected == array.select(&condition)?);
    Ok(())
}

fn instance_build(expr: &QueryConditionExpr) -> anyhow::Result<()> {
    let context = Context::new()?;
    QueryCondition::build(&context, expr)?;
    Ok(())
}

proptest! {
    #[test]
    fn proptest_threshold(threshold in -2i32..=6) {
        let array = CannedArray::new().expect("Error creating canned array");
        instance_threshold(&array, threshold).expect("Error in instance_threshold");
    }

    #[test]
    fn proptest_build(
        expr in tiledb_common::strategy::query_condition_expr(
            vec!["a".to_owned(), "b".to_owned()]
        )
    ) {
        instance_build(&expr).expect("Error in instance_build");
    }
}

#[test]
fn cells_helper_sorts_by_coordinate() {
    let cells = Cells {
        d: vec![2, 1],
        a1: vec![20, 10],
        a2: vec!["b".to_owned(), "a".to_owned()],
        a3: vec![None, Some(1)],
    }
    .sorted();
    assert_eq!(vec![1, 2], cells.d);
    assert_eq!(vec![Some(1), None], cells.a3);
}
