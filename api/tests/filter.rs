use proptest::prelude::*;
use tiledb_api::{
    Context, Datatype, Error, Filter, FilterList, FilterOption, FilterOptionValue, FilterType,
};
use tiledb_common::filter::FilterOptionError;

#[test]
fn compression_level() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut filter = Filter::new(&context, FilterType::Zstd)?;
    assert_eq!(FilterType::Zstd, filter.filter_type()?);

    filter.set_option(FilterOptionValue::CompressionLevel(5))?;
    assert_eq!(
        FilterOptionValue::CompressionLevel(5),
        filter.get_option(FilterOption::CompressionLevel)?
    );
    Ok(())
}

#[test]
fn reinterpret_datatype() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut filter = Filter::new(&context, FilterType::Gzip)?;
    filter.set_option(FilterOptionValue::CompressionReinterpretDatatype(
        Datatype::UInt16,
    ))?;
    assert_eq!(
        FilterOptionValue::CompressionReinterpretDatatype(Datatype::UInt16),
        filter.get_option(FilterOption::CompressionReinterpretDatatype)?
    );
    Ok(())
}

#[test]
fn option_not_accepted() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut filter = Filter::new(&context, FilterType::Zstd)?;
    assert!(matches!(
        filter.set_option(FilterOptionValue::BitWidthMaxWindow(8)),
        Err(Error::FilterOption(FilterOptionError::NotAccepted(
            FilterType::Zstd,
            FilterOption::BitWidthMaxWindow
        )))
    ));
    assert!(matches!(
        filter.get_option(FilterOption::ScaleFloatFactor),
        Err(Error::FilterOption(FilterOptionError::NotAccepted(..)))
    ));
    Ok(())
}

#[test]
fn scale_float() -> anyhow::Result<()> {
    let context = Context::new()?;
    let filter = Filter::with_options(
        &context,
        FilterType::ScaleFloat,
        [
            FilterOptionValue::ScaleFloatByteWidth(4),
            FilterOptionValue::ScaleFloatFactor(0.5),
            FilterOptionValue::ScaleFloatOffset(-1.0),
        ],
    )?;
    assert_eq!(
        FilterOptionValue::ScaleFloatByteWidth(4),
        filter.get_option(FilterOption::ScaleFloatByteWidth)?
    );
    assert_eq!(
        FilterOptionValue::ScaleFloatFactor(0.5),
        filter.get_option(FilterOption::ScaleFloatFactor)?
    );
    assert_eq!(
        FilterOptionValue::ScaleFloatOffset(-1.0),
        filter.get_option(FilterOption::ScaleFloatOffset)?
    );

    let mut filter = filter;
    assert!(matches!(
        filter.set_option(FilterOptionValue::ScaleFloatByteWidth(3)),
        Err(Error::FilterOption(FilterOptionError::InvalidValue(..)))
    ));
    Ok(())
}

#[test]
fn filter_list() -> anyhow::Result<()> {
    let context = Context::new()?;
    let mut list = FilterList::new(&context)?;
    assert_eq!(0, list.num_filters()?);

    list.add_filter(&Filter::new(&context, FilterType::BitWidthReduction)?)?;
    list.add_filter(&Filter::new(&context, FilterType::Lz4)?)?;
    list.set_max_chunk_size(16 * 1024)?;

    assert_eq!(2, list.num_filters()?);
    assert_eq!(16 * 1024, list.max_chunk_size()?);
    assert_eq!(FilterType::Lz4, list.filter_from_index(1)?.filter_type()?);
    assert!(list.filter_from_index(2).is_err());
    Ok(())
}

fn instance_filter_default_options(filter_type: FilterType) -> anyhow::Result<()> {
    let context = Context::new()?;
    let filter = Filter::new(&context, filter_type)?;
    for option in filter_type.options() {
        let value = filter.get_option(option)?;
        anyhow::ensure!(value.option() == option, "{value:?} is not {option}");
    }
    Ok(())
}

proptest! {
    #[test]
    fn proptest_filter_default_options(filter_type in any::<FilterType>()) {
        // Not every build of the library includes WebP.
        prop_assume!(filter_type != FilterType::WebP);
        instance_filter_default_options(filter_type)
            .expect("Error in instance_filter_default_options");
    }
}
