// Year-over-year total column

use proptest::prelude::*;
use reportdesk::core::AppError;
use reportdesk::reports::models::{Category, Series, SeriesBundle};
use reportdesk::reports::services::append_total;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn months() -> Vec<Category> {
    (1..=12).map(Category::Month).collect()
}

#[test]
fn test_sum_of_one_to_twelve() {
    let data = (1..=12).map(Decimal::from).collect();
    let bundle = SeriesBundle::new(months(), vec![Series::new("2024", data)]).unwrap();

    let result = append_total(bundle).unwrap();

    assert_eq!(result.categories().len(), 13);
    assert_eq!(result.categories().last(), Some(&Category::label("Total")));
    assert_eq!(result.series()[0].data[12], dec!(78));
}

#[test]
fn test_months_keep_their_order() {
    let data = (1..=12).map(Decimal::from).collect::<Vec<_>>();
    let bundle = SeriesBundle::new(months(), vec![Series::new("2024", data.clone())]).unwrap();

    let result = append_total(bundle).unwrap();

    assert_eq!(&result.categories()[..12], months().as_slice());
    assert_eq!(&result.series()[0].data[..12], data.as_slice());
}

#[test]
fn test_total_serializes_after_month_twelve() {
    let bundle = SeriesBundle::new(months(), vec![Series::new("2023", vec![dec!(2); 12])]).unwrap();
    let json = serde_json::to_value(append_total(bundle).unwrap()).unwrap();

    assert_eq!(json["categories"][11], 12);
    assert_eq!(json["categories"][12], "Total");
    assert_eq!(json["series"][0]["name"], "2023");
}

#[test]
fn test_rejects_bundle_not_covering_twelve_months() {
    let bundle = SeriesBundle::new(
        (1..=13).map(Category::Month).collect(),
        vec![Series::new("2024", vec![dec!(1); 13])],
    )
    .unwrap();

    assert!(matches!(append_total(bundle), Err(AppError::Internal(_))));
}

proptest! {
    #[test]
    fn prop_total_is_sum_of_first_twelve(
        rows in prop::collection::vec(prop::collection::vec(0i64..1_000_000, 12), 0..6)
    ) {
        let series: Vec<Series> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| Series::new(format!("{}", 2020 + i), row.iter().map(|&v| Decimal::from(v)).collect()))
            .collect();
        let bundle = SeriesBundle::new(months(), series).unwrap();

        let result = append_total(bundle).unwrap();

        prop_assert_eq!(result.categories().len(), 13);
        for (series, row) in result.series().iter().zip(&rows) {
            prop_assert_eq!(series.data.len(), 13);
            prop_assert_eq!(series.data[12], Decimal::from(row.iter().sum::<i64>()));
        }
    }
}
