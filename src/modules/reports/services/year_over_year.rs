use rust_decimal::Decimal;

use crate::core::{AppError, Result};
use crate::modules::reports::models::{Category, SeriesBundle};

pub const MONTHS_IN_YEAR: usize = 12;
pub const TOTAL_LABEL: &str = "Total";

/// Append a "Total" category at index 12 holding each series' sum of months 1-12.
///
/// The raw bundle must cover exactly twelve months; month order is untouched.
pub fn append_total(mut bundle: SeriesBundle) -> Result<SeriesBundle> {
    if bundle.categories().len() != MONTHS_IN_YEAR {
        return Err(AppError::internal(format!(
            "year-over-year data must cover {} months, got {} categories",
            MONTHS_IN_YEAR,
            bundle.categories().len()
        )));
    }

    let totals = bundle
        .series()
        .iter()
        .map(|series| {
            series.data[..MONTHS_IN_YEAR]
                .iter()
                .try_fold(Decimal::ZERO, |total, value| total.checked_add(*value))
                .ok_or_else(|| {
                    AppError::internal(format!(
                        "year-over-year total overflows for series '{}'",
                        series.name
                    ))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    bundle.push_category(Category::label(TOTAL_LABEL), totals)?;
    Ok(bundle)
}

/// Years compared by the report: `current - years_back ..= current`, ascending
pub fn comparison_years(current_year: i32, years_back: u32) -> Vec<i32> {
    let years_back = i32::try_from(years_back).unwrap_or(i32::MAX);
    (current_year.saturating_sub(years_back)..=current_year).collect()
}
