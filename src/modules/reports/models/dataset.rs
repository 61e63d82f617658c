use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{AppError, Result};

/// X-axis label of a series bundle: a month number or free text such as "Total"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Month(u32),
    Label(String),
}

impl Category {
    pub fn label(text: impl Into<String>) -> Self {
        Category::Label(text.into())
    }
}

/// One named line of values, positionally aligned with the bundle's categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub data: Vec<Decimal>,
}

impl Series {
    pub fn new(name: impl Into<String>, data: Vec<Decimal>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Categories plus series; every series has exactly one value per category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesBundle {
    categories: Vec<Category>,
    series: Vec<Series>,
}

impl SeriesBundle {
    pub fn new(categories: Vec<Category>, series: Vec<Series>) -> Result<Self> {
        if let Some(bad) = series.iter().find(|s| s.data.len() != categories.len()) {
            return Err(AppError::validation(format!(
                "series '{}' has {} values for {} categories",
                bad.name,
                bad.data.len(),
                categories.len()
            )));
        }

        Ok(Self { categories, series })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Append one category at the end, with one value per series in series order
    pub fn push_category(&mut self, category: Category, values: Vec<Decimal>) -> Result<()> {
        if values.len() != self.series.len() {
            return Err(AppError::validation(format!(
                "{} values supplied for {} series",
                values.len(),
                self.series.len()
            )));
        }

        self.categories.push(category);
        for (series, value) in self.series.iter_mut().zip(values) {
            series.data.push(value);
        }

        Ok(())
    }
}

/// A single label/value pair of a simple breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: Decimal,
}

impl LabeledValue {
    pub fn new(label: impl Into<String>, value: Decimal) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Output of a report handler
#[derive(Debug, Clone, PartialEq)]
pub enum ReportDataset {
    /// The template loads its own data; nothing to hand over
    Empty,
    Values(Vec<LabeledValue>),
    Series(SeriesBundle),
    /// Monthly series per year, with the years covered
    YearOverYear { years: Vec<i32>, data: SeriesBundle },
}

impl ReportDataset {
    /// Flatten into template fields under `data_key`
    pub fn into_fields(self, data_key: Option<&str>) -> Result<Map<String, Value>> {
        let mut fields = Map::new();

        let (data, years) = match self {
            ReportDataset::Empty => return Ok(fields),
            ReportDataset::Values(values) => (serde_json::to_value(values)?, None),
            ReportDataset::Series(bundle) => (serde_json::to_value(bundle)?, None),
            ReportDataset::YearOverYear { years, data } => {
                (serde_json::to_value(data)?, Some(years))
            }
        };

        let key = data_key.ok_or_else(|| {
            AppError::internal("report produced data but declares no data key")
        })?;
        fields.insert(key.to_string(), data);

        if let Some(years) = years {
            fields.insert("years".to_string(), serde_json::to_value(years)?);
        }

        Ok(fields)
    }
}
