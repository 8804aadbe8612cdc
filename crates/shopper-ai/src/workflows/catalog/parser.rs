use super::CatalogImportError;
use crate::workflows::shopping::domain::{ProductCandidate, DEFAULT_CURRENCY};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct CatalogRecord {
    pub(crate) category: String,
    pub(crate) candidate: ProductCandidate,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<CatalogRecord>, CatalogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = record?;
        // Header occupies line 1; data rows start at line 2.
        let line = index + 2;

        let price = parse_cell::<u64>(row.price.as_deref(), "Price", line)?;
        let rating = parse_cell::<f32>(row.rating.as_deref(), "Rating", line)?;

        records.push(CatalogRecord {
            candidate: ProductCandidate {
                name: row.name,
                brand: row.brand,
                price,
                currency: row
                    .currency
                    .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
                rating,
                sustainability: row.sustainability,
                category: Some(row.category.clone()),
            },
            category: row.category,
        });
    }

    Ok(records)
}

fn parse_cell<T: std::str::FromStr>(
    raw: Option<&str>,
    field: &'static str,
    line: usize,
) -> Result<Option<T>, CatalogImportError> {
    raw.map(|value| {
        value
            .replace(',', "")
            .parse::<T>()
            .map_err(|_| CatalogImportError::InvalidField {
                line,
                field,
                value: value.to_string(),
            })
    })
    .transpose()
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Brand", default, deserialize_with = "empty_string_as_none")]
    brand: Option<String>,
    #[serde(rename = "Price", default, deserialize_with = "empty_string_as_none")]
    price: Option<String>,
    #[serde(rename = "Currency", default, deserialize_with = "empty_string_as_none")]
    currency: Option<String>,
    #[serde(rename = "Rating", default, deserialize_with = "empty_string_as_none")]
    rating: Option<String>,
    #[serde(
        rename = "Sustainability",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    sustainability: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
