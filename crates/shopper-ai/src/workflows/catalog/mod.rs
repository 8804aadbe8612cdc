//! CSV catalog import: hydrates a [`CategoryCatalog`] from an exported
//! spreadsheet of candidate products.

mod parser;

use crate::workflows::shopping::domain::{CatalogError, CategoryCatalog, ProductCandidate};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
    Catalog(CatalogError),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::InvalidField { line, field, value } => {
                write!(f, "line {line}: {field} value '{value}' is not a valid number")
            }
            CatalogImportError::Catalog(err) => {
                write!(f, "could not build catalog from CSV rows: {}", err)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::InvalidField { .. } => None,
            CatalogImportError::Catalog(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<CatalogError> for CatalogImportError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

/// Importer for `Category,Name,Brand,Price,Currency,Rating,Sustainability`
/// exports. Categories keep their first-seen order and candidates keep row
/// order, so an imported catalog deliberates exactly like the equivalent
/// JSON payload.
pub struct CatalogCsvImporter;

impl CatalogCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CategoryCatalog, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<CategoryCatalog, CatalogImportError> {
        let mut grouped: Vec<(String, Vec<ProductCandidate>)> = Vec::new();

        for record in parser::parse_records(reader)? {
            match grouped
                .iter_mut()
                .find(|(category, _)| *category == record.category)
            {
                Some((_, candidates)) => candidates.push(record.candidate),
                None => grouped.push((record.category, vec![record.candidate])),
            }
        }

        let catalog = CategoryCatalog::from_entries(grouped)?;
        catalog.validate()?;
        Ok(catalog)
    }
}
