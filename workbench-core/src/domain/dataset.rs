// workbench-core/src/domain/dataset.rs

use serde::Serialize;
use std::collections::HashSet;

use crate::domain::error::DomainError;

/// Tabular data under review: ordered unique headers plus positional rows.
///
/// Every row holds exactly `headers.len()` values. The struct has no public
/// fields so the invariant can only be established through [`Dataset::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, DomainError> {
        if headers.is_empty() {
            return Err(DomainError::InvalidDataset(
                "dataset must declare at least one column".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(headers.len());
        for header in &headers {
            if header.trim().is_empty() {
                return Err(DomainError::InvalidDataset(
                    "header names cannot be empty".to_string(),
                ));
            }
            if !seen.insert(header.as_str()) {
                return Err(DomainError::InvalidDataset(format!(
                    "duplicate header '{}'",
                    header
                )));
            }
        }

        for (idx, row) in rows.iter().enumerate() {
            check_width(idx + 1, headers.len(), row)?;
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Returns the record for a 1-based row number.
    pub fn record(&self, row_number: usize) -> Option<RowRecord<'_>> {
        let values = self.rows.get(row_number.checked_sub(1)?)?;
        Some(RowRecord {
            headers: &self.headers,
            values,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = RowRecord<'_>> {
        self.rows.iter().map(|values| RowRecord {
            headers: &self.headers,
            values,
        })
    }

    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(index).map(String::as_str))
    }

    /// Replaces a whole row in place (1-based), keeping the width invariant.
    pub fn replace_row(
        &mut self,
        row_number: usize,
        values: Vec<String>,
    ) -> Result<(), DomainError> {
        let len = self.rows.len();
        let slot = row_number
            .checked_sub(1)
            .and_then(|idx| self.rows.get_mut(idx))
            .ok_or(DomainError::RowNotFound { row_number, len })?;

        check_width(row_number, self.headers.len(), &values)?;
        *slot = values;
        Ok(())
    }
}

fn check_width(row_number: usize, expected: usize, row: &[String]) -> Result<(), DomainError> {
    if row.len() != expected {
        return Err(DomainError::RaggedRow {
            row_number,
            expected,
            found: row.len(),
        });
    }
    Ok(())
}

/// A row viewed through the header names.
#[derive(Debug, Clone, Copy)]
pub struct RowRecord<'a> {
    headers: &'a [String],
    values: &'a [String],
}

impl<'a> RowRecord<'a> {
    pub fn get(&self, field: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|h| h == field)
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.headers.iter().any(|h| h == field)
    }

    pub fn values(&self) -> &'a [String] {
        self.values
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}
