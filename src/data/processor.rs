//! Roster Processor Module
//! Batch filtering, name search and summary statistics over the loaded roster.

use crate::config::ColumnSchema;
use polars::prelude::*;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Label shown for the "no batch filter" choice.
pub const ALL_BATCHES: &str = "All";

/// Batch chosen in the selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BatchSelection {
    #[default]
    All,
    Batch(String),
}

impl fmt::Display for BatchSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchSelection::All => f.write_str(ALL_BATCHES),
            BatchSelection::Batch(label) => f.write_str(label),
        }
    }
}

/// Figures shown in the statistics header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RosterStats {
    pub total_students: usize,
    pub total_batches: usize,
}

impl RosterStats {
    pub fn from_frame(df: &DataFrame, batch_col: &str) -> Result<Self, ProcessorError> {
        Ok(Self {
            total_students: df.height(),
            total_batches: distinct_values(df, batch_col)?.len(),
        })
    }
}

/// Everything the table view needs for one (selection, search) pair.
#[derive(Debug, Clone)]
pub struct RosterView {
    /// Rows of the selected batch
    pub records: DataFrame,
    /// `records` narrowed by the name search; equal to `records` when the search is empty
    pub matches: DataFrame,
    pub search_active: bool,
    pub stats: RosterStats,
}

impl RosterView {
    /// Recompute the whole view from the immutable roster.
    pub fn compute(
        df: &DataFrame,
        columns: &ColumnSchema,
        selection: &BatchSelection,
        search: &str,
    ) -> Result<Self, ProcessorError> {
        let records = RosterProcessor::filter_by_batch(df, &columns.batch, selection)?;
        let matches = RosterProcessor::search_by_name(&records, &columns.name, search)?;
        let stats = RosterStats::from_frame(&records, &columns.batch)?;

        Ok(Self {
            records,
            matches,
            search_active: !search.is_empty(),
            stats,
        })
    }
}

/// Stateless roster queries.
pub struct RosterProcessor;

impl RosterProcessor {
    /// Keep rows of the selected batch, in their original order.
    pub fn filter_by_batch(
        df: &DataFrame,
        batch_col: &str,
        selection: &BatchSelection,
    ) -> Result<DataFrame, ProcessorError> {
        match selection {
            BatchSelection::All => Ok(df.clone()),
            BatchSelection::Batch(label) => {
                let filtered = df
                    .clone()
                    .lazy()
                    .filter(col(batch_col).eq(lit(label.as_str())))
                    .collect()?;
                Ok(filtered)
            }
        }
    }

    /// Keep rows whose name contains `term`, ignoring case.
    ///
    /// The term is a plain substring, not a pattern, and whitespace in it is significant.
    /// Only an empty term keeps every row.
    pub fn search_by_name(
        df: &DataFrame,
        name_col: &str,
        term: &str,
    ) -> Result<DataFrame, ProcessorError> {
        if term.is_empty() {
            return Ok(df.clone());
        }
        let needle = term.to_lowercase();

        let names = df.column(name_col)?.as_materialized_series().str()?;
        let mask: Vec<bool> = names
            .into_iter()
            .map(|name| name.is_some_and(|n| n.to_lowercase().contains(&needle)))
            .collect();

        Ok(df.filter(&BooleanChunked::new("mask".into(), mask))?)
    }

    /// Sorted distinct batch labels for the selector.
    pub fn batch_options(df: &DataFrame, batch_col: &str) -> Result<Vec<String>, ProcessorError> {
        Ok(distinct_values(df, batch_col)?.into_iter().collect())
    }
}

fn distinct_values(df: &DataFrame, column: &str) -> Result<BTreeSet<String>, ProcessorError> {
    let values = df.column(column)?.as_materialized_series().str()?;
    Ok(values.into_iter().flatten().map(str::to_string).collect())
}
