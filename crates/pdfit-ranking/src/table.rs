//! Tabular summaries of a ranking
//!
//! Rows are candidates in weighted-value order and columns are metrics.
//! Cells hold either the raw scores or the `[0, 1]` values; a cell is empty
//! when the metric could not be computed.

use crate::ranking::Ranking;
use pdfit_core::Family;
use pdfit_scoring::Metric;
use serde::Serialize;
use std::fmt;

/// What the metric cells of a [`ScoreTable`] contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TableKind {
    #[default]
    Scores,
    Values,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub rank: usize,
    pub label: String,
    pub family: Family,
    pub distribution: String,
    pub cells: Vec<Option<f64>>,
    pub weighted_value: f64,
    pub average_rank: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreTable {
    pub kind: TableKind,
    pub metrics: Vec<Metric>,
    pub rows: Vec<ScoreRow>,
}

impl ScoreTable {
    pub fn new(ranking: &Ranking, kind: TableKind) -> Self {
        let metrics = ranking.metrics().to_vec();
        let rows = ranking
            .results()
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let cells = metrics
                    .iter()
                    .enumerate()
                    .map(|(j, &metric)| match kind {
                        TableKind::Scores => result.score(metric).filter(|s| s.valid).map(|s| s.value),
                        TableKind::Values => result.values.get(j).copied(),
                    })
                    .collect();
                ScoreRow {
                    rank: i + 1,
                    label: result.label().to_string(),
                    family: result.family(),
                    distribution: result.distribution().to_string(),
                    cells,
                    weighted_value: result.weighted_value,
                    average_rank: result.average_rank,
                }
            })
            .collect();
        Self { kind, metrics, rows }
    }

    /// Cell for the candidate `label` and `metric`
    pub fn cell(&self, label: &str, metric: Metric) -> Option<f64> {
        let column = self.metrics.iter().position(|&m| m == metric)?;
        let row = self.rows.iter().find(|r| r.label == label)?;
        row.cells.get(column).copied().flatten()
    }
}

impl fmt::Display for ScoreTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self
            .rows
            .iter()
            .map(|r| r.label.len())
            .max()
            .unwrap_or(0)
            .max("Candidate".len());

        write!(f, "{:>4}  {:<label_width$}", "#", "Candidate")?;
        for metric in &self.metrics {
            write!(f, " {:>12}", metric.abbreviation())?;
        }
        writeln!(f, " {:>8} {:>8}", "VALUE", "AVG-RANK")?;

        for row in &self.rows {
            write!(f, "{:>4}  {:<label_width$}", row.rank, row.label)?;
            for cell in &row.cells {
                match cell {
                    Some(v) if v.abs() >= 1e6 => write!(f, " {v:>12.4e}")?,
                    Some(v) => write!(f, " {v:>12.4}")?,
                    None => write!(f, " {:>12}", "-")?,
                }
            }
            writeln!(f, " {:>8.4} {:>8.2}", row.weighted_value, row.average_rank)?;
        }
        Ok(())
    }
}
