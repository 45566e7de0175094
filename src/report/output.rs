use std::io;
use std::io::Write;

use clap::ValueEnum;

use super::BoundRecord;
use super::BoundReport;
use crate::bounds::BoundKind;

/// The formats in which a [`BoundReport`] can be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// A header row followed by one row per instance
    #[default]
    Csv,
    /// An array with one object per instance
    Json,
    /// A table with one row per instance
    Markdown,
}

/// The column name of each optional bound.
const OPTIONAL_COLUMNS: [(BoundKind, &str); 3] = [
    (BoundKind::Efficiency, "efficiency_bound"),
    (BoundKind::SumOverPacking, "sum_over_packing_bound"),
    (BoundKind::LocalSearchPacking, "local_search_packing_bound"),
];

impl BoundReport {
    pub fn write(&self, format: OutputFormat, writer: impl Write) -> io::Result<()> {
        match format {
            OutputFormat::Csv => self.write_csv(writer),
            OutputFormat::Json => self.write_json(writer),
            OutputFormat::Markdown => self.write_markdown(writer),
        }
    }

    fn columns(&self) -> Vec<&'static str> {
        let mut columns = vec![
            "name",
            "node_count",
            "edge_count",
            "optimum",
            "max_degree_bound",
            "sum_degree_bound",
            "packing_bound",
        ];
        columns.extend(
            OPTIONAL_COLUMNS
                .iter()
                .filter(|(kind, _)| self.bounds.contains(*kind))
                .map(|&(_, column)| column),
        );
        columns
    }

    fn row(&self, record: &BoundRecord) -> Vec<String> {
        let mut row = vec![
            record.name.clone(),
            record.node_count.to_string(),
            record.edge_count.to_string(),
            record.optimum.to_string(),
            record.max_degree_bound.to_string(),
            record.sum_degree_bound.to_string(),
            record.packing_bound.to_string(),
        ];
        row.extend(
            OPTIONAL_COLUMNS
                .iter()
                .filter(|(kind, _)| self.bounds.contains(*kind))
                .map(|&(kind, _)| {
                    record
                        .bound(kind)
                        .map(|bound| bound.to_string())
                        .unwrap_or_default()
                }),
        );
        row
    }

    /// Writes the report as CSV.
    ///
    /// # Example
    /// ```rust
    /// # use hs_bounds::report::BoundReport;
    /// # use hs_bounds::BoundKind;
    /// let report = BoundReport {
    ///     records: vec![],
    ///     bounds: BoundKind::mandatory(),
    /// };
    /// let mut csv = Vec::new();
    /// report.write_csv(&mut csv).unwrap();
    /// assert_eq!(
    ///     String::from_utf8(csv).unwrap(),
    ///     "name,node_count,edge_count,optimum,max_degree_bound,sum_degree_bound,packing_bound\n"
    /// );
    /// ```
    pub fn write_csv(&self, mut writer: impl Write) -> io::Result<()> {
        writeln!(writer, "{}", self.columns().join(","))?;
        for record in &self.records {
            let row: Vec<String> = self
                .row(record)
                .into_iter()
                .map(|field| escape_csv(&field))
                .collect();
            writeln!(writer, "{}", row.join(","))?;
        }
        Ok(())
    }

    /// Writes the report as a pretty-printed JSON array.
    pub fn write_json(&self, mut writer: impl Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut writer, &self.records)?;
        writeln!(writer)
    }

    /// Writes the report as a Markdown table.
    pub fn write_markdown(&self, mut writer: impl Write) -> io::Result<()> {
        let columns = self.columns();
        writeln!(writer, "| {} |", columns.join(" | "))?;
        writeln!(
            writer,
            "|{}|",
            columns
                .iter()
                .map(|column| "-".repeat(column.len() + 2))
                .collect::<Vec<_>>()
                .join("|")
        )?;
        for record in &self.records {
            writeln!(writer, "| {} |", self.row(record).join(" | "))?;
        }
        Ok(())
    }
}

fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}
