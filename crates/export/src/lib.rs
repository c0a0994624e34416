//! Export helpers for delta-v tables.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod csv {
    use std::io::{self, Write};

    use dvmap_calculator::BodyEstimate;

    pub const HEADER: &str =
        "body,category,parent,departure_m_s,transit_m_s,target_m_s,delta_v_m_s";

    /// Write the header followed by one row per estimate.
    pub fn write_table(writer: &mut dyn Write, rows: &[BodyEstimate<'_>]) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)?;
        for row in rows {
            writeln!(
                writer,
                "{},{},{},{:.1},{:.1},{:.1},{:.1}",
                row.name,
                row.category.label(),
                row.parent().unwrap_or(""),
                row.breakdown.departure_m_s,
                row.breakdown.transit_m_s,
                row.breakdown.target_m_s,
                row.delta_v_m_s(),
            )?;
        }
        writer.flush()
    }
}

pub mod json {
    use std::io::{self, Write};

    use dvmap_calculator::{BodyEstimate, DeltaVBreakdown};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    #[derive(Serialize)]
    struct TableDocument<'a> {
        home: &'a str,
        unit: &'static str,
        bodies: Vec<Row<'a>>,
    }

    #[derive(Serialize)]
    struct Row<'a> {
        body: &'a str,
        category: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        parent: Option<&'a str>,
        delta_v_m_s: f64,
        legs: DeltaVBreakdown,
    }

    /// Write the table as a pretty-printed JSON document.
    pub fn write_table(
        writer: &mut dyn Write,
        home: &str,
        rows: &[BodyEstimate<'_>],
    ) -> io::Result<()> {
        let document = TableDocument {
            home,
            unit: "m/s",
            bodies: rows
                .iter()
                .map(|row| Row {
                    body: row.name,
                    category: row.category.label(),
                    parent: row.parent(),
                    delta_v_m_s: row.delta_v_m_s(),
                    legs: row.breakdown,
                })
                .collect(),
        };
        to_writer_pretty(&mut *writer, &document)?;
        writeln!(writer)?;
        writer.flush()
    }
}
