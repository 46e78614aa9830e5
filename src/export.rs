//! Writers for scenario records and membership curves.

use std::borrow::Cow;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::scenario::ScenarioRecord;
use crate::variable::MembershipCurve;

pub const RECORD_HEADER: [&str; 6] = [
    "Scenario_ID",
    "Damage_Severity",
    "Accessibility",
    "Population_Exposure",
    "Priority_Score",
    "Priority_Level",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn write_records<W: Write>(self, writer: W, records: &[ScenarioRecord]) -> Result<()> {
        match self {
            Self::Csv => write_records_csv(writer, records),
            Self::Json => write_records_json(writer, records),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(Error::config(format!("unknown export format `{other}`, expected csv or json"))),
        }
    }
}

/// Quotes a field only when it needs it.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

pub fn write_records_csv<W: Write>(mut writer: W, records: &[ScenarioRecord]) -> Result<()> {
    writeln!(writer, "{}", RECORD_HEADER.join(","))?;

    for r in records {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            r.scenario_id,
            r.damage,
            r.accessibility,
            r.population,
            r.score,
            csv_field(r.level.label())
        )?;
    }

    writer.flush()?;

    Ok(())
}

pub fn write_records_json<W: Write>(mut writer: W, records: &[ScenarioRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// One row per sample: `x` followed by the degree of every term.
pub fn write_curve_csv<W: Write>(mut writer: W, curve: &MembershipCurve) -> Result<()> {
    let header: Vec<_> = std::iter::once("x")
        .chain(curve.terms.iter().map(String::as_str))
        .map(csv_field)
        .collect();

    writeln!(writer, "{}", header.join(","))?;

    for point in &curve.points {
        // Trim the float noise of the sampling grid
        write!(writer, "{}", (point.x * 1e9).round() / 1e9)?;
        for degree in &point.degrees {
            write!(writer, ",{degree}")?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;

    Ok(())
}
