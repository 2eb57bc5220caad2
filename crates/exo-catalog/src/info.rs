//! Label/value rows describing a selected planet.

use std::fmt;

use crate::record::ExoplanetRecord;

const MISSING: &str = "—";

/// One line of the info panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
}

/// Everything the info panel shows for a planet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanetInfo {
    pub rows: Vec<InfoRow>,
}

impl PlanetInfo {
    /// Build the panel rows for a record.
    pub fn from_record(record: &ExoplanetRecord) -> Self {
        let rows = vec![
            row("Name", Some(record.display_name())),
            row("Orbital period", record.koi_period.map(|p| format!("{p} days"))),
            row("Radius", record.koi_prad.map(|r| r.to_string())),
            row("Temperature", record.koi_teq.map(|t| format!("{t} K"))),
            row("Magnitude", record.koi_kepmag.map(|m| m.to_string())),
            row("Insolation", record.koi_insol.map(|i| i.to_string())),
            row("RA", record.ra_str.clone()),
            row("Dec", record.dec_str.clone()),
        ];
        Self { rows }
    }

    /// Value of the row with the given label.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}

fn row(label: &'static str, value: Option<String>) -> InfoRow {
    InfoRow {
        label,
        value: value.unwrap_or_else(|| MISSING.to_string()),
    }
}

impl fmt::Display for PlanetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", row.label, row.value)?;
        }
        Ok(())
    }
}
