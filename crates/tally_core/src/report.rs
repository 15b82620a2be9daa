use std::collections::HashMap;
use std::fmt;

use crate::Measurement;

/// One line of the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportEntry {
    Measured(Measurement),
    Cancelled,
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportEntry::Measured(measure) => write!(f, "{measure}"),
            ReportEntry::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Final per-URL accounting, ordered by the original input list.
///
/// Holds exactly one entry per input position regardless of how the run
/// ended. The recorded map is keyed by URL value, so duplicate input URLs
/// share a single recorded measurement and each of their positions renders
/// the same entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    entries: Vec<(String, ReportEntry)>,
}

impl Report {
    /// Builds the report covering every input URL in input order. URLs with
    /// no recorded measurement are marked cancelled.
    pub fn build(urls: &[String], recorded: &HashMap<String, Measurement>) -> Self {
        let entries = urls
            .iter()
            .map(|url| {
                let entry = match recorded.get(url) {
                    Some(&measure) => ReportEntry::Measured(measure),
                    None => ReportEntry::Cancelled,
                };
                (url.clone(), entry)
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, ReportEntry)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (url, entry) in &self.entries {
            writeln!(f, "{url}: {entry}")?;
        }
        Ok(())
    }
}
