use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

// CheckM lays its table out with the bin id first, then lineage and marker
// counts, with completeness and contamination at these fixed positions.
const BIN_ID_FIELD: usize = 0;
const COMPLETENESS_FIELD: usize = 11;
const CONTAMINATION_FIELD: usize = 12;

/// Sentinel at the start of the data header row, used to skip any preamble.
const HEADER_SENTINEL: &str = "Bin Id";

/// The quality class of one genome bin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinClass {
    Mag,
    Bin,
    Unbinned,
}

impl fmt::Display for BinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinClass::Mag => "MAG",
            BinClass::Bin => "BIN",
            BinClass::Unbinned => "UNBINNED",
        })
    }
}

/// Externally computed quality metrics for one bin.
#[derive(Debug, Copy, Clone)]
pub struct QualityEntry {
    pub completeness: f64,
    pub contamination: f64,
}

impl QualityEntry {
    /// MAG iff completeness >= 50 and contamination < 5.
    pub fn classify(&self) -> BinClass {
        if self.completeness >= 50.0 && self.contamination < 5.0 {
            BinClass::Mag
        } else {
            BinClass::Bin
        }
    }
}

/// The per-sample quality report, keyed by bin name.
#[derive(Default)]
pub struct QualityReport {
    entries: HashMap<String, QualityEntry>,
}

impl QualityReport {
    /// Parses a CheckM-style tab-separated report. Everything up to and
    /// including the `Bin Id` header row is skipped; truncated rows and rows
    /// whose numeric fields do not parse are warned about and dropped,
    /// letting the affected bin fall back to the missing-entry rule.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("could not open quality report {}", path.display()))?;

        let mut entries = HashMap::new();
        let mut in_data = false;

        for row in reader.records() {
            let row =
                row.with_context(|| format!("malformed row in {}", path.display()))?;

            if !in_data {
                in_data = row
                    .get(BIN_ID_FIELD)
                    .is_some_and(|field| field.trim_start().starts_with(HEADER_SENTINEL));
                continue;
            }

            let bin_id = row.get(BIN_ID_FIELD).unwrap_or_default().trim();

            let (Some(comp), Some(cont)) = (
                row.get(COMPLETENESS_FIELD),
                row.get(CONTAMINATION_FIELD),
            ) else {
                warn!("skipping truncated quality row for bin {bin_id}");
                continue;
            };

            let parsed = comp
                .trim()
                .parse::<f64>()
                .and_then(|comp| cont.trim().parse::<f64>().map(|cont| (comp, cont)));

            match parsed {
                Ok((completeness, contamination)) => {
                    entries.insert(
                        bin_id.to_string(),
                        QualityEntry {
                            completeness,
                            contamination,
                        },
                    );
                }
                Err(_) => warn!("skipping unparseable quality row for bin {bin_id}"),
            }
        }

        Ok(QualityReport { entries })
    }

    /// Classifies a bin by its file stem. A name containing `unbinned`
    /// bypasses the lookup entirely; a missing entry defaults to BIN.
    pub fn classify(&self, bin_name: &str) -> BinClass {
        if bin_name.contains("unbinned") {
            return BinClass::Unbinned;
        }

        match self.entries.get(bin_name) {
            Some(entry) => entry.classify(),
            None => BinClass::Bin,
        }
    }
}
