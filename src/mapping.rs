use crate::error::CurateError;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// One row of the mapping table. Trailing columns beyond `culture` are
/// ignored by the deserializer.
#[derive(Deserialize)]
struct MappingRow {
    library: String,
    culture: String,
}

/// The library-to-culture name mapping, loaded once per run and immutable
/// afterwards. Insertion order follows the file.
#[derive(Debug)]
pub struct CultureMapping {
    map: IndexMap<String, String>,
}

impl CultureMapping {
    /// Reads the tab-separated mapping table. A missing file is a fatal
    /// precondition; a malformed row is a hard error too, since every later
    /// lookup depends on this table.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CurateError::FatalMissingMapping(path.to_path_buf()).into());
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("could not open mapping table {}", path.display()))?;

        let mut map = IndexMap::new();
        for row in reader.deserialize() {
            let row: MappingRow =
                row.with_context(|| format!("malformed row in {}", path.display()))?;
            map.insert(row.library, row.culture);
        }

        Ok(CultureMapping { map })
    }

    pub fn culture(&self, library: &str) -> Option<&str> {
        self.map.get(library).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::CultureMapping;
    use crate::error::CurateError;
    use std::io::Write;

    #[test]
    fn loads_and_ignores_extra_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "library\tculture\tnotes").unwrap();
        writeln!(file, "lib01\tCultureA\tsomething").unwrap();
        writeln!(file, "lib02\tCultureB\t").unwrap();

        let mapping = CultureMapping::from_path(file.path()).unwrap();
        assert!(!mapping.is_empty());
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.culture("lib01"), Some("CultureA"));
        assert_eq!(mapping.culture("lib02"), Some("CultureB"));
        assert_eq!(mapping.culture("lib03"), None);
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = CultureMapping::from_path(std::path::Path::new("/does/not/exist.tsv"))
            .unwrap_err();
        let err = err.downcast::<CurateError>().unwrap();
        assert!(err.is_fatal());
    }
}
