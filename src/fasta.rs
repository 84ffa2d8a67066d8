/// A single FASTA record: the header text (without the leading `>`) and the
/// raw sequence lines in file order. Lines are kept verbatim so that a record
/// can be written back out without altering its sequence content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub header: String,
    pub lines: Vec<String>,
}

impl Record {
    /// The number of nucleotide letters (A/C/G/T, case-insensitive) across all
    /// sequence lines of this record. Spaces are legal but never counted.
    pub fn length(&self) -> usize {
        self.lines
            .iter()
            .flat_map(|line| line.chars())
            .filter(|c| matches!(c, 'A' | 'C' | 'G' | 'T' | 'a' | 'c' | 'g' | 't'))
            .count()
    }

    /// The number of G/C letters across all sequence lines of this record.
    pub fn gc_count(&self) -> usize {
        self.lines
            .iter()
            .flat_map(|line| line.chars())
            .filter(|c| matches!(c, 'G' | 'C' | 'g' | 'c'))
            .count()
    }
}

/// A parsed FASTA file. `orphans` counts sequence lines which appeared before
/// any header line; a file containing them is malformed.
#[derive(Debug, Default)]
pub struct FastaFile {
    pub records: Vec<Record>,
    pub orphans: usize,
}

impl FastaFile {
    /// Parses the full text of a FASTA file. Lines starting with `>` begin a
    /// new record and contribute their remainder as the header; every other
    /// line is appended verbatim to the current record. This never fails:
    /// malformed input is classified by `validate`, not raised here.
    pub fn parse(text: &str) -> Self {
        let mut fasta = FastaFile::default();

        for line in text.lines() {
            if let Some(header) = line.strip_prefix('>') {
                fasta.records.push(Record {
                    header: header.to_string(),
                    lines: Vec::new(),
                });
            } else {
                match fasta.records.last_mut() {
                    Some(record) => record.lines.push(line.to_string()),
                    None => fasta.orphans += 1,
                }
            }
        }

        fasta
    }

    /// True iff the file has no orphan lines and every character of every raw
    /// sequence line is one of A/C/G/T (either case) or a space. Ambiguity
    /// codes such as `N` fail this check.
    pub fn validate(&self) -> bool {
        if self.orphans > 0 {
            return false;
        }

        self.records
            .iter()
            .flat_map(|record| record.lines.iter())
            .all(|line| {
                line.chars()
                    .all(|c| matches!(c, 'A' | 'C' | 'G' | 'T' | 'a' | 'c' | 'g' | 't' | ' '))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::FastaFile;

    #[test]
    fn parse_two_records() {
        let fasta = FastaFile::parse(">s1\nACGT\n>s2\nGGCC\n");
        assert_eq!(fasta.records.len(), 2);
        assert_eq!(fasta.records[0].header, "s1");
        assert_eq!(fasta.records[1].lines, vec!["GGCC"]);
        assert_eq!(fasta.orphans, 0);
    }

    #[test]
    fn multiline_sequence_concatenates() {
        let fasta = FastaFile::parse(">s1\nAC\nGT\n");
        assert_eq!(fasta.records.len(), 1);
        assert_eq!(fasta.records[0].length(), 4);
    }

    #[test]
    fn spaces_are_legal_but_uncounted() {
        let fasta = FastaFile::parse(">s1\nAC GT\n");
        assert!(fasta.validate());
        assert_eq!(fasta.records[0].length(), 4);
    }

    #[test]
    fn ambiguity_code_fails_validation() {
        let fasta = FastaFile::parse(">s1\nACGN\n");
        assert_eq!(fasta.records.len(), 1);
        assert!(!fasta.validate());
    }

    #[test]
    fn sequence_before_header_is_malformed() {
        let fasta = FastaFile::parse("ACGT\n>s1\nACGT\n");
        assert_eq!(fasta.orphans, 1);
        assert!(!fasta.validate());
    }

    #[test]
    fn empty_input() {
        let fasta = FastaFile::parse("");
        assert!(fasta.records.is_empty());
        assert!(fasta.validate());
    }

    #[test]
    fn lowercase_counts() {
        let fasta = FastaFile::parse(">s1\nacgt\n");
        assert!(fasta.validate());
        assert_eq!(fasta.records[0].length(), 4);
        assert_eq!(fasta.records[0].gc_count(), 2);
    }
}
