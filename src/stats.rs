use crate::fasta::FastaFile;
use itertools::Itertools;
use itertools::MinMaxResult::{MinMax, NoElements, OneElement};
use std::io::Write;

/// Descriptive statistics for one FASTA file, computed fresh per invocation.
///
/// # Fields
///
/// * `sequence_count` - The number of records in the file
/// * `total_length` - The sum of nucleotide letters across every record
/// * `longest` / `shortest` - Extremes of the per-record lengths
/// * `mean_length` - total_length / sequence_count
/// * `gc_percent` - Percentage of nucleotide letters which are G or C
#[derive(Debug, Default, PartialEq)]
pub struct Statistics {
    pub sequence_count: usize,
    pub total_length: usize,
    pub longest: usize,
    pub shortest: usize,
    pub mean_length: f64,
    pub gc_percent: f64,
}

impl Statistics {
    /// Computes statistics over a parsed file. A file with no records, a file
    /// which fails validation, or a file whose sequences contain no nucleotide
    /// letters all take the same zero-statistics path: this is a classified
    /// outcome, not an error, so batch runs never abort on malformed records.
    pub fn compute(fasta: &FastaFile) -> Self {
        if fasta.records.is_empty() || !fasta.validate() {
            return Statistics::default();
        }

        let lengths: Vec<usize> = fasta.records.iter().map(|r| r.length()).collect();
        let total_length: usize = lengths.iter().sum();

        if total_length == 0 {
            return Statistics::default();
        }

        let (shortest, longest) = match lengths.iter().minmax() {
            MinMax(min, max) => (*min, *max),
            OneElement(only) => (*only, *only),
            NoElements => unreachable!("records checked non-empty above"),
        };

        let gc: usize = fasta.records.iter().map(|r| r.gc_count()).sum();

        Statistics {
            sequence_count: fasta.records.len(),
            total_length,
            longest,
            shortest,
            mean_length: total_length as f64 / fasta.records.len() as f64,
            gc_percent: gc as f64 * 100.0 / total_length as f64,
        }
    }

    fn is_zero(&self) -> bool {
        self.sequence_count == 0
    }

    /// Writes the fixed-format report block for one file. On the zero path
    /// every field prints literally as `0`, matching the empty-input report.
    pub fn write_report(&self, writer: &mut impl Write) -> std::io::Result<()> {
        writeln!(writer, "FASTA File Statistics:")?;
        writeln!(writer, "----------------------")?;

        if self.is_zero() {
            writeln!(writer, "Number of sequences: 0")?;
            writeln!(writer, "Total length: 0")?;
            writeln!(writer, "Longest sequence: 0")?;
            writeln!(writer, "Shortest sequence: 0")?;
            writeln!(writer, "Average length: 0")?;
            writeln!(writer, "GC content (%): 0")?;
            return Ok(());
        }

        writeln!(writer, "Number of sequences: {}", self.sequence_count)?;
        writeln!(writer, "Total length: {}", self.total_length)?;
        writeln!(writer, "Longest sequence: {}", self.longest)?;
        writeln!(writer, "Shortest sequence: {}", self.shortest)?;
        // fixed 3dp formatting so output is reproducible across platforms
        writeln!(writer, "Average length: {:.3}", self.mean_length)?;
        writeln!(writer, "GC content (%): {:.3}", self.gc_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::Statistics;
    use crate::fasta::FastaFile;
    use indoc::indoc;

    fn stats_of(text: &str) -> Statistics {
        Statistics::compute(&FastaFile::parse(text))
    }

    #[test]
    fn two_record_file() {
        let stats = stats_of(">s1\nACGT\n>s2\nGGCC\n");
        assert_eq!(stats.sequence_count, 2);
        assert_eq!(stats.total_length, 8);
        assert_eq!(stats.longest, 4);
        assert_eq!(stats.shortest, 4);
        assert_eq!(stats.mean_length, 4.0);
        assert_eq!(stats.gc_percent, 50.0);
    }

    #[test]
    fn multiline_record() {
        let stats = stats_of(">s1\nAC\nGT\n");
        assert_eq!(stats.sequence_count, 1);
        assert_eq!(stats.total_length, 4);
    }

    #[test]
    fn invalid_character_zeroes_everything() {
        assert_eq!(stats_of(">s1\nACGN\n"), Statistics::default());
    }

    #[test]
    fn empty_input_zeroes_everything() {
        assert_eq!(stats_of(""), Statistics::default());
    }

    #[test]
    fn headers_with_empty_sequences_zero() {
        // records exist but no nucleotide letters, so the divide is undefined
        assert_eq!(stats_of(">s1\n \n"), Statistics::default());
    }

    #[test]
    fn extremes_bracket_the_mean() {
        let stats = stats_of(">a\nACGTAC\n>b\nAC\n>c\nACGT\n");
        assert_eq!(stats.total_length, 12);
        assert_eq!(stats.longest, 6);
        assert_eq!(stats.shortest, 2);
        assert!(stats.longest as f64 >= stats.mean_length);
        assert!(stats.mean_length >= stats.shortest as f64);
    }

    #[test]
    fn report_format() {
        let stats = stats_of(">s1\nACGT\n>s2\nGGCC\n");
        let mut out = Vec::new();
        stats.write_report(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            indoc! {"
                FASTA File Statistics:
                ----------------------
                Number of sequences: 2
                Total length: 8
                Longest sequence: 4
                Shortest sequence: 4
                Average length: 4.000
                GC content (%): 50.000
            "}
        );
    }

    #[test]
    fn zero_report_prints_bare_zeroes() {
        let mut out = Vec::new();
        stats_of(">s1\nACGN\n").write_report(&mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Average length: 0\n"));
        assert!(out.contains("GC content (%): 0\n"));
    }
}
