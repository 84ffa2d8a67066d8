use crate::error::CurateError;
use crate::fasta::{FastaFile, Record};
use crate::mapping::CultureMapping;
use crate::quality::{BinClass, QualityReport};

use anyhow::{Context, Result};
use std::fs;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const QUALITY_REPORT: &str = "checkm.txt";
const TAXONOMY_FILE: &str = "gtdbtk.txt";

/// Reorganises per-sample genome bins into one combined output collection.
///
/// Two preconditions are fatal: the root input directory and the culture
/// mapping table must exist. Everything else that is missing is warned
/// about and skipped so one broken sample cannot abort the run.
///
/// # Arguments
///
/// * `input` - The root directory, one subdirectory per library
/// * `mapping_path` - The tab-separated library-to-culture table
/// * `output` - The combined output directory, created if absent
pub fn curate(input: &Path, mapping_path: &Path, output: &Path) -> Result<()> {
    if !input.is_dir() {
        return Err(CurateError::FatalMissingRoot(input.to_path_buf()).into());
    }

    let mapping = CultureMapping::from_path(mapping_path)?;
    info!("loaded {} culture mappings", mapping.len());

    fs::create_dir_all(output)
        .with_context(|| format!("could not create output directory {}", output.display()))?;

    let mut written = 0usize;

    for sample_dir in sorted_subdirectories(input)? {
        let library = match sample_dir.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };

        let culture = match mapping.culture(&library) {
            Some(culture) => culture.to_string(),
            None => {
                warn!("{}", CurateError::UnmappedLibrary(library));
                continue;
            }
        };

        info!("processing {library} as {culture}");
        written += curate_sample(&sample_dir, &library, &culture, output)?;
    }

    info!("wrote {written} files to {}", output.display());
    Ok(())
}

/// Subdirectories of `dir`, sorted by name so that run order (and therefore
/// bin numbering) is deterministic across platforms.
fn sorted_subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("could not list {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();

    dirs.sort();
    Ok(dirs)
}

/// The `*.fasta` files under a sample's bins directory, sorted by file name.
fn sorted_bin_files(bins_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut bins: Vec<PathBuf> = fs::read_dir(bins_dir)
        .with_context(|| format!("could not list {}", bins_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().map(|e| e == "fasta").unwrap_or(false)
        })
        .collect();

    bins.sort();
    Ok(bins)
}

/// Processes one sample directory, returning the number of output files
/// created. Missing bins directories, quality reports, metadata files and
/// unreadable individual bins are all skippable.
fn curate_sample(
    sample_dir: &Path,
    library: &str,
    culture: &str,
    output: &Path,
) -> Result<usize> {
    let bins_dir = sample_dir.join("bins");
    if !bins_dir.is_dir() {
        warn!(
            "{}",
            CurateError::MissingBins {
                library: library.to_string(),
                path: bins_dir,
            }
        );
        return Ok(0);
    }

    let quality_path = sample_dir.join(QUALITY_REPORT);
    let quality = if quality_path.is_file() {
        match QualityReport::from_path(&quality_path) {
            Ok(quality) => quality,
            Err(err) => {
                warn!("could not read quality report for {library}: {err}; all bins default to BIN");
                QualityReport::default()
            }
        }
    } else {
        warn!("no quality report for {library}; all bins default to BIN");
        QualityReport::default()
    };

    let mut written = 0usize;
    let mut mag_count = 0usize;
    let mut bin_count = 0usize;

    for bin_path in sorted_bin_files(&bins_dir)? {
        let stem = bin_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        let text = match fs::read_to_string(&bin_path) {
            Ok(text) => text,
            Err(source) => {
                warn!(
                    "{}",
                    CurateError::UnreadableBin {
                        path: bin_path.clone(),
                        source,
                    }
                );
                continue;
            }
        };

        let fasta = FastaFile::parse(&text);

        // MAG and BIN are numbered independently, in bin-file order
        let (out_name, label) = match quality.classify(stem) {
            BinClass::Mag => {
                mag_count += 1;
                (
                    format!("{culture}_MAG_{mag_count:03}.fa"),
                    format!("{culture}_MAG_{mag_count:03}"),
                )
            }
            BinClass::Bin => {
                bin_count += 1;
                (
                    format!("{culture}_BIN_{bin_count:03}.fa"),
                    format!("{culture}_BIN_{bin_count:03}"),
                )
            }
            BinClass::Unbinned => (
                format!("{culture}_UNBINNED.fa"),
                format!("{culture}_UNBINNED"),
            ),
        };

        let out_path = output.join(&out_name);
        if !out_path.exists() {
            written += 1;
        }

        // append so that several unbinned inputs share one output file
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&out_path)
            .with_context(|| format!("could not open output file {}", out_path.display()))?;
        let mut writer = BufWriter::new(file);

        for record in &fasta.records {
            write_relabeled(&mut writer, record, &label)?;
        }
        writer.flush()?;
    }

    written += copy_metadata(&quality_path, output, &format!("{culture}-CHECKM.txt"))?;
    written += copy_metadata(
        &sample_dir.join(TAXONOMY_FILE),
        output,
        &format!("{culture}-GTDB-TAX.txt"),
    )?;

    Ok(written)
}

/// Writes one record with its header rewritten to `>{label}_{original}`,
/// leaving every sequence line untouched.
fn write_relabeled(writer: &mut impl Write, record: &Record, label: &str) -> Result<()> {
    writeln!(writer, ">{}_{}", label, record.header)?;
    for line in &record.lines {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Copies an optional per-sample metadata file verbatim under its new name,
/// returning how many files were written (0 or 1).
fn copy_metadata(source: &Path, output: &Path, new_name: &str) -> Result<usize> {
    if !source.is_file() {
        warn!("metadata file {} not found, skipping", source.display());
        return Ok(0);
    }

    let dest = output.join(new_name);
    fs::copy(source, &dest)
        .with_context(|| format!("could not copy {} to {}", source.display(), dest.display()))?;
    Ok(1)
}
