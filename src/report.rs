//! Comparison report: custom digest next to SHA-256, plus avalanche pairs.
//!
//! Everything here sits on top of the pure digest functions. Rendering goes to
//! any `io::Write`; only [`write_report`] touches the filesystem.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{digest, digest_batch, hamming, sha256_hex, DEFAULT_HEX_LEN};

/// Inputs printed by `hexmix hash` when no text is given.
pub const DEFAULT_SAMPLES: [&str; 4] = ["", "hello", "Hello", "The quick brown fox"];

/// Near-identical input pairs used to gauge avalanche behaviour.
pub const AVALANCHE_PAIRS: [(&str, &str); 5] = [
    ("hello", "Hello"),
    ("password1", "password2"),
    ("This is a test.", "This is a test!"),
    ("a", "b"),
    ("", " "),
];

/// Named cases written to `hash_results.csv`.
pub fn named_cases() -> Vec<(&'static str, String)> {
    vec![
        ("empty_string", String::new()),
        ("short_hello", "hello".into()),
        ("short_hello_cap", "Hello".into()),
        ("hello_space", "hello ".into()),
        ("hello_extra", "hello!".into()),
        (
            "long_text",
            "The quick brown fox jumps over the lazy dog".repeat(10),
        ),
        ("single_char_a", "a".into()),
        ("single_char_b", "b".into()),
        ("incremental1", "password1".into()),
        ("incremental2", "password2".into()),
        ("similar1", "This is a test.".into()),
        ("similar2", "This is a test!".into()),
    ]
}

/// Report settings.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub out_dir: PathBuf,
    pub hex_len: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("results"),
            hex_len: DEFAULT_HEX_LEN,
        }
    }
}

/// One row of `hash_results.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashRow {
    pub case: String,
    pub input: String,
    pub custom_hex: String,
    pub sha256_hex: String,
}

/// One row of `avalanche_results.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvalancheRow {
    pub input_a: String,
    pub input_b: String,
    pub custom_a: String,
    pub custom_b: String,
    pub custom_hamming: u32,
    pub sha256_hamming: u32,
}

/// Files produced by [`write_report`].
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub hashes: PathBuf,
    pub avalanche: PathBuf,
    pub summary: PathBuf,
}

/// Digest every case with both hashes.
pub fn hash_rows(cases: &[(&str, String)], hex_len: usize) -> crate::Result<Vec<HashRow>> {
    let inputs: Vec<&str> = cases.iter().map(|(_, text)| text.as_str()).collect();
    let customs = digest_batch(inputs.as_slice(), hex_len)?;

    Ok(cases
        .iter()
        .zip(customs)
        .map(|((case, text), custom_hex)| HashRow {
            case: (*case).to_string(),
            input: text.clone(),
            custom_hex,
            sha256_hex: sha256_hex(text.as_bytes()),
        })
        .collect())
}

/// Digest both sides of every pair and measure the bit distance.
pub fn avalanche_rows(pairs: &[(&str, &str)], hex_len: usize) -> crate::Result<Vec<AvalancheRow>> {
    pairs
        .iter()
        .map(|&(a, b)| {
            let custom_a = digest(a.as_bytes(), hex_len)?;
            let custom_b = digest(b.as_bytes(), hex_len)?;
            let custom_hamming = hamming(&custom_a, &custom_b)?;
            let sha256_hamming = hamming(&sha256_hex(a.as_bytes()), &sha256_hex(b.as_bytes()))?;
            Ok(AvalancheRow {
                input_a: a.to_string(),
                input_b: b.to_string(),
                custom_a,
                custom_b,
                custom_hamming,
                sha256_hamming,
            })
        })
        .collect()
}

/// Mean custom and SHA-256 distances over the rows, `None` when empty.
pub fn mean_distances(rows: &[AvalancheRow]) -> Option<(f64, f64)> {
    if rows.is_empty() {
        return None;
    }
    let n = rows.len() as f64;
    let custom: u32 = rows.iter().map(|r| r.custom_hamming).sum();
    let sha: u32 = rows.iter().map(|r| r.sha256_hamming).sum();
    Some((f64::from(custom) / n, f64::from(sha) / n))
}

/// Quote a CSV field when it holds a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn write_hash_csv<W: Write>(out: &mut W, rows: &[HashRow]) -> io::Result<()> {
    writeln!(out, "case,input,custom_128_hex,sha256_hex")?;
    for row in rows {
        writeln!(
            out,
            "{},{},{},{}",
            csv_field(&row.case),
            csv_field(&row.input),
            row.custom_hex,
            row.sha256_hex
        )?;
    }
    Ok(())
}

pub fn write_avalanche_csv<W: Write>(out: &mut W, rows: &[AvalancheRow]) -> io::Result<()> {
    writeln!(
        out,
        "input_a,input_b,custom_a,custom_b,custom_hamming,sha256_hamming"
    )?;
    for row in rows {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            csv_field(&row.input_a),
            csv_field(&row.input_b),
            row.custom_a,
            row.custom_b,
            row.custom_hamming,
            row.sha256_hamming
        )?;
    }
    Ok(())
}

fn write_summary<W: Write>(
    out: &mut W,
    paths: &ReportPaths,
    rows: &[AvalancheRow],
    hex_len: usize,
) -> io::Result<()> {
    writeln!(out, "Custom Hash Demo Report")?;
    writeln!(out, "Results written to:")?;
    writeln!(out, " - {}", paths.hashes.display())?;
    writeln!(out, " - {}", paths.avalanche.display())?;
    if let Some((custom, sha)) = mean_distances(rows) {
        writeln!(out)?;
        writeln!(
            out,
            "Mean avalanche distance over {} pairs: custom {:.2} / {} bits, sha256 {:.2} / 256 bits",
            rows.len(),
            custom,
            hex_len * 4,
            sha
        )?;
    }
    Ok(())
}

fn create(path: &Path) -> io::Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new)
}

/// Write `hash_results.csv`, `avalanche_results.csv` and `report.txt`.
pub fn write_report(config: &ReportConfig) -> anyhow::Result<ReportPaths> {
    use anyhow::Context;

    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("creating {}", config.out_dir.display()))?;

    let paths = ReportPaths {
        hashes: config.out_dir.join("hash_results.csv"),
        avalanche: config.out_dir.join("avalanche_results.csv"),
        summary: config.out_dir.join("report.txt"),
    };

    let hashes = hash_rows(&named_cases(), config.hex_len)?;
    tracing::debug!(cases = hashes.len(), "digested named cases");
    let mut file = create(&paths.hashes)
        .with_context(|| format!("creating {}", paths.hashes.display()))?;
    write_hash_csv(&mut file, &hashes)?;
    file.flush()?;
    tracing::info!(path = %paths.hashes.display(), "wrote hash results");

    let avalanche = avalanche_rows(&AVALANCHE_PAIRS, config.hex_len)?;
    let mut file = create(&paths.avalanche)
        .with_context(|| format!("creating {}", paths.avalanche.display()))?;
    write_avalanche_csv(&mut file, &avalanche)?;
    file.flush()?;
    tracing::info!(path = %paths.avalanche.display(), "wrote avalanche results");

    let mut file = create(&paths.summary)
        .with_context(|| format!("creating {}", paths.summary.display()))?;
    write_summary(&mut file, &paths, &avalanche, config.hex_len)?;
    file.flush()?;

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_field_quotes_only_when_needed() {
        assert_eq!(csv_field("hello "), "hello ");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn hash_rows_cover_every_case() {
        let rows = hash_rows(&named_cases(), 32).unwrap();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].case, "empty_string");
        assert_eq!(rows[0].custom_hex, "331be69fc012da504ec4ac788b33f501");
        assert_eq!(
            rows[0].sha256_hex,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(rows[5].input.len(), 430);
    }

    #[test]
    fn avalanche_rows_match_reference_distances() {
        let rows = avalanche_rows(&AVALANCHE_PAIRS, 32).unwrap();
        let distances: Vec<u32> = rows.iter().map(|r| r.custom_hamming).collect();
        assert_eq!(distances, vec![67, 56, 61, 67, 53]);
        assert_eq!(rows[0].sha256_hamming, 125);
    }

    #[test]
    fn mean_distance_sits_near_half_the_bits() {
        let rows = avalanche_rows(&AVALANCHE_PAIRS, 32).unwrap();
        let (custom, _) = mean_distances(&rows).unwrap();
        // 128-bit output: expect roughly 64 differing bits
        assert!((40.0..=88.0).contains(&custom), "mean distance {custom}");
        assert!(mean_distances(&[]).is_none());
    }

    #[test]
    fn hash_csv_has_header_and_rows() {
        let rows = hash_rows(&[("single_char_a", "a".to_string())], 32).unwrap();
        let mut buf = Vec::new();
        write_hash_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("case,input,custom_128_hex,sha256_hex"));
        assert!(lines
            .next()
            .unwrap()
            .starts_with("single_char_a,a,1b804fbb58dd928db94fd31bd6486a1f,"));
    }

    #[test]
    fn write_report_creates_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            out_dir: dir.path().join("results"),
            ..ReportConfig::default()
        };
        let paths = write_report(&config).unwrap();

        let hashes = fs::read_to_string(&paths.hashes).unwrap();
        assert_eq!(hashes.lines().count(), 13);
        let avalanche = fs::read_to_string(&paths.avalanche).unwrap();
        assert_eq!(avalanche.lines().count(), 6);
        assert!(avalanche.contains("hello,Hello,"));
        let summary = fs::read_to_string(&paths.summary).unwrap();
        assert!(summary.starts_with("Custom Hash Demo Report"));
        assert!(summary.contains("Mean avalanche distance over 5 pairs"));
    }
}
