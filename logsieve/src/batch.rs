use crate::categorizer::{self, CategoryCounts};
use crate::extractor::{self, ErrorRecord, SkippedLine};
use crate::timebuckets::{self, DescriptionCount};
use crate::{cleaner, decoder, structure};
use chrono::NaiveDateTime;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("no input files supplied")]
    NoInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOpts {
    pub marker: String,
    pub min_phrase_words: usize,
    pub max_phrase_words: usize,
    pub parallel: bool,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            marker: extractor::DEFAULT_MARKER.to_string(),
            min_phrase_words: structure::DEFAULT_MIN_WORDS,
            max_phrase_words: structure::DEFAULT_MAX_WORDS,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), bytes: bytes.into() }
    }

    pub fn read(path: &Path) -> std::io::Result<Self> {
        Ok(Self { name: path.display().to_string(), bytes: std::fs::read(path)? })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub file: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub name: String,
    pub lines: usize,
    pub records: usize,
    pub skipped: Vec<SkippedLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub records: Vec<ErrorRecord>,
    pub cleaned_descriptions: Vec<String>,
    pub categories: CategoryCounts,
    pub structures: BTreeMap<String, usize>,
    pub by_time_of_day: BTreeMap<String, usize>,
    pub by_timestamp: BTreeMap<NaiveDateTime, usize>,
    pub by_description_and_time: BTreeMap<String, BTreeMap<String, usize>>,
    pub description_counts: Vec<DescriptionCount>,
    pub files: Vec<FileSummary>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn skipped_lines(&self) -> usize {
        self.files.iter().map(|f| f.skipped.len()).sum()
    }
}

// Everything derived from one file; merged in input order afterwards.
struct FileOutcome {
    summary: FileSummary,
    records: Vec<ErrorRecord>,
    cleaned: Vec<String>,
    categories: CategoryCounts,
    structures: BTreeMap<String, usize>,
}

fn process_file(file: &SourceFile, opts: &PipelineOpts) -> Result<FileOutcome, FileFailure> {
    let lines = decoder::decode_lines(&file.bytes).map_err(|e| {
        tracing::error!(file = %file.name, error = %e, "failed to decode file");
        FileFailure { file: file.name.clone(), error: e.to_string() }
    })?;
    let extraction = extractor::extract_errors_with_marker(&lines, &opts.marker);
    let cleaned = cleaner::clean_descriptions(&extraction.error_descriptions());
    let categories = categorizer::count_categories(&cleaned);
    let structures =
        structure::count_structures_bounded(&cleaned, opts.min_phrase_words, opts.max_phrase_words);
    tracing::debug!(
        file = %file.name,
        lines = lines.len(),
        records = extraction.records.len(),
        skipped = extraction.skipped.len(),
        "processed file"
    );
    Ok(FileOutcome {
        summary: FileSummary {
            name: file.name.clone(),
            lines: lines.len(),
            records: extraction.records.len(),
            skipped: extraction.skipped,
        },
        records: extraction.records,
        cleaned,
        categories,
        structures,
    })
}

// `collect` keeps input order on both paths.
fn process_all(files: &[SourceFile], opts: &PipelineOpts) -> Vec<Result<FileOutcome, FileFailure>> {
    if opts.parallel {
        files.par_iter().map(|f| process_file(f, opts)).collect()
    } else {
        files.iter().map(|f| process_file(f, opts)).collect()
    }
}

/// Decode, extract and aggregate a batch of files. A file that fails to decode
/// is reported in `failures` and does not stop the rest of the batch.
pub fn run_batch(files: &[SourceFile], opts: &PipelineOpts) -> Result<BatchReport, BatchError> {
    if files.is_empty() {
        return Err(BatchError::NoInput);
    }
    Ok(merge_outcomes(process_all(files, opts), Vec::new()))
}

/// Read `paths` from disk and run them as one batch. Unreadable files are
/// reported as failures alongside decode failures.
pub fn analyze_paths<P: AsRef<Path>>(paths: &[P], opts: &PipelineOpts) -> Result<BatchReport, BatchError> {
    if paths.is_empty() {
        return Err(BatchError::NoInput);
    }
    let mut files = Vec::with_capacity(paths.len());
    let mut read_failures = Vec::new();
    for p in paths {
        let p = p.as_ref();
        match SourceFile::read(p) {
            Ok(f) => files.push(f),
            Err(e) => {
                tracing::error!(file = %p.display(), error = %e, "failed to read file");
                read_failures.push(FileFailure { file: p.display().to_string(), error: e.to_string() });
            }
        }
    }
    Ok(merge_outcomes(process_all(&files, opts), read_failures))
}

fn merge_outcomes(outcomes: Vec<Result<FileOutcome, FileFailure>>, mut failures: Vec<FileFailure>) -> BatchReport {
    let mut records = Vec::new();
    let mut cleaned_descriptions = Vec::new();
    let mut categories = CategoryCounts::default();
    let mut structures = BTreeMap::new();
    let mut files = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(o) => {
                records.extend(o.records);
                cleaned_descriptions.extend(o.cleaned);
                categories.merge(&o.categories);
                structure::merge_counts(&mut structures, &o.structures);
                files.push(o.summary);
            }
            Err(f) => failures.push(f),
        }
    }

    let times: Vec<_> = records.iter().map(|r| r.timestamp).collect();
    let descriptions: Vec<&str> = records.iter().map(|r| r.description.as_str()).collect();
    let by_time_of_day = timebuckets::count_by_time_of_day(&times);
    let by_timestamp = timebuckets::count_by_timestamp(&times);
    let by_description_and_time = timebuckets::count_by_description_and_time(&times, &descriptions);
    let description_counts = timebuckets::description_counts(&descriptions);

    if !failures.is_empty() {
        tracing::warn!(failed = failures.len(), "some files could not be processed");
    }

    BatchReport {
        records,
        cleaned_descriptions,
        categories,
        structures,
        by_time_of_day,
        by_timestamp,
        by_description_and_time,
        description_counts,
        files,
        failures,
    }
}
