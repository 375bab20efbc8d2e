//! Offline CSV jobs over exported review datasets.

mod clean;
mod score;

pub use clean::{clean_translations, CleanSummary};
pub use score::{score_reviews, ScoreSummary, ScoredReview};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::assessment::ReviewScorer;

pub const REVIEW_TEXT_COLUMN: &str = "review_text";
pub const TRANSLATED_TEXT_COLUMN: &str = "textTranslated";
pub const TRANSLATED_LANGUAGE_COLUMN: &str = "translatedLanguage";
pub const NAME_COLUMN: &str = "name";

#[derive(Debug)]
pub enum DatasetError {
    Io { path: PathBuf, source: std::io::Error },
    Csv(csv::Error),
    MissingColumn(&'static str),
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Io { path, source } => {
                write!(f, "failed to access {}: {}", path.display(), source)
            }
            DatasetError::Csv(err) => write!(f, "invalid review CSV data: {}", err),
            DatasetError::MissingColumn(column) => {
                write!(f, "review CSV is missing the '{}' column", column)
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io { source, .. } => Some(source),
            DatasetError::Csv(err) => Some(err),
            DatasetError::MissingColumn(_) => None,
        }
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Header names with surrounding whitespace and any UTF-8 byte-order mark removed.
pub(crate) fn normalized_headers(headers: &StringRecord) -> StringRecord {
    headers
        .iter()
        .map(|name| name.trim_start_matches('\u{feff}').trim())
        .collect()
}

pub(crate) fn column_index(
    headers: &StringRecord,
    column: &'static str,
) -> Result<usize, DatasetError> {
    headers
        .iter()
        .position(|name| name == column)
        .ok_or(DatasetError::MissingColumn(column))
}

fn open(path: &Path) -> Result<BufReader<File>, DatasetError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn create(path: &Path) -> Result<BufWriter<File>, DatasetError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })
}

pub fn clean_translations_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<CleanSummary, DatasetError> {
    let reader = open(input.as_ref())?;
    let writer = create(output.as_ref())?;
    clean_translations(reader, writer)
}

pub fn score_reviews_file(
    scorer: &ReviewScorer,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<ScoreSummary, DatasetError> {
    let reader = open(input.as_ref())?;
    let writer = create(output.as_ref())?;
    score_reviews(scorer, reader, writer)
}
