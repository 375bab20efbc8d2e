use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Serialize;
use tracing::info;

use super::{
    column_index, normalized_headers, DatasetError, REVIEW_TEXT_COLUMN, TRANSLATED_LANGUAGE_COLUMN,
    TRANSLATED_TEXT_COLUMN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleanSummary {
    pub rows: usize,
    pub translated: usize,
}

/// Replace `review_text` with its translation wherever a translation language
/// is recorded, then drop both translation columns.
pub fn clean_translations<R: Read, W: Write>(
    reader: R,
    writer: W,
) -> Result<CleanSummary, DatasetError> {
    let mut csv_reader = ReaderBuilder::new().from_reader(reader);
    let headers = normalized_headers(csv_reader.headers()?);

    let text_index = column_index(&headers, REVIEW_TEXT_COLUMN)?;
    let translated_index = column_index(&headers, TRANSLATED_TEXT_COLUMN)?;
    let language_index = column_index(&headers, TRANSLATED_LANGUAGE_COLUMN)?;
    let keep = |index: usize| index != translated_index && index != language_index;

    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(
        headers
            .iter()
            .enumerate()
            .filter(|(index, _)| keep(*index))
            .map(|(_, name)| name),
    )?;

    let mut summary = CleanSummary {
        rows: 0,
        translated: 0,
    };
    let mut record = StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        summary.rows += 1;
        let has_translation = record
            .get(language_index)
            .map(|language| !language.trim().is_empty())
            .unwrap_or(false);
        if has_translation {
            summary.translated += 1;
        }

        let row: Vec<&str> = record
            .iter()
            .enumerate()
            .filter(|(index, _)| keep(*index))
            .map(|(index, value)| {
                if has_translation && index == text_index {
                    record.get(translated_index).unwrap_or(value)
                } else {
                    value
                }
            })
            .collect();
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    info!(
        rows = summary.rows,
        translated = summary.translated,
        "translation cleanup finished"
    );
    Ok(summary)
}
