//! CSV reader/writer for the comment dataset.

use std::fs;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use super::{ColumnCandidates, CommentTable, DatasetError, FileFormat, LineEnding};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Load and validate a dataset file.
///
/// Fails with [`DatasetError::NotFound`] when the path is not a file, with
/// [`DatasetError::Read`] on malformed CSV (including ragged rows and invalid
/// UTF-8) and with [`DatasetError::MissingColumns`] when the header lacks the
/// comment or sentiment column. The byte order mark and line ending of the
/// file are recorded on the table so [`write_table`] can reproduce them.
pub fn load_table(path: &Path, columns: &ColumnCandidates) -> Result<CommentTable, DatasetError> {
    if !path.is_file() {
        return Err(DatasetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let read_error = |source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    };
    let bytes = fs::read(path).map_err(|err| read_error(csv::Error::from(err)))?;
    let format = detect_format(&bytes);
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(body);
    let headers = reader.headers().map_err(read_error)?.clone();
    let records = reader
        .records()
        .collect::<Result<Vec<StringRecord>, _>>()
        .map_err(read_error)?;
    Ok(CommentTable::new(headers, records, columns)?.with_format(format))
}

/// BOM presence and the terminator of the first record.
///
/// Newlines inside quoted fields are skipped. A file without any record
/// terminator is treated as `\n`.
fn detect_format(bytes: &[u8]) -> FileFormat {
    let bom = bytes.starts_with(UTF8_BOM);
    let mut in_quotes = false;
    let mut line_ending = LineEnding::Lf;
    for (idx, &byte) in bytes.iter().enumerate() {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b'\n' if !in_quotes => {
                if idx > 0 && bytes[idx - 1] == b'\r' {
                    line_ending = LineEnding::CrLf;
                }
                break;
            }
            _ => {}
        }
    }
    FileFormat { bom, line_ending }
}

/// Serialize a table with every field quoted, in the table's [`FileFormat`].
pub fn write_table<W: Write>(table: &CommentTable, mut out: W) -> Result<(), csv::Error> {
    let format = table.format();
    if format.bom {
        out.write_all(UTF8_BOM)?;
    }
    let terminator = match format.line_ending {
        LineEnding::Lf => Terminator::Any(b'\n'),
        LineEnding::CrLf => Terminator::CRLF,
    };
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(terminator)
        .from_writer(out);
    writer.write_record(table.headers())?;
    for record in table.records() {
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}
