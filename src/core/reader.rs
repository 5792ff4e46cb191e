use crate::domain::records::FromFields;
use crate::utils::error::{RegistrarError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Lazily splits a delimited file into fixed-width rows.
///
/// Every line is data. Only the line terminator is stripped, so a blank line is a
/// single empty field. The first error ends the iteration; dropping the reader
/// closes the file.
pub struct FieldReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    arity: usize,
    separator: char,
    line_number: usize,
    done: bool,
}

pub fn read_fields(path: impl AsRef<Path>, arity: usize, separator: char) -> Result<FieldReader> {
    let path = path.as_ref().to_path_buf();
    let file = File::open(&path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => RegistrarError::FileNotFound { path: path.clone() },
        _ => RegistrarError::IoError {
            path: path.clone(),
            source,
        },
    })?;

    tracing::debug!(path = %path.display(), arity, "Opened input file");

    Ok(FieldReader {
        path,
        lines: BufReader::new(file).lines(),
        arity,
        separator,
        line_number: 0,
        done: false,
    })
}

impl Iterator for FieldReader {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(source) => {
                self.done = true;
                return Some(Err(RegistrarError::IoError {
                    path: self.path.clone(),
                    source,
                }));
            }
        };
        self.line_number += 1;

        let fields: Vec<String> = line.split(self.separator).map(str::to_string).collect();
        if fields.len() != self.arity {
            self.done = true;
            return Some(Err(RegistrarError::MalformedRecord {
                path: self.path.clone(),
                line: self.line_number,
                expected: self.arity,
                found: fields.len(),
            }));
        }

        Some(Ok(fields))
    }
}

/// Typed view over [`FieldReader`] using the record's declared arity.
pub struct RecordReader<R> {
    fields: FieldReader,
    _record: PhantomData<R>,
}

pub fn read_records<R: FromFields>(
    path: impl AsRef<Path>,
    separator: char,
) -> Result<RecordReader<R>> {
    Ok(RecordReader {
        fields: read_fields(path, R::ARITY, separator)?,
        _record: PhantomData,
    })
}

impl<R: FromFields> Iterator for RecordReader<R> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.fields
            .next()
            .map(|fields| fields.map(R::from_fields))
    }
}
