use crate::domain::entities::product::ProductRow;
use crate::domain::error::DomainError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads product rows from a CSV with a header row. Only `sku`, `title`
/// and `image_url` are required by ingestion; other columns pass through.
/// Header names are trimmed, cell values are kept verbatim.
pub struct CsvProductReader<R: Read> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
}

impl CsvProductReader<File> {
    pub fn open(path: &Path) -> Result<Self, DomainError> {
        let file = File::open(path)
            .map_err(|e| DomainError::Csv(format!("{}: {e}", path.display())))?;
        Self::from_reader(file)
    }
}

impl<R: Read> CsvProductReader<R> {
    pub fn from_reader(inner: R) -> Result<Self, DomainError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(inner);
        let headers = reader.headers()?.iter().map(String::from).collect();
        Ok(Self { reader, headers })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(self) -> impl Iterator<Item = Result<ProductRow, DomainError>> {
        let headers = self.headers;
        self.reader.into_records().map(move |record| -> Result<ProductRow, DomainError> {
            let record = record?;
            Ok(headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), v.to_string()))
                .collect())
        })
    }
}
