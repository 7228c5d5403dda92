use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use thiserror::Error;

use crate::config::ViewMode;

use super::parse::parse_values;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read rows from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid sheet URL for sheet {0:?}")]
    InvalidUrl(String),
    #[error("request to the sheet service failed")]
    Http(#[from] reqwest::Error),
    #[error("sheet service answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("row payload is not a sheet values document")]
    Decode(#[source] serde_json::Error),
}

/// Anything that can hand over the raw table for a view mode.
pub trait RowSource: Send + Sync {
    fn fetch_rows(&self, view_mode: ViewMode) -> Result<Vec<Vec<String>>, FetchError>;

    /// Short human-readable origin, shown in logs and the viewer header.
    fn describe(&self) -> String;
}

/// Rows stored on disk in the sheet values JSON shape.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RowSource for FileSource {
    fn fetch_rows(&self, view_mode: ViewMode) -> Result<Vec<Vec<String>>, FetchError> {
        tracing::debug!(path = %self.path.display(), %view_mode, "reading rows from file");
        let raw = fs::read_to_string(&self.path).map_err(|source| FetchError::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_values(&raw)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Google Sheets v4 `values` endpoint.
#[derive(Clone, Debug)]
pub struct SheetsSource {
    client: Client,
    sheet_id: String,
    range: String,
    api_key: Option<String>,
}

impl SheetsSource {
    pub fn new(
        sheet_id: impl Into<String>,
        range: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            sheet_id: sheet_id.into(),
            range: range.into(),
            api_key,
        })
    }

    pub(crate) fn values_url(&self) -> Result<Url, FetchError> {
        let invalid = || FetchError::InvalidUrl(self.sheet_id.clone());
        let mut url = Url::parse(SHEETS_API_BASE).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend([self.sheet_id.as_str(), "values", self.range.as_str()]);
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }
}

impl RowSource for SheetsSource {
    fn fetch_rows(&self, view_mode: ViewMode) -> Result<Vec<Vec<String>>, FetchError> {
        let url = self.values_url()?;
        tracing::debug!(
            sheet = %self.sheet_id,
            range = %self.range,
            %view_mode,
            "fetching sheet values"
        );

        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(FetchError::Status { status, body });
        }
        parse_values(&body)
    }

    fn describe(&self) -> String {
        format!("sheet {} ({})", self.sheet_id, self.range)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn file_source_reads_values_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"values": [["Node"], ["A", ""]]}}"#).unwrap();

        let source = FileSource::new(file.path());
        let rows = source.fetch_rows(ViewMode::Industry).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["A".to_owned(), String::new()]);
    }

    #[test]
    fn missing_file_is_fetch_error() {
        let source = FileSource::new("/definitely/not/rows.json");
        let error = source.fetch_rows(ViewMode::Country).unwrap_err();
        assert!(matches!(error, FetchError::Read { .. }));
    }

    #[test]
    fn sheets_url_encodes_range_and_key() {
        let source =
            SheetsSource::new("sheet-123", "Main!A1:N500", Some("k e y".to_owned())).unwrap();
        let url = source.values_url().unwrap();
        assert_eq!(url.host_str(), Some("sheets.googleapis.com"));
        assert!(url.path().starts_with("/v4/spreadsheets/sheet-123/values/Main!A1:N500"));
        assert_eq!(url.query(), Some("key=k+e+y"));
    }

    #[test]
    fn sheets_url_without_key_has_no_query() {
        let source = SheetsSource::new("abc", "Main!A1:L500", None).unwrap();
        assert_eq!(source.values_url().unwrap().query(), None);
    }
}
