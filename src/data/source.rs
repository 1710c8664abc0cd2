use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use super::loader;
use super::model::SalesTable;

/// Where the sales table comes from.
pub trait DataSource {
    /// Human-readable location, used in logs and error messages.
    fn describe(&self) -> String;

    /// Fetch and parse the table.  Called at most once per [`DataCache`].
    ///
    /// [`DataCache`]: super::cache::DataCache
    fn fetch(&self) -> Result<SalesTable>;
}

// ---------------------------------------------------------------------------
// Remote CSV over HTTP(S)
// ---------------------------------------------------------------------------

pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<SalesTable> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .context("building HTTP client")?;

        let response = client
            .get(&self.url)
            .send()
            .with_context(|| format!("requesting {}", self.url))?
            .error_for_status()
            .with_context(|| format!("fetching {}", self.url))?;

        let body = response.bytes().context("reading response body")?;
        log::debug!("Fetched {} bytes from {}", body.len(), self.url);

        loader::parse_csv(body.as_ref()).context("parsing remote CSV")
    }
}

// ---------------------------------------------------------------------------
// Local file
// ---------------------------------------------------------------------------

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<SalesTable> {
        loader::load_file(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_source_reads_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(
            &path,
            "Region,Category,Sub-Category,Sales,Profit,Quantity\nWest,Furniture,Chairs,10,2,1\n",
        )
        .unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.describe(), path.display().to_string());
        assert_eq!(source.fetch().unwrap().len(), 1);
    }

    #[test]
    fn missing_file_is_error() {
        let source = FileSource::new("/nonexistent/sales.csv");
        assert!(source.fetch().is_err());
    }

    #[test]
    fn unreachable_host_is_error() {
        let source = HttpSource::new("http://127.0.0.1:9/sales.csv", Duration::from_secs(2));
        assert!(source.fetch().is_err());
    }
}
