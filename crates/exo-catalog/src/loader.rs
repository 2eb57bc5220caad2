//! Loading the catalog from a file, a URL, or any reader.

use std::io::Read;
use std::path::PathBuf;

use tracing::info;

use crate::error::CatalogError;
use crate::record::ExoplanetRecord;

/// Where the JSON record array lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Local file.
    File(PathBuf),
    /// Remote document fetched with a single GET, no retry.
    Url(String),
}

impl DatasetSource {
    /// `http://` and `https://` strings become URLs, anything else a path.
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

/// Load every record from `source`.
pub fn load_dataset(source: &DatasetSource) -> Result<Vec<ExoplanetRecord>, CatalogError> {
    let records = match source {
        DatasetSource::File(path) => {
            let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            parse_dataset(&contents)?
        }
        DatasetSource::Url(url) => {
            let response = ureq::get(url).call().map_err(|source| CatalogError::Http {
                url: url.clone(),
                source: Box::new(source),
            })?;
            let body = response
                .into_string()
                .map_err(|source| CatalogError::Body {
                    url: url.clone(),
                    source,
                })?;
            parse_dataset(&body)?
        }
    };
    info!(count = records.len(), ?source, "loaded exoplanet catalog");
    Ok(records)
}

/// Parse a JSON array of records.
pub fn parse_dataset(json: &str) -> Result<Vec<ExoplanetRecord>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a JSON array of records from a reader.
pub fn read_dataset(reader: impl Read) -> Result<Vec<ExoplanetRecord>, CatalogError> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::StarId;

    const SAMPLE: &str = r#"[
        {"kepid": 10797460, "kepoi_name": "K00752.01", "koi_name": "K00752.01",
         "kepler_name": "Kepler-227 b", "koi_period": 9.488, "koi_prad": 2.26,
         "koi_teq": 793, "koi_kepmag": 15.347, "koi_insol": 93.59,
         "ra_str": "19h27m44.22s", "dec_str": "+48d08m29.9s"},
        {"kepid": 10797460, "kepoi_name": "K00752.02", "koi_period": 54.418,
         "koi_prad": 0, "koi_teq": 443},
        {"kepid": 10811496, "kepoi_name": "K00753.01", "koi_teq": -5}
    ]"#;

    #[test]
    fn test_parse_sample_dataset() {
        let records = parse_dataset(SAMPLE).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].kepid, StarId(10797460));
        assert_eq!(records[0].kepler_name.as_deref(), Some("Kepler-227 b"));
        assert_eq!(records[1].planet_radius(), 1.0);
        assert_eq!(records[2].koi_teq, Some(-5.0));
    }

    #[test]
    fn test_non_json_body_is_parse_error() {
        let err = parse_dataset("<html>not found</html>").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_object_instead_of_array_is_parse_error() {
        assert!(parse_dataset(r#"{"kepid": 1}"#).is_err());
    }

    #[test]
    fn test_read_dataset_from_reader() {
        let records = read_dataset(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let records = load_dataset(&DatasetSource::File(path)).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_dataset(&DatasetSource::File("/nonexistent/koi.json".into())).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_source_parsing() {
        assert_eq!(
            DatasetSource::parse("https://example.org/data.json"),
            DatasetSource::Url("https://example.org/data.json".to_string())
        );
        assert_eq!(
            DatasetSource::parse(" assets/data.json "),
            DatasetSource::File(PathBuf::from("assets/data.json"))
        );
    }
}
