//! GeoJSON loading from `http(s)://` URLs or local paths.

use std::path::Path;

use geoleaf_core::source::read_geojson_file;
use geoleaf_core::FeatureCollection;
use tracing::debug;

use crate::error::{CloudError, Result};
use crate::http::HttpClient;

/// Whether `location` should be fetched over HTTP.
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Fetch a GeoJSON document and parse it into features.
///
/// Non-HTTP locations are read from the local filesystem.
pub async fn fetch_features(client: &HttpClient, location: &str) -> Result<FeatureCollection> {
    if !is_remote(location) {
        if location.contains("://") {
            return Err(CloudError::InvalidUrl {
                url: location.to_string(),
                reason: "only http and https are supported".into(),
            });
        }
        return Ok(read_geojson_file(Path::new(location))?);
    }

    let text = client.get_text(location).await?;
    let features = parse(location, &text)?;
    debug!(url = location, features = features.len(), "GeoJSON fetched");
    Ok(features)
}

fn parse(location: &str, text: &str) -> Result<FeatureCollection> {
    FeatureCollection::from_geojson_str(text).map_err(|e| CloudError::Response {
        url: location.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_detection() {
        assert!(is_remote("https://example.com/a.geojson"));
        assert!(is_remote("HTTP://example.com/a.geojson"));
        assert!(!is_remote("data/a.geojson"));
        assert!(!is_remote("s3://bucket/a.geojson"));
    }

    #[test]
    fn bad_body_is_response_error() {
        let err = parse("https://example.com/a", "<html>not json</html>").unwrap_err();
        assert!(matches!(err, CloudError::Response { .. }));
        let fc = parse(
            "https://example.com/a",
            r#"{"type":"Feature","properties":{"n":1},"geometry":{"type":"Point","coordinates":[1,2]}}"#,
        )
        .unwrap();
        assert_eq!(fc.len(), 1);
    }

    #[tokio::test]
    async fn unsupported_scheme_is_rejected() {
        let client = HttpClient::new(Default::default()).unwrap();
        let err = fetch_features(&client, "s3://bucket/a.geojson").await.unwrap_err();
        assert!(matches!(err, CloudError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn local_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pts.geojson");
        std::fs::write(
            &path,
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[0,0]}},
                {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[1,1]}}]}"#,
        )
        .unwrap();
        let client = HttpClient::new(Default::default()).unwrap();
        let fc = fetch_features(&client, path.to_str().unwrap()).await.unwrap();
        assert_eq!(fc.len(), 2);
    }
}
