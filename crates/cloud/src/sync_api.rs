//! Blocking (synchronous) API for native platforms.
//!
//! Map operations are synchronous, so the async fetchers are driven by a
//! private single-threaded Tokio runtime. [`GeoJsonReader`] and
//! [`TileClient`] plug straight into `geoleaf_core::Map`.

#[cfg(feature = "native")]
mod inner {
    use std::sync::Arc;

    use geoleaf_core::source::{RasterRequest, RasterTiles, TileService, VectorReader};
    use geoleaf_core::FeatureCollection;

    use crate::error::{CloudError, Result};
    use crate::geojson_reader::fetch_features;
    use crate::http::{HttpClient, HttpOptions};
    use crate::tile_client::{fetch_raster_tiles, TileEndpoint};

    /// Blocking wrapper around [`HttpClient`].
    ///
    /// Cloning shares the runtime. Not available on WASM.
    #[derive(Clone)]
    pub struct BlockingClient {
        rt: Arc<tokio::runtime::Runtime>,
        inner: HttpClient,
    }

    impl BlockingClient {
        pub fn new(options: HttpOptions) -> Result<Self> {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| CloudError::Runtime(e.to_string()))?;
            let inner = HttpClient::new(options)?;
            Ok(Self {
                rt: Arc::new(rt),
                inner,
            })
        }

        /// GET `url` as text (blocking).
        pub fn get_text(&self, url: &str) -> Result<String> {
            self.rt.block_on(self.inner.get_text(url))
        }

        /// Read a GeoJSON URL or path (blocking).
        pub fn features(&self, location: &str) -> Result<FeatureCollection> {
            self.rt.block_on(fetch_features(&self.inner, location))
        }

        /// Validate a raster with a tile server and build its layer (blocking).
        pub fn raster_tiles(
            &self,
            endpoint: &TileEndpoint,
            request: &RasterRequest<'_>,
        ) -> Result<RasterTiles> {
            self.rt
                .block_on(fetch_raster_tiles(&self.inner, endpoint, request))
        }
    }

    /// [`VectorReader`] for `http(s)://` URLs and local paths.
    #[derive(Clone)]
    pub struct GeoJsonReader {
        client: BlockingClient,
    }

    impl GeoJsonReader {
        pub fn new(options: HttpOptions) -> Result<Self> {
            Ok(Self {
                client: BlockingClient::new(options)?,
            })
        }

        pub fn with_client(client: BlockingClient) -> Self {
            Self { client }
        }
    }

    impl VectorReader for GeoJsonReader {
        fn read_features(&self, location: &str) -> geoleaf_core::Result<FeatureCollection> {
            self.client
                .features(location)
                .map_err(|e| e.into_fetch(location))
        }
    }

    /// [`TileService`] backed by a TiTiler-compatible server.
    #[derive(Clone)]
    pub struct TileClient {
        client: BlockingClient,
        endpoint: TileEndpoint,
    }

    impl TileClient {
        pub fn new(endpoint: TileEndpoint, options: HttpOptions) -> Result<Self> {
            Ok(Self {
                client: BlockingClient::new(options)?,
                endpoint,
            })
        }

        pub fn with_client(client: BlockingClient, endpoint: TileEndpoint) -> Self {
            Self { client, endpoint }
        }

        pub fn endpoint(&self) -> &TileEndpoint {
            &self.endpoint
        }
    }

    impl TileService for TileClient {
        fn raster_tiles(&self, request: &RasterRequest<'_>) -> geoleaf_core::Result<RasterTiles> {
            self.client
                .raster_tiles(&self.endpoint, request)
                .map_err(|e| e.into_fetch(request.location))
        }
    }

    /// One-shot: read a GeoJSON URL or path with default options.
    pub fn read_geojson(location: &str) -> Result<FeatureCollection> {
        BlockingClient::new(HttpOptions::default())?.features(location)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use geoleaf_core::Error;
        use std::time::Duration;

        fn quick() -> HttpOptions {
            HttpOptions::default().with_timeout(Duration::from_secs(5))
        }

        #[test]
        fn refused_url_is_fetch_error() {
            let reader = GeoJsonReader::new(quick()).unwrap();
            let err = reader
                .read_features("http://127.0.0.1:9/countries.geojson")
                .unwrap_err();
            match err {
                Error::Fetch { location, .. } => {
                    assert_eq!(location, "http://127.0.0.1:9/countries.geojson")
                }
                other => panic!("unexpected {other:?}"),
            }
        }

        #[test]
        fn missing_local_file_keeps_core_error() {
            let reader = GeoJsonReader::new(quick()).unwrap();
            let err = reader.read_features("/no/such/file.geojson").unwrap_err();
            assert!(matches!(err, Error::Fetch { .. }));
        }

        #[test]
        fn unreachable_tile_server_is_fetch_error() {
            let tiles =
                TileClient::new(TileEndpoint::new("http://127.0.0.1:9").unwrap(), quick()).unwrap();
            let request = RasterRequest {
                location: "https://example.com/dem.tif",
                colormap: None,
            };
            assert!(matches!(
                tiles.raster_tiles(&request),
                Err(Error::Fetch { .. })
            ));
        }
    }
}

#[cfg(feature = "native")]
pub use inner::*;
