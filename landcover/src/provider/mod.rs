//! Remote dataset access
//!
//! Tiles are served over HTTP(S) at `<base_url>/<tile file name>`. The
//! [`AsyncHttpClient`] trait is the seam between the loader and the network
//! so tests can substitute a mock client.

mod http;
mod types;

pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT};
pub use types::ProviderError;

#[cfg(test)]
pub use http::tests::MockHttpClient;

/// Joins the dataset base address and a tile file name.
pub fn tile_url(base_url: &str, file_name: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), file_name)
}
