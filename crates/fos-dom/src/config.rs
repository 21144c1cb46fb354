//! Document configuration

/// Document configuration options
#[derive(Debug, Clone)]
pub struct Config {
    /// Document URL
    pub url: String,

    /// Viewport width in CSS pixels
    pub viewport_width: f64,

    /// Viewport height in CSS pixels
    pub viewport_height: f64,

    /// `clientTop` of the document element (its top border width)
    pub document_client_top: f64,

    /// `clientLeft` of the document element (its left border width)
    pub document_client_left: f64,
}

impl Config {
    /// Default configuration for a given URL
    pub fn with_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: "about:blank".to_string(),
            viewport_width: 1280.0,
            viewport_height: 720.0,
            document_client_top: 0.0,
            document_client_left: 0.0,
        }
    }
}
