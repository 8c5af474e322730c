//! UI document resolution.
//!
//! The window loads the bundled `hockey.html` when the asset is embedded.
//! Otherwise it falls back through files under `dist/` in the working
//! directory, and as a last resort renders an inline error page.

use std::path::{Path, PathBuf};

/// Bundled asset name of the UI document.
pub const BUNDLED_DOCUMENT: &str = "hockey.html";

/// Shown when no UI document can be found.
pub const MISSING_DOCUMENT_HTML: &str =
    "<html><body><h1>Error: the Hockey PR UI document was not found</h1></body></html>";

/// A place the UI document may live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentCandidate {
    /// Asset embedded in the application bundle.
    Bundled(String),
    /// File on disk.
    File(PathBuf),
}

/// What the window will actually load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Bundled(String),
    File(PathBuf),
    Inline(String),
}

/// Primary bundled asset followed by the `dist/` fallbacks under `root`.
pub fn default_candidates(root: &Path) -> Vec<DocumentCandidate> {
    let dist = root.join("dist");
    vec![
        DocumentCandidate::Bundled(BUNDLED_DOCUMENT.to_string()),
        DocumentCandidate::File(dist.join("app").join("hockey.html")),
        DocumentCandidate::File(dist.join("hockey.html")),
        DocumentCandidate::File(dist.join("index.html")),
    ]
}

/// First candidate for which `exists` holds, else the inline error page.
pub fn resolve<F>(candidates: &[DocumentCandidate], exists: F) -> DocumentSource
where
    F: Fn(&DocumentCandidate) -> bool,
{
    for (index, candidate) in candidates.iter().enumerate() {
        if !exists(candidate) {
            log::warn!("[WINDOW] UI document not found at {:?}", candidate);
            continue;
        }
        if index > 0 {
            log::info!("[WINDOW] Using fallback UI document {:?}", candidate);
        }
        return match candidate {
            DocumentCandidate::Bundled(asset) => DocumentSource::Bundled(asset.clone()),
            DocumentCandidate::File(path) => DocumentSource::File(path.clone()),
        };
    }

    log::error!("[WINDOW] No UI document found, rendering inline error page");
    DocumentSource::Inline(MISSING_DOCUMENT_HTML.to_string())
}

/// `data:` URL carrying an inline HTML document.
pub fn data_url(html: &str) -> String {
    format!("data:text/html;charset=utf-8,{}", urlencoding::encode(html))
}
