//! # Static Files
//!
//! Maps URL paths to files under a single root directory and streams them
//! back. Any path that would leave the root is refused with 403 before the
//! filesystem is touched.

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{self, File};
use tokio_util::io::ReaderStream;
use tracing::{debug, error, warn};

/// Body of the 404 response for missing files
pub const NOT_FOUND_MESSAGE: &str = "Файл не найден";

/// Body of the 403 response for traversal attempts
pub const FORBIDDEN_MESSAGE: &str = "Forbidden";

const INDEX_FILE: &str = "index.html";
const PLAIN_TEXT: &str = "text/plain; charset=utf-8";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

const MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html; charset=utf-8"),
    ("css", "text/css; charset=utf-8"),
    ("js", "application/javascript; charset=utf-8"),
    ("json", "application/json; charset=utf-8"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("svg", "image/svg+xml; charset=utf-8"),
];

/// Errors while resolving or opening a static file
#[derive(Debug, Error)]
pub enum StaticError {
    /// The path escapes the root directory
    #[error("path escapes the static root: {0}")]
    Forbidden(String),

    /// Missing file, or not a regular file
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be opened
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IntoResponse for StaticError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, FORBIDDEN_MESSAGE),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
            Self::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };

        (status, [(header::CONTENT_TYPE, PLAIN_TEXT)], message).into_response()
    }
}

/// Content type for a file, from its extension
pub fn content_type_for(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return FALLBACK_CONTENT_TYPE;
    };

    MIME_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map_or(FALLBACK_CONTENT_TYPE, |(_, mime)| *mime)
}

/// Turn a URL path into a path relative to the root.
///
/// `/` maps to `index.html`. Otherwise the path is percent-decoded once,
/// backslashes are folded into slashes, and `.`/`..` segments are collapsed.
/// A `..` that would climb above the root is rejected, not stripped.
pub fn normalize(url_path: &str) -> Result<PathBuf, StaticError> {
    if url_path == "/" {
        return Ok(PathBuf::from(INDEX_FILE));
    }

    let forbidden = || StaticError::Forbidden(url_path.to_string());

    let decoded = urlencoding::decode(url_path).map_err(|_| forbidden())?;
    if decoded.contains('\0') {
        return Err(forbidden());
    }

    let unified = decoded.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop().ok_or_else(forbidden)?;
            }
            name => segments.push(name),
        }
    }

    if segments.is_empty() {
        return Err(forbidden());
    }

    Ok(segments.into_iter().collect())
}

/// Canonical root directory for static assets
#[derive(Debug, Clone)]
pub struct StaticRoot {
    root: PathBuf,
}

impl StaticRoot {
    /// Canonicalize `dir`, which must be an existing directory
    pub fn new(dir: impl AsRef<Path>) -> io::Result<Self> {
        let root = std::fs::canonicalize(dir.as_ref())?;
        if !root.is_dir() {
            return Err(io::Error::other(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// The canonical root path
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Absolute candidate path for a URL path.
    ///
    /// The result always lies strictly below the root.
    pub fn resolve(&self, url_path: &str) -> Result<PathBuf, StaticError> {
        let relative = normalize(url_path)?;
        let candidate = self.root.join(relative);

        if candidate == self.root || !candidate.starts_with(&self.root) {
            return Err(StaticError::Forbidden(url_path.to_string()));
        }

        Ok(candidate)
    }

    /// Resolve and open a regular file, with its content type
    pub async fn open(&self, url_path: &str) -> Result<(File, &'static str), StaticError> {
        let path = self.resolve(url_path)?;

        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            _ => return Err(StaticError::NotFound(path)),
        }

        let file = File::open(&path)
            .await
            .map_err(|source| StaticError::Io {
                path: path.clone(),
                source,
            })?;

        Ok((file, content_type_for(&path)))
    }
}

/// Serve a URL path from the static root.
///
/// File bytes are streamed as-is; a read failure mid-stream aborts the body
/// and closes the connection.
pub async fn serve(root: &StaticRoot, url_path: &str) -> Response {
    match root.open(url_path).await {
        Ok((file, content_type)) => {
            let body = Body::from_stream(ReaderStream::new(file));
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        Err(err) => {
            match &err {
                StaticError::Forbidden(path) => warn!("Path traversal attempt blocked: {}", path),
                StaticError::NotFound(path) => debug!("Static file not found: {}", path.display()),
                StaticError::Io { .. } => error!("{}", err),
            }
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_maps_to_index() {
        assert_eq!(normalize("/").unwrap(), PathBuf::from("index.html"));
    }

    #[test]
    fn test_normalize_collapses_segments() {
        assert_eq!(
            normalize("//css/./site.css").unwrap(),
            PathBuf::from("css/site.css")
        );
        assert_eq!(
            normalize("/css/../index.html").unwrap(),
            PathBuf::from("index.html")
        );
        assert_eq!(
            normalize("/img/hero%20banner.png").unwrap(),
            PathBuf::from("img/hero banner.png")
        );
    }

    #[test]
    fn test_normalize_rejects_escapes() {
        for path in [
            "/../../etc/passwd",
            "/..",
            "/css/../../secret",
            "/%2e%2e/%2e%2e/etc/passwd",
            "/%2E%2E%2Fetc%2Fpasswd",
            "/..%2f..%2fetc/passwd",
            "/..\\..\\etc\\passwd",
            "/..%5c..%5cetc%5cpasswd",
            "/./../x",
            "/.%2e/x",
            "/a\\..\\..\\x",
        ] {
            assert!(
                matches!(normalize(path), Err(StaticError::Forbidden(_))),
                "{path}"
            );
        }
    }

    #[test]
    fn test_normalize_rejects_degenerate_paths() {
        assert!(matches!(normalize(""), Err(StaticError::Forbidden(_))));
        assert!(matches!(normalize("/./"), Err(StaticError::Forbidden(_))));
        assert!(matches!(normalize("/a%00.html"), Err(StaticError::Forbidden(_))));
        assert!(matches!(normalize("/%ff%fe"), Err(StaticError::Forbidden(_))));
    }

    #[test]
    fn test_double_encoding_is_decoded_once() {
        // %252e%252e is the literal name "%2e%2e", which stays inside the root
        assert_eq!(
            normalize("/%252e%252e/x").unwrap(),
            PathBuf::from("%2e%2e/x")
        );
    }

    #[test]
    fn test_content_types() {
        assert_eq!(
            content_type_for(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type_for(Path::new("a/b/LOGO.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(
            content_type_for(Path::new("icon.svg")),
            "image/svg+xml; charset=utf-8"
        );
        assert_eq!(
            content_type_for(Path::new("font.woff2")),
            "application/octet-stream"
        );
        assert_eq!(
            content_type_for(Path::new("Makefile")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_resolve_stays_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = StaticRoot::new(dir.path()).unwrap();

        let resolved = root.resolve("/assets/app.js").unwrap();
        assert!(resolved.starts_with(root.path()));
        assert_eq!(resolved, root.path().join("assets/app.js"));

        assert!(matches!(
            root.resolve("/../outside"),
            Err(StaticError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_open_rejects_directories_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>hi</h1>").unwrap();
        let root = StaticRoot::new(dir.path()).unwrap();

        assert!(matches!(
            root.open("/assets").await,
            Err(StaticError::NotFound(_))
        ));
        assert!(matches!(
            root.open("/missing.css").await,
            Err(StaticError::NotFound(_))
        ));

        let (_, content_type) = root.open("/").await.unwrap();
        assert_eq!(content_type, "text/html; charset=utf-8");
    }

    #[test]
    fn test_static_root_must_be_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(StaticRoot::new(&file).is_err());
        assert!(StaticRoot::new(dir.path().join("nope")).is_err());
    }
}
