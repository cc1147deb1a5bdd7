//! Core data models for flashpack
//!
//! Defines the fundamental data structures used throughout flashpack:
//! - `AssetSpec`: a manifest entry mapping a source file to a generated header
//! - `Symbol`: a validated C identifier naming the generated array
//! - `ResolvedAsset`: an `AssetSpec` with defaults filled in and validated
//! - `HeaderFile`: a rendered output file ready to be written
//! - Supporting enum: `AssetKind`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{PackError, PackResult};

/// Kind of web asset, detected from the source file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// HTML page
    Html,
    /// Stylesheet
    Css,
    /// Script
    Js,
    /// Anything else (fonts, icons, ...)
    #[default]
    Other,
}

impl AssetKind {
    /// Detect the kind from a source path's extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("html") | Some("htm") => AssetKind::Html,
            Some("css") => AssetKind::Css,
            Some("js") => AssetKind::Js,
            _ => AssetKind::Other,
        }
    }

    /// MIME type the firmware will serve this asset with
    pub fn content_type(&self) -> &'static str {
        match self {
            AssetKind::Html => "text/html",
            AssetKind::Css => "text/css",
            AssetKind::Js => "application/javascript",
            AssetKind::Other => "application/octet-stream",
        }
    }
}

/// A validated C identifier naming the generated array
///
/// The length constant is always `<symbol>_len`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol, validating it is a C identifier
    pub fn new(name: &str, file: &Path) -> PackResult<Self> {
        if Self::is_valid(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(PackError::InvalidSymbol {
                symbol: name.to_string(),
                file: file.to_path_buf(),
            })
        }
    }

    /// Derive a symbol from a source file name
    ///
    /// Every non-alphanumeric character becomes `_` and `_gz` is appended,
    /// so `index.html` becomes `index_html_gz`. A leading `_` is added when
    /// the file name starts with a digit.
    pub fn derive(source: &Path) -> Self {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut out = String::with_capacity(name.len() + 4);
        if name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            out.push('_');
        }
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                out.push(c);
            } else {
                out.push('_');
            }
        }
        if out.is_empty() {
            out.push('_');
        }
        out.push_str("_gz");
        Self(out)
    }

    /// Check whether a string is a valid C identifier
    pub fn is_valid(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// The symbol as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the companion length constant
    pub fn len_name(&self) -> String {
        format!("{}_len", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A manifest entry: one source file mapped to one generated header
///
/// Only `source` is required. `output` defaults to the source path with
/// `.gz.h` appended; `symbol` is derived from the source file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSpec {
    /// Source file, relative to the manifest directory (REQUIRED)
    pub source: PathBuf,

    /// Generated header path, relative to the manifest directory
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Name of the generated array (length constant is `<symbol>_len`)
    #[serde(default)]
    pub symbol: Option<String>,
}

impl AssetSpec {
    /// Create a spec with derived output and symbol
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: None,
            symbol: None,
        }
    }

    /// Effective output path (source + ".gz.h" when not set)
    pub fn effective_output(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let mut name = self.source.clone().into_os_string();
                name.push(".gz.h");
                PathBuf::from(name)
            }
        }
    }

    /// Resolve defaults and validate, producing a `ResolvedAsset`
    pub fn resolve(&self) -> PackResult<ResolvedAsset> {
        let symbol = match &self.symbol {
            Some(name) => Symbol::new(name, &self.source)?,
            None => Symbol::derive(&self.source),
        };
        Ok(ResolvedAsset {
            source: self.source.clone(),
            output: self.effective_output(),
            symbol,
            kind: AssetKind::from_path(&self.source),
        })
    }
}

/// A fully resolved asset, ready for the encode pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    /// Source file, relative to the manifest directory
    pub source: PathBuf,
    /// Generated header path, relative to the manifest directory
    pub output: PathBuf,
    /// Name of the generated array
    pub symbol: Symbol,
    /// Detected asset kind
    pub kind: AssetKind,
}

/// A rendered header file ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFile {
    /// Path where this file should be written (relative to the project root)
    path: PathBuf,
    /// Rendered header text
    content: String,
    /// Cached content hash
    hash: Option<String>,
}

impl HeaderFile {
    /// Create a new HeaderFile
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            hash: None,
        }
    }

    /// Get the output path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Get the rendered text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Compute and cache the content hash (SHA-256)
    pub fn hash(&mut self) -> &str {
        if self.hash.is_none() {
            self.hash = Some(crate::writer::hash_content(self.content.as_bytes()));
        }
        self.hash.as_ref().unwrap()
    }

    /// Get hash if already computed
    pub fn cached_hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Get content length in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if content is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_kind_from_path() {
        assert_eq!(AssetKind::from_path(Path::new("index.html")), AssetKind::Html);
        assert_eq!(AssetKind::from_path(Path::new("page.HTM")), AssetKind::Html);
        assert_eq!(AssetKind::from_path(Path::new("style.css")), AssetKind::Css);
        assert_eq!(AssetKind::from_path(Path::new("app.js")), AssetKind::Js);
        assert_eq!(AssetKind::from_path(Path::new("logo.png")), AssetKind::Other);
        assert_eq!(AssetKind::from_path(Path::new("Makefile")), AssetKind::Other);
    }

    #[test]
    fn test_asset_kind_content_type() {
        assert_eq!(AssetKind::Html.content_type(), "text/html");
        assert_eq!(AssetKind::Css.content_type(), "text/css");
        assert_eq!(AssetKind::Js.content_type(), "application/javascript");
    }

    #[test]
    fn test_symbol_derive_index_html() {
        let sym = Symbol::derive(Path::new("index.html"));
        assert_eq!(sym.as_str(), "index_html_gz");
    }

    #[test]
    fn test_symbol_derive_strips_directories() {
        let sym = Symbol::derive(Path::new("web/app.js"));
        assert_eq!(sym.as_str(), "app_js_gz");
    }

    #[test]
    fn test_symbol_derive_leading_digit() {
        let sym = Symbol::derive(Path::new("404.html"));
        assert_eq!(sym.as_str(), "_404_html_gz");
        assert!(Symbol::is_valid(sym.as_str()));
    }

    #[test]
    fn test_symbol_derive_dashes() {
        let sym = Symbol::derive(Path::new("login-page.html"));
        assert_eq!(sym.as_str(), "login_page_html_gz");
    }

    #[test]
    fn test_symbol_len_name() {
        let sym = Symbol::derive(Path::new("style.css"));
        assert_eq!(sym.len_name(), "style_css_gz_len");
    }

    #[test]
    fn test_symbol_validation() {
        assert!(Symbol::is_valid("index_html_gz"));
        assert!(Symbol::is_valid("_private"));
        assert!(Symbol::is_valid("a1"));
        assert!(!Symbol::is_valid(""));
        assert!(!Symbol::is_valid("9lives"));
        assert!(!Symbol::is_valid("foo-bar"));
        assert!(!Symbol::is_valid("foo bar"));
    }

    #[test]
    fn test_symbol_new_rejects_invalid() {
        let err = Symbol::new("not valid", Path::new("a.html")).unwrap_err();
        assert!(matches!(err, PackError::InvalidSymbol { .. }));
    }

    #[test]
    fn test_asset_spec_effective_output_default() {
        let spec = AssetSpec::new("web/index.html");
        assert_eq!(spec.effective_output(), PathBuf::from("web/index.html.gz.h"));
    }

    #[test]
    fn test_asset_spec_effective_output_explicit() {
        let mut spec = AssetSpec::new("index.html");
        spec.output = Some(PathBuf::from("generated/index.h"));
        assert_eq!(spec.effective_output(), PathBuf::from("generated/index.h"));
    }

    #[test]
    fn test_asset_spec_resolve_defaults() {
        let asset = AssetSpec::new("style.css").resolve().unwrap();
        assert_eq!(asset.source, PathBuf::from("style.css"));
        assert_eq!(asset.output, PathBuf::from("style.css.gz.h"));
        assert_eq!(asset.symbol.as_str(), "style_css_gz");
        assert_eq!(asset.kind, AssetKind::Css);
    }

    #[test]
    fn test_asset_spec_resolve_explicit_symbol() {
        let mut spec = AssetSpec::new("index.html");
        spec.symbol = Some("home_page_gz".to_string());
        let asset = spec.resolve().unwrap();
        assert_eq!(asset.symbol.as_str(), "home_page_gz");
    }

    #[test]
    fn test_asset_spec_resolve_invalid_symbol_fails() {
        let mut spec = AssetSpec::new("index.html");
        spec.symbol = Some("bad-symbol".to_string());
        assert!(spec.resolve().is_err());
    }

    #[test]
    fn test_asset_spec_toml_roundtrip() {
        let toml_src = r#"
source = "index.html"
symbol = "index_html_gz"
"#;
        let spec: AssetSpec = toml::from_str(toml_src).unwrap();
        assert_eq!(spec.source, PathBuf::from("index.html"));
        assert_eq!(spec.symbol.as_deref(), Some("index_html_gz"));
        assert!(spec.output.is_none());
    }

    #[test]
    fn test_header_file_stores_path_and_content() {
        let header = HeaderFile::new("index.html.gz.h", "#pragma once\n");
        assert_eq!(header.path(), &PathBuf::from("index.html.gz.h"));
        assert_eq!(header.content(), "#pragma once\n");
    }

    #[test]
    fn test_header_file_hash_computes_sha256() {
        let mut header = HeaderFile::new("a.h", "hello");
        let hash = header.hash();
        assert!(hash.starts_with("sha256:"));
        assert_eq!(hash.len(), 7 + 64); // "sha256:" + 64 hex chars
    }

    #[test]
    fn test_header_file_hash_is_cached() {
        let mut header = HeaderFile::new("a.h", "hello");
        assert!(header.cached_hash().is_none());
        let first = header.hash().to_string();
        assert_eq!(header.cached_hash(), Some(first.as_str()));
    }

    #[test]
    fn test_header_file_hash_deterministic() {
        let mut a = HeaderFile::new("a.h", "same content");
        let mut b = HeaderFile::new("b.h", "same content");
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn test_header_file_len_and_empty() {
        let header = HeaderFile::new("a.h", "hello");
        assert_eq!(header.len(), 5);
        assert!(!header.is_empty());
        assert!(HeaderFile::new("b.h", "").is_empty());
    }
}
