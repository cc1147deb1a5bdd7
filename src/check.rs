//! Manifest and output validation
//!
//! Implements the `check` command: a doctor-style report over the manifest
//! and the generated headers, suitable as a CI gate. Errors mean the build
//! tree is wrong (missing sources, stale headers, arrays that no longer
//! decompress to their sources); warnings mean it is merely incomplete.

use std::fs;
use std::path::Path;

use crate::compress::gzip_decompress;
use crate::encoder::encode_asset;
use crate::manifest::Manifest;
use crate::render::parse_header_bytes;
use crate::writer::validate_path_safety;

/// Status of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warning,
    Error,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "✓"),
            CheckStatus::Warning => write!(f, "⚠"),
            CheckStatus::Error => write!(f, "✗"),
        }
    }
}

/// One check result
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    /// Short check name ("source", "header", "round-trip", ...)
    pub name: String,
    /// Asset (or "manifest") the check applies to
    pub asset: String,
    pub status: CheckStatus,
    pub message: String,
    pub recommendation: Option<String>,
}

/// Check report with summary helpers
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub checks: Vec<Check>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(
        &mut self,
        asset: &str,
        name: &str,
        status: CheckStatus,
        message: impl Into<String>,
        recommendation: Option<&str>,
    ) {
        self.checks.push(Check {
            name: name.to_string(),
            asset: asset.to_string(),
            status,
            message: message.into(),
            recommendation: recommendation.map(String::from),
        });
    }

    pub fn passes(&self) -> usize {
        self.count(CheckStatus::Pass)
    }

    pub fn warnings(&self) -> usize {
        self.count(CheckStatus::Warning)
    }

    pub fn errors(&self) -> usize {
        self.count(CheckStatus::Error)
    }

    pub fn is_success(&self) -> bool {
        self.errors() == 0
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }
}

/// Run every check against the manifest and the files under `root`
pub fn run_check(root: &Path, manifest: &Manifest) -> CheckReport {
    let mut report = CheckReport::new();

    if manifest.assets.is_empty() {
        report.add(
            "manifest",
            "assets",
            CheckStatus::Warning,
            "manifest lists no assets",
            Some("add [[asset]] entries to flashpack.toml"),
        );
        return report;
    }

    let resolved = match manifest.resolve_assets() {
        Ok(resolved) => resolved,
        Err(e) => {
            report.add(
                "manifest",
                "resolve",
                CheckStatus::Error,
                e.to_string(),
                Some("fix the [[asset]] entries in flashpack.toml"),
            );
            return report;
        }
    };

    for asset in &resolved {
        let label = asset.source.display().to_string();

        if let Err(e) = validate_path_safety(&asset.output, root) {
            report.add(&label, "output", CheckStatus::Error, e.to_string(), None);
            continue;
        }

        let source_path = root.join(&asset.source);
        if !source_path.exists() {
            report.add(
                &label,
                "source",
                CheckStatus::Error,
                "source file not found",
                Some("check [[asset]] source paths in flashpack.toml"),
            );
            continue;
        }
        report.add(&label, "source", CheckStatus::Pass, "source file readable", None);

        let encoded = match encode_asset(asset, root, &manifest.encoder) {
            Ok(encoded) => encoded,
            Err(e) => {
                report.add(&label, "encode", CheckStatus::Error, e.to_string(), None);
                continue;
            }
        };

        let output_path = root.join(&asset.output);
        let on_disk = match fs::read_to_string(&output_path) {
            Ok(content) => content,
            Err(_) => {
                report.add(
                    &label,
                    "header",
                    CheckStatus::Warning,
                    "header not generated yet",
                    Some("run `flashpack build`"),
                );
                continue;
            }
        };

        if on_disk == encoded.header.content() {
            report.add(&label, "header", CheckStatus::Pass, "header up to date", None);
        } else {
            report.add(
                &label,
                "header",
                CheckStatus::Error,
                "header out of date",
                Some("run `flashpack build`"),
            );
        }

        // Verify the array on disk still decompresses to the source bytes.
        let source_bytes = fs::read(&source_path).unwrap_or_default();
        match parse_header_bytes(&on_disk).map(|bytes| gzip_decompress(&bytes)) {
            Some(Ok(original)) if original == source_bytes => {
                report.add(
                    &label,
                    "round-trip",
                    CheckStatus::Pass,
                    "array decompresses to source",
                    None,
                );
            }
            Some(Ok(_)) => {
                report.add(
                    &label,
                    "round-trip",
                    CheckStatus::Error,
                    "array decompresses to different content",
                    Some("run `flashpack build`"),
                );
            }
            _ => {
                report.add(
                    &label,
                    "round-trip",
                    CheckStatus::Error,
                    "header does not contain a valid gzip byte array",
                    Some("run `flashpack build`"),
                );
            }
        }
    }

    report
}
