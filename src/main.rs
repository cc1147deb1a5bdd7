//! flashpack CLI - build-time web asset packer
//!
//! Usage: flashpack <COMMAND>
//!
//! Commands:
//!   build   Compress assets and write the generated headers
//!   check   Validate manifest and generated headers (CI gate)
//!   diff    Preview changes without writing
//!   list    Show configured assets
//!   watch   Rebuild continuously on source changes
//!   clean   Remove generated headers
//!   init    Write a starter manifest

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use flashpack::manifest::{Manifest, ManifestWarning, MANIFEST_FILE};

/// flashpack - gzip static web assets into C headers for firmware
#[derive(Parser, Debug)]
#[command(name = "flashpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compress assets and write the generated headers
    Build {
        /// Path to the manifest
        #[arg(short, long, default_value = MANIFEST_FILE)]
        manifest: PathBuf,

        /// Rewrite headers even when already up to date
        #[arg(short, long)]
        force: bool,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate manifest and generated headers (exits non-zero on errors)
    Check {
        /// Path to the manifest
        #[arg(short, long, default_value = MANIFEST_FILE)]
        manifest: PathBuf,

        /// Fail on warnings too
        #[arg(long)]
        strict_warnings: bool,
    },

    /// Preview changes without writing
    Diff {
        /// Path to the manifest
        #[arg(short, long, default_value = MANIFEST_FILE)]
        manifest: PathBuf,
    },

    /// Show configured assets
    List {
        /// Path to the manifest
        #[arg(short, long, default_value = MANIFEST_FILE)]
        manifest: PathBuf,
    },

    /// Rebuild continuously on source changes
    Watch {
        /// Path to the manifest
        #[arg(short, long, default_value = MANIFEST_FILE)]
        manifest: PathBuf,
    },

    /// Remove generated headers
    Clean {
        /// Path to the manifest
        #[arg(short, long, default_value = MANIFEST_FILE)]
        manifest: PathBuf,

        /// Dry run - show what would be removed
        #[arg(long)]
        dry_run: bool,
    },

    /// Write a starter manifest
    Init {
        /// Where to write the manifest
        #[arg(short, long, default_value = MANIFEST_FILE)]
        path: PathBuf,

        /// Overwrite an existing manifest
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { manifest, force, dry_run } => {
            cmd_build(&manifest, force, dry_run, cli.json, cli.verbose)
        }
        Commands::Check { manifest, strict_warnings } => {
            cmd_check(&manifest, strict_warnings, cli.json)
        }
        Commands::Diff { manifest } => cmd_diff(&manifest, cli.json, cli.verbose),
        Commands::List { manifest } => cmd_list(&manifest, cli.json),
        Commands::Watch { manifest } => cmd_watch(&manifest, cli.json),
        Commands::Clean { manifest, dry_run } => cmd_clean(&manifest, dry_run, cli.json),
        Commands::Init { path, force } => cmd_init(&path, force, cli.json),
    }
}

/// Project root: the directory the manifest lives in
fn project_root(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn load_manifest(manifest_path: &Path, json: bool) -> Result<Manifest> {
    let (manifest, warnings) = Manifest::load_or_default(manifest_path)?;
    print_warnings(&warnings, json);
    Ok(manifest)
}

fn print_warnings(warnings: &[ManifestWarning], json: bool) {
    for warning in warnings {
        if json {
            let output = serde_json::json!({
                "event": "warning",
                "key": warning.key,
                "file": warning.file.display().to_string(),
            });
            println!("{}", serde_json::to_string(&output).unwrap_or_default());
        } else {
            println!("⚠ {warning}");
        }
    }
}

fn cmd_build(manifest_path: &Path, force: bool, dry_run: bool, json: bool, verbose: u8) -> Result<()> {
    use flashpack::encoder::encode_assets;
    use flashpack::writer::{sync_outputs, SyncOptions};

    if !json {
        println!("📦 Flashpack Build");
        println!("Manifest: {}", manifest_path.display());
        if force {
            println!("Mode: Force rewrite");
        }
        if dry_run {
            println!("Mode: Dry run");
        }
    }

    let manifest = load_manifest(manifest_path, json)?;
    let root = project_root(manifest_path);

    // Everything is encoded before anything is written: a missing source
    // aborts here with no output file touched.
    let encoded = encode_assets(&manifest, &root)?;

    if !json {
        let raw: usize = encoded.iter().map(|e| e.raw_len).sum();
        let packed: usize = encoded.iter().map(|e| e.compressed_len).sum();
        println!("\n✓ Encoded {} assets ({} bytes → {} bytes gzip)", encoded.len(), raw, packed);
        if verbose > 0 {
            for e in &encoded {
                println!(
                    "  {} → {} ({} → {} bytes, {})",
                    e.asset.source.display(),
                    e.asset.output.display(),
                    e.raw_len,
                    e.compressed_len,
                    e.asset.symbol
                );
            }
        }
    }

    let options = SyncOptions { force, dry_run };
    let headers: Vec<_> = encoded.into_iter().map(|e| e.header).collect();
    let result = sync_outputs(&root, &headers, &options)?;

    if json {
        let output = serde_json::json!({
            "event": "build",
            "status": if result.is_success() { "success" } else { "partial" },
            "written": result.written.len(),
            "skipped": result.skipped.len(),
            "errors": result.errors.len()
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("\n📊 Build Results:");
        if !result.written.is_empty() {
            println!("  ✓ Written: {} files", result.written.len());
            for path in &result.written {
                println!("    - {}", path);
            }
        }
        if !result.skipped.is_empty() {
            println!("  ✓ Up to date: {} files", result.skipped.len());
        }
        if !result.errors.is_empty() {
            println!("  ✗ Errors: {}", result.errors.len());
            for err in &result.errors {
                println!("    - {}", err);
            }
        }
        println!();
    }

    if !result.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_check(manifest_path: &Path, strict_warnings: bool, json: bool) -> Result<()> {
    use flashpack::check::{run_check, CheckStatus};

    if !json {
        println!("🩺 Flashpack Check");
        println!("Manifest: {}", manifest_path.display());
        if strict_warnings {
            println!("Strict: failing on warnings");
        }
        println!();
    }

    let manifest = load_manifest(manifest_path, json)?;
    let root = project_root(manifest_path);
    let report = run_check(&root, &manifest);

    let has_issues = if strict_warnings {
        report.errors() > 0 || report.warnings() > 0
    } else {
        report.errors() > 0
    };

    if json {
        let output = serde_json::json!({
            "event": "check",
            "passes": report.passes(),
            "warnings": report.warnings(),
            "errors": report.errors(),
            "success": !has_issues
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        let mut current_asset = String::new();
        for check in &report.checks {
            if check.asset != current_asset {
                if !current_asset.is_empty() {
                    println!();
                }
                println!("{}", check.asset);
                current_asset = check.asset.clone();
            }

            let icon = match check.status {
                CheckStatus::Pass => "✓",
                CheckStatus::Warning => "⚠",
                CheckStatus::Error => "✗",
            };
            println!("  {} {} - {}", icon, check.name, check.message);
            if let Some(rec) = &check.recommendation {
                println!("    ↳ {}", rec);
            }
        }

        println!();
        println!(
            "Summary: {} passed, {} warnings, {} errors",
            report.passes(),
            report.warnings(),
            report.errors()
        );
    }

    if has_issues {
        if !json {
            println!();
            println!("🔴 Check FAILED");
        }
        std::process::exit(1);
    } else if !json {
        println!();
        println!("🟢 Check PASSED");
    }

    Ok(())
}

fn cmd_diff(manifest_path: &Path, json: bool, verbose: u8) -> Result<()> {
    use flashpack::encoder::encode_assets;
    use flashpack::writer::{diff_outputs, DiffStatus};
    use similar::TextDiff;

    if !json {
        println!("📊 Flashpack Diff");
        println!("Manifest: {}", manifest_path.display());
        println!();
    }

    let manifest = load_manifest(manifest_path, json)?;
    let root = project_root(manifest_path);
    let encoded = encode_assets(&manifest, &root)?;
    let headers: Vec<_> = encoded.into_iter().map(|e| e.header).collect();
    let diff = diff_outputs(&root, &headers);

    let count = |status: DiffStatus| diff.iter().filter(|(_, s)| *s == status).count();
    let new_count = count(DiffStatus::New);
    let modified_count = count(DiffStatus::Modified);
    let unchanged_count = count(DiffStatus::Unchanged);

    if json {
        let output = serde_json::json!({
            "event": "diff",
            "new": new_count,
            "modified": modified_count,
            "unchanged": unchanged_count
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    for (path, status) in &diff {
        let marker = match status {
            DiffStatus::New => "+",
            DiffStatus::Modified => "~",
            DiffStatus::Unchanged => "=",
        };
        println!("  {} {} ({})", marker, path.display(), status);
    }

    if verbose > 0 && modified_count > 0 {
        for (path, status) in &diff {
            if *status != DiffStatus::Modified {
                continue;
            }
            let target = root.join(path);
            let existing = std::fs::read_to_string(&target).unwrap_or_default();
            let header = headers
                .iter()
                .find(|h| h.path() == path)
                .map(|h| h.content().to_string())
                .unwrap_or_default();
            let label = path.display().to_string();

            println!();
            let text_diff = TextDiff::from_lines(&existing, &header);
            print!(
                "{}",
                text_diff
                    .unified_diff()
                    .context_radius(2)
                    .header(&format!("{label} (on disk)"), &format!("{label} (generated)"))
            );
        }
    }

    println!();
    println!(
        "Summary: {} new, {} modified, {} unchanged",
        new_count, modified_count, unchanged_count
    );

    Ok(())
}

fn cmd_list(manifest_path: &Path, json: bool) -> Result<()> {
    if !json {
        println!("🔍 Flashpack Assets: {}", manifest_path.display());
    }

    let manifest = load_manifest(manifest_path, json)?;
    let assets = manifest.resolve_assets()?;

    if json {
        for asset in &assets {
            let output = serde_json::json!({
                "event": "asset",
                "source": asset.source.display().to_string(),
                "output": asset.output.display().to_string(),
                "symbol": asset.symbol.as_str(),
                "kind": format!("{:?}", asset.kind),
                "content_type": asset.kind.content_type(),
            });
            println!("{}", serde_json::to_string(&output)?);
        }
    } else {
        println!("\nFound {} assets:\n", assets.len());
        for asset in &assets {
            println!("┌─ {}", asset.source.display());
            println!("│  Output: {}", asset.output.display());
            println!("│  Symbol: {} / {}", asset.symbol, asset.symbol.len_name());
            println!("│  Kind: {:?} ({})", asset.kind, asset.kind.content_type());
            println!("└─");
        }
    }

    Ok(())
}

fn cmd_watch(manifest_path: &Path, json: bool) -> Result<()> {
    use flashpack::watcher::{watch, WatchEvent, WatchOptions};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    let options = WatchOptions {
        manifest_path: manifest_path.to_path_buf(),
        root: project_root(manifest_path),
    };

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    if !json {
        println!("👀 Flashpack Watch");
        println!("Manifest: {}", manifest_path.display());
        println!("Press Ctrl+C to stop\n");
    }

    watch(options, running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            match event {
                WatchEvent::WatchStarted { root } => {
                    println!("📂 Watching: {}", root);
                }
                WatchEvent::FileChanged { path } => {
                    println!("📝 Changed: {}", path);
                }
                WatchEvent::BuildStarted => {
                    println!("🔄 Building...");
                }
                WatchEvent::BuildComplete { written, skipped, errors } => {
                    if errors > 0 {
                        println!("⚠ Build: {} written, {} up to date, {} errors", written, skipped, errors);
                    } else {
                        println!("✓ Build: {} written, {} up to date", written, skipped);
                    }
                }
                WatchEvent::Error { message } => {
                    eprintln!("✗ Error: {}", message);
                }
                WatchEvent::Shutdown => {
                    println!("\n👋 Shutting down...");
                }
            }
        }
    })?;

    Ok(())
}

fn cmd_clean(manifest_path: &Path, dry_run: bool, json: bool) -> Result<()> {
    if !json {
        println!("🧹 Flashpack Clean");
        println!("Manifest: {}", manifest_path.display());
        if dry_run {
            println!("Mode: Dry run");
        }
    }

    let manifest = load_manifest(manifest_path, json)?;
    let root = project_root(manifest_path);

    let mut removed = Vec::new();
    for asset in manifest.resolve_assets()? {
        let target = root.join(&asset.output);
        if target.exists() {
            if !dry_run {
                std::fs::remove_file(&target)?;
            }
            removed.push(asset.output.display().to_string());
        }
    }

    if json {
        let output = serde_json::json!({
            "event": "clean",
            "removed": removed.len(),
            "dry_run": dry_run
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        if removed.is_empty() {
            println!("\nNothing to remove.");
        } else {
            println!("\n✓ Removed {} files", removed.len());
            for path in &removed {
                println!("  - {}", path);
            }
        }
        println!();
    }

    Ok(())
}

fn cmd_init(path: &Path, force: bool, json: bool) -> Result<()> {
    use flashpack::writer::atomic_write;

    if path.exists() && !force {
        anyhow::bail!(
            "manifest {} already exists (use --force to overwrite)",
            path.display()
        );
    }

    atomic_write(path, Manifest::starter_toml().as_bytes())?;

    if json {
        let output = serde_json::json!({
            "event": "init",
            "path": path.display().to_string()
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("📦 Flashpack Init");
        println!("✓ Wrote {}", path.display());
    }

    Ok(())
}
