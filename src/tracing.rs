//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging drag
//! sessions, constraint clamping and layout loading.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=dockspace::engine=debug` - module-level filtering
//! - `RUST_LOG=dockspace::update=trace` - every message and its size diff
//!
//! # Log Files
//!
//! Logs are written to `~/.config/dockspace/logs/dockspace.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::engine::LayoutEngine;
use crate::model::{FloatId, FloatRect, NodeKind, NodePath};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG; without it the console shows warnings,
/// or debug output when `verbose` is set.
///
/// File logging writes to `~/.config/dockspace/logs/dockspace.log` with daily rotation.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // Console layer - respects RUST_LOG, writes to stderr so stdout stays parseable
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of every split size and float rectangle for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct SizeSnapshot {
    pub branches: Vec<(NodePath, Vec<f64>)>,
    pub floats: Vec<FloatInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatInfo {
    pub id: FloatId,
    pub rect: FloatRect,
    pub z_index: i64,
}

impl SizeSnapshot {
    pub fn from_engine(engine: &LayoutEngine) -> Self {
        let mut branches = Vec::new();
        let mut stack = vec![(NodePath::root(), engine.root())];
        while let Some((path, node)) = stack.pop() {
            if let NodeKind::Branch(split) = node.kind() {
                branches.push((path.clone(), split.sizes()));
                for (i, child) in split.children.iter().enumerate().rev() {
                    stack.push((path.child(i), child));
                }
            }
        }

        Self {
            branches,
            floats: engine
                .floats()
                .iter()
                .map(|f| FloatInfo {
                    id: f.id(),
                    rect: f.rect(),
                    z_index: f.z_index(),
                })
                .collect(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SizeSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        for ((path, before), (_, after)) in self.branches.iter().zip(&other.branches) {
            if before != after {
                changes.push(format!("{}: {:?} → {:?}", path, before, after));
            }
        }

        if self.floats.len() != other.floats.len() {
            changes.push(format!(
                "float count: {} → {}",
                self.floats.len(),
                other.floats.len()
            ));
        }
        for after in &other.floats {
            let Some(before) = self.floats.iter().find(|f| f.id == after.id) else {
                continue;
            };
            if before.rect != after.rect {
                let (b, a) = (before.rect, after.rect);
                changes.push(format!(
                    "{}: ({},{} {}x{}) → ({},{} {}x{})",
                    after.id, b.left, b.top, b.width, b.height, a.left, a.top, a.width, a.height
                ));
            }
            if before.z_index != after.z_index {
                changes.push(format!(
                    "{}: z {} → {}",
                    after.id, before.z_index, after.z_index
                ));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
