//! Logging setup and state-diff diagnostics
//!
//! Configure via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=codearea::handler=debug` - module-level filtering
//! - `RUST_LOG=caret=debug` - caret/selection diffs from the update loop
//!
//! Logs are also written to `~/.config/codearea/logs/codearea.log` with
//! daily rotation.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{CaretPosition, CodeArea, SelectionRange};

const DEFAULT_FILTER: &str = "codearea=info";

/// Initialize the tracing subscriber with console and file logging
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the lifetime of the program. `None` when file logging is unavailable.
pub fn init() -> Option<WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let (file_layer, guard) = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

/// Lightweight snapshot of caret/selection state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaretSnapshot {
    pub caret: CaretPosition,
    pub selection: Option<SelectionRange>,
    pub data_size: u64,
    pub scroll_row: u64,
}

impl CaretSnapshot {
    pub fn from_area(area: &CodeArea) -> Self {
        Self {
            caret: area.caret(),
            selection: area.selection(),
            data_size: area.data_size(),
            scroll_row: area.scroll_position().row_position,
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &CaretSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.caret != other.caret {
            changes.push(format!(
                "caret: {}:{} {:?} → {}:{} {:?}",
                self.caret.data_position,
                self.caret.code_offset,
                self.caret.section,
                other.caret.data_position,
                other.caret.code_offset,
                other.caret.section
            ));
        }
        if self.selection != other.selection {
            let status = match other.selection {
                Some(range) => format!("{}..={}", range.first, range.last),
                None => "cleared".to_string(),
            };
            changes.push(format!("selection {}", status));
        }
        if self.data_size != other.data_size {
            changes.push(format!("size: {} → {}", self.data_size, other.data_size));
        }
        if self.scroll_row != other.scroll_row {
            changes.push(format!("scroll: {} → {}", self.scroll_row, other.scroll_row));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
