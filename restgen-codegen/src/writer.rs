//! Formatted, idempotent file writing
//!
//! Every generator produces [`Artifact`]s; the [`Writer`] formats their
//! content and writes them out. Files marked `keep_existing` are never
//! touched once present, which lets regeneration coexist with hand edits to
//! colocated files (per-table model classes, group test suites).

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::Result;

/// One output file: destination, raw content, overwrite policy
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
    pub overwrite: bool,
}

impl Artifact {
    /// An artifact that always rewrites its destination.
    pub fn replace(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            overwrite: true,
        }
    }

    /// An artifact that is only written when the destination does not exist.
    pub fn keep_existing(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            overwrite: false,
        }
    }
}

/// Formatting preferences, read once per writer from the target project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Spaces per indent level (`tabWidth`)
    pub indent_width: usize,
    /// Indent with tabs instead of spaces (`useTabs`)
    pub use_tabs: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            use_tabs: false,
        }
    }
}

impl FormatOptions {
    /// Load options from the project's `.prettierrc` (JSON), falling back to
    /// the `prettier` key of `package.json`, falling back to the defaults.
    /// Missing or malformed files are not an error.
    pub fn load(project_root: &Path) -> Self {
        if let Some(value) = read_json(&project_root.join(".prettierrc")) {
            return Self::from_value(&value);
        }
        if let Some(value) = read_json(&project_root.join("package.json")) {
            if let Some(prettier) = value.get("prettier") {
                return Self::from_value(prettier);
            }
        }
        Self::default()
    }

    fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        Self {
            indent_width: value
                .get("tabWidth")
                .and_then(Value::as_u64)
                .map(|w| w as usize)
                .unwrap_or(defaults.indent_width),
            use_tabs: value
                .get("useTabs")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.use_tabs),
        }
    }

    fn indent(&self, depth: usize) -> String {
        if self.use_tabs {
            "\t".repeat(depth)
        } else {
            " ".repeat(depth * self.indent_width)
        }
    }
}

fn read_json(path: &Path) -> Option<Value> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Per-line brace accounting, aware of strings and comments
struct LineScan {
    opens: usize,
    closes: usize,
    leading_closes: usize,
}

/// Scanner state that survives across lines (multi-line block comments)
#[derive(Default)]
struct ScanState {
    in_block_comment: bool,
}

fn scan_line(line: &str, state: &mut ScanState) -> LineScan {
    let mut scan = LineScan {
        opens: 0,
        closes: 0,
        leading_closes: 0,
    };
    let mut in_string: Option<char> = None;
    let mut escaped = false;
    let mut at_start = true;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if state.in_block_comment {
            if ch == '*' && chars.peek() == Some(&'/') {
                chars.next();
                state.in_block_comment = false;
            }
            continue;
        }
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                in_string = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' | '`' => {
                in_string = Some(ch);
                at_start = false;
            }
            '/' if chars.peek() == Some(&'/') => break,
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                state.in_block_comment = true;
                at_start = false;
            }
            '{' | '[' | '(' => {
                scan.opens += 1;
                at_start = false;
            }
            '}' | ']' | ')' => {
                scan.closes += 1;
                if at_start {
                    scan.leading_closes += 1;
                }
            }
            c if c.is_whitespace() => {}
            _ => at_start = false,
        }
    }
    scan
}

/// Deterministically re-indent source text.
///
/// Lines are trimmed and re-indented by bracket depth, one level per line at
/// most, so `foo({` opens a single level the way prettier lays it out. A
/// line's own leading closers dedent the line itself. Blank-line runs
/// collapse to one blank line, leading blanks are dropped and the output
/// ends with exactly one newline. Brackets inside strings and comments do
/// not count.
pub fn format_source(content: &str, options: &FormatOptions) -> String {
    let mut out = String::with_capacity(content.len());
    let mut depth: usize = 0;
    let mut state = ScanState::default();
    let mut blank_pending = false;
    let mut wrote_any = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            blank_pending = wrote_any;
            continue;
        }
        if blank_pending {
            out.push('\n');
            blank_pending = false;
        }
        let continuation = state.in_block_comment && trimmed.starts_with('*');
        let scan = scan_line(trimmed, &mut state);
        let effective = if scan.leading_closes > 0 {
            depth.saturating_sub(1)
        } else {
            depth
        };
        out.push_str(&options.indent(effective));
        if continuation {
            // align block-comment continuation lines under the opening /**
            out.push(' ');
        }
        out.push_str(trimmed);
        out.push('\n');
        let net = scan.opens as isize - scan.closes as isize;
        depth = (depth as isize + net.clamp(-1, 1)).max(0) as usize;
        wrote_any = true;
    }
    out
}

/// Writes formatted artifacts with idempotent-skip semantics
pub struct Writer {
    options: FormatOptions,
}

impl Writer {
    /// Create a writer with options loaded from the project root.
    pub fn new(project_root: &Path) -> Self {
        Self {
            options: FormatOptions::load(project_root),
        }
    }

    /// Create a writer with explicit options.
    pub fn with_options(options: FormatOptions) -> Self {
        Self { options }
    }

    /// The formatting options in effect.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Write one artifact, creating parent directories as needed.
    ///
    /// Returns `Ok(false)` when the artifact is `keep_existing` and the file
    /// is already present; the existing content is left untouched.
    pub fn write(&self, artifact: &Artifact) -> Result<bool> {
        if !artifact.overwrite && artifact.path.exists() {
            debug!("file exists, skipping: {}", artifact.path.display());
            return Ok(false);
        }
        if let Some(parent) = artifact.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let formatted = format_source(&artifact.content, &self.options);
        fs::write(&artifact.path, formatted)?;
        debug!("wrote {}", artifact.path.display());
        Ok(true)
    }

    /// Write a batch of artifacts in order.
    pub fn write_all(&self, artifacts: &[Artifact]) -> Result<()> {
        for artifact in artifacts {
            self.write(artifact)?;
        }
        Ok(())
    }
}
