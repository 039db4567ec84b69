use std::fmt::Write;
use std::path::Path;

use serde::Serialize;

use crate::types::{Line, ViewMode};

/// Build the standard header line:
/// `# path/to/file.log (N lines, 1.2KB) [mode]`
pub fn file_header(path: &Path, byte_len: u64, line_count: usize, mode: ViewMode) -> String {
    let size = format_size(byte_len);
    let noun = if line_count == 1 { "line" } else { "lines" };
    format!(
        "# {} ({line_count} {noun}, {size}) [{mode}]",
        path.display()
    )
}

/// Binary units above bytes, smallest first.
const SIZE_UNITS: [&str; 3] = ["KB", "MB", "GB"];

/// File size in the largest unit it reaches, with one decimal when the
/// tenths digit is non-zero: `528B`, `2KB`, `1.5KB`, `3.5MB`.
fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes}B");
    }
    let mut scale = 1024;
    let mut unit = SIZE_UNITS[0];
    for &next in &SIZE_UNITS[1..] {
        if bytes < scale * 1024 {
            break;
        }
        scale *= 1024;
        unit = next;
    }
    let whole = bytes / scale;
    let tenths = (bytes % scale) * 10 / scale;
    if tenths == 0 {
        format!("{whole}{unit}")
    } else {
        format!("{whole}.{tenths}{unit}")
    }
}

/// Prefix each line with its line number, right-aligned to the widest one.
/// Lines without a number are indented to the same column.
pub fn number_lines(lines: &[Line]) -> String {
    let last = lines.iter().filter_map(|l| l.number).max().unwrap_or(0).max(1);
    let width = (last.ilog10() + 1) as usize;
    let mut out = String::with_capacity(lines.iter().map(|l| l.text.len() + width + 3).sum());
    for line in lines {
        match line.number {
            Some(num) => {
                let _ = writeln!(out, "{num:>width$}  {}", line.text);
            }
            None => {
                let _ = writeln!(out, "{:>width$}  {}", "", line.text);
            }
        }
    }
    out
}

/// Lines verbatim, one per row.
pub fn plain_lines(lines: &[Line]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.text.len() + 1).sum());
    for line in lines {
        out.push_str(&line.text);
        out.push('\n');
    }
    out
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    path: String,
    query: &'a str,
    mode: String,
    lines: &'a [Line],
}

/// Machine-readable rendering: `{"path", "query", "mode", "lines": [{"number", "text"}]}`.
pub fn json(path: &Path, query: &str, mode: ViewMode, lines: &[Line]) -> String {
    let out = JsonOutput {
        path: path.display().to_string(),
        query,
        mode: mode.to_string(),
        lines,
    };
    serde_json::to_string_pretty(&out).expect("JsonOutput is always serializable")
}
