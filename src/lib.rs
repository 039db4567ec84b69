#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,  // window sizes and line counts as usize — we target 64-bit
    clippy::cast_possible_wrap,        // usize→i64 for relative seeks, always ≤ the scan window
    clippy::module_name_repetitions,   // Rust naming conventions
    clippy::missing_errors_doc,        // error enums document themselves
    clippy::missing_panics_doc,        // internal expects are on infallible serialization
)]

pub mod config;
pub mod error;
pub(crate) mod format;
pub(crate) mod scan;
pub mod seeker;
pub mod types;

use std::fs::{self, File};
use std::path::Path;

pub use config::Config;
pub use error::{Error, LineseekError};
pub use scan::SCAN_WINDOW;
pub use seeker::{LineSeeker, Lines};
pub use types::Query;

use types::Line;

/// The single front-end entry point: parse `query`, pull the selected lines
/// out of the file at `path`, and render them per `config`.
pub fn run(path: &Path, query: &str, config: &Config) -> Result<String, LineseekError> {
    let parsed = Query::parse(query).ok_or_else(|| LineseekError::InvalidQuery {
        query: query.to_string(),
        reason: "expected N, A-B, A-, tail:N or all (line numbers start at 1)".into(),
    })?;

    let meta = fs::metadata(path).map_err(|e| LineseekError::from_io(path, e))?;
    if meta.is_dir() {
        return Err(LineseekError::InvalidQuery {
            query: path.display().to_string(),
            reason: "is a directory".into(),
        });
    }
    let file = File::open(path).map_err(|e| LineseekError::from_io(path, e))?;

    let mut seeker = LineSeeker::new(file);
    let lines = select(&mut seeker, parsed).map_err(|e| LineseekError::seek(path, e))?;
    log::debug!("{}: {} lines selected by {query:?}", path.display(), lines.len());

    let mode = parsed.mode();
    if config.json {
        return Ok(format::json(path, query, mode, &lines));
    }

    let header = format::file_header(path, meta.len(), lines.len(), mode);
    let body = if config.number_lines {
        format::number_lines(&lines)
    } else {
        format::plain_lines(&lines)
    };
    Ok(format!("{header}\n\n{body}"))
}

/// Pull the lines a query names out of `seeker`.
fn select<S>(seeker: &mut LineSeeker<S>, query: Query) -> Result<Vec<Line>, Error>
where
    S: std::io::Read + std::io::Seek,
{
    match query {
        Query::Line(n) => {
            seeker.seek_to_line(to_index(n))?;
            let mut out = Vec::with_capacity(1);
            seeker.read_line(|text| {
                out.push(Line {
                    number: Some(n),
                    text: String::from_utf8_lossy(text).into_owned(),
                });
                Ok(())
            })?;
            Ok(out)
        }
        Query::Range { start, end } => {
            seeker.seek_to_line(to_index(start))?;
            let take = end.map_or(usize::MAX, |e| (e - start + 1) as usize);
            number_from(seeker.lines().take(take), Some(start))
        }
        Query::Tail(n) => {
            seeker.seek_to_end()?;
            for _ in 0..n {
                match seeker.prev_line() {
                    Ok(()) => {}
                    Err(Error::EndOfStream) => break,
                    Err(e) => return Err(e),
                }
            }
            number_from(seeker.lines(), None)
        }
        Query::All => {
            seeker.seek_to_start()?;
            number_from(seeker.lines(), Some(1))
        }
    }
}

fn number_from(
    lines: impl Iterator<Item = Result<Vec<u8>, Error>>,
    first: Option<u64>,
) -> Result<Vec<Line>, Error> {
    lines
        .enumerate()
        .map(|(i, bytes)| {
            Ok(Line {
                number: first.map(|f| f + i as u64),
                text: String::from_utf8_lossy(&bytes?).into_owned(),
            })
        })
        .collect()
}

/// 1-indexed line number → the seeker's 0-indexed line. Saturates rather
/// than wrapping for absurd inputs; those lines don't exist anyway.
fn to_index(n: u64) -> i64 {
    i64::try_from(n.saturating_sub(1)).unwrap_or(i64::MAX)
}
