//! Integration tests exercising real files: the seeker over `std::fs::File`
//! and the full `run()` flow a CLI invocation goes through.

use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::PathBuf;

use lineseek::{Config, Error, LineSeeker, LineseekError};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn run(query: &str) -> String {
    lineseek::run(&fixture("app.log"), query, &Config::default()).unwrap()
}

fn read(seeker: &mut LineSeeker<&mut File>) -> Result<String, Error> {
    let mut out = String::new();
    seeker.read_line(|l| {
        out = String::from_utf8_lossy(l).into_owned();
        Ok(())
    })?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// Seeker over a real file
// ---------------------------------------------------------------------------

#[test]
fn walk_a_freshly_written_file() {
    let mut f = tempfile::tempfile().unwrap();
    f.write_all(b"Line 0\nLine 1\nLine 2\n").unwrap();

    let mut s = LineSeeker::new(&mut f);

    // Cursor is at the end after writing, nothing ahead.
    assert!(matches!(s.next_line(), Err(Error::LineNotFound)));

    s.seek_to_start().unwrap();
    assert!(matches!(s.prev_line(), Err(Error::EndOfStream)));

    s.next_line().unwrap();
    s.prev_line().unwrap();

    assert_eq!(read(&mut s).unwrap(), "Line 0");
    assert_eq!(read(&mut s).unwrap(), "Line 1");
    assert_eq!(read(&mut s).unwrap(), "Line 2");
    assert!(matches!(read(&mut s), Err(Error::EndOfStream)));

    s.prev_line().unwrap();
    s.prev_line().unwrap();
    assert_eq!(read(&mut s).unwrap(), "Line 1");
}

#[test]
fn random_access_across_many_windows() {
    let lines: Vec<String> = (0..300)
        .map(|i| format!("row {i:03} {}", "-".repeat((i * 7) % 97)))
        .collect();
    let mut f = tempfile::tempfile().unwrap();
    for l in &lines {
        writeln!(f, "{l}").unwrap();
    }
    f.seek(SeekFrom::Start(0)).unwrap();

    let mut s = LineSeeker::new(&mut f);
    for i in [0usize, 1, 31, 32, 150, 298, 299] {
        s.seek_to_line(i as i64).unwrap();
        assert_eq!(read(&mut s).unwrap(), lines[i], "line {i}");
    }

    // Walk backwards from the end one line at a time.
    s.seek_to_end().unwrap();
    for expected in lines.iter().rev() {
        s.prev_line().unwrap();
        let pos = s.position().unwrap();
        assert_eq!(&read(&mut s).unwrap(), expected);
        s.get_mut().seek(SeekFrom::Start(pos)).unwrap();
    }
    assert!(matches!(s.prev_line(), Err(Error::EndOfStream)));
    assert!(matches!(s.seek_to_line(300), Err(Error::LineNotFound)));
}

#[test]
fn seeker_does_not_close_borrowed_file() {
    let mut f = tempfile::tempfile().unwrap();
    f.write_all(b"a\nb\n").unwrap();
    {
        let mut s = LineSeeker::new(&mut f);
        s.seek_to_line(1).unwrap();
    }
    // Still usable, cursor where the seeker left it.
    assert_eq!(f.stream_position().unwrap(), 2);
    f.write_all(b"c\n").unwrap();
}

// ---------------------------------------------------------------------------
// Front end: run()
// ---------------------------------------------------------------------------

#[test]
fn single_line_has_header_and_number() {
    let output = run("4");
    let mut rows = output.lines();
    let header = rows.next().unwrap();
    assert!(header.ends_with("(1 line, 528B) [line]"), "{header}");
    assert_eq!(rows.next(), Some(""));
    assert_eq!(
        rows.next(),
        Some("4  2026-03-01T08:01:12Z WARN  slow request GET /api/users took 1532ms")
    );
    assert_eq!(rows.next(), None);
}

#[test]
fn range_keeps_absolute_numbers() {
    let output = run("5-7");
    let body: Vec<&str> = output.lines().skip(2).collect();
    assert_eq!(body.len(), 3);
    assert_eq!(body[0], "5  ");
    assert!(body[1].starts_with("6  ") && body[1].contains("health check ok"));
    assert!(body[2].starts_with("7  ") && body[2].contains("upstream timed out"));
}

#[test]
fn open_range_runs_to_the_end() {
    let output = run("10-");
    let body: Vec<&str> = output.lines().skip(2).collect();
    assert_eq!(body.len(), 3);
    assert_eq!(body[0], "10  x");
    assert!(body[2].contains("shutdown requested"));
}

#[test]
fn range_past_the_end_is_truncated() {
    let output = run("11-40");
    assert!(output.lines().next().unwrap().contains("(2 lines"));
}

#[test]
fn tail_reads_backwards_from_the_end() {
    let output = run("tail:2");
    let body: Vec<&str> = output.lines().skip(2).collect();
    assert_eq!(
        body,
        [
            "   2026-03-01T08:10:00Z INFO  rotating logs",
            "   2026-03-01T08:10:01Z INFO  shutdown requested",
        ]
    );
}

#[test]
fn tail_longer_than_file_returns_everything() {
    let output = run("tail:100");
    assert!(output.lines().next().unwrap().contains("(12 lines"));
}

#[test]
fn all_lines_in_order() {
    let output = run("all");
    let body: Vec<&str> = output.lines().skip(2).collect();
    assert_eq!(body.len(), 12);
    assert!(body[0].starts_with(" 1  ") && body[0].contains("server starting"));
    assert!(body[11].starts_with("12  "));
}

#[test]
fn plain_and_json_rendering() {
    let plain = Config {
        number_lines: false,
        ..Config::default()
    };
    let output = lineseek::run(&fixture("app.log"), "10", &plain).unwrap();
    assert!(output.ends_with("\n\nx\n"), "{output:?}");

    let json = Config {
        json: true,
        ..Config::default()
    };
    let output = lineseek::run(&fixture("app.log"), "9-10", &json).unwrap();
    let v: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(v["mode"], "range");
    assert_eq!(v["lines"][1]["number"], 10);
    assert_eq!(v["lines"][1]["text"], "x");
}

#[test]
fn line_past_the_end_is_a_seek_error() {
    let err = lineseek::run(&fixture("app.log"), "13", &Config::default()).unwrap_err();
    assert!(
        matches!(
            err,
            LineseekError::Seek {
                source: Error::LineNotFound,
                ..
            }
        ),
        "{err}"
    );
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn bad_query_and_missing_file() {
    let err = lineseek::run(&fixture("app.log"), "0", &Config::default()).unwrap_err();
    assert!(matches!(err, LineseekError::InvalidQuery { .. }));

    let err = lineseek::run(&fixture("nope.log"), "1", &Config::default()).unwrap_err();
    assert!(matches!(err, LineseekError::NotFound { .. }));
    assert_eq!(err.exit_code(), 2);

    let err = lineseek::run(&fixture(""), "1", &Config::default()).unwrap_err();
    assert!(err.to_string().contains("is a directory"), "{err}");
}

#[test]
fn config_file_from_disk() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "number_lines = false").unwrap();
    writeln!(f, "pager_threshold = 100").unwrap();
    let config = Config::load(Some(f.path())).unwrap();
    assert!(!config.number_lines);
    assert_eq!(config.terminal_height(), 100);

    let mut bad = tempfile::NamedTempFile::new().unwrap();
    writeln!(bad, "json = \"yes\"").unwrap();
    let err = Config::load(Some(bad.path())).unwrap_err();
    assert!(matches!(err, LineseekError::Config { .. }));
}
