use serde::Serialize;

/// Which lines the user asked for. Line numbers are 1-indexed here, the way
/// people count; the seeker works 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Line(u64),
    /// Inclusive range. `end: None` runs to the last line.
    Range { start: u64, end: Option<u64> },
    /// The last N lines, found walking backwards from the end.
    Tail(u64),
    All,
}

impl Query {
    /// Parse `"12"`, `"10-20"`, `"10-"`, `"tail:5"` or `"all"`.
    /// Returns `None` for anything else, including line 0 and empty ranges.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        if let Some(n) = s.strip_prefix("tail:") {
            let n: u64 = n.trim().parse().ok()?;
            return (n > 0).then_some(Self::Tail(n));
        }
        if let Some((a, b)) = s.split_once('-') {
            let start: u64 = a.trim().parse().ok()?;
            if start == 0 {
                return None;
            }
            let b = b.trim();
            if b.is_empty() {
                return Some(Self::Range { start, end: None });
            }
            let end: u64 = b.parse().ok()?;
            if end < start {
                return None;
            }
            return Some(Self::Range {
                start,
                end: Some(end),
            });
        }
        let n: u64 = s.parse().ok()?;
        (n > 0).then_some(Self::Line(n))
    }

    /// Shown in the output header bracket.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        match self {
            Self::Line(_) => ViewMode::Line,
            Self::Range { .. } => ViewMode::Range,
            Self::Tail(_) => ViewMode::Tail,
            Self::All => ViewMode::Full,
        }
    }
}

/// What the output contains — shown in the header bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Line,
    Range,
    Tail,
    Full,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::Range => write!(f, "range"),
            Self::Tail => write!(f, "tail"),
            Self::Full => write!(f, "full"),
        }
    }
}

/// One selected line. `number` is 1-indexed; tail reads walk backwards
/// from the end and never learn their absolute position, so they have none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub number: Option<u64>,
    pub text: String,
}
