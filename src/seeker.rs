//! Line-level navigation over a seekable byte stream.
//!
//! A [`LineSeeker`] moves the cursor of its source between line boundaries
//! and reads the line under the cursor, scanning through a fixed 32-byte
//! window rather than buffering the stream. Lines are delimited by `\n` and
//! indexed from 0.

use std::io::{Read, Seek, SeekFrom};
use std::iter::FusedIterator;

use crate::error::Error;
use crate::scan::ChunkScanner;

const NEWLINE: u8 = b'\n';

/// Cursor-moving line navigator bound to one byte source.
///
/// Every positioning method leaves the source's cursor on the first byte of
/// the line it reached. The seeker takes the source by value; pass a
/// `&mut File` (or any other `&mut` source) to keep ownership with the caller.
///
/// ```
/// use std::io::Cursor;
/// use lineseek::LineSeeker;
///
/// let mut seeker = LineSeeker::new(Cursor::new(b"one\ntwo\nthree\n".to_vec()));
/// seeker.seek_to_line(2).unwrap();
/// let mut line = Vec::new();
/// seeker.read_line(|l| { line.extend_from_slice(l); Ok(()) }).unwrap();
/// assert_eq!(line, b"three");
/// ```
pub struct LineSeeker<S> {
    scanner: ChunkScanner<S>,
    /// Bytes of the line being read. Empty between calls.
    line: Vec<u8>,
}

impl<S: Read + Seek> LineSeeker<S> {
    pub fn new(source: S) -> Self {
        Self {
            scanner: ChunkScanner::new(source),
            line: Vec::new(),
        }
    }

    /// Swap in a new source, returning the previous one. The new source's
    /// cursor is used as-is.
    pub fn bind_source(&mut self, source: S) -> S {
        self.scanner.replace_source(source)
    }

    pub fn get_ref(&self) -> &S {
        self.scanner.source()
    }

    /// Mutable access to the source. Moving its cursor is allowed; the
    /// seeker keeps no position of its own.
    pub fn get_mut(&mut self) -> &mut S {
        self.scanner.source_mut()
    }

    pub fn into_inner(self) -> S {
        self.scanner.into_source()
    }

    /// Absolute byte offset of the cursor.
    pub fn position(&mut self) -> Result<u64, Error> {
        Ok(self.scanner.position()?)
    }

    pub fn seek_to_start(&mut self) -> Result<u64, Error> {
        Ok(self.scanner.seek(SeekFrom::Start(0))?)
    }

    pub fn seek_to_end(&mut self) -> Result<u64, Error> {
        Ok(self.scanner.seek(SeekFrom::End(0))?)
    }

    /// Position the cursor at the start of line `n`.
    ///
    /// Walks from the start of the stream, so the cost is linear in the
    /// offset of the target line.
    ///
    /// # Errors
    /// [`Error::InvalidLineNumber`] if `n` is negative, [`Error::LineNotFound`]
    /// if the stream has `n` or fewer complete lines.
    pub fn seek_to_line(&mut self, n: i64) -> Result<(), Error> {
        let target = u64::try_from(n).map_err(|_| Error::InvalidLineNumber(n))?;
        log::debug!("seek_to_line {target}");
        self.seek_to_start()?;

        // Reading line `target` leaves the cursor at the start of the next
        // one; step back afterwards.
        let mut read = 0u64;
        while read <= target {
            match self.read_line(|_| Ok(())) {
                Ok(()) => read += 1,
                Err(Error::EndOfStream) => {
                    log::debug!("seek_to_line {target}: stream has {read} lines");
                    return Err(Error::LineNotFound);
                }
                Err(e) => return Err(e),
            }
        }
        self.prev_line()
    }

    /// Move the cursor to the start of the next line.
    ///
    /// Scans forward for a `\n` followed by a byte that is not `\n`; runs of
    /// empty lines are crossed as one boundary.
    ///
    /// # Errors
    /// [`Error::LineNotFound`] if no such boundary exists ahead. The cursor is
    /// then at end of stream.
    pub fn next_line(&mut self) -> Result<(), Error> {
        let mut seen_newline = false;
        let mut offset = None;

        self.scanner.scan_forward(|window| {
            let from = if seen_newline {
                0
            } else {
                match memchr::memchr(NEWLINE, window) {
                    Some(i) => {
                        seen_newline = true;
                        i
                    }
                    None => return false,
                }
            };
            match window[from..].iter().position(|&b| b != NEWLINE) {
                Some(i) => {
                    offset = Some(window.len() - from - i);
                    true
                }
                None => false,
            }
        })?;

        let Some(offset) = offset else {
            log::debug!("next_line: no boundary ahead");
            return Err(Error::LineNotFound);
        };
        self.scanner.rewind_by(offset)?;
        Ok(())
    }

    /// Move the cursor to the start of the line before the one it is in.
    ///
    /// From anywhere inside line `i`, or from its first byte, this lands on
    /// line `i - 1`. With nothing before but the first line, the cursor goes
    /// to 0.
    ///
    /// # Errors
    /// [`Error::EndOfStream`] if the cursor is already at 0.
    pub fn prev_line(&mut self) -> Result<(), Error> {
        if self.scanner.position()? == 0 {
            return Err(Error::EndOfStream);
        }

        // Walking back, the first `\n` ends the previous line and the second
        // ends the one before it. The target starts right after the second.
        let mut newlines = 0;
        let mut offset = None;
        self.scanner.scan_reverse(|window| {
            for i in memchr::memchr_iter(NEWLINE, window) {
                newlines += 1;
                if newlines == 2 {
                    offset = Some(i);
                    return true;
                }
            }
            false
        })?;

        match offset {
            Some(i) => {
                self.scanner.rewind_by(i)?;
            }
            None => {
                self.scanner.seek(SeekFrom::Start(0))?;
            }
        }
        Ok(())
    }

    /// Read the line at the cursor and hand its bytes (without the `\n`) to
    /// `f`. The cursor ends on the first byte of the following line.
    ///
    /// # Errors
    /// [`Error::EndOfStream`] if the source runs out before a `\n`; bytes of
    /// an unterminated last line are dropped and the cursor is left at the
    /// end. Errors returned by `f` are passed through.
    pub fn read_line<F>(&mut self, f: F) -> Result<(), Error>
    where
        F: FnOnce(&[u8]) -> Result<(), Error>,
    {
        self.line.clear();
        let res = match self.fill_line() {
            Ok(()) => f(&self.line),
            Err(e) => Err(e),
        };
        self.line.clear();
        res
    }

    fn fill_line(&mut self) -> Result<(), Error> {
        loop {
            let window = self.scanner.read_window()?;
            if window.is_empty() {
                return Err(Error::EndOfStream);
            }
            let n = window.len();
            let Some(idx) = memchr::memchr(NEWLINE, window) else {
                self.line.extend_from_slice(window);
                continue;
            };
            self.line.extend_from_slice(&window[..idx]);
            // Give back what was read past the newline.
            self.scanner.rewind_by(n - idx - 1)?;
            return Ok(());
        }
    }

    /// Read lines from the cursor until the stream ends or `f` returns
    /// [`Error::EarlyTermination`].
    ///
    /// # Errors
    /// Any error other than those two, from the source or from `f`.
    pub fn read_lines<F>(&mut self, mut f: F) -> Result<(), Error>
    where
        F: FnMut(&[u8]) -> Result<(), Error>,
    {
        loop {
            match self.read_line(&mut f) {
                Ok(()) => {}
                Err(Error::EndOfStream | Error::EarlyTermination) => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }

    /// Iterate over lines from the cursor onwards, each as an owned buffer.
    ///
    /// Stopping early is just dropping the iterator; the cursor then sits at
    /// the start of the first line not yet yielded.
    pub fn lines(&mut self) -> Lines<'_, S> {
        Lines {
            seeker: self,
            done: false,
        }
    }
}

/// Iterator returned by [`LineSeeker::lines`].
pub struct Lines<'a, S> {
    seeker: &'a mut LineSeeker<S>,
    done: bool,
}

impl<S: Read + Seek> Iterator for Lines<'_, S> {
    type Item = Result<Vec<u8>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut out = None;
        match self.seeker.read_line(|line| {
            out = Some(line.to_vec());
            Ok(())
        }) {
            Ok(()) => out.map(Ok),
            Err(Error::EndOfStream) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<S: Read + Seek> FusedIterator for Lines<'_, S> {}
