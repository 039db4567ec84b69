//! Fixed-window scanning over a `Read + Seek` source, in either direction.
//!
//! The scanner owns the byte source and a single 32-byte window that every
//! pass reuses. Forward passes are plain repeated reads. Reverse passes drive
//! the forward-only `read` backwards: seek back one chunk, read it, then seek
//! back again to undo the displacement of the read.

use std::io::{self, Read, Seek, SeekFrom};

/// Size of the scan window in bytes.
pub const SCAN_WINDOW: usize = 32;

pub(crate) struct ChunkScanner<S> {
    source: S,
    window: [u8; SCAN_WINDOW],
}

impl<S: Read + Seek> ChunkScanner<S> {
    pub(crate) fn new(source: S) -> Self {
        Self {
            source,
            window: [0; SCAN_WINDOW],
        }
    }

    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    pub(crate) fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub(crate) fn replace_source(&mut self, source: S) -> S {
        std::mem::replace(&mut self.source, source)
    }

    pub(crate) fn into_source(self) -> S {
        self.source
    }

    /// Absolute cursor position of the source.
    pub(crate) fn position(&mut self) -> io::Result<u64> {
        self.source.stream_position()
    }

    pub(crate) fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.source.seek(pos)
    }

    /// Move the cursor `n` bytes towards the start of the stream.
    pub(crate) fn rewind_by(&mut self, n: usize) -> io::Result<u64> {
        self.source.seek(SeekFrom::Current(-(n as i64)))
    }

    /// One forward read into the window. Returns the filled prefix,
    /// empty at end of stream.
    pub(crate) fn read_window(&mut self) -> io::Result<&[u8]> {
        let n = self.source.read(&mut self.window)?;
        Ok(&self.window[..n])
    }

    /// Read forward window by window until `pred` returns true or the
    /// source is exhausted.
    ///
    /// The cursor is left wherever the last read put it; callers seek from
    /// there to land on the byte they were after.
    pub(crate) fn scan_forward<F>(&mut self, mut pred: F) -> io::Result<()>
    where
        F: FnMut(&[u8]) -> bool,
    {
        loop {
            let n = self.source.read(&mut self.window)?;
            if n == 0 {
                log::trace!("forward scan hit end of stream");
                return Ok(());
            }
            log::trace!("forward window of {n} bytes");
            if pred(&self.window[..n]) {
                return Ok(());
            }
        }
    }

    /// Walk towards the start of the stream window by window.
    ///
    /// Each window is reversed before `pred` sees it, so index 0 is the byte
    /// closest to where the pass started. When `pred` returns true the cursor
    /// is left at the end of that window (just past its last byte in stream
    /// order). Otherwise the pass ends with the cursor at 0.
    ///
    /// A source that runs dry before a window is full (it shrank since the
    /// pass started) fails with `UnexpectedEof`.
    pub(crate) fn scan_reverse<F>(&mut self, mut pred: F) -> io::Result<()>
    where
        F: FnMut(&[u8]) -> bool,
    {
        let mut curr = self.source.stream_position()?;
        while curr > 0 {
            // Final chunk is sized to the distance left, never past the start.
            let chunk = curr.min(SCAN_WINDOW as u64) as usize;
            self.rewind_by(chunk)?;

            // Plain reads, no retry: every error goes to the caller.
            let mut filled = 0;
            while filled < chunk {
                let n = self.source.read(&mut self.window[filled..chunk])?;
                if n == 0 {
                    log::debug!("reverse scan: source ended early at {curr}");
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "source shrank during reverse scan",
                    ));
                }
                filled += n;
            }

            let window = &mut self.window[..chunk];
            window.reverse();
            log::trace!("reverse window of {chunk} bytes ending at {curr}");
            if pred(window) {
                return Ok(());
            }

            curr = self.rewind_by(chunk)?;
        }
        Ok(())
    }
}
