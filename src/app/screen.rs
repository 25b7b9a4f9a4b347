//! Tracks whether the terminal UI owns the screen, so log output written to
//! stderr does not land on top of the alternate screen.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

/// True between terminal setup and restore.
pub fn screen_active() -> bool {
    SCREEN_ACTIVE.load(Ordering::Relaxed)
}

pub(crate) fn set_screen_active(active: bool) {
    SCREEN_ACTIVE.store(active, Ordering::Relaxed);
}

/// Writer that discards everything while the UI owns the screen.
#[derive(Debug)]
pub struct ScreenAwareWriter<W> {
    inner: W,
}

impl<W: Write> ScreenAwareWriter<W> {
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ScreenAwareWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if screen_active() {
            return Ok(buf.len());
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// `MakeWriter` target for the default stderr log subscriber.
pub fn stderr_log_writer() -> ScreenAwareWriter<io::Stderr> {
    ScreenAwareWriter::new(io::stderr())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_is_silent_only_while_screen_is_active() {
        let mut writer = ScreenAwareWriter::new(Vec::new());

        set_screen_active(true);
        writer.write_all(b"save failed\n").unwrap();
        set_screen_active(false);
        writer.write_all(b"after restore\n").unwrap();

        assert_eq!(writer.into_inner(), b"after restore\n");
    }
}
