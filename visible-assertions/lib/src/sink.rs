//! Output sinks for report lines.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::utils::escape_codes::strip_escape_codes;

/// Boxed sink owned by a [`RenderingContext`](crate::context::RenderingContext).
pub type Sink = Box<dyn Write + Send>;

/// The default sink.
pub fn stdout_sink() -> Sink {
    Box::new(io::stdout())
}

/// An in-memory sink for capturing report output.
///
/// Clones share the same buffer, so one clone can be handed to a
/// rendering context while the other is inspected.
///
/// ```
/// use std::io::Write;
/// use visible_assertions::sink::CaptureBuffer;
///
/// let capture = CaptureBuffer::new();
/// let mut writer = capture.clone();
/// writer.write_all(b"\x1b[32mok\x1b[0m\n").unwrap();
/// assert_eq!(capture.plain_contents(), "ok\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, escape codes included.
    pub fn contents(&self) -> String {
        let bytes = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Everything written so far with escape codes stripped.
    pub fn plain_contents(&self) -> String {
        strip_escape_codes(self.contents())
    }

    pub fn clear(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn is_empty(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// A boxed handle sharing this buffer.
    pub fn sink(&self) -> Sink {
        Box::new(self.clone())
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
