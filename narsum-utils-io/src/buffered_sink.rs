use crate::{DEFAULT_BUF_SIZE, Sink};

/// Decorates an inner [`Sink`] with a fixed-capacity coalescing buffer.
///
/// Small writes are copied into the buffer and forwarded as one chunk once
/// the buffer fills; writes at least as large as the buffer bypass it
/// entirely to avoid the copy. The buffered length is always strictly below
/// the capacity except transiently during a flush.
pub struct BufferedSink<S> {
    inner: S,
    buf: Vec<u8>,
    capacity: usize,
}

impl<S: Sink> BufferedSink<S> {
    pub fn new(inner: S) -> Self {
        Self::with_capacity(DEFAULT_BUF_SIZE, inner)
    }

    pub fn with_capacity(capacity: usize, inner: S) -> Self {
        assert!(capacity > 0, "buffer capacity must be non-zero");
        Self {
            inner,
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Forward the buffered bytes to the inner sink and empty the buffer.
    /// No-op when the buffer is empty.
    pub fn flush(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        self.inner.accept(&self.buf);
        self.buf.clear();
    }

    /// Flush any buffered remainder and yield the inner sink.
    ///
    /// Finalization goes through here, so the inner sink can only ever
    /// observe a fully drained buffer.
    pub fn into_inner(mut self) -> S {
        self.flush();
        self.inner
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }
}

impl<S: Sink> Sink for BufferedSink<S> {
    fn accept(&mut self, data: &[u8]) {
        // Optimisation: bypass the buffer if the data fills it entirely.
        if self.buf.is_empty() && data.len() >= self.capacity {
            self.inner.accept(data);
            return;
        }
        if self.buf.len() + data.len() > self.capacity {
            self.flush();
            // Retry against the now-empty buffer; may take the bypass path.
            self.accept(data);
            return;
        }
        self.buf.extend_from_slice(data);
        if self.buf.len() == self.capacity {
            self.flush();
        }
    }

    fn good(&self) -> bool {
        self.inner.good()
    }
}
