/// A consumer of successive byte chunks.
///
/// The terminal consumer in this workspace is an in-memory hash context, so
/// `accept` is infallible; a sink that could reject data would signal it
/// through [`good`](Sink::good).
pub trait Sink {
    /// Consume the next chunk of the stream.
    fn accept(&mut self, data: &[u8]);

    /// Whether the sink is still able to accept data.
    ///
    /// Reserved for backpressure signaling; every sink in this workspace is
    /// always ready.
    fn good(&self) -> bool {
        true
    }
}

/// Collects the stream into memory. Used by tests and by callers that need
/// the serialized bytes rather than a digest.
impl Sink for Vec<u8> {
    fn accept(&mut self, data: &[u8]) {
        self.extend_from_slice(data);
    }
}
