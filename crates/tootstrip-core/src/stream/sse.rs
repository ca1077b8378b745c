use std::pin::Pin;

use eventsource_stream::{EventStream, Eventsource};
use futures_util::Stream;

use super::{Frame, StreamError, StreamErrorKind, StreamResult};

/// SSE framer that converts a byte stream into named [`Frame`]s.
///
/// Field parsing, chunk reassembly, and UTF-8 handling are delegated to
/// `eventsource-stream`; this type only maps its events onto the transport
/// error taxonomy.
pub struct FrameStream<S> {
    inner: EventStream<S>,
}

impl<S> FrameStream<S> {
    pub fn new(stream: S) -> Self
    where
        S: Eventsource,
    {
        Self {
            inner: stream.eventsource(),
        }
    }
}

impl<S, E> Stream for FrameStream<S>
where
    S: Stream<Item = std::result::Result<bytes::Bytes, E>> + Unpin,
    E: std::error::Error + Send + Sync + 'static,
{
    type Item = StreamResult<Frame>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        use std::task::Poll;

        match Pin::new(&mut self.inner).poll_next(cx) {
            Poll::Ready(Some(Ok(event))) => Poll::Ready(Some(Ok(Frame {
                id: if event.id.is_empty() {
                    None
                } else {
                    Some(event.id)
                },
                event: event.event,
                data: event.data,
            }))),
            Poll::Ready(Some(Err(e))) => Poll::Ready(Some(Err(StreamError::new(
                StreamErrorKind::Protocol,
                format!("SSE stream error: {e}"),
            )))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
