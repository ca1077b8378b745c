//! Feed plumbing: frames in, presented posts out.
//!
//! The pump decodes frames on the transport task and pushes posts over a
//! bounded channel. Exactly one consumer drains the channel and owns the
//! display, so appends happen in arrival order with a single writer and no
//! locking.

use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::decode::{EventFilter, Post};
use crate::ring::{FreshnessRank, RotatingDisplay, SlotIndex};
use crate::stream::{Frame, StreamResult};

/// Channel-based post sender (async, bounded).
pub type PostTx = mpsc::Sender<Post>;

/// Channel-based post receiver (async, bounded).
pub type PostRx = mpsc::Receiver<Post>;

/// Default channel capacity between decode and display.
///
/// Bounded so a stalled display applies backpressure to the pump instead of
/// queueing posts without limit.
pub const DEFAULT_POST_CHANNEL_CAPACITY: usize = 32;

/// Creates a bounded post channel with the default capacity.
pub fn create_post_channel() -> (PostTx, PostRx) {
    mpsc::channel(DEFAULT_POST_CHANNEL_CAPACITY)
}

/// Receives presentation updates from the display consumer.
///
/// One call per successful decode. `rank` is strictly increasing across
/// calls; the most recent rank is drawn frontmost.
pub trait Present {
    fn present(&mut self, slot: SlotIndex, post: &Post, rank: FreshnessRank);
}

/// Drains frames from the transport, decodes matching ones, and forwards
/// posts to the consumer channel.
///
/// Decode failures are logged with the offending frame and dropped; frames
/// are transient pushes, not requests, so there is nothing to retry. The
/// pump ends when the stream ends, the consumer goes away, or the transport
/// reports an error.
///
/// # Errors
/// Returns the transport error that ended the stream. A clean end of
/// stream or a departed consumer is `Ok(())`.
pub async fn pump_frames<S>(
    mut frames: S,
    filter: &EventFilter,
    tx: PostTx,
) -> StreamResult<()>
where
    S: Stream<Item = StreamResult<Frame>> + Unpin,
{
    while let Some(result) = frames.next().await {
        let frame = result?;

        match filter.decode(&frame) {
            Some(Ok(post)) => {
                debug!(username = %post.account.username, "decoded post");
                if tx.send(post).await.is_err() {
                    // Consumer gone; nothing left to feed.
                    return Ok(());
                }
            }
            Some(Err(error)) => {
                warn!(
                    event = %frame.event,
                    payload = %frame.data,
                    %error,
                    "dropping undecodable frame"
                );
            }
            None => {}
        }
    }
    Ok(())
}

/// Drains the post channel into the display, presenting each append.
///
/// This is the only writer of the display for its whole lifetime; posts are
/// applied strictly in channel order. Returns when the pump side closes.
pub async fn drive_display<P: Present>(
    mut rx: PostRx,
    display: &mut RotatingDisplay,
    presenter: &mut P,
) {
    while let Some(post) = rx.recv().await {
        let (slot, rank) = display.append(post);
        if let Some(held) = display.slots()[slot].post() {
            presenter.present(slot, held, rank);
        }
    }
}
