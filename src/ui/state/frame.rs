// SPDX-License-Identifier: MPL-2.0
//! Frame request bookkeeping.
//!
//! Animations ask for "one more frame" after every step. Whoever drives the
//! animation (a host's per-frame callback, or the tokio interval in
//! [`crate::media::upload`]) only ticks while a request is pending, and hands
//! the request id back when it fires. Cancelling drops the pending id, so a
//! frame that was already in flight is recognised as stale and ignored.

/// Identifier of a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

/// At most one pending frame at a time.
#[derive(Debug, Clone, Default)]
pub struct FrameRequest {
    pending: Option<FrameId>,
    next_id: u64,
}

impl FrameRequest {
    /// Requests a frame. Repeated requests before the frame fires are
    /// coalesced into the pending one.
    pub fn request(&mut self) -> FrameId {
        if let Some(id) = self.pending {
            return id;
        }
        let id = FrameId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending = Some(id);
        id
    }

    /// Cancels the pending frame, returning its id if there was one.
    pub fn cancel(&mut self) -> Option<FrameId> {
        self.pending.take()
    }

    /// Consumes the pending request if `id` matches it.
    ///
    /// Returns false for cancelled or superseded ids.
    pub fn fire(&mut self, id: FrameId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// The id of the pending frame, if any.
    #[must_use]
    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_coalesced_until_fired() {
        let mut frames = FrameRequest::default();
        let first = frames.request();
        let second = frames.request();
        assert_eq!(first, second);
        assert!(frames.fire(first));
        assert!(!frames.is_pending());

        let third = frames.request();
        assert_ne!(third, first);
    }

    #[test]
    fn cancelled_frame_is_stale() {
        let mut frames = FrameRequest::default();
        let id = frames.request();
        assert_eq!(frames.cancel(), Some(id));
        assert!(!frames.fire(id));
        assert_eq!(frames.pending(), None);
    }

    #[test]
    fn superseded_frame_is_stale() {
        let mut frames = FrameRequest::default();
        let old = frames.request();
        frames.cancel();
        let new = frames.request();
        assert!(!frames.fire(old));
        assert!(frames.is_pending());
        assert!(frames.fire(new));
    }

    #[test]
    fn cancel_without_pending_frame_is_noop() {
        let mut frames = FrameRequest::default();
        assert_eq!(frames.cancel(), None);
    }
}
