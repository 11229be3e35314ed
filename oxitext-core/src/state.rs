//! Push-back and pending-output buffers shared by the stateful decoders.
//!
//! A decoder sometimes reads a byte, discovers that it cannot continue the
//! current sequence, and has to hand that byte back so the next call can
//! start a new sequence with it. [`DecoderState`] keeps such bytes on a
//! small LIFO stack that is drained before the underlying source is read
//! again. It also keeps a FIFO queue of results for decode steps that
//! produce more than one value at once.
//!
//! End of stream is never pushed back: byte sources report it stickily, so
//! re-reading the source after the stack drains yields it again.

use crate::stream::ByteSource;
use crate::traits::Decoded;
use std::collections::VecDeque;

/// Push-back stack plus pending-output queue for one decoding stream.
#[derive(Debug, Clone, Default)]
pub struct DecoderState {
    // Top of the stack is the last element.
    pushback: Vec<u8>,
    pending: VecDeque<Decoded>,
}

impl DecoderState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self {
            pushback: Vec::with_capacity(4),
            pending: VecDeque::new(),
        }
    }

    /// Read the next input byte: the most recently pushed-back byte if there
    /// is one, otherwise the next byte from `input`.
    pub fn read_input_byte(&mut self, input: &mut dyn ByteSource) -> Option<u8> {
        match self.pushback.pop() {
            Some(b) => Some(b),
            None => input.read_byte(),
        }
    }

    /// Push one byte back.
    pub fn prepend_one(&mut self, b: u8) {
        self.pushback.push(b);
    }

    /// Push two bytes back; they are re-read as `b1`, then `b2`.
    pub fn prepend_two(&mut self, b1: u8, b2: u8) {
        self.pushback.push(b2);
        self.pushback.push(b1);
    }

    /// Push three bytes back; they are re-read as `b1`, `b2`, then `b3`.
    pub fn prepend_three(&mut self, b1: u8, b2: u8, b3: u8) {
        self.pushback.push(b3);
        self.pushback.push(b2);
        self.pushback.push(b1);
    }

    /// Push an arbitrary run back; it is re-read in slice order.
    pub fn prepend(&mut self, bytes: &[u8]) {
        self.pushback.extend(bytes.iter().rev());
    }

    /// Queue a result to be returned by a later decode step.
    pub fn append_char(&mut self, value: Decoded) {
        self.pending.push_back(value);
    }

    /// Take the oldest queued result, or [`Decoded::End`] if none is queued.
    pub fn get_char(&mut self) -> Decoded {
        self.pending.pop_front().unwrap_or(Decoded::End)
    }

    /// Whether any queued results are waiting.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// View this state and `input` together as one byte source that drains
    /// the push-back stack first.
    pub fn source<'a>(&'a mut self, input: &'a mut dyn ByteSource) -> StateSource<'a> {
        StateSource { state: self, input }
    }
}

/// A [`ByteSource`] reading through a [`DecoderState`]'s push-back stack.
pub struct StateSource<'a> {
    state: &'a mut DecoderState,
    input: &'a mut dyn ByteSource,
}

impl ByteSource for StateSource<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        self.state.read_input_byte(self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::SliceSource;

    #[test]
    fn test_pushback_is_drained_first() {
        let mut state = DecoderState::new();
        let mut src = SliceSource::new(&[0x10, 0x11]);
        assert_eq!(state.read_input_byte(&mut src), Some(0x10));
        state.prepend_one(0x10);
        assert_eq!(state.read_input_byte(&mut src), Some(0x10));
        assert_eq!(state.read_input_byte(&mut src), Some(0x11));
        assert_eq!(state.read_input_byte(&mut src), None);
    }

    #[test]
    fn test_prepend_preserves_stream_order() {
        let mut state = DecoderState::new();
        let mut src = SliceSource::new(&[9]);
        state.prepend_one(4);
        state.prepend_three(1, 2, 3);
        state.prepend_two(0xA, 0xB);
        let mut got = Vec::new();
        while let Some(b) = state.read_input_byte(&mut src) {
            got.push(b);
        }
        assert_eq!(got, vec![0xA, 0xB, 1, 2, 3, 4, 9]);
    }

    #[test]
    fn test_prepend_slice_grows() {
        let mut state = DecoderState::new();
        let mut src = SliceSource::new(&[]);
        state.prepend(&[1, 2, 3, 4, 5, 6]);
        let got: Vec<u8> = std::iter::from_fn(|| state.read_input_byte(&mut src)).collect();
        assert_eq!(got, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_pending_queue_is_fifo() {
        let mut state = DecoderState::new();
        assert_eq!(state.get_char(), Decoded::End);
        state.append_char(Decoded::Char('a'));
        state.append_char(Decoded::Error);
        state.append_char(Decoded::Char('b'));
        assert!(state.has_pending());
        assert_eq!(state.get_char(), Decoded::Char('a'));
        assert_eq!(state.get_char(), Decoded::Error);
        assert_eq!(state.get_char(), Decoded::Char('b'));
        assert_eq!(state.get_char(), Decoded::End);
        assert!(!state.has_pending());
    }

    #[test]
    fn test_state_source() {
        let mut state = DecoderState::new();
        let mut src = SliceSource::new(&[3]);
        state.prepend_two(1, 2);
        let mut view = state.source(&mut src);
        assert_eq!(view.read_byte(), Some(1));
        assert_eq!(view.read_byte(), Some(2));
        assert_eq!(view.read_byte(), Some(3));
        assert_eq!(view.read_byte(), None);
    }
}
