//! Deterministic stand-ins for the hardware, for driving [`run`](crate::run) off-device.
//!
//! [`ScriptedInputs`] replays a fixed list of samples, [`CountingTicks`] and [`ScriptedTicks`]
//! end after a known number of ticks, and [`FrameRecorder`] keeps every frame written.

use heapless::Vec;

use crate::controller::{InputSample, RingInputs, TickSource};
use crate::led_ring::{Frame, WriteFrame};
use crate::{Error, Result};

/// Replays a fixed list of input samples, one per tick.
///
/// Asking for more samples than the script holds is an error unless `repeat_last` is set.
#[derive(Clone, Debug)]
pub struct ScriptedInputs<'a> {
    script: &'a [InputSample],
    next: usize,
    repeat_last: bool,
}

impl<'a> ScriptedInputs<'a> {
    #[must_use]
    pub const fn new(script: &'a [InputSample]) -> Self {
        Self {
            script,
            next: 0,
            repeat_last: false,
        }
    }

    /// Keeps returning the final sample once the script runs out.
    #[must_use]
    pub const fn repeat_last(mut self) -> Self {
        self.repeat_last = true;
        self
    }

    /// Number of samples handed out so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.next
    }
}

impl RingInputs for ScriptedInputs<'_> {
    async fn sample(&mut self) -> Result<InputSample> {
        let sample = match self.script.get(self.next) {
            Some(sample) => *sample,
            None if self.repeat_last => match self.script.last() {
                Some(sample) => *sample,
                None => return Err(Error::ScriptExhausted(self.next as u64)),
            },
            None => return Err(Error::ScriptExhausted(self.next as u64)),
        };
        self.next = self.next.saturating_add(1);
        Ok(sample)
    }
}

/// Ticks `1..=count`, as the device numbers them, with no delay.
#[derive(Clone, Copy, Debug)]
pub struct CountingTicks {
    next: u64,
    last: u64,
}

impl CountingTicks {
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self::starting_at(1, count)
    }

    /// `count` consecutive ticks beginning at `first`.
    #[must_use]
    pub const fn starting_at(first: u64, count: u64) -> Self {
        Self {
            next: first,
            last: first.saturating_add(count),
        }
    }
}

impl TickSource for CountingTicks {
    async fn next_tick(&mut self) -> Option<u64> {
        if self.next >= self.last {
            return None;
        }
        let tick = self.next;
        // `tick < last`, so this never saturates.
        self.next = tick.saturating_add(1);
        Some(tick)
    }
}

/// Replays an explicit list of tick numbers.
#[derive(Clone, Debug)]
pub struct ScriptedTicks<'a> {
    ticks: core::slice::Iter<'a, u64>,
}

impl<'a> ScriptedTicks<'a> {
    #[must_use]
    pub fn new(ticks: &'a [u64]) -> Self {
        Self { ticks: ticks.iter() }
    }
}

impl TickSource for ScriptedTicks<'_> {
    async fn next_tick(&mut self) -> Option<u64> {
        self.ticks.next().copied()
    }
}

/// Keeps up to `CAP` frames in write order.
#[derive(Clone, Debug, Default)]
pub struct FrameRecorder<const N: usize, const CAP: usize> {
    frames: Vec<Frame<N>, CAP>,
}

impl<const N: usize, const CAP: usize> FrameRecorder<N, CAP> {
    #[must_use]
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    #[must_use]
    pub fn frames(&self) -> &[Frame<N>] {
        &self.frames
    }

    #[must_use]
    pub fn last(&self) -> Option<&Frame<N>> {
        self.frames.last()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl<const N: usize, const CAP: usize> WriteFrame<N> for FrameRecorder<N, CAP> {
    async fn write_frame(&mut self, frame: &Frame<N>) -> Result<()> {
        self.frames.push(*frame).map_err(|_| Error::RecorderFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Voltage;
    use crate::mode::ButtonState;
    use embassy_futures::block_on;

    const RED: InputSample = InputSample::new(ButtonState::new(true, false, false), Voltage(2.0));
    const GREEN: InputSample = InputSample::new(ButtonState::new(false, false, true), Voltage(0.0));

    #[test]
    fn scripted_inputs_in_order_then_exhausted() {
        let script = [RED, GREEN];
        let mut inputs = ScriptedInputs::new(&script);
        assert_eq!(block_on(inputs.sample()).expect("first"), RED);
        assert_eq!(block_on(inputs.sample()).expect("second"), GREEN);
        assert!(matches!(
            block_on(inputs.sample()),
            Err(Error::ScriptExhausted(2))
        ));
        assert_eq!(inputs.consumed(), 2);
    }

    #[test]
    fn repeat_last_keeps_going() {
        let script = [RED, GREEN];
        let mut inputs = ScriptedInputs::new(&script).repeat_last();
        for _ in 0..2 {
            block_on(inputs.sample()).expect("scripted");
        }
        assert_eq!(block_on(inputs.sample()).expect("repeated"), GREEN);

        let mut empty = ScriptedInputs::new(&[]).repeat_last();
        assert!(matches!(block_on(empty.sample()), Err(Error::ScriptExhausted(0))));
    }

    #[test]
    fn counting_ticks_start_at_one() {
        let mut ticks = CountingTicks::new(3);
        let seen: std::vec::Vec<u64> =
            core::iter::from_fn(|| block_on(ticks.next_tick())).collect();
        assert_eq!(seen, [1, 2, 3]);

        let mut ticks = CountingTicks::starting_at(300, 1);
        assert_eq!(block_on(ticks.next_tick()), Some(300));
        assert_eq!(block_on(ticks.next_tick()), None);
    }

    #[test]
    fn counting_ticks_stop_at_the_top_of_the_range() {
        let mut ticks = CountingTicks::starting_at(u64::MAX - 1, 5);
        assert_eq!(block_on(ticks.next_tick()), Some(u64::MAX - 1));
        assert_eq!(block_on(ticks.next_tick()), None);
    }

    #[test]
    fn scripted_ticks_replay_exactly() {
        let mut ticks = ScriptedTicks::new(&[5, 300, 7]);
        assert_eq!(block_on(ticks.next_tick()), Some(5));
        assert_eq!(block_on(ticks.next_tick()), Some(300));
        assert_eq!(block_on(ticks.next_tick()), Some(7));
        assert_eq!(block_on(ticks.next_tick()), None);
    }

    #[test]
    fn recorder_reports_full() {
        let mut recorder = FrameRecorder::<2, 1>::new();
        block_on(recorder.write_frame(&Frame::new())).expect("room for one");
        assert!(matches!(
            block_on(recorder.write_frame(&Frame::new())),
            Err(Error::RecorderFull)
        ));
        assert_eq!(recorder.frames().len(), 1);
        recorder.clear();
        assert!(recorder.last().is_none());
    }
}
