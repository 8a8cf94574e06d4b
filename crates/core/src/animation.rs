//! Timed animation sequencing
//!
//! A [`Timeline`] is a finite list of states, each held for a fixed duration.
//! The active state is an index into that list; it advances once the time spent
//! in it reaches its duration. Callers map each [`Frame`] to whatever the
//! state animates (a pose, a light position) using the reported progress.

use serde::{Deserialize, Serialize};

/// One entry of a timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Step<S> {
    state: S,
    /// Seconds, always > 0
    duration: f32,
}

/// Snapshot returned by [`Timeline::advance`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a, S> {
    /// Index of the state this frame belongs to
    pub index: usize,
    pub state: &'a S,
    /// Normalized time within the state, in `[0, 1]`
    pub progress: f32,
}

/// Sequence of timed animation states
///
/// Deserialized timelines are checked like [`Timeline::push`]: every duration
/// must be positive and the playhead must sit inside its state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawTimeline<S>",
    bound(deserialize = "S: Deserialize<'de>")
)]
pub struct Timeline<S> {
    steps: Vec<Step<S>>,
    current: usize,
    /// Time spent in the current state
    elapsed: f32,
    /// Time since start or last restart, never reset by transitions
    clock: f32,
    looping: bool,
}

impl<S> Timeline<S> {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            current: 0,
            elapsed: 0.0,
            clock: 0.0,
            looping: false,
        }
    }

    /// Append a state held for `duration` seconds
    ///
    /// # Errors
    ///
    /// [`AnimationError::NonPositiveDuration`] for zero, negative or non-finite
    /// durations.
    pub fn push(&mut self, state: S, duration: f32) -> Result<(), AnimationError> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(AnimationError::NonPositiveDuration { duration });
        }
        self.steps.push(Step { state, duration });
        Ok(())
    }

    /// Builder form of [`push`](Self::push)
    ///
    /// # Errors
    ///
    /// Same as [`push`](Self::push).
    pub fn then(mut self, state: S, duration: f32) -> Result<Self, AnimationError> {
        self.push(state, duration)?;
        Ok(self)
    }

    /// Wrap back to the first state after the last one
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Move time forward by `dt` seconds
    ///
    /// Returns the frame of the state that was active during this step. When
    /// the state's duration is reached the frame reports progress 1, the next
    /// state becomes active and its time starts from zero. Returns `None` once
    /// a non-looping timeline has run out of states.
    pub fn advance(&mut self, dt: f32) -> Option<Frame<'_, S>> {
        let dt = if dt > 0.0 { dt } else { 0.0 };
        self.clock += dt;

        let index = self.current;
        let duration = self.steps.get(index)?.duration;

        self.elapsed += dt;
        let progress = if self.elapsed < duration {
            self.elapsed / duration
        } else {
            self.elapsed = 0.0;
            self.current += 1;
            if self.looping && self.current == self.steps.len() {
                self.current = 0;
            }
            1.0
        };

        Some(Frame {
            index,
            state: &self.steps[index].state,
            progress,
        })
    }

    /// Frame of the active state without moving time
    pub fn current(&self) -> Option<Frame<'_, S>> {
        let step = self.steps.get(self.current)?;
        Some(Frame {
            index: self.current,
            state: &step.state,
            progress: self.elapsed / step.duration,
        })
    }

    /// `true` when a non-looping timeline has played every state
    pub fn is_finished(&self) -> bool {
        self.current >= self.steps.len()
    }

    /// Back to the first state with both clocks at zero
    pub fn restart(&mut self) {
        self.current = 0;
        self.elapsed = 0.0;
        self.clock = 0.0;
    }

    /// Seconds since start, keeps running across transitions and loops
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Sum of all state durations
    pub fn total_duration(&self) -> f32 {
        self.steps.iter().map(|s| s.duration).sum()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<S> Default for Timeline<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Unchecked serialized form of a [`Timeline`]
#[derive(Deserialize)]
struct RawTimeline<S> {
    steps: Vec<Step<S>>,
    current: usize,
    elapsed: f32,
    clock: f32,
    looping: bool,
}

impl<S> TryFrom<RawTimeline<S>> for Timeline<S> {
    type Error = AnimationError;

    fn try_from(raw: RawTimeline<S>) -> Result<Self, Self::Error> {
        let mut timeline = Timeline::new();
        for step in raw.steps {
            timeline.push(step.state, step.duration)?;
        }

        // A finished timeline rests past the last state with nothing elapsed
        let limit = timeline.steps.get(raw.current).map(|s| s.duration);
        let playhead_ok = match limit {
            Some(duration) => raw.elapsed >= 0.0 && raw.elapsed < duration,
            None => raw.current == timeline.steps.len() && raw.elapsed == 0.0,
        };
        if !playhead_ok {
            return Err(AnimationError::InvalidPlayhead {
                current: raw.current,
                elapsed: raw.elapsed,
            });
        }
        if !(raw.clock.is_finite() && raw.clock >= 0.0) {
            return Err(AnimationError::InvalidClock { clock: raw.clock });
        }

        timeline.current = raw.current;
        timeline.elapsed = raw.elapsed;
        timeline.clock = raw.clock;
        timeline.looping = raw.looping;
        Ok(timeline)
    }
}

/// Errors that can occur while building or restoring a timeline
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationError {
    NonPositiveDuration { duration: f32 },
    /// Restored state index or in-state time does not fit the steps
    InvalidPlayhead { current: usize, elapsed: f32 },
    InvalidClock { clock: f32 },
}

impl std::fmt::Display for AnimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimationError::NonPositiveDuration { duration } => {
                write!(f, "animation duration must be positive, got {duration}")
            }
            AnimationError::InvalidPlayhead { current, elapsed } => {
                write!(
                    f,
                    "playhead at state {current} after {elapsed}s does not fit the timeline"
                )
            }
            AnimationError::InvalidClock { clock } => {
                write!(f, "timeline clock must be a non-negative time, got {clock}")
            }
        }
    }
}

impl std::error::Error for AnimationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_steps() -> Timeline<&'static str> {
        Timeline::new()
            .then("raise", 2.0)
            .and_then(|t| t.then("lower", 1.0))
            .unwrap()
    }

    #[test]
    fn test_progress_within_state() {
        let mut timeline = two_steps();
        let frame = timeline.advance(0.5).unwrap();
        assert_eq!(frame.index, 0);
        assert_eq!(*frame.state, "raise");
        assert_eq!(frame.progress, 0.25);
    }

    #[test]
    fn test_transition_reports_completion() {
        let mut timeline = two_steps();
        timeline.advance(1.5);
        let frame = timeline.advance(1.0).unwrap();
        assert_eq!((frame.index, frame.progress), (0, 1.0));

        let frame = timeline.current().unwrap();
        assert_eq!((frame.index, frame.progress), (1, 0.0));
    }

    #[test]
    fn test_runs_out_without_looping() {
        let mut timeline = two_steps();
        timeline.advance(2.0);
        timeline.advance(1.0);
        assert!(timeline.is_finished());
        assert!(timeline.advance(0.5).is_none());
        assert_eq!(timeline.clock(), 3.5);
    }

    #[test]
    fn test_looping_wraps_to_first_state() {
        let mut timeline = two_steps();
        timeline.set_looping(true);
        timeline.advance(2.0);
        timeline.advance(1.0);
        assert!(!timeline.is_finished());
        assert_eq!(*timeline.advance(0.5).unwrap().state, "raise");
    }

    #[test]
    fn test_restart_and_totals() {
        let mut timeline = two_steps();
        timeline.advance(2.5);
        timeline.restart();
        assert_eq!(timeline.clock(), 0.0);
        assert_eq!(timeline.current().unwrap().index, 0);
        assert_eq!(timeline.total_duration(), 3.0);
        assert_eq!(timeline.len(), 2);
    }

    #[test]
    fn test_rejects_zero_duration() {
        let mut timeline = Timeline::new();
        assert_eq!(
            timeline.push("idle", 0.0),
            Err(AnimationError::NonPositiveDuration { duration: 0.0 })
        );
        assert!(timeline.is_empty());
    }

    fn raw(durations: &[f32], current: usize, elapsed: f32) -> RawTimeline<u8> {
        RawTimeline {
            steps: durations
                .iter()
                .enumerate()
                .map(|(i, &duration)| Step {
                    state: i as u8,
                    duration,
                })
                .collect(),
            current,
            elapsed,
            clock: 1.0,
            looping: true,
        }
    }

    #[test]
    fn test_restore_keeps_playhead() {
        let timeline = Timeline::try_from(raw(&[2.0, 1.0], 1, 0.5)).unwrap();
        let frame = timeline.current().unwrap();
        assert_eq!((frame.index, *frame.state, frame.progress), (1, 1, 0.5));
        assert_eq!(timeline.clock(), 1.0);
        assert!(timeline.is_looping());

        let finished = Timeline::try_from(raw(&[2.0], 1, 0.0)).unwrap();
        assert!(finished.is_finished());
    }

    #[test]
    fn test_restore_rejects_zero_duration() {
        assert_eq!(
            Timeline::try_from(raw(&[1.0, 0.0], 0, 0.0)),
            Err(AnimationError::NonPositiveDuration { duration: 0.0 })
        );
        assert!(Timeline::try_from(raw(&[f32::NAN], 0, 0.0)).is_err());
    }

    #[test]
    fn test_restore_rejects_bad_playhead() {
        assert_eq!(
            Timeline::try_from(raw(&[1.0], 3, 0.0)),
            Err(AnimationError::InvalidPlayhead {
                current: 3,
                elapsed: 0.0
            })
        );
        assert!(Timeline::try_from(raw(&[1.0], 0, 1.0)).is_err());
        assert!(Timeline::try_from(raw(&[1.0], 0, -0.1)).is_err());
        assert!(Timeline::try_from(raw(&[1.0], 0, f32::NAN)).is_err());

        let mut bad_clock = raw(&[1.0], 0, 0.0);
        bad_clock.clock = f32::INFINITY;
        assert_eq!(
            Timeline::try_from(bad_clock),
            Err(AnimationError::InvalidClock {
                clock: f32::INFINITY
            })
        );
    }
}
