use crate::foundation::core::{FrameIndex, clamp_unit};

/// `clamp(floor(progress * (N - 1)), 0, N - 1)`.
///
/// Progress is clamped to `[0, 1]` first (NaN counts as 0), so float drift past either end can
/// never produce an out-of-range index. `frame_count == 0` maps to index 0.
pub fn frame_index_for(progress: f64, frame_count: usize) -> FrameIndex {
    let Some(last) = frame_count.checked_sub(1) else {
        return FrameIndex(0);
    };
    let raw = (clamp_unit(progress) * last as f64).floor();
    FrameIndex((raw as usize).min(last))
}

/// Scroll progress and the frame it selects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackState {
    progress: f64,
    frame_index: FrameIndex,
}

impl PlaybackState {
    /// State for `progress` over a sequence of `frame_count` frames.
    pub fn new(progress: f64, frame_count: usize) -> Self {
        Self {
            progress: clamp_unit(progress),
            frame_index: frame_index_for(progress, frame_count),
        }
    }

    /// Clamped progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Selected frame.
    pub fn frame_index(&self) -> FrameIndex {
        self.frame_index
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scrub/playback.rs"]
mod tests;
