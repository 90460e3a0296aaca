use std::sync::Arc;

use crate::foundation::core::{FrameIndex, Size};
use crate::foundation::error::{AniError, AniResult};

/// One decoded raster frame, premultiplied RGBA8.
///
/// Cloning is cheap: pixel storage is shared.
#[derive(Clone)]
pub struct DecodedFrame {
    width: u32,
    height: u32,
    pixmap: Arc<vello_cpu::Pixmap>,
}

impl std::fmt::Debug for DecodedFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixmap_ptr", &Arc::as_ptr(&self.pixmap))
            .finish()
    }
}

impl DecodedFrame {
    pub(crate) fn new(width: u32, height: u32, pixmap: Arc<vello_cpu::Pixmap>) -> Self {
        Self {
            width,
            height,
            pixmap,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Intrinsic size, used for aspect-ratio math.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Decoded pixels.
    pub fn pixmap(&self) -> &vello_cpu::Pixmap {
        &self.pixmap
    }

    pub(crate) fn paint(&self, quality: vello_cpu::peniko::ImageQuality) -> vello_cpu::Image {
        vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::clone(&self.pixmap)),
            sampler: vello_cpu::peniko::ImageSampler {
                quality,
                ..Default::default()
            },
        }
    }
}

/// Immutable, fully decoded, non-empty frame sequence.
///
/// Only the preload barrier ([`crate::load_all`]) constructs one, so holding a `FrameSet`
/// means every slot decoded.
#[derive(Clone, Debug)]
pub struct FrameSet {
    frames: Arc<[DecodedFrame]>,
}

impl FrameSet {
    pub(crate) fn from_frames(frames: Vec<DecodedFrame>) -> AniResult<Self> {
        if frames.is_empty() {
            return Err(AniError::validation("frame set must contain at least one frame"));
        }
        Ok(Self {
            frames: frames.into(),
        })
    }

    /// Number of frames `N`.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; a frame set is never empty.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`, if in range.
    pub fn get(&self, index: FrameIndex) -> Option<&DecodedFrame> {
        self.frames.get(index.0)
    }

    /// The first frame. Its aspect ratio drives surface geometry.
    pub fn first(&self) -> &DecodedFrame {
        &self.frames[0]
    }

    /// Index of the last frame, `N - 1`.
    pub fn last_index(&self) -> FrameIndex {
        FrameIndex(self.frames.len() - 1)
    }

    /// Iterate frames in order.
    pub fn iter(&self) -> impl Iterator<Item = &DecodedFrame> {
        self.frames.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/frame_set.rs"]
mod tests;
