pub(crate) mod geometry;
pub(crate) mod playback;
pub(crate) mod scrubber;
