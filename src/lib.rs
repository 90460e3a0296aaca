//! `ani_me` drives the scroll-scrubbed image-sequence hero of the Ani_Me studio page.
//!
//! A fixed sequence of frames is preloaded behind an all-or-nothing barrier, then a pinned scroll
//! span selects which frame is painted onto a high-DPI surface:
//!
//! - Load a [`HeroConfig`] and preload frames with [`load_all`] (or [`HeroSequence::preload`])
//! - Mount the hero on a [`ScrollDriver`] with [`HeroSequence::mount`]
//! - Feed scroll, resize, and clock events to the driver; read pixels back with
//!   [`RenderSurface::snapshot`]
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod config;
mod foundation;
mod page;
mod render;
mod scroll;
mod scrub;

pub use crate::foundation::core::{Affine, FrameIndex, Point, Rect, Size, Viewport, clamp_unit};
pub use crate::foundation::error::{AniError, AniResult, LoadError};

pub use crate::config::{
    HeroConfig, LoaderConfig, MAX_FRAME_COUNT, PinConfig, PreloaderConfig, RenderConfig,
    SequenceConfig,
};

pub use crate::assets::decode::decode_frame;
pub use crate::assets::frame_set::{DecodedFrame, FrameSet};
pub use crate::assets::loader::{
    FrameSource, FsSource, LoadOpts, LoadProgress, load_all, load_all_with_progress,
};
pub use crate::assets::naming::{frame_url, normalize_rel_path, sequence_urls};

pub use crate::render::cpu::{CpuSurface, SurfaceStats};
pub use crate::render::surface::{FrameRGBA, RenderSettings, RenderSurface, Smoothing};

pub use crate::scrub::geometry::{SurfaceGeometry, compute_geometry};
pub use crate::scrub::playback::{PlaybackState, frame_index_for};
pub use crate::scrub::scrubber::{FrameScrubber, ScrubStats};

pub use crate::scroll::driver::ScrollDriver;
pub use crate::scroll::events::{Listeners, Subscription};
pub use crate::scroll::smooth::{ScrollToOptions, SmoothScroll, SmoothScrollOptions};
pub use crate::scroll::trigger::{
    Anchor, Edge, EndSpec, Region, ScrollDirection, ScrollTrigger, ScrubSmoother, Toggle,
    TriggerSpec, TriggerUpdate, ViewportOffset,
};

pub use crate::animation::counter::{COUNT_UP_SECS, StatCounter};
pub use crate::animation::ease::{Ease, lerp};
pub use crate::animation::reveal::{PlayDirection, RevealState};
pub use crate::animation::timeline::{Position, Props, Timeline, Tween, hero_intro};

pub use crate::page::hero::{HeroSequence, MountedHero};
pub use crate::page::navbar::{
    BLUR_INTO_ABOUT, NavItem, Navbar, NavbarState, SHOW_BEFORE_ABOUT, link_scroll_options,
    navigate,
};
pub use crate::page::preloader::{LoadingCounter, Preloader, PreloaderPhase, RING_CIRCUMFERENCE};
