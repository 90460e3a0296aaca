//! Scroll-position triggers: start/end resolution, progress, and enter/leave toggles.

use crate::animation::ease::Ease;
use crate::foundation::core::clamp_unit;
use crate::foundation::error::{AniError, AniResult};

/// An edge of the element or of the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

impl Edge {
    /// Position of the edge as a fraction of the box height.
    pub fn fraction(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
        }
    }

    fn parse(word: &str) -> Option<Self> {
        match word {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// A line in the viewport, measured down from its top.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportOffset {
    Edge(Edge),
    /// Percentage of the viewport height, e.g. `80.0` for `80%`.
    Percent(f64),
    Pixels(f64),
}

impl ViewportOffset {
    /// Distance from the viewport top in pixels.
    pub fn resolve(self, viewport_height: f64) -> f64 {
        match self {
            Self::Edge(edge) => edge.fraction() * viewport_height,
            Self::Percent(p) => p / 100.0 * viewport_height,
            Self::Pixels(px) => px,
        }
    }
}

/// "When `element` edge meets `viewport` line", e.g. `top 80%`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    pub element: Edge,
    pub viewport: ViewportOffset,
}

impl Anchor {
    /// `top top`.
    pub const TOP_TOP: Self = Self::new(Edge::Top, ViewportOffset::Edge(Edge::Top));
    /// `top bottom`.
    pub const TOP_BOTTOM: Self = Self::new(Edge::Top, ViewportOffset::Edge(Edge::Bottom));
    /// `bottom top`.
    pub const BOTTOM_TOP: Self = Self::new(Edge::Bottom, ViewportOffset::Edge(Edge::Top));

    pub const fn new(element: Edge, viewport: ViewportOffset) -> Self {
        Self { element, viewport }
    }

    /// Parse `"<edge> <edge|N%|Npx|N>"`, e.g. `"top 80%"`, `"bottom top"`, `"top -80"`.
    pub fn parse(text: &str) -> AniResult<Self> {
        let bad = || AniError::validation(format!("invalid trigger anchor '{text}'"));
        let mut words = text.split_whitespace();
        let (Some(el), Some(vp), None) = (words.next(), words.next(), words.next()) else {
            return Err(bad());
        };
        let element = Edge::parse(el).ok_or_else(bad)?;
        let viewport = if let Some(edge) = Edge::parse(vp) {
            ViewportOffset::Edge(edge)
        } else if let Some(pct) = vp.strip_suffix('%') {
            ViewportOffset::Percent(parse_number(pct).ok_or_else(bad)?)
        } else {
            let px = vp.strip_suffix("px").unwrap_or(vp);
            ViewportOffset::Pixels(parse_number(px).ok_or_else(bad)?)
        };
        Ok(Self::new(element, viewport))
    }

    /// Scroll position at which the anchor is met.
    pub fn scroll_position(self, element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
        element_top + self.element.fraction() * element_height
            - self.viewport.resolve(viewport_height)
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Where a trigger ends.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndSpec {
    Anchor(Anchor),
    /// Multiples of the viewport height past the start: `+=300%` is `Relative(3.0)`.
    Relative(f64),
    /// Absolute scroll position.
    Absolute(f64),
}

impl EndSpec {
    /// Parse `"+=N%"`, a bare number, or an anchor.
    pub fn parse(text: &str) -> AniResult<Self> {
        let t = text.trim();
        if let Some(rel) = t.strip_prefix("+=") {
            let pct = rel.strip_suffix('%').and_then(parse_number).ok_or_else(|| {
                AniError::validation(format!(
                    "relative trigger end '{text}' must be a viewport percentage"
                ))
            })?;
            return Ok(Self::Relative(pct / 100.0));
        }
        if let Some(px) = parse_number(t) {
            return Ok(Self::Absolute(px));
        }
        Anchor::parse(t).map(Self::Anchor)
    }
}

/// Static description of a trigger.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerSpec {
    /// Document offset of the trigger element.
    pub element_top: f64,
    pub element_height: f64,
    pub start: Anchor,
    pub end: EndSpec,
    /// Pin the element for the length of the trigger.
    pub pin: bool,
    /// Kill the trigger after its first `Enter`.
    pub once: bool,
    /// Seconds the scrubbed progress takes to catch up with the scroll position; `0` disables
    /// smoothing.
    pub scrub_lag: f64,
}

impl TriggerSpec {
    /// Trigger over an element with the default extent `top bottom` to `bottom top`.
    pub fn new(element_top: f64, element_height: f64) -> Self {
        Self {
            element_top,
            element_height,
            start: Anchor::TOP_BOTTOM,
            end: EndSpec::Anchor(Anchor::BOTTOM_TOP),
            pin: false,
            once: false,
            scrub_lag: 0.0,
        }
    }

    pub fn start(mut self, start: Anchor) -> Self {
        self.start = start;
        self
    }

    pub fn end(mut self, end: EndSpec) -> Self {
        self.end = end;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pin = true;
        self
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    pub fn scrub(mut self, lag_secs: f64) -> Self {
        self.scrub_lag = if lag_secs.is_finite() { lag_secs.max(0.0) } else { 0.0 };
        self
    }

    /// Resolve `(start, end)` scroll positions for a viewport height. `end >= start`.
    pub fn resolve(&self, viewport_height: f64) -> (f64, f64) {
        let start = self
            .start
            .scroll_position(self.element_top, self.element_height, viewport_height);
        let end = match self.end {
            EndSpec::Anchor(a) => {
                a.scroll_position(self.element_top, self.element_height, viewport_height)
            }
            EndSpec::Relative(m) => start + m * viewport_height,
            EndSpec::Absolute(px) => px,
        };
        (start, end.max(start))
    }
}

/// Crossing callbacks, named after the direction of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    /// Scrolled forward past the start.
    Enter,
    /// Scrolled forward past the end.
    Leave,
    /// Scrolled backward past the end.
    EnterBack,
    /// Scrolled backward past the start.
    LeaveBack,
}

/// Direction of the last scroll movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    #[default]
    Forward,
    Backward,
}

/// Where the scroll position is relative to a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Before,
    Inside,
    After,
}

/// What a trigger handler receives.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerUpdate {
    /// Raw scroll progress through the trigger, in `[0, 1]`.
    pub progress: f64,
    /// Progress after scrub smoothing; equals `progress` when the trigger has no lag.
    pub scrubbed: f64,
    pub direction: ScrollDirection,
    /// `true` while the scroll position is between start and end.
    pub is_active: bool,
    /// Crossings since the previous update, in the order they happened.
    pub toggles: Vec<Toggle>,
}

/// Eases a delivered progress towards its target over a fixed lag, restarting whenever the
/// target moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubSmoother {
    lag: f64,
    from: f64,
    to: f64,
    started_at: f64,
}

impl ScrubSmoother {
    pub fn new(lag: f64, initial: f64) -> Self {
        Self {
            lag: lag.max(0.0),
            from: initial,
            to: initial,
            started_at: 0.0,
        }
    }

    /// Jump straight to `value`.
    pub fn reset(&mut self, value: f64) {
        self.from = value;
        self.to = value;
    }

    /// Start easing from the current value towards `target`.
    pub fn retarget(&mut self, target: f64, now: f64) {
        if target == self.to {
            return;
        }
        self.from = self.value_at(now);
        self.to = target;
        self.started_at = now;
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn value_at(&self, now: f64) -> f64 {
        if self.lag <= 0.0 {
            return self.to;
        }
        let t = (now - self.started_at) / self.lag;
        self.from + (self.to - self.from) * Ease::Power3Out.apply(t)
    }

    pub fn is_settled(&self, now: f64) -> bool {
        self.lag <= 0.0 || now - self.started_at >= self.lag
    }
}

/// Live trigger state for one [`TriggerSpec`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTrigger {
    spec: TriggerSpec,
    start: f64,
    end: f64,
    region: Option<Region>,
    direction: ScrollDirection,
    last_scroll: Option<f64>,
    last_scrubbed: f64,
    smoother: ScrubSmoother,
}

impl ScrollTrigger {
    pub fn new(spec: TriggerSpec, viewport_height: f64) -> Self {
        let (start, end) = spec.resolve(viewport_height);
        Self {
            spec,
            start,
            end,
            region: None,
            direction: ScrollDirection::Forward,
            last_scroll: None,
            last_scrubbed: 0.0,
            smoother: ScrubSmoother::new(spec.scrub_lag, 0.0),
        }
    }

    /// Recompute start and end for a new viewport height.
    pub fn refresh(&mut self, viewport_height: f64) {
        (self.start, self.end) = self.spec.resolve(viewport_height);
    }

    pub fn spec(&self) -> &TriggerSpec {
        &self.spec
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Extra page height added by pinning.
    pub fn pin_spacing(&self) -> f64 {
        if self.spec.pin { self.end - self.start } else { 0.0 }
    }

    /// How far a pinned element has been held in place at `scroll_y`.
    pub fn pin_offset(&self, scroll_y: f64) -> f64 {
        if !self.spec.pin {
            return 0.0;
        }
        (scroll_y - self.start).clamp(0.0, self.end - self.start)
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn is_active(&self) -> bool {
        self.region == Some(Region::Inside)
    }

    /// Raw progress at `scroll_y`.
    pub fn progress_at(&self, scroll_y: f64) -> f64 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if scroll_y >= self.start { 1.0 } else { 0.0 };
        }
        clamp_unit((scroll_y - self.start) / span)
    }

    fn region_at(&self, scroll_y: f64) -> Region {
        if scroll_y < self.start {
            Region::Before
        } else if scroll_y > self.end {
            Region::After
        } else {
            Region::Inside
        }
    }

    /// Evaluate at a scroll position. The first evaluation treats the previous region as
    /// `Before` and snaps the smoother to the raw progress.
    pub fn update(&mut self, scroll_y: f64, now: f64) -> TriggerUpdate {
        let progress = self.progress_at(scroll_y);
        if let Some(last) = self.last_scroll {
            if scroll_y > last {
                self.direction = ScrollDirection::Forward;
            } else if scroll_y < last {
                self.direction = ScrollDirection::Backward;
            }
        }
        let first = self.region.is_none();
        let prev = self.region.unwrap_or(Region::Before);
        let next = self.region_at(scroll_y);
        let toggles = toggles_between(prev, next);

        if first {
            self.smoother.reset(progress);
        } else {
            self.smoother.retarget(progress, now);
        }
        self.region = Some(next);
        self.last_scroll = Some(scroll_y);
        self.last_scrubbed = self.smoother.value_at(now);

        TriggerUpdate {
            progress,
            scrubbed: self.last_scrubbed,
            direction: self.direction,
            is_active: next == Region::Inside,
            toggles,
        }
    }

    /// Advance scrub smoothing to `now`. `None` when the scrubbed progress did not move.
    pub fn tick(&mut self, now: f64) -> Option<TriggerUpdate> {
        let last_scroll = self.last_scroll?;
        let scrubbed = self.smoother.value_at(now);
        if scrubbed == self.last_scrubbed {
            return None;
        }
        self.last_scrubbed = scrubbed;
        Some(TriggerUpdate {
            progress: self.progress_at(last_scroll),
            scrubbed,
            direction: self.direction,
            is_active: self.is_active(),
            toggles: Vec::new(),
        })
    }
}

fn toggles_between(prev: Region, next: Region) -> Vec<Toggle> {
    use Region::*;
    match (prev, next) {
        (Before, Inside) => vec![Toggle::Enter],
        (Before, After) => vec![Toggle::Enter, Toggle::Leave],
        (Inside, After) => vec![Toggle::Leave],
        (After, Inside) => vec![Toggle::EnterBack],
        (After, Before) => vec![Toggle::EnterBack, Toggle::LeaveBack],
        (Inside, Before) => vec![Toggle::LeaveBack],
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/trigger.rs"]
mod tests;
