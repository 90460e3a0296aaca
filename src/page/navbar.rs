use std::cell::Cell;
use std::rc::Rc;

use crate::animation::ease::Ease;
use crate::scroll::driver::ScrollDriver;
use crate::scroll::events::Subscription;
use crate::scroll::smooth::{ScrollToOptions, SmoothScroll};

/// The navbar appears this many pixels before the About section reaches the top.
pub const SHOW_BEFORE_ABOUT: f64 = 100.0;
/// The navbar blurs its background once scrolled this far into the About section.
pub const BLUR_INTO_ABOUT: f64 = 50.0;

/// Visibility and backdrop of the fixed navbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavbarState {
    pub visible: bool,
    pub blurred: bool,
}

impl NavbarState {
    pub fn at(scroll_y: f64, about_top: f64) -> Self {
        Self {
            visible: scroll_y >= about_top - SHOW_BEFORE_ABOUT,
            blurred: scroll_y > about_top + BLUR_INTO_ABOUT,
        }
    }
}

/// Navbar links.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavItem {
    About,
    Services,
    Contact,
}

impl NavItem {
    pub const ALL: [Self; 3] = [Self::About, Self::Services, Self::Contact];

    pub fn label(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Services => "Services",
            Self::Contact => "Contact",
        }
    }

    /// Element id of the section the link scrolls to.
    pub fn section_id(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Services => "services-section",
            Self::Contact => "contact",
        }
    }
}

/// Options for link-driven scrolling: stop 80px short of the section, over 1.5s.
pub fn link_scroll_options() -> ScrollToOptions {
    ScrollToOptions {
        offset: -80.0,
        duration: Some(1.5),
        easing: Some(Ease::Lenis),
        immediate: false,
    }
}

/// Scroll to `item`'s section. A missing section is a no-op; returns whether a scroll started.
pub fn navigate(smooth: &mut SmoothScroll, item: NavItem, section_top: Option<f64>) -> bool {
    let Some(top) = section_top else {
        tracing::debug!(section = item.section_id(), "nav target missing");
        return false;
    };
    smooth.scroll_to(top, link_scroll_options());
    true
}

/// Navbar state kept current by the driver's scroll events.
#[derive(Debug)]
pub struct Navbar {
    state: Rc<Cell<NavbarState>>,
    about_top: Rc<Cell<f64>>,
    _scroll: Subscription,
}

impl Navbar {
    /// Follow `driver`, evaluating once immediately.
    pub fn attach(driver: &ScrollDriver, about_top: f64) -> Self {
        let state = Rc::new(Cell::new(NavbarState::at(driver.scroll_y(), about_top)));
        let about = Rc::new(Cell::new(about_top));

        let s = Rc::clone(&state);
        let a = Rc::clone(&about);
        let scroll = driver.on_scroll(move |y| s.set(NavbarState::at(*y, a.get())));
        Self {
            state,
            about_top: about,
            _scroll: scroll,
        }
    }

    pub fn state(&self) -> NavbarState {
        self.state.get()
    }

    /// Move the About section, e.g. after a layout change. Takes effect on the next scroll.
    pub fn set_about_top(&self, about_top: f64) {
        self.about_top.set(about_top);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/navbar.rs"]
mod tests;
