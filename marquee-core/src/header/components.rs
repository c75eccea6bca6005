use super::colors::{HamburgerColors, HeaderTheme, MenuItemColors};
use super::context::HeaderContext;
use super::display::{HeaderDisplayState, HeaderInputs};
use super::logo::LogoSwap;
use super::observable::Subscription;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Rendering seam for the header container.
pub trait HeaderView: Send + 'static {
    /// `None` clears the inline override and falls back to the stylesheet.
    fn set_background(&mut self, color: Option<&str>);
    fn set_scrolled_marker(&mut self, scrolled: bool);
    /// Applied to every text-bearing navigation element. `None` clears the override.
    fn set_nav_text_color(&mut self, color: Option<&str>);
    fn set_logo_src(&mut self, src: &str);
}

/// A component that recomputes its styling from the header inputs.
///
/// Called with the lock of its [`Attached`] held; implementations must not broadcast.
pub trait HeaderSignalListener: Send + 'static {
    fn on_inputs(&mut self, inputs: HeaderInputs);
}

struct Bound<L> {
    listener: L,
    inputs: HeaderInputs,
}

fn lock<L>(bound: &Mutex<Bound<L>>) -> MutexGuard<'_, Bound<L>> {
    bound.lock().unwrap_or_else(PoisonError::into_inner)
}

fn refresh<L: HeaderSignalListener>(bound: &Mutex<Bound<L>>, context: &HeaderContext) {
    let mut bound = lock(bound);
    let inputs = context.inputs();
    bound.inputs = inputs;
    bound.listener.on_inputs(inputs);
}

/// A listener subscribed to both live header signals.
///
/// Attaching samples the context once so the first frame is already right. Dropping
/// the handle unsubscribes from both signals; a callback already running keeps the
/// listener alive until it returns.
pub struct Attached<L> {
    bound: Arc<Mutex<Bound<L>>>,
    _settings: Subscription,
    _scroll: Subscription,
}

impl<L: HeaderSignalListener> Attached<L> {
    pub fn attach(context: &HeaderContext, mut listener: L) -> Self {
        let inputs = context.inputs();
        listener.on_inputs(inputs);
        let bound = Arc::new(Mutex::new(Bound { listener, inputs }));

        // Each dispatch re-reads the context, so a value delivered late by a
        // re-entrant `set` never overwrites a newer one.
        let weak = Arc::downgrade(&bound);
        let source = context.clone();
        let settings = context.subscribe_settings(move |_| {
            if let Some(bound) = weak.upgrade() {
                refresh(&bound, &source);
            }
        });

        let weak = Arc::downgrade(&bound);
        let source = context.clone();
        let scroll = context.scroll().subscribe(move |_| {
            if let Some(bound) = weak.upgrade() {
                refresh(&bound, &source);
            }
        });

        Self {
            bound,
            _settings: settings,
            _scroll: scroll,
        }
    }

    pub fn inputs(&self) -> HeaderInputs {
        lock(&self.bound).inputs
    }

    pub fn with<R>(&self, read: impl FnOnce(&L) -> R) -> R {
        read(&lock(&self.bound).listener)
    }

    /// Change local state (hover, focus) and recompute against the current inputs.
    pub fn update<R>(&self, change: impl FnOnce(&mut L) -> R) -> R {
        let mut bound = lock(&self.bound);
        let result = change(&mut bound.listener);
        let inputs = bound.inputs;
        bound.listener.on_inputs(inputs);
        result
    }

    pub fn detach(self) {}
}

/// The header container: background, scrolled marker, nav text color and logo.
pub struct HeaderChrome<V> {
    view: V,
    theme: HeaderTheme,
    logo: Option<LogoSwap>,
    state: HeaderDisplayState,
}

impl<V: HeaderView> HeaderChrome<V> {
    pub fn new(view: V, theme: HeaderTheme, logo: Option<LogoSwap>) -> Self {
        Self {
            view,
            theme,
            logo,
            state: HeaderDisplayState::default(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn logo(&self) -> Option<&LogoSwap> {
        self.logo.as_ref()
    }

    pub fn display_state(&self) -> HeaderDisplayState {
        self.state
    }
}

impl<V: HeaderView> HeaderSignalListener for HeaderChrome<V> {
    fn on_inputs(&mut self, inputs: HeaderInputs) {
        let state = inputs.derive();

        if state.apply_background {
            self.view
                .set_background(self.theme.background_on_scroll.as_deref());
            self.view.set_scrolled_marker(true);
        } else {
            self.view.set_background(Some("transparent"));
            self.view.set_scrolled_marker(false);
        }

        if state.apply_reverse_text {
            self.view
                .set_nav_text_color(self.theme.text_on_scroll.as_deref());
        } else {
            self.view.set_nav_text_color(None);
        }

        if let Some(logo) = self.logo.as_mut()
            && logo.apply(state.swap_logo)
        {
            self.view.set_logo_src(logo.src());
        }

        self.state = state;
    }
}

#[derive(Debug, Clone, Default)]
pub struct HamburgerIcon {
    colors: HamburgerColors,
    reversed: bool,
}

impl HamburgerIcon {
    pub fn new(colors: HamburgerColors) -> Self {
        Self {
            colors,
            reversed: false,
        }
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn color(&self) -> Option<&str> {
        self.colors.pick(self.reversed)
    }
}

impl HeaderSignalListener for HamburgerIcon {
    fn on_inputs(&mut self, inputs: HeaderInputs) {
        self.reversed = inputs.derive().apply_reverse_text;
    }
}

#[derive(Debug, Clone, Default)]
pub struct MenuItemState {
    colors: MenuItemColors,
    reversed: bool,
    hovered: bool,
}

impl MenuItemState {
    pub fn new(colors: MenuItemColors) -> Self {
        Self {
            colors,
            reversed: false,
            hovered: false,
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn color(&self) -> Option<&str> {
        self.colors.pick(self.reversed, self.hovered)
    }
}

impl HeaderSignalListener for MenuItemState {
    fn on_inputs(&mut self, inputs: HeaderInputs) {
        self.reversed = inputs.derive().apply_reverse_text;
    }
}
