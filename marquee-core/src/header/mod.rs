//! Header color/state coordination.
//!
//! Three signals decide whether the header and its navigation use reversed
//! (on-dark) styling:
//!
//! - the scroll position, reduced to `scrolled = scroll_y > 10`
//! - the active page's `reverse_header_colors` preference, broadcast on
//!   [`PAGE_HEADER_SETTINGS_EVENT`]
//! - the header's own transparency, fixed per render
//!
//! There is no central store of derived state. The header chrome, the hamburger
//! icon and every menu item subscribe to the two live signals on their own and run
//! the same [`HeaderInputs::derive`] over them. [`HeaderContext`] is the explicitly
//! scoped carrier of those signals, and [`HeaderAttributes`] is the snapshot a
//! late subscriber reads instead of replaying missed broadcasts.

mod colors;
mod components;
mod context;
mod display;
mod logo;
mod observable;
mod scope;

pub use colors::{
    BG_ON_SCROLL_VAR, CssVariables, HamburgerColors, HeaderTheme, MenuItemColors,
    TEXT_ON_SCROLL_VAR,
};
pub use components::{
    Attached, HamburgerIcon, HeaderChrome, HeaderSignalListener, HeaderView, MenuItemState,
};
pub use context::{HeaderAttributes, HeaderContext, PAGE_HEADER_SETTINGS_EVENT, PageHeaderSettings, ScrollSignal};
pub use display::{HeaderDisplayState, HeaderInputs, HeaderMode, SCROLL_THRESHOLD_PX, is_scrolled};
pub use logo::LogoSwap;
pub use observable::{Observable, Subscription};
pub use scope::PageScope;
