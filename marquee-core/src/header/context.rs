use super::display::{HeaderInputs, is_scrolled};
use super::observable::{Observable, Subscription};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Name of the page-to-header broadcast.
pub const PAGE_HEADER_SETTINGS_EVENT: &str = "pageHeaderSettingsChange";

/// Payload of [`PAGE_HEADER_SETTINGS_EVENT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageHeaderSettings {
    pub reverse_header_colors: bool,
}

/// Attribute snapshot the header container exposes for late subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HeaderAttributes {
    pub header_transparent: bool,
    pub reverse_header_colors: bool,
}

impl HeaderAttributes {
    pub const TRANSPARENT_ATTR: &'static str = "data-header-transparent";
    pub const REVERSE_ATTR: &'static str = "data-reverse-header-colors";

    /// Read the attribute values as rendered. Anything but `"true"` is false.
    pub fn from_attr_values(transparent: Option<&str>, reverse: Option<&str>) -> Self {
        let flag = |value: Option<&str>| value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));
        Self {
            header_transparent: flag(transparent),
            reverse_header_colors: flag(reverse),
        }
    }

    pub fn to_attr_pairs(&self) -> [(&'static str, String); 2] {
        [
            (Self::TRANSPARENT_ATTR, self.header_transparent.to_string()),
            (Self::REVERSE_ATTR, self.reverse_header_colors.to_string()),
        ]
    }
}

/// The `scrolled` signal. Recomputed on every scroll notification; listeners hear
/// about it only when the boolean flips, since nothing downstream can change otherwise.
#[derive(Clone)]
pub struct ScrollSignal {
    scrolled: Observable<bool>,
}

impl ScrollSignal {
    pub fn new(scroll_y: f64) -> Self {
        Self {
            scrolled: Observable::new(is_scrolled(scroll_y)),
        }
    }

    pub fn on_scroll(&self, scroll_y: f64) {
        let scrolled = is_scrolled(scroll_y);
        if scrolled != self.scrolled.get() {
            self.scrolled.set(scrolled);
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled.get()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.scrolled.subscribe(move |scrolled| listener(*scrolled))
    }
}

/// Header signals scoped to one rendering tree.
///
/// Cloning shares the same channel and scroll signal, so a context can be handed to
/// every component under the header.
#[derive(Clone)]
pub struct HeaderContext {
    is_transparent: bool,
    settings: Observable<PageHeaderSettings>,
    scroll: ScrollSignal,
    /// Mount count; the latest mounted page owns the settings
    owner: Arc<AtomicU64>,
}

impl HeaderContext {
    pub fn new(is_transparent: bool) -> Self {
        Self {
            is_transparent,
            settings: Observable::new(PageHeaderSettings::default()),
            scroll: ScrollSignal::new(0.0),
            owner: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Rebuild a context from the rendered attribute snapshot.
    pub fn from_attributes(attributes: HeaderAttributes) -> Self {
        let context = Self::new(attributes.header_transparent);
        context.settings.set(PageHeaderSettings {
            reverse_header_colors: attributes.reverse_header_colors,
        });
        context
    }

    pub fn event_name(&self) -> &'static str {
        PAGE_HEADER_SETTINGS_EVENT
    }

    pub fn is_transparent(&self) -> bool {
        self.is_transparent
    }

    pub fn settings(&self) -> PageHeaderSettings {
        self.settings.get()
    }

    pub fn broadcast(&self, settings: PageHeaderSettings) {
        tracing::debug!(
            event = PAGE_HEADER_SETTINGS_EVENT,
            reverse_header_colors = settings.reverse_header_colors,
            "Broadcasting header settings"
        );
        self.settings.set(settings);
    }

    /// Hand ownership of the settings to a newly mounted page.
    pub(crate) fn claim(&self) -> u64 {
        self.owner.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_owner(&self, token: u64) -> bool {
        self.owner.load(Ordering::SeqCst) == token
    }

    pub fn subscribe_settings<F>(&self, listener: F) -> Subscription
    where
        F: Fn(PageHeaderSettings) + Send + Sync + 'static,
    {
        self.settings.subscribe(move |settings| listener(*settings))
    }

    pub fn scroll(&self) -> &ScrollSignal {
        &self.scroll
    }

    pub fn on_scroll(&self, scroll_y: f64) {
        self.scroll.on_scroll(scroll_y);
    }

    pub fn inputs(&self) -> HeaderInputs {
        HeaderInputs {
            is_transparent: self.is_transparent,
            reverse_header_colors: self.settings.get().reverse_header_colors,
            scrolled: self.scroll.is_scrolled(),
        }
    }

    pub fn attributes(&self) -> HeaderAttributes {
        HeaderAttributes {
            header_transparent: self.is_transparent,
            reverse_header_colors: self.settings.get().reverse_header_colors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wire_shape() {
        let json = serde_json::to_string(&PageHeaderSettings {
            reverse_header_colors: true,
        })
        .unwrap();
        assert_eq!(json, r#"{"reverseHeaderColors":true}"#);
    }

    #[test]
    fn test_attribute_round_trip_through_context() {
        let attributes = HeaderAttributes::from_attr_values(Some("true"), Some("TRUE"));
        let context = HeaderContext::from_attributes(attributes);
        assert_eq!(context.attributes(), attributes);

        let pairs = context.attributes().to_attr_pairs();
        assert_eq!(pairs[0], ("data-header-transparent", "true".to_string()));
        assert_eq!(pairs[1], ("data-reverse-header-colors", "true".to_string()));
    }

    #[test]
    fn test_scroll_signal_only_dispatches_on_flip() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let signal = ScrollSignal::new(0.0);
        let flips = Arc::new(AtomicUsize::new(0));
        let counter = flips.clone();
        let _sub = signal.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        for y in [1.0, 5.0, 11.0, 40.0, 300.0, 3.0] {
            signal.on_scroll(y);
        }
        assert_eq!(flips.load(Ordering::SeqCst), 2);
        assert!(!signal.is_scrolled());
    }
}
