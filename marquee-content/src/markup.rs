//! Reads header state back out of rendered page markup.
//!
//! A component mounted after the last `pageHeaderSettingsChange` broadcast has no
//! replay to rely on. It reads the header element's `data-*` attributes instead, plus
//! the on-scroll custom properties declared by the first content container.

use marquee_core::header::{CssVariables, HeaderAttributes, HeaderContext, HeaderTheme};
use marquee_core::model::HeaderSettings;
use scraper::{Html, Selector};

const HEADER_SELECTOR: &str = "[data-header-transparent]";
const CONTENT_CONTAINER_SELECTOR: &str = "[data-content-container]";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSnapshot {
    /// `None` when the markup has no header element
    pub attributes: Option<HeaderAttributes>,
    pub css: CssVariables,
}

impl HeaderSnapshot {
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);

        let attributes = Selector::parse(HEADER_SELECTOR).ok().and_then(|selector| {
            document.select(&selector).next().map(|header| {
                let element = header.value();
                HeaderAttributes::from_attr_values(
                    element.attr(HeaderAttributes::TRANSPARENT_ATTR),
                    element.attr(HeaderAttributes::REVERSE_ATTR),
                )
            })
        });

        let css = Selector::parse(CONTENT_CONTAINER_SELECTOR)
            .ok()
            .and_then(|selector| {
                document
                    .select(&selector)
                    .next()
                    .and_then(|container| container.value().attr("style"))
                    .map(CssVariables::parse)
            })
            .unwrap_or_default();

        Self { attributes, css }
    }

    /// A header context seeded from the snapshot, or `None` without a header element.
    pub fn context(&self) -> Option<HeaderContext> {
        self.attributes.map(HeaderContext::from_attributes)
    }

    pub fn theme(&self, settings: &HeaderSettings) -> HeaderTheme {
        HeaderTheme::resolve(&self.css, settings)
    }
}
