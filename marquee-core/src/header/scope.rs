use super::context::{HeaderContext, PageHeaderSettings};

/// A mounted page's claim on the header settings.
///
/// Mounting broadcasts the page's preference (absent means `false`) and takes
/// ownership of the settings. Dropping the scope, i.e. navigating away, broadcasts
/// `false` if this page asserted `true` and no newer page has mounted since, so the
/// next page never inherits a stale reversed header and never loses its own.
pub struct PageScope {
    context: HeaderContext,
    asserted: bool,
    token: u64,
}

impl PageScope {
    pub fn mount(context: &HeaderContext, reverse_header_colors: Option<bool>) -> Self {
        let asserted = reverse_header_colors.unwrap_or(false);
        let token = context.claim();
        context.broadcast(PageHeaderSettings {
            reverse_header_colors: asserted,
        });
        Self {
            context: context.clone(),
            asserted,
            token,
        }
    }

    pub fn reverse_header_colors(&self) -> bool {
        self.asserted
    }

    /// Whether this page is still the most recently mounted one.
    pub fn is_current(&self) -> bool {
        self.context.is_owner(self.token)
    }

    pub fn unmount(self) {}
}

impl Drop for PageScope {
    fn drop(&mut self) {
        if !self.asserted {
            return;
        }
        if self.context.is_owner(self.token) {
            self.context.broadcast(PageHeaderSettings {
                reverse_header_colors: false,
            });
        } else {
            tracing::debug!("Superseded page unmounted, header settings left to the newer page");
        }
    }
}
