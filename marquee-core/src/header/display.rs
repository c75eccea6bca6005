use serde::Serialize;

/// Scroll offset (CSS pixels) past which the header counts as scrolled.
pub const SCROLL_THRESHOLD_PX: f64 = 10.0;

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLL_THRESHOLD_PX
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HeaderInputs {
    pub is_transparent: bool,
    pub reverse_header_colors: bool,
    pub scrolled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HeaderDisplayState {
    pub apply_reverse_text: bool,
    pub apply_background: bool,
    pub swap_logo: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    Normal,
    Reversed,
}

impl HeaderInputs {
    /// The background only follows real scroll. Text and logo may follow the page
    /// flag ahead of scrolling, but only over a transparent header.
    pub fn derive(self) -> HeaderDisplayState {
        let reversed = if self.is_transparent {
            self.reverse_header_colors || self.scrolled
        } else {
            self.scrolled
        };

        HeaderDisplayState {
            apply_reverse_text: reversed,
            apply_background: self.scrolled,
            swap_logo: reversed,
        }
    }
}

impl HeaderDisplayState {
    pub fn mode(&self) -> HeaderMode {
        if self.apply_reverse_text {
            HeaderMode::Reversed
        } else {
            HeaderMode::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(10.0));
        assert!(is_scrolled(10.5));
    }

    #[test]
    fn test_mode_follows_reverse_text() {
        let inputs = HeaderInputs {
            is_transparent: true,
            reverse_header_colors: true,
            scrolled: false,
        };
        assert_eq!(inputs.derive().mode(), HeaderMode::Reversed);
        assert_eq!(HeaderInputs::default().derive().mode(), HeaderMode::Normal);
    }
}
