/// Vertical offset past which the header switches to its shadowed variant.
pub const SHADOW_THRESHOLD_PX: f64 = 8.0;

pub fn is_scrolled(offset_y: f64) -> bool {
    offset_y > SHADOW_THRESHOLD_PX
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollShadow {
    scrolled: bool,
}

impl ScrollShadow {
    /// Mount-time evaluation; a page restored mid-scroll starts shadowed.
    pub fn mount(offset_y: f64) -> Self {
        Self {
            scrolled: is_scrolled(offset_y),
        }
    }

    /// Returns `true` when the style variant changed.
    pub fn on_scroll(&mut self, offset_y: f64) -> bool {
        let next = is_scrolled(offset_y);
        let changed = next != self.scrolled;
        self.scrolled = next;
        changed
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn header_class(&self) -> &'static str {
        if self.scrolled {
            "site-header site-header--scrolled"
        } else {
            "site-header"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(8.0));
        assert!(is_scrolled(8.5));
        assert!(!is_scrolled(-30.0));
    }

    #[test]
    fn reports_only_transitions() {
        let mut s = ScrollShadow::mount(0.0);
        assert_eq!(s.header_class(), "site-header");
        assert!(!s.on_scroll(4.0));
        assert!(s.on_scroll(120.0));
        assert!(!s.on_scroll(300.0));
        assert_eq!(s.header_class(), "site-header site-header--scrolled");
        assert!(s.on_scroll(0.0));
        assert!(!s.is_scrolled());
    }

    #[test]
    fn mount_reads_current_offset() {
        assert!(ScrollShadow::mount(400.0).is_scrolled());
    }
}
