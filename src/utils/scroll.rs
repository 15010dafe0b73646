/// Scroll position of the message history, measured in rendered lines from the top.
///
/// While `follow_bottom` is set the view sticks to the newest content: every
/// layout pass snaps the offset to the maximum. Scrolling up releases it and
/// reaching the bottom again re-engages it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    pub offset: u16,
    pub follow_bottom: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0,
            follow_bottom: true,
        }
    }
}

impl ScrollState {
    pub fn max_offset(total_lines: usize, viewport_height: u16) -> u16 {
        let total = total_lines.min(u16::MAX as usize) as u16;
        total.saturating_sub(viewport_height)
    }

    /// Reconcile the offset with a fresh layout. Returns the offset to draw with.
    pub fn sync(&mut self, total_lines: usize, viewport_height: u16) -> u16 {
        let max = Self::max_offset(total_lines, viewport_height);
        if self.follow_bottom || self.offset > max {
            self.offset = max;
        }
        self.offset
    }

    pub fn scroll_up(&mut self, lines: u16) {
        if lines == 0 {
            return;
        }
        self.offset = self.offset.saturating_sub(lines);
        self.follow_bottom = false;
    }

    pub fn scroll_down(&mut self, lines: u16, total_lines: usize, viewport_height: u16) {
        let max = Self::max_offset(total_lines, viewport_height);
        self.offset = self.offset.saturating_add(lines).min(max);
        if self.offset >= max {
            self.follow_bottom = true;
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow_bottom = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_growing_content() {
        let mut scroll = ScrollState::default();
        assert_eq!(scroll.sync(5, 10), 0);
        assert_eq!(scroll.sync(25, 10), 15);
        assert_eq!(scroll.sync(40, 10), 30);
    }

    #[test]
    fn scrolling_up_stops_following() {
        let mut scroll = ScrollState::default();
        scroll.sync(30, 10);
        scroll.scroll_up(3);
        assert!(!scroll.follow_bottom);
        assert_eq!(scroll.sync(50, 10), 17);
    }

    #[test]
    fn reaching_bottom_resumes_following() {
        let mut scroll = ScrollState::default();
        scroll.sync(30, 10);
        scroll.scroll_up(5);
        scroll.scroll_down(2, 30, 10);
        assert!(!scroll.follow_bottom);
        scroll.scroll_down(10, 30, 10);
        assert!(scroll.follow_bottom);
        assert_eq!(scroll.offset, 20);
    }

    #[test]
    fn offset_is_clamped_when_viewport_grows() {
        let mut scroll = ScrollState {
            offset: 20,
            follow_bottom: false,
        };
        assert_eq!(scroll.sync(30, 25), 5);
        assert_eq!(ScrollState::max_offset(3, 10), 0);
    }
}
