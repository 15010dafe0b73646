//! Custom window chrome for the frameless chat window.
//!
//! The terminal screen stands in for the desktop. The window is a rectangle
//! on it with a one-row title bar (title on the left, buttons on the right), a
//! separator row, the body, and a one-cell margin along the right and bottom
//! edges that doubles as the resize handle. All coordinates are absolute
//! screen cells, the same space crossterm reports mouse events in.

use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tracing::debug;

use crate::core::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};

pub const TITLE_BAR_HEIGHT: u16 = 1;
pub const SEPARATOR_HEIGHT: u16 = 1;
pub const BUTTON_WIDTH: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeOptions {
    pub movable: bool,
    pub closable: bool,
    pub maximizable: bool,
    pub minimizable: bool,
}

impl Default for ChromeOptions {
    fn default() -> Self {
        Self {
            movable: true,
            closable: true,
            maximizable: true,
            minimizable: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleButton {
    Minimize,
    Maximize,
    Close,
}

impl TitleButton {
    pub fn glyph(self) -> &'static str {
        match self {
            TitleButton::Minimize => "–",
            TitleButton::Maximize => "❒",
            TitleButton::Close => "X",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Right,
    Bottom,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitZone {
    TitleBar,
    Button(TitleButton),
    Resize(ResizeEdge),
    Body,
    Outside,
}

/// What the event loop should do after the chrome consumed a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeEvent {
    None,
    Redraw,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interaction {
    Idle,
    /// Left button went down on the title bar. `offset` is the pointer
    /// position relative to the window origin at press time.
    Pressed { offset: (u16, u16), grabbed: bool },
    Resizing { edge: ResizeEdge },
    ButtonPressed(TitleButton),
}

/// Rectangles of every chrome part for the current geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowLayout {
    pub outer: Rect,
    pub title_bar: Rect,
    pub title_text: Rect,
    pub buttons: Vec<(TitleButton, Rect)>,
    pub separator: Option<Rect>,
    pub body: Option<Rect>,
}

#[derive(Debug, Clone)]
pub struct WindowChrome {
    pub title: String,
    pub options: ChromeOptions,
    geometry: Rect,
    screen: Rect,
    default_size: (u16, u16),
    restore: Option<Rect>,
    minimized: bool,
    interaction: Interaction,
    hover: Option<TitleButton>,
}

impl WindowChrome {
    pub fn new(
        title: impl Into<String>,
        options: ChromeOptions,
        default_size: (u16, u16),
        screen: Rect,
    ) -> Self {
        let mut chrome = Self {
            title: title.into(),
            options,
            geometry: Rect::default(),
            screen,
            default_size,
            restore: None,
            minimized: false,
            interaction: Interaction::Idle,
            hover: None,
        };
        chrome.geometry = chrome.centered(default_size);
        chrome
    }

    /// Rectangle currently occupied on screen. A minimized window is only its title bar.
    pub fn geometry(&self) -> Rect {
        if self.minimized {
            Rect {
                height: TITLE_BAR_HEIGHT.min(self.geometry.height),
                ..self.geometry
            }
        } else {
            self.geometry
        }
    }

    pub fn is_maximized(&self) -> bool {
        self.geometry == self.screen
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.interaction, Interaction::Pressed { grabbed: true, .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.interaction, Interaction::Resizing { .. })
    }

    pub fn hovered_button(&self) -> Option<TitleButton> {
        self.hover
    }

    /// Buttons shown in the title bar, left to right.
    pub fn enabled_buttons(&self) -> Vec<TitleButton> {
        let mut buttons = Vec::with_capacity(3);
        if self.options.minimizable {
            buttons.push(TitleButton::Minimize);
        }
        if self.options.maximizable {
            buttons.push(TitleButton::Maximize);
        }
        if self.options.closable {
            buttons.push(TitleButton::Close);
        }
        buttons
    }

    pub fn layout(&self) -> WindowLayout {
        let outer = self.geometry();
        let title_bar = Rect {
            height: TITLE_BAR_HEIGHT.min(outer.height),
            ..outer
        };

        let buttons = self.enabled_buttons();
        let buttons_width = (buttons.len() as u16 * BUTTON_WIDTH).min(title_bar.width);
        let mut x = title_bar.right().saturating_sub(buttons_width);
        let button_rects = buttons
            .into_iter()
            .map(|button| {
                let width = BUTTON_WIDTH.min(title_bar.right().saturating_sub(x));
                let rect = Rect::new(x, title_bar.y, width, title_bar.height);
                x = x.saturating_add(BUTTON_WIDTH);
                (button, rect)
            })
            .collect();

        // One cell of margin on the left, as with the body.
        let title_text = Rect {
            x: title_bar.x.saturating_add(1),
            width: title_bar.width.saturating_sub(buttons_width + 2),
            ..title_bar
        };

        // A window squeezed by a tiny terminal keeps only the rows that fit.
        let chrome_rows = TITLE_BAR_HEIGHT + SEPARATOR_HEIGHT + 1;
        let separator = (!self.minimized && outer.height > TITLE_BAR_HEIGHT).then(|| {
            Rect::new(
                outer.x,
                outer.y + TITLE_BAR_HEIGHT,
                outer.width,
                SEPARATOR_HEIGHT,
            )
        });
        let body = (!self.minimized && outer.height > chrome_rows).then(|| {
            Rect::new(
                outer.x + 1,
                outer.y + TITLE_BAR_HEIGHT + SEPARATOR_HEIGHT,
                outer.width.saturating_sub(2),
                outer.height - chrome_rows,
            )
        });

        WindowLayout {
            outer,
            title_bar,
            title_text,
            buttons: button_rects,
            separator,
            body,
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> HitZone {
        let outer = self.geometry();
        let point = Position::new(column, row);
        if !outer.contains(point) {
            return HitZone::Outside;
        }

        let layout = self.layout();
        if let Some((button, _)) = layout
            .buttons
            .iter()
            .find(|(_, rect)| rect.contains(point))
        {
            return HitZone::Button(*button);
        }

        if row < outer.y + TITLE_BAR_HEIGHT {
            return HitZone::TitleBar;
        }

        let right_edge = column == outer.right().saturating_sub(1);
        let bottom_edge = row == outer.bottom().saturating_sub(1);
        match (right_edge, bottom_edge) {
            (true, true) => HitZone::Resize(ResizeEdge::BottomRight),
            (true, false) => HitZone::Resize(ResizeEdge::Right),
            (false, true) => HitZone::Resize(ResizeEdge::Bottom),
            (false, false) => HitZone::Body,
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) -> ChromeEvent {
        let (column, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.on_press(column, row),
            MouseEventKind::Drag(MouseButton::Left) => self.on_drag(column, row),
            MouseEventKind::Up(MouseButton::Left) => self.on_release(column, row),
            MouseEventKind::Moved => self.on_hover(column, row),
            _ => ChromeEvent::None,
        }
    }

    fn on_press(&mut self, column: u16, row: u16) -> ChromeEvent {
        let origin = self.geometry();
        match self.hit_test(column, row) {
            HitZone::Button(button) => {
                self.interaction = Interaction::ButtonPressed(button);
                ChromeEvent::Redraw
            }
            HitZone::TitleBar => {
                self.interaction = Interaction::Pressed {
                    offset: (column - origin.x, row - origin.y),
                    grabbed: false,
                };
                ChromeEvent::None
            }
            HitZone::Resize(edge) if !self.minimized => {
                self.interaction = Interaction::Resizing { edge };
                ChromeEvent::Redraw
            }
            _ => {
                self.interaction = Interaction::Idle;
                ChromeEvent::None
            }
        }
    }

    fn on_drag(&mut self, column: u16, row: u16) -> ChromeEvent {
        match self.interaction {
            Interaction::Pressed { offset, grabbed } => {
                if !self.options.movable {
                    return ChromeEvent::None;
                }
                let origin = self.geometry();
                let grabbed = grabbed
                    || (row < origin.y + TITLE_BAR_HEIGHT && offset.1 < TITLE_BAR_HEIGHT);
                self.interaction = Interaction::Pressed { offset, grabbed };
                if !grabbed {
                    return ChromeEvent::None;
                }
                let before = self.geometry;
                self.move_to(
                    column.saturating_sub(offset.0),
                    row.saturating_sub(offset.1),
                );
                if self.geometry != before {
                    ChromeEvent::Redraw
                } else {
                    ChromeEvent::None
                }
            }
            Interaction::Resizing { edge } => {
                let origin = self.geometry;
                let width = column.saturating_sub(origin.x).saturating_add(1);
                let height = row.saturating_sub(origin.y).saturating_add(1);
                let (width, height) = match edge {
                    ResizeEdge::Right => (width, origin.height),
                    ResizeEdge::Bottom => (origin.width, height),
                    ResizeEdge::BottomRight => (width, height),
                };
                let before = self.geometry;
                self.resize_to(width, height);
                if self.geometry != before {
                    ChromeEvent::Redraw
                } else {
                    ChromeEvent::None
                }
            }
            Interaction::ButtonPressed(_) => self.on_hover(column, row),
            Interaction::Idle => ChromeEvent::None,
        }
    }

    fn on_release(&mut self, column: u16, row: u16) -> ChromeEvent {
        let interaction = std::mem::replace(&mut self.interaction, Interaction::Idle);
        match interaction {
            Interaction::ButtonPressed(button) => {
                if self.hit_test(column, row) != HitZone::Button(button) {
                    return ChromeEvent::Redraw;
                }
                match button {
                    TitleButton::Close => ChromeEvent::Close,
                    TitleButton::Maximize => {
                        self.toggle_maximize();
                        ChromeEvent::Redraw
                    }
                    TitleButton::Minimize => {
                        self.toggle_minimize();
                        ChromeEvent::Redraw
                    }
                }
            }
            Interaction::Pressed { grabbed: false, .. } if self.minimized => {
                self.toggle_minimize();
                ChromeEvent::Redraw
            }
            Interaction::Pressed { grabbed: true, .. } | Interaction::Resizing { .. } => {
                ChromeEvent::Redraw
            }
            _ => ChromeEvent::None,
        }
    }

    fn on_hover(&mut self, column: u16, row: u16) -> ChromeEvent {
        let hover = match self.hit_test(column, row) {
            HitZone::Button(button) => Some(button),
            _ => None,
        };
        if hover != self.hover {
            self.hover = hover;
            ChromeEvent::Redraw
        } else {
            ChromeEvent::None
        }
    }

    /// Move the window origin, keeping the whole window on screen.
    pub fn move_to(&mut self, x: u16, y: u16) {
        let size = self.geometry();
        let max_x = self.screen.right().saturating_sub(size.width).max(self.screen.x);
        let max_y = self.screen.bottom().saturating_sub(size.height).max(self.screen.y);
        self.geometry.x = x.clamp(self.screen.x, max_x);
        self.geometry.y = y.clamp(self.screen.y, max_y);
    }

    /// Resize in place, bounded by the minimum window size and the screen edge.
    pub fn resize_to(&mut self, width: u16, height: u16) {
        let max_width = self.screen.right().saturating_sub(self.geometry.x);
        let max_height = self.screen.bottom().saturating_sub(self.geometry.y);
        self.geometry.width = width.max(MIN_WINDOW_WIDTH).min(max_width);
        self.geometry.height = height.max(MIN_WINDOW_HEIGHT).min(max_height);
    }

    /// Fill the screen, or go back to the geometry from before maximizing.
    pub fn toggle_maximize(&mut self) {
        if !self.options.maximizable {
            return;
        }
        self.minimized = false;
        if self.is_maximized() {
            let restored = self
                .restore
                .take()
                .unwrap_or_else(|| self.centered(self.default_size));
            self.geometry = self.clamped(restored);
            debug!(geometry = ?self.geometry, "window restored");
        } else {
            self.restore = Some(self.geometry);
            self.geometry = self.screen;
            debug!(geometry = ?self.geometry, "window maximized");
        }
    }

    pub fn toggle_minimize(&mut self) {
        if !self.options.minimizable && !self.minimized {
            return;
        }
        self.minimized = !self.minimized;
        if !self.minimized {
            // Expanding may push the body past the bottom of the screen.
            self.geometry = self.clamped(self.geometry);
        }
    }

    /// Adopt a new screen size. A maximized window stays maximized; others are
    /// shrunk and moved as needed to remain fully visible.
    pub fn set_screen(&mut self, screen: Rect) {
        if screen == self.screen {
            return;
        }
        let was_maximized = self.is_maximized();
        self.screen = screen;
        self.geometry = if was_maximized {
            screen
        } else {
            self.clamped(self.geometry)
        };
    }

    fn centered(&self, (width, height): (u16, u16)) -> Rect {
        let width = width.max(MIN_WINDOW_WIDTH).min(self.screen.width);
        let height = height.max(MIN_WINDOW_HEIGHT).min(self.screen.height);
        Rect::new(
            self.screen.x + (self.screen.width - width) / 2,
            self.screen.y + (self.screen.height - height) / 2,
            width,
            height,
        )
    }

    fn clamped(&self, rect: Rect) -> Rect {
        let width = rect.width.max(MIN_WINDOW_WIDTH).min(self.screen.width);
        let height = rect.height.max(MIN_WINDOW_HEIGHT).min(self.screen.height);
        let max_x = self.screen.right().saturating_sub(width);
        let max_y = self.screen.bottom().saturating_sub(height);
        Rect::new(
            rect.x.clamp(self.screen.x, max_x.max(self.screen.x)),
            rect.y.clamp(self.screen.y, max_y.max(self.screen.y)),
            width,
            height,
        )
    }
}
