use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Terminal area outside the window (the "desktop")
    pub desktop_color: Color,
    // Window body and chat area
    pub window_color: Color,
    pub base_color: Color,
    pub text_color: Color,
    pub disabled_text_color: Color,

    // Chrome
    pub title_style: Style,
    pub title_button_style: Style,
    pub title_button_hover_style: Style,
    pub separator_style: Style,
    pub resize_handle_style: Style,

    // Bubbles
    pub bubble_color: Color,
    pub user_header_style: Style,
    pub assistant_header_style: Style,
    pub app_error_header_style: Style,
    pub app_error_text_style: Style,
    pub timestamp_style: Style,
    pub placeholder_style: Style,

    // Scrollbar
    pub scrollbar_track_style: Style,
    pub scrollbar_thumb_style: Style,

    // Input area
    pub input_border_style: Style,
    pub input_text_style: Style,
    pub input_cursor_style: Style,
    pub spinner_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        let window = Color::Rgb(0x35, 0x35, 0x35);
        let base = Color::Rgb(0x2a, 0x2a, 0x2a);
        let text = Color::Rgb(0xff, 0xff, 0xff);
        let disabled = Color::Rgb(0x80, 0x80, 0x80);

        Theme {
            desktop_color: Color::Rgb(0x1a, 0x1a, 0x1a),
            window_color: window,
            base_color: base,
            text_color: text,
            disabled_text_color: disabled,

            title_style: Style::default().fg(text).bg(window),
            title_button_style: Style::default().fg(text).bg(window),
            title_button_hover_style: Style::default()
                .fg(text)
                .bg(Color::Rgb(0xc4, 0x2b, 0x1c)),
            separator_style: Style::default().fg(Color::Rgb(0x20, 0x20, 0x20)).bg(window),
            resize_handle_style: Style::default().fg(Color::Rgb(0x66, 0x65, 0x65)).bg(window),

            bubble_color: window,
            user_header_style: Style::default()
                .fg(Color::Rgb(0x00, 0x80, 0x00))
                .add_modifier(Modifier::BOLD),
            assistant_header_style: Style::default()
                .fg(Color::Rgb(0xff, 0x00, 0x00))
                .add_modifier(Modifier::BOLD),
            app_error_header_style: Style::default()
                .fg(Color::Rgb(0xff, 0xa5, 0x00))
                .add_modifier(Modifier::BOLD),
            app_error_text_style: Style::default().fg(Color::Rgb(0xff, 0xc0, 0x80)),
            timestamp_style: Style::default().fg(disabled),
            placeholder_style: Style::default().fg(disabled).add_modifier(Modifier::ITALIC),

            scrollbar_track_style: Style::default().fg(base).bg(base),
            scrollbar_thumb_style: Style::default().fg(Color::Rgb(0x66, 0x65, 0x65)),

            input_border_style: Style::default().fg(base).bg(base),
            input_text_style: Style::default().fg(text).bg(base),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            spinner_style: Style::default().fg(text).bg(base),
        }
    }

    /// Style applied to the input box while a request is in flight.
    pub fn disabled_input_style(&self) -> Style {
        Style::default().fg(self.disabled_text_color).bg(self.base_color)
    }

    pub fn bubble_text_style(&self) -> Style {
        Style::default().fg(self.text_color).bg(self.bubble_color)
    }
}

/// Linear blend between two colors. Non-RGB colors snap to whichever end is nearer.
pub fn blend(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| -> u8 {
                (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
            };
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ => {
            if t < 0.5 {
                from
            } else {
                to
            }
        }
    }
}
