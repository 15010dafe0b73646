use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::core::app::{App, HistoryMetrics};
use crate::ui::bubbles::layout_bubbles;
use crate::ui::chrome::WindowLayout;
use crate::ui::title::build_window_title;

const MAX_INPUT_LINES: u16 = 5;
const RESIZE_GRIP: &str = "◢";

pub fn ui(f: &mut Frame, app: &mut App, now: Instant) {
    let theme = app.ui.theme.clone();
    f.render_widget(
        Block::default().style(Style::default().bg(theme.desktop_color)),
        f.area(),
    );

    let layout = app.ui.chrome.layout();
    if layout.outer.width == 0 || layout.outer.height == 0 {
        return;
    }

    f.render_widget(Clear, layout.outer);
    f.render_widget(
        Block::default().style(Style::default().bg(theme.window_color)),
        layout.outer,
    );

    render_title_bar(f, app, &layout);

    if let Some(separator) = layout.separator {
        let rule = "─".repeat(separator.width as usize);
        f.render_widget(
            Paragraph::new(rule).style(theme.separator_style),
            separator,
        );
    }

    if let Some(body) = layout.body {
        render_body(f, app, body, now);
    }

    if !app.ui.chrome.is_minimized() && !app.ui.chrome.is_maximized() {
        let outer = layout.outer;
        let grip = Rect::new(outer.right().saturating_sub(1), outer.bottom().saturating_sub(1), 1, 1);
        f.render_widget(
            Paragraph::new(RESIZE_GRIP).style(theme.resize_handle_style),
            grip,
        );
    }
}

fn render_title_bar(f: &mut Frame, app: &App, layout: &WindowLayout) {
    let theme = &app.ui.theme;
    f.render_widget(Block::default().style(theme.title_style), layout.title_bar);

    let caption = build_window_title(
        &app.ui.chrome.title,
        app.is_pending(),
        layout.title_text.width,
    );
    f.render_widget(
        Paragraph::new(caption).style(theme.title_style),
        layout.title_text,
    );

    let hovered = app.ui.chrome.hovered_button();
    for (button, rect) in &layout.buttons {
        let style = if hovered == Some(*button) {
            theme.title_button_hover_style
        } else {
            theme.title_button_style
        };
        f.render_widget(
            Paragraph::new(button.glyph())
                .alignment(Alignment::Center)
                .style(style),
            *rect,
        );
    }
}

fn input_height(app: &App) -> u16 {
    let lines = app.ui.textarea().lines().len() as u16;
    lines.clamp(1, MAX_INPUT_LINES) + 2
}

fn render_body(f: &mut Frame, app: &mut App, body: Rect, now: Instant) {
    if body.width == 0 || body.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(input_height(app))])
        .split(body);

    render_history(f, app, chunks[0], now);
    render_input(f, app, chunks[1]);
}

fn render_history(f: &mut Frame, app: &mut App, area: Rect, now: Instant) {
    let theme = app.ui.theme.clone();
    f.render_widget(
        Block::default().style(Style::default().bg(theme.base_color)),
        area,
    );

    // Last column is the scrollbar; one column of gutter before it.
    let text_area = Rect {
        width: area.width.saturating_sub(2),
        ..area
    };

    if app.transcript.is_empty() {
        app.ui.history = HistoryMetrics {
            total_lines: 0,
            viewport_height: area.height,
        };
        app.ui.scroll.sync(0, area.height);
        let middle = Rect {
            y: area.y + area.height / 2,
            height: area.height.min(1),
            ..text_area
        };
        f.render_widget(
            Paragraph::new("No messages yet")
                .alignment(Alignment::Center)
                .style(theme.placeholder_style.bg(theme.base_color)),
            middle,
        );
    } else {
        let ui = &app.ui;
        let bubbles = layout_bubbles(
            app.transcript.iter(),
            &theme,
            &app.session.assistant_name,
            text_area.width,
            |index| ui.fade_progress(index, now),
        );
        let total_lines = bubbles.lines.len();
        app.ui.history = HistoryMetrics {
            total_lines,
            viewport_height: area.height,
        };
        let offset = app.ui.scroll.sync(total_lines, area.height);
        f.render_widget(
            Paragraph::new(bubbles.lines)
                .style(Style::default().bg(theme.base_color))
                .scroll((offset, 0)),
            text_area,
        );
    }

    let max_offset = crate::utils::scroll::ScrollState::max_offset(
        app.ui.history.total_lines,
        area.height,
    );
    let mut scrollbar_state =
        ScrollbarState::new(max_offset as usize).position(app.ui.scroll.offset as usize);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .track_symbol(Some("│"))
        .thumb_symbol("█")
        .track_style(theme.scrollbar_track_style)
        .thumb_style(theme.scrollbar_thumb_style);
    f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);

    if let Some(frame) = app.ui.spinner_frame(now) {
        let label = format!(" {frame} {} is typing… ", app.session.assistant_name);
        let width = (unicode_width::UnicodeWidthStr::width(label.as_str()) as u16).min(text_area.width);
        let spot = Rect {
            x: text_area.x + text_area.width.saturating_sub(width) / 2,
            y: area.bottom().saturating_sub(1),
            width,
            height: area.height.min(1),
        };
        f.render_widget(Clear, spot);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(label, theme.spinner_style))),
            spot,
        );
    }
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let style = if app.ui.is_input_enabled() {
        theme.input_border_style
    } else {
        theme.disabled_input_style()
    };
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(style)
        .style(Style::default().bg(theme.base_color));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(app.ui.textarea(), inner);
}
