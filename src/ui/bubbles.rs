//! Message bubbles: wrapping, alignment, and the fade-in animation.
//!
//! The layout pass turns the transcript into a flat list of styled lines for a
//! given width. The renderer and the scroll math both consume that list, so
//! nothing wraps again after this step.

use std::time::Duration;

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::{blend, Theme};
use crate::core::message::{Message, TranscriptRole};

pub const FADE_DURATION: Duration = Duration::from_millis(1000);

/// Horizontal padding inside a bubble, per side.
const PADDING: usize = 1;
/// Bubbles never take more than this share of the chat width.
const MAX_WIDTH_PERCENT: usize = 80;
const MIN_BUBBLE_WIDTH: usize = 12;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageLineSpan {
    pub start: usize,
    pub len: usize,
}

#[derive(Clone, Debug, Default)]
pub struct BubbleLayout {
    pub lines: Vec<Line<'static>>,
    pub message_spans: Vec<MessageLineSpan>,
}

/// Cubic ease-in-out over the fade duration, 0.0 at start and 1.0 when done.
pub fn fade_progress(elapsed: Duration) -> f32 {
    let t = (elapsed.as_secs_f32() / FADE_DURATION.as_secs_f32()).clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = UnicodeWidthStr::width(word);
            let gap = usize::from(current_width > 0);

            if current_width + gap + word_width <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += gap + word_width;
                continue;
            }

            if current_width > 0 {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
                if current_width + ch_width > width && current_width > 0 {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }

        out.push(current);
    }

    out
}

fn header_for(message: &Message, assistant_name: &str) -> String {
    match message.role {
        TranscriptRole::User => "You".to_string(),
        TranscriptRole::Assistant => assistant_name.to_string(),
        TranscriptRole::AppError => "Error".to_string(),
    }
}

fn faded(style: Style, background: ratatui::style::Color, progress: f32) -> Style {
    match style.fg {
        Some(fg) if progress < 1.0 => style.fg(blend(background, fg, progress)),
        _ => style,
    }
}

/// Lay out every message as a bubble for a chat area `width` cells wide.
///
/// `fade` returns the fade-in progress (0.0..=1.0) for the message at an index.
pub fn layout_bubbles<'a, I, F>(
    messages: I,
    theme: &Theme,
    assistant_name: &str,
    width: u16,
    fade: F,
) -> BubbleLayout
where
    I: IntoIterator<Item = &'a Message>,
    F: Fn(usize) -> f32,
{
    let width = width as usize;
    let mut layout = BubbleLayout::default();
    if width == 0 {
        return layout;
    }

    let max_bubble = (width * MAX_WIDTH_PERCENT / 100)
        .max(MIN_BUBBLE_WIDTH.min(width))
        .max(PADDING * 2 + 1);
    let max_content = max_bubble - PADDING * 2;

    for (index, message) in messages.into_iter().enumerate() {
        if index > 0 {
            layout.lines.push(Line::from(""));
        }
        let start = layout.lines.len();
        let progress = fade(index).clamp(0.0, 1.0);

        let header = header_for(message, assistant_name);
        let timestamp = message.created_at.format("%H:%M").to_string();
        let body = wrap_text(&message.content, max_content);

        let header_width = UnicodeWidthStr::width(header.as_str()) + 2 + timestamp.len();
        let body_width = body
            .iter()
            .map(|line| UnicodeWidthStr::width(line.as_str()))
            .max()
            .unwrap_or(0);
        let content_width = body_width.max(header_width).min(max_content);
        let bubble_width = content_width + PADDING * 2;
        let indent = if message.is_user() {
            width.saturating_sub(bubble_width)
        } else {
            0
        };

        let bubble_bg = theme.bubble_color;
        let base = Style::default().bg(bubble_bg);
        let (header_style, text_style) = match message.role {
            TranscriptRole::User => (theme.user_header_style, theme.bubble_text_style()),
            TranscriptRole::Assistant => {
                (theme.assistant_header_style, theme.bubble_text_style())
            }
            TranscriptRole::AppError => (
                theme.app_error_header_style,
                theme.app_error_text_style.bg(bubble_bg),
            ),
        };
        let header_style = faded(header_style.bg(bubble_bg), bubble_bg, progress);
        let text_style = faded(text_style, bubble_bg, progress);
        let stamp_style = faded(theme.timestamp_style.bg(bubble_bg), bubble_bg, progress);

        let pad = " ".repeat(PADDING);
        let indent_span = || Span::raw(" ".repeat(indent));

        // Header: name on the left, time on the right edge of the bubble.
        let (header_text, stamp_text) = if header_width <= content_width {
            let gap = content_width - UnicodeWidthStr::width(header.as_str()) - timestamp.len();
            (format!("{header}{}", " ".repeat(gap)), timestamp)
        } else {
            let fitted = super::title::fit_title(&header, content_width as u16);
            let fill = content_width.saturating_sub(UnicodeWidthStr::width(fitted.as_str()));
            (format!("{fitted}{}", " ".repeat(fill)), String::new())
        };
        layout.lines.push(Line::from(vec![
            indent_span(),
            Span::styled(pad.clone(), base),
            Span::styled(header_text, header_style),
            Span::styled(stamp_text, stamp_style),
            Span::styled(pad.clone(), base),
        ]));

        for line in body {
            let fill = content_width.saturating_sub(UnicodeWidthStr::width(line.as_str()));
            layout.lines.push(Line::from(vec![
                indent_span(),
                Span::styled(pad.clone(), base),
                Span::styled(line, text_style),
                Span::styled(" ".repeat(fill), base),
                Span::styled(pad.clone(), base),
            ]));
        }

        layout.message_spans.push(MessageLineSpan {
            start,
            len: layout.lines.len() - start,
        });
    }

    layout
}
