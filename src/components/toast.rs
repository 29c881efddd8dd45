// ABOUTME: Toast stack in the top-right corner, one gauge per notification showing time left

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge},
};

use crate::notification::{Notification, Severity};

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;

pub struct ToastComponent;

impl ToastComponent {
    pub fn new() -> Self {
        Self
    }

    /// Newest toast on top.
    pub fn render(&self, frame: &mut Frame, area: Rect, toasts: &[Notification]) {
        let width = TOAST_WIDTH.min(area.width);
        let max_visible = usize::from(area.height / TOAST_HEIGHT);

        for (slot, toast) in toasts.iter().rev().take(max_visible).enumerate() {
            let offset = u16::try_from(slot).unwrap_or(u16::MAX).saturating_mul(TOAST_HEIGHT);
            let rect = Rect {
                x: area.right().saturating_sub(width),
                y: area.y.saturating_add(offset),
                width,
                height: TOAST_HEIGHT,
            };
            frame.render_widget(Clear, rect);
            frame.render_widget(Self::gauge(toast), rect);
        }
    }

    fn gauge(toast: &Notification) -> Gauge<'_> {
        let color = severity_color(toast.severity());
        Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(Span::styled(
                        format!(" {} {} ", toast.severity().indicator(), toast.text()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )),
            )
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .ratio(toast.remaining_fraction().clamp(0.0, 1.0))
            .label("")
    }
}

impl Default for ToastComponent {
    fn default() -> Self {
        Self::new()
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    }
}
