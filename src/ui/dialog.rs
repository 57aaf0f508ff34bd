//! Monitor settings overlay.
//!
//! Read-only view of the monitor's configuration. While it is open the
//! refresh driver is suspended so a background poll cannot clobber edits
//! made through the dashboard.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_secs;

const OVERLAY_WIDTH: u16 = 56;
const OVERLAY_HEIGHT: u16 = 12;

/// Render the settings dialog as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < OVERLAY_WIDTH || area.height < OVERLAY_HEIGHT {
        return;
    }

    let x = area.x + (area.width - OVERLAY_WIDTH) / 2;
    let y = area.y + (area.height - OVERLAY_HEIGHT) / 2;
    let overlay_area = Rect::new(x, y, OVERLAY_WIDTH, OVERLAY_HEIGHT);

    frame.render_widget(Clear, overlay_area);

    let lines = match &app.state.monitor {
        Some(monitor) => {
            let state = if monitor.is_running {
                Span::styled("running", Style::default().fg(app.theme.up))
            } else {
                Span::styled("paused", Style::default().fg(app.theme.warning))
            };
            vec![
                Line::from(""),
                Line::from(vec![
                    Span::raw(" Name      "),
                    Span::styled(
                        monitor.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(format!(" URL       {}", monitor.url)),
                Line::from(vec![Span::raw(" State     "), state]),
                Line::from(format!(
                    " Interval  every {}",
                    format_secs(monitor.check_interval)
                )),
                Line::from(format!(
                    " Created   {}",
                    monitor.created_at.format("%Y-%m-%d %H:%M UTC")
                )),
                Line::from(""),
                Line::from(Span::styled(
                    " Auto-refresh is paused while this dialog is open",
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ]
        }
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                " Monitor metadata has not loaded yet",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ],
    };

    let block = Block::default()
        .title(" Monitor settings ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}
