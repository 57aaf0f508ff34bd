//! Common UI components shared across the view.
//!
//! This module contains the header bar, range tab bar, status bar, and
//! help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, HeaderStatus};
use crate::data::duration::{format_millis, format_secs};
use crate::data::TimeRange;

/// Render the header bar with the injected monitor name and status.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " PULSEWATCH ",
        Style::default().add_modifier(Modifier::BOLD),
    )];

    if let Some(name) = &app.header.left {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(
            name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }

    match &app.header.right {
        HeaderStatus::Empty => {
            if app.state.metadata.loading && app.state.monitor.is_none() {
                spans.push(Span::raw("│ Loading..."));
            }
        }
        HeaderStatus::Paused => {
            spans.push(Span::raw("│ "));
            spans.push(Span::styled(
                "Paused",
                Style::default().fg(app.theme.warning).add_modifier(Modifier::BOLD),
            ));
        }
        HeaderStatus::Live {
            check_interval,
            latest,
        } => {
            spans.push(Span::raw("│ "));
            spans.push(Span::styled("●", Style::default().fg(app.theme.up)));
            spans.push(Span::raw(format!(
                " checking every {}",
                format_secs(*check_interval)
            )));

            if let Some(check) = latest {
                let style = app.theme.check_style(check.is_expected_status);
                spans.push(Span::raw(" │ last "));
                spans.push(Span::styled(format!("{}", check.status), style));
                spans.push(Span::raw(format!(
                    " {} at {}",
                    format_millis(f64::from(check.response_time.unwrap_or(0))),
                    check.timestamp.format("%H:%M:%S")
                )));
            }
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the time-range tab bar.
///
/// Highlights the requested range as soon as the user picks it, even
/// though the charts switch a beat later.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TimeRange::ALL
        .iter()
        .enumerate()
        .map(|(i, range)| Line::from(format!(" {}:{} ", i + 1, range)))
        .collect();

    let selected = TimeRange::ALL
        .iter()
        .position(|r| *r == app.selected_range())
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: current location path, time since the last refresh cycle,
/// available controls. Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let refreshed = match app.state.last_refresh {
        Some(at) => format!("updated {:.0}s ago", at.elapsed().as_secs_f64()),
        None => "waiting for first refresh".to_string(),
    };

    let controls = if app.edit_open {
        "auto-refresh paused (edit open) | Esc:close"
    } else {
        "←/→ 1-7:range r:refresh e:edit ?:help q:quit"
    };

    let status = format!(
        " {} | {} | {}",
        app.location.current().path(),
        refreshed,
        controls
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Time range",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Narrower/wider window"),
        Line::from("  1-7         Select window directly"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh now"),
        Line::from("  e         Monitor settings (pauses refresh)"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 46u16.min(area.width.saturating_sub(4));
    let help_height = 16u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
