//! Section cards summarizing the monitor's current numbers.
//!
//! Four cards: current status, uptime percentage, average latency, and
//! the monitor's configuration. Values come from the authoritative state
//! (cards are cheap to render, so they do not go through the deferred
//! snapshot the charts use).

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::{format_millis, format_secs};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::horizontal([
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
    ])
    .split(area);

    render_status_card(frame, app, chunks[0]);
    render_uptime_card(frame, app, chunks[1]);
    render_latency_card(frame, app, chunks[2]);
    render_monitor_card(frame, app, chunks[3]);
}

fn card<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn render_status_card(frame: &mut Frame, app: &App, area: Rect) {
    let line = match (&app.state.monitor, &app.state.latest) {
        (Some(monitor), _) if !monitor.is_running => Line::from(Span::styled(
            "Paused",
            Style::default().fg(app.theme.warning).add_modifier(Modifier::BOLD),
        )),
        (_, Some(check)) => {
            let (label, style) = if check.is_expected_status {
                ("Up", app.theme.check_style(true))
            } else {
                ("Down", app.theme.check_style(false))
            };
            Line::from(vec![
                Span::styled(label, style.add_modifier(Modifier::BOLD)),
                Span::raw(format!("  HTTP {}", check.status)),
            ])
        }
        (_, None) => Line::from(Span::styled(
            "No checks yet",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };

    let paragraph = Paragraph::new(line).block(card(app, "Status"));
    frame.render_widget(paragraph, area);
}

fn render_uptime_card(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.state.metrics.uptime_percentage {
        Some(pct) => {
            let style = if pct >= 99.0 {
                app.theme.check_style(true)
            } else if pct >= 90.0 {
                Style::default().fg(app.theme.warning)
            } else {
                app.theme.check_style(false)
            };
            Line::from(Span::styled(
                format!("{:.1}%", pct),
                style.add_modifier(Modifier::BOLD),
            ))
        }
        None => placeholder_value(app),
    };

    let paragraph = Paragraph::new(line).block(card(app, "Uptime"));
    frame.render_widget(paragraph, area);
}

fn render_latency_card(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.state.metrics.average_latency {
        Some(avg) => Line::from(Span::styled(
            format_millis(avg),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        None => placeholder_value(app),
    };

    let paragraph = Paragraph::new(line).block(card(app, "Avg latency"));
    frame.render_widget(paragraph, area);
}

fn render_monitor_card(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match &app.state.monitor {
        Some(monitor) => vec![
            Line::from(format!("every {}", format_secs(monitor.check_interval))),
            Line::from(Span::styled(
                monitor.url.clone(),
                Style::default().add_modifier(Modifier::DIM),
            )),
        ],
        None => vec![Line::from(Span::styled(
            "...",
            Style::default().add_modifier(Modifier::DIM),
        ))],
    };

    let paragraph = Paragraph::new(lines).block(card(app, "Checks"));
    frame.render_widget(paragraph, area);
}

fn placeholder_value(app: &App) -> Line<'static> {
    let text = if app.state.series_status.loading {
        "..."
    } else {
        "—"
    };
    Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::DIM),
    ))
}
