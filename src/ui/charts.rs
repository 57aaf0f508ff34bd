//! Uptime strip and latency sparkline.
//!
//! Both charts render from the presented snapshot, not the authoritative
//! state: during a range switch they keep showing the previous window,
//! dimmed, until the transition settles.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_millis;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    // Old charts stay up while a refresh is in flight, but only once data
    // has been shown at least once; before that the placeholder wins.
    let show_charts = !app.presented.series.is_empty()
        || (app.state.series_status.loading && app.state.has_loaded_once);

    if !show_charts {
        render_placeholder(frame, app, area);
        return;
    }

    let error_rows = u16::from(app.state.series_status.error.is_some());
    let chunks = Layout::vertical([
        Constraint::Length(error_rows),
        Constraint::Length(5),
        Constraint::Min(6),
    ])
    .split(area);

    if let Some(message) = &app.state.series_status.error {
        // Stale data stays on screen; the failure is an inline note
        let line = Line::from(Span::styled(
            format!(" {} (showing last loaded data)", message),
            Style::default().fg(app.theme.down),
        ));
        frame.render_widget(Paragraph::new(line), chunks[0]);
    }

    render_uptime_strip(frame, app, chunks[1]);
    render_latency_sparkline(frame, app, chunks[2]);
}

fn dim_if_transitioning(app: &App, style: Style) -> Style {
    if app.presented.dimmed {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}

/// One colored cell per check, most recent at the right edge.
fn render_uptime_strip(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Uptime ({}) ", app.presented.range))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(dim_if_transitioning(
            app,
            Style::default().fg(app.theme.border),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let capacity = inner.width as usize;
    if capacity == 0 {
        return;
    }

    let visible = app
        .presented
        .series
        .iter()
        .rev()
        .take(capacity)
        .rev();

    let spans: Vec<Span> = visible
        .map(|check| {
            let style = dim_if_transitioning(app, app.theme.check_style(check.is_expected_status));
            Span::styled("▇", style)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        inner,
    );
}

fn render_latency_sparkline(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.state.metrics.average_latency {
        Some(avg) => format!(" Latency (avg {}) ", format_millis(avg)),
        None => " Latency ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(dim_if_transitioning(
            app,
            Style::default().fg(app.theme.border),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let capacity = inner.width as usize;
    if capacity == 0 {
        return;
    }

    let data: Vec<u64> = app
        .presented
        .series
        .iter()
        .rev()
        .take(capacity)
        .rev()
        .map(|check| u64::from(check.response_time.unwrap_or(0)))
        .collect();

    let sparkline = Sparkline::default()
        .data(&data)
        .style(dim_if_transitioning(
            app,
            Style::default().fg(app.theme.highlight),
        ));

    frame.render_widget(sparkline, inner);
}

fn render_placeholder(frame: &mut Frame, app: &App, area: Rect) {
    let message = if app.state.series_status.loading {
        "Loading uptime data..."
    } else if let Some(error) = &app.state.series_status.error {
        error.as_str()
    } else {
        "No uptime data available for the selected period."
    };

    let style = if app.state.series_status.error.is_some() && !app.state.series_status.loading {
        Style::default().fg(app.theme.down)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let vertical_pad = inner.height.saturating_sub(1) / 2;
    let mut lines = vec![Line::from(""); vertical_pad as usize];
    lines.push(Line::from(Span::styled(message.to_string(), style)));

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}
