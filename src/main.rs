// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::warn;

mod api;
mod app;
mod controller;
mod data;
mod events;
mod route;
mod settings;
mod ui;

use api::{HttpApi, MonitorApi};
use app::App;
use controller::{DetailState, FetchEvent, FetchParams, Followup, Refresher};
use data::duration::parse_interval;
use data::{MonitorId, TimeRange};
use settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "pulsewatch")]
#[command(about = "Terminal dashboard for watching a single uptime monitor")]
struct Args {
    /// Identifier of the endpoint monitor to watch
    monitor: String,

    /// Root URL of the uptime service API (overrides settings)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Initial time range (30m, 1h, 3h, 6h, 1d, 2d, 7d); the deep-link
    /// equivalent of the dashboard's ?range= parameter
    #[arg(short, long)]
    range: Option<String>,

    /// Refresh interval (e.g. "30s", "2m"; overrides settings)
    #[arg(long)]
    refresh: Option<String>,

    /// Path to a TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fetch once, write a JSON snapshot to this file, and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref())?;
    let base_url = args.base_url.unwrap_or_else(|| settings.base_url.clone());
    let refresh_interval = match &args.refresh {
        Some(value) => parse_interval(value).context("invalid --refresh value")?,
        None => settings.refresh_interval(),
    };

    let monitor_id = MonitorId::new(args.monitor.clone());

    // Unrecognized range values fall back to the 1d default until
    // metadata resolves the age-based window
    let initial_range = args.range.as_deref().and_then(|value| {
        let parsed = TimeRange::parse(value);
        if parsed.is_none() {
            warn!(range = value, "unrecognized range value, using default");
        }
        parsed
    });

    let api: Arc<dyn MonitorApi> = Arc::new(HttpApi::new(&base_url)?);

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_snapshot(api, monitor_id, initial_range, &export_path).await;
    }

    run_tui(api, monitor_id, initial_range, refresh_interval).await
}

/// Run the TUI against the given API client
async fn run_tui(
    api: Arc<dyn MonitorApi>,
    monitor_id: MonitorId,
    initial_range: Option<TimeRange>,
    refresh_interval: Duration,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(api, monitor_id, initial_range, refresh_interval);

    // Run the main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(note) = app.shutdown() {
        println!("{}", note);
    }

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        // Draw UI from the presented snapshot of the previous pass
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    area.height.min(5),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Range tabs
                Constraint::Length(4), // Section cards
                Constraint::Min(10),   // Charts
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);
            ui::cards::render(frame, app, chunks[2]);
            ui::charts::render(frame, app, chunks[3]);
            ui::common::render_status_bar(frame, app, chunks[4]);

            // Render overlays if active
            if app.edit_open {
                ui::dialog::render_overlay(frame, app, area);
            }
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Apply fetch results and transitions, then reconcile the
        // snapshot the next draw renders from
        app.pump();
        app.present();
    }

    Ok(())
}

/// Run one orchestrated refresh cycle headlessly and write a JSON snapshot
async fn export_snapshot(
    api: Arc<dyn MonitorApi>,
    monitor_id: MonitorId,
    initial_range: Option<TimeRange>,
    export_path: &Path,
) -> Result<()> {
    use std::io::Write;

    let mut state = DetailState::new(initial_range);
    let mut refresher = Refresher::spawn(
        api,
        FetchParams {
            monitor_id: Some(monitor_id),
            range: state.range,
            generation: state.generation,
        },
        Duration::from_secs(3600),
        true,
    );

    // The driver's first tick fires immediately; ride that cycle out,
    // plus the follow-up series fetch if the age-based default changed
    // the window mid-cycle
    let mut cycle_done = false;
    let mut awaiting_series = false;
    loop {
        let Some(event) = refresher.next_event().await else {
            bail!("refresh driver exited early");
        };

        match &event {
            FetchEvent::RefreshFinished => cycle_done = true,
            FetchEvent::SeriesLoaded { generation, .. }
            | FetchEvent::SeriesFailed { generation, .. }
                if awaiting_series && *generation == state.generation =>
            {
                awaiting_series = false;
            }
            _ => {}
        }

        if let Some(Followup::RefetchSeries) = state.apply(event) {
            refresher.set_range(state.range, state.generation);
            refresher.fetch_series();
            awaiting_series = true;
        }

        if state.take_redirect().is_some() {
            refresher.shutdown();
            bail!("monitor not found");
        }

        if cycle_done && !awaiting_series {
            break;
        }
    }
    refresher.shutdown();

    let export = serde_json::json!({
        "monitor": state.monitor,
        "range": state.range,
        "uptimePercentage": state.metrics.uptime_percentage,
        "averageLatency": state.metrics.average_latency,
        "latestCheck": state.latest,
        "checks": state.series,
    });

    let json = serde_json::to_string_pretty(&export)?;
    let mut file = std::fs::File::create(export_path)?;
    file.write_all(json.as_bytes())?;

    println!("Exported monitor snapshot to: {}", export_path.display());
    Ok(())
}
