use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use vitalwatch::data::elapsed::parse_duration;
use vitalwatch::events;
use vitalwatch::ui::{self, Theme};
use vitalwatch::{
    App, Dashboard, DashboardConfig, FileRepository, MockRepository, SystemClock, TrendWindow,
    VitalsRepository,
};

#[derive(Parser, Debug)]
#[command(name = "vitalwatch")]
#[command(about = "Terminal dashboard for personal vital signs and trends")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON dataset to read instead of the built-in demo data
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Seed for the demo data generator
    #[arg(long, conflicts_with = "data")]
    seed: Option<u64>,

    /// Initial trend window (7days, 30days, 1year)
    #[arg(short, long, default_value = "7days")]
    window: TrendWindow,

    /// Simulated trend load latency (e.g., "800ms", "1s")
    #[arg(long)]
    latency: Option<String>,

    /// Vitals refresh interval (e.g., "5s", "1m")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Export current state to JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let mut config = DashboardConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(ref latency) = args.latency {
        config.load_latency_ms = parse_duration(latency)?.as_millis() as u64;
    }
    if let Some(ref refresh) = args.refresh {
        config.refresh_secs = parse_duration(refresh)?.as_secs().max(1);
    }

    let repository: Arc<dyn VitalsRepository> = match args.data {
        Some(ref path) => Arc::new(FileRepository::new(path)),
        None => Arc::new(MockRepository::new(config.profiles.clone(), args.seed)),
    };

    // Trend loads are spawned onto this runtime from the UI thread.
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let mut dashboard = Dashboard::new(repository, Arc::new(SystemClock), &config, args.window);

    if let Some(export_path) = args.export {
        dashboard.start()?;
        rt.block_on(dashboard.wait_for_trends());
        return export_to_file(&dashboard, &export_path);
    }

    // A failed first fetch is shown in the status bar rather than aborting.
    if let Err(e) = dashboard.start() {
        tracing::warn!(error = %e, "initial fetch failed, starting with an empty dashboard");
    }
    run_tui(dashboard, config.refresh_interval())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!("vitalwatch starting v{}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

/// Run the TUI around a started dashboard
fn run_tui(dashboard: Dashboard, refresh_interval: Duration) -> Result<()> {
    // Detect the theme before the alternate screen takes over the terminal
    let theme = Theme::auto_detect();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(dashboard, theme, PathBuf::from("vitalwatch_export.json"));

    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 14;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(app.theme.warning));
                let top = (area.height / 2).saturating_sub(2);
                let centered = ratatui::layout::Rect::new(0, top, area.width, 5u16.min(area.height));
                frame.render_widget(paragraph, centered);
                return;
            }

            ui::draw(frame, app);
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                // Content starts after header (1) + tabs (1)
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse, 2),
                _ => {}
            }
        }

        // Apply finished trend loads and rotate the recommendation
        app.tick();

        if last_refresh.elapsed() >= refresh_interval {
            app.refresh();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Export the dashboard state to a JSON file
fn export_to_file(dashboard: &Dashboard, export_path: &Path) -> Result<()> {
    let json = dashboard.export_json()?;
    std::fs::write(export_path, json)
        .with_context(|| format!("failed to write {}", export_path.display()))?;

    println!("Exported dashboard state to: {}", export_path.display());
    Ok(())
}
