use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vitalwatch::advisor::Advisor;
use vitalwatch::config::Settings;
use vitalwatch::data::{Display, DisplayContext};
use vitalwatch::scene::ModelLoader;
use vitalwatch::ui::{self, Theme};
use vitalwatch::{events, App, DataSource, FileSource, HttpSource};
use vitalwatch_adapters::{GeminiClient, SensorClient};
use vitalwatch_types::SensorReading;

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "vitalwatch=info";

#[derive(Parser, Debug)]
#[command(name = "vitalwatch")]
#[command(about = "Terminal dashboard for live vital-sign readings with AI analysis")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sensor base URL (e.g., "http://192.168.1.3:5000")
    #[arg(long, conflicts_with = "file")]
    sensor_url: Option<String>,

    /// Analysis endpoint URL
    #[arg(long)]
    ai_url: Option<String>,

    /// Sensor poll interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Figure file shown in the model panel
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Read readings from a JSON file instead of the sensor
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Log file (the terminal belongs to the dashboard)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch one reading, print it as JSON and exit
    #[arg(long)]
    once: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded settings.
    fn apply(&self, settings: &mut Settings) {
        if let Some(ref url) = self.sensor_url {
            settings.sensor_url = url.clone();
        }
        if let Some(ref url) = self.ai_url {
            settings.ai_url = url.clone();
        }
        if let Some(secs) = self.refresh {
            settings.poll_interval_secs = secs;
        }
        if let Some(ref path) = self.model {
            settings.model_path = Some(path.clone());
        }
        if let Some(ref path) = self.log_file {
            settings.log_file = path.clone();
        }
    }
}

/// Layer the command line over the file and environment, then validate once.
fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);
    settings.validate()?;
    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = load_settings(&args)?;

    init_logging(&settings, args.once)?;

    let rt = tokio::runtime::Runtime::new()?;

    // Handle one-shot mode (non-interactive)
    if args.once {
        return rt.block_on(run_once(&settings, args.file.as_deref()));
    }

    // Background tasks are spawned onto the runtime while the TUI owns the main thread
    let _guard = rt.enter();

    let source: Box<dyn DataSource> = match args.file {
        Some(ref path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::spawn(
            sensor_client(&settings)?,
            settings.poll_interval(),
        )),
    };
    tracing::info!(source = source.description(), "Starting dashboard");

    let app = App::new(source, settings.ranges.clone())
        .with_loader(ModelLoader::spawn(settings.model_path.clone()))
        .with_advisor(Advisor::new(gemini_client(&settings)?));

    run_tui(app)
}

fn init_logging(settings: &Settings, once: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if once {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
        return Ok(());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)
        .with_context(|| format!("opening log file {}", settings.log_file.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn sensor_client(settings: &Settings) -> Result<SensorClient> {
    Ok(SensorClient::builder()
        .endpoint(&settings.sensor_url)
        .timeout(settings.request_timeout())
        .build()?)
}

fn gemini_client(settings: &Settings) -> Result<GeminiClient> {
    let mut builder = GeminiClient::builder()
        .endpoint(&settings.ai_url)
        .timeout(settings.analysis_timeout());
    if let Some(ref key) = settings.ai_api_key {
        builder = builder.api_key(key);
    }
    let client = builder.build()?;
    if !client.has_api_key() {
        tracing::warn!("No analysis API key configured; requests will likely be rejected");
    }
    Ok(client)
}

/// Fetch one reading, evaluate it and print the result as JSON.
async fn run_once(settings: &Settings, file: Option<&Path>) -> Result<()> {
    let reading = match file {
        Some(path) => FileSource::new(path)
            .poll()
            .unwrap_or_else(SensorReading::error_sentinel),
        None => match sensor_client(settings)?.fetch().await {
            Ok(reading) => reading,
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching sensor data");
                SensorReading::error_sentinel()
            }
        },
    };

    let mut display = Display::new();
    let mut ctx = DisplayContext::new(settings.ranges.clone());
    display.apply(&reading, &mut ctx);

    println!("{}", serde_json::to_string_pretty(&display.to_json())?);
    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(mut app: App) -> Result<()> {
    // Detect before raw mode, the query needs a cooked terminal
    app.theme = Theme::auto_detect();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!(
        readings = app.display.updates,
        recommendations = app.recommendations.len(),
        "Dashboard closed"
    );
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        // Collect readings, model progress and analysis results
        app.reload_data();

        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}
