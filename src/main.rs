mod cli;

use daily_companion::api::{self, AppContext};
use daily_companion::clock::SystemClock;
use daily_companion::companion::{self, Companion};
use daily_companion::config::Config;
use daily_companion::content::QuoteSelection;
use daily_companion::journal::NewJournalEntry;
use daily_companion::mood::{Mood, MoodData, classify_mood};
use daily_companion::storage::FileSnapshotStore;
use daily_companion::store::DashboardStore;
use daily_companion::timer::{
    BreathingCycle, BreathingEvent, BreathingPattern, FocusTimer, TICK_PERIOD,
    spawn_ticker,
};
use daily_companion::todo::{NewTodo, Priority};
use daily_companion::utils::paths::{get_config_path, get_crash_log_path, get_logs_dir};

use anyhow::{Result, anyhow};
use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands};
use std::fs;
use std::io::Write;
use std::panic;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;

/// Append panic details to the crash log, tagged with the running command.
fn install_crash_handler(command: &'static str) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .map(|m| m.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_default();

        tracing::error!(command, location = %location, "panic: {}", message);

        if let Ok(crash_log_path) = get_crash_log_path() {
            let header = format!(
                "=== companion {} `{}` crashed at {} ===",
                env!("CARGO_PKG_VERSION"),
                command,
                Local::now().format("%Y-%m-%d %H:%M:%S")
            );
            let report = format!(
                "{}\nMessage: {}\nLocation: {}\n\nBacktrace:\n{}\n\n",
                header,
                message,
                location,
                std::backtrace::Backtrace::force_capture()
            );
            if append_crash_report(&crash_log_path, &report).is_ok() {
                eprintln!("\nCrash logged to: {}", crash_log_path.display());
            }
        }

        default_hook(info);
    }));
}

fn append_crash_report(path: &Path, report: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(report.as_bytes())
}

/// Initialize file-based logging.
///
/// Logs are written to ~/.daily-companion/logs/companion.log, rolled daily.
/// Log level can be controlled with RUST_LOG env var (default: info).
fn init_file_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = get_logs_dir().ok()?;

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Could not create logs directory: {}", e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "companion.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(guard)
}

fn open_store(config: &Config) -> Result<DashboardStore> {
    let snapshots = FileSnapshotStore::default_location()?;
    Ok(DashboardStore::open(
        Box::new(snapshots),
        Arc::new(SystemClock),
        config.dashboard_options(),
    ))
}

fn main() -> Result<()> {
    let command = Cli::parse().command.unwrap_or(Commands::Show);
    install_crash_handler(command.name());

    let config = Config::load()?;

    // Guard must be kept alive for the duration of the command
    let _log_guard = init_file_logging();
    tracing::debug!(command = command.name(), "companion starting");

    match command {
        Commands::Show => handle_show(&config),
        Commands::Add {
            text,
            priority,
            estimate,
            category,
        } => handle_add(&config, text, &priority, estimate, category),
        Commands::Toggle { todo } => handle_todo_action(&config, &todo, TodoAction::Toggle),
        Commands::Progress { todo } => handle_todo_action(&config, &todo, TodoAction::Progress),
        Commands::Delete { todo } => handle_todo_action(&config, &todo, TodoAction::Delete),
        Commands::Mood {
            mood,
            note,
            intensity,
            ai,
        } => handle_mood(&config, mood, note, intensity, ai),
        Commands::Quote { selection, ai } => handle_quote(&config, &selection, ai),
        Commands::Favorite => handle_favorite(&config),
        Commands::Night => handle_night(&config),
        Commands::Journal {
            content,
            mood,
            tags,
        } => handle_journal(&config, content, mood, tags),
        Commands::Focus { minutes, task } => handle_focus(&config, minutes, task),
        Commands::Breathe { pattern, cycles } => handle_breathe(&config, pattern, cycles),
        Commands::Config { init } => handle_config(&config, init),
        Commands::Serve { port } => handle_serve(&config, port),
    }
}

fn handle_show(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let state = store.state();

    println!("{}", state.greeting);
    println!(
        "{} {}°F in {} ({}), feels like {}°F",
        state.weather.icon,
        state.weather.temperature,
        state.weather.location,
        state.weather.condition,
        state.weather.feels_like
    );
    println!();
    println!("\"{}\" - {}", state.quote.text, state.quote.author);
    println!();

    match &state.mood {
        Some(mood) => println!(
            "Mood: {} ({}/10) - {}",
            mood.mood, mood.intensity, mood.note
        ),
        None => println!("Mood: not recorded yet"),
    }
    println!(
        "Theme: {}{}",
        state.theme.name,
        if state.is_night_mode { " (night)" } else { "" }
    );
    println!();

    println!("Todos:");
    if state.todos.is_empty() {
        println!("  (none)");
    }
    for (i, todo) in state.todos.iter().enumerate() {
        let mark = if todo.is_completed() {
            "x"
        } else if todo.is_in_progress() {
            "*"
        } else {
            " "
        };
        println!(
            "  {:>2}. [{}] {} ({}) id:{}",
            i + 1,
            mark,
            todo.text,
            todo.priority,
            todo.id
        );
    }
    println!("  {}", store.daily_focus());
    println!();

    let stats = &state.user_stats;
    println!(
        "Level {} · {} points · {}/{} tasks done · {} min focused · streak {}",
        stats.level(),
        stats.total_points(),
        stats.completed_tasks,
        stats.total_tasks,
        stats.focus_time,
        stats.current_streak
    );

    Ok(())
}

fn handle_add(
    config: &Config,
    text: String,
    priority: &str,
    estimate: Option<u32>,
    category: Option<String>,
) -> Result<()> {
    if text.trim().is_empty() {
        return Err(anyhow!("Todo text must not be empty"));
    }
    let priority: Priority = priority.parse().map_err(|e: String| anyhow!(e))?;

    let mut store = open_store(config)?;
    let id = store.add_todo(NewTodo {
        estimated_time: estimate,
        category,
        ..NewTodo::new(text.clone(), priority)
    });

    println!("Added: {} ({})", text, id);
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum TodoAction {
    Toggle,
    Progress,
    Delete,
}

fn handle_todo_action(config: &Config, reference: &str, action: TodoAction) -> Result<()> {
    let mut store = open_store(config)?;
    let id = store
        .state()
        .resolve_todo_id(reference)
        .ok_or_else(|| anyhow!("No todo matches '{}'", reference))?;

    match action {
        TodoAction::Toggle => {
            store.toggle_todo(&id);
            let state = store.state();
            if let Some(todo) = state.find_todo(&id) {
                let status = if todo.is_completed() {
                    "done"
                } else {
                    "not done"
                };
                println!("{}: {}", todo.text, status);
            }
        }
        TodoAction::Progress => {
            store.toggle_in_progress(&id);
            let state = store.state();
            if let Some(todo) = state.find_todo(&id) {
                let status = if todo.is_in_progress() {
                    "in progress"
                } else {
                    "paused"
                };
                println!("{}: {}", todo.text, status);
            }
        }
        TodoAction::Delete => {
            store.delete_todo(&id);
            println!("Deleted {}", id);
        }
    }

    Ok(())
}

fn handle_mood(
    config: &Config,
    mood: Option<String>,
    note: Option<String>,
    intensity: u8,
    ai: bool,
) -> Result<()> {
    let mut store = open_store(config)?;

    let (mood, note) = match (mood, note) {
        (Some(label), note) => {
            let mood = Mood::parse_or_default(&label);
            let note = note.unwrap_or_else(|| format!("Feeling {}", mood));
            (mood, note)
        }
        (None, Some(note)) if ai => {
            let companion = companion::from_config(&config.ai);
            (companion.analyze_mood(&note), note)
        }
        (None, Some(note)) => (classify_mood(&note), note),
        (None, None) => return Err(anyhow!("Give a mood or a --note to classify")),
    };

    let now = store.clock().now();
    store.update_mood(MoodData::new(mood, note, intensity, now));
    println!("Mood set to {} (theme: {})", mood, store.state().theme.name);
    Ok(())
}

fn handle_quote(config: &Config, selection: &str, ai: bool) -> Result<()> {
    let mut store = open_store(config)?;

    if ai {
        let mood = store
            .state()
            .mood
            .as_ref()
            .map(|m| m.mood)
            .unwrap_or_default();
        let companion: Arc<dyn Companion> = companion::from_config(&config.ai);
        store.update_quote(companion.generate_quote(mood).into_quote());
    } else {
        let selection = QuoteSelection::parse_or_default(selection);
        store.refresh_quote(selection, &mut rand::thread_rng());
    }

    let state = store.state();
    println!("\"{}\" - {}", state.quote.text, state.quote.author);
    Ok(())
}

fn handle_favorite(config: &Config) -> Result<()> {
    let mut store = open_store(config)?;
    let quote = store.state().quote.clone();
    store.toggle_quote_favorite(quote.clone());

    if store.state().is_favorite(&quote.id) {
        println!("Saved to favorites: \"{}\"", quote.text);
    } else {
        println!("Removed from favorites: \"{}\"", quote.text);
    }
    Ok(())
}

fn handle_night(config: &Config) -> Result<()> {
    let mut store = open_store(config)?;
    store.toggle_night_mode();
    let on = store.state().is_night_mode;
    println!("Night mode {}", if on { "on" } else { "off" });
    Ok(())
}

fn handle_journal(
    config: &Config,
    content: String,
    mood: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    if content.trim().is_empty() {
        return Err(anyhow!("Journal entry must not be empty"));
    }

    let mut store = open_store(config)?;
    let id = store.add_journal_entry(NewJournalEntry {
        content,
        ai_summary: None,
        mood: mood.as_deref().map(Mood::parse_or_default),
        tags,
    });
    println!("Journal entry saved ({})", id);
    Ok(())
}

fn lock<T>(target: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    target.lock().map_err(|_| anyhow!("Timer state lock poisoned"))
}

fn handle_focus(config: &Config, minutes: Option<u32>, task: Option<String>) -> Result<()> {
    let store = open_store(config)?;
    let minutes = minutes.unwrap_or_else(|| config.focus_minutes());

    let task_id = match task {
        Some(reference) => Some(
            store
                .state()
                .resolve_todo_id(&reference)
                .ok_or_else(|| anyhow!("No todo matches '{}'", reference))?,
        ),
        None => None,
    };

    run_focus_session(store, minutes, task_id)
}

#[tokio::main]
async fn run_focus_session(
    mut store: DashboardStore,
    minutes: u32,
    task_id: Option<String>,
) -> Result<()> {
    let timer = Arc::new(Mutex::new(FocusTimer::new(minutes)));
    {
        let mut timer = lock(&timer)?;
        timer.select_task(task_id);
        timer.start();
        println!(
            "Focus for {} minutes. Press Ctrl+C to give up.",
            timer.focus_minutes()
        );
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let ticker = spawn_ticker(Arc::clone(&timer), TICK_PERIOD, move |events| {
        let _ = tx.send(events);
    });

    let mut display = tokio::time::interval(Duration::from_millis(500));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                ticker.stop();
                println!("\nFocus session abandoned, nothing recorded.");
                return Ok(());
            }
            Some(events) = rx.recv() => {
                ticker.stop();
                // Other commands may have persisted while the timer ran
                store.reload();
                for event in events {
                    store.apply_timer_event(event);
                }
                break;
            }
            _ = display.tick() => {
                let timer = lock(&timer)?;
                print!("\r{} {}  ", timer.phase(), timer.display());
                std::io::stdout().flush()?;
            }
        }
    }

    let timer = lock(&timer)?;
    let state = store.state();
    println!(
        "\nSession complete! {} minutes focused today in total, {} points. Take a {} minute break.",
        state.user_stats.focus_time,
        state.user_stats.total_points(),
        timer.remaining().0
    );
    Ok(())
}

fn handle_breathe(config: &Config, pattern: Option<String>, cycles: u32) -> Result<()> {
    let key = pattern.unwrap_or_else(|| config.breathing_pattern.clone());
    run_breathing(BreathingPattern::by_key(&key), cycles.max(1))
}

#[tokio::main]
async fn run_breathing(pattern: BreathingPattern, cycles: u32) -> Result<()> {
    let cycle = Arc::new(Mutex::new(BreathingCycle::new(pattern)));
    {
        let mut cycle = lock(&cycle)?;
        cycle.start();
        println!(
            "{}: {} cycles of {}-{}-{}",
            pattern.name, cycles, pattern.inhale, pattern.hold, pattern.exhale
        );
        if let Some(instruction) = cycle.instruction() {
            println!("{}", instruction);
        }
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let ticker = spawn_ticker(Arc::clone(&cycle), TICK_PERIOD, move |events| {
        let _ = tx.send(events);
    });

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    'session: loop {
        tokio::select! {
            _ = &mut ctrl_c => break 'session,
            Some(events) = rx.recv() => {
                for event in events {
                    match event {
                        BreathingEvent::CycleCompleted(done) => {
                            println!("Cycle {} of {} complete", done, cycles);
                            if done >= cycles {
                                break 'session;
                            }
                        }
                        BreathingEvent::PhaseChanged(phase) => println!("{}", phase.instruction()),
                    }
                }
            }
        }
    }

    ticker.stop();
    println!("Well done. Take that calm with you.");
    Ok(())
}

fn handle_config(config: &Config, init: bool) -> Result<()> {
    let path = get_config_path()?;

    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            Config::default().save()?;
            println!("Wrote default config to {}", path.display());
        }
    }

    let mut shown = config.clone();
    let mask = |key: &mut Option<String>| {
        if key.is_some() {
            *key = Some("********".to_string());
        }
    };
    mask(&mut shown.ai.openai_api_key);
    mask(&mut shown.ai.huggingface_api_key);

    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(&shown)?);
    println!(
        "# AI companion: {}",
        companion::from_config(&config.ai).name()
    );
    Ok(())
}

fn handle_serve(config: &Config, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(config.api_port);
    let store = open_store(config)?;
    let ctx = AppContext::new(store, companion::from_config(&config.ai));

    println!("Serving the dashboard API on http://127.0.0.1:{port}");
    run_server(ctx, port)
}

#[tokio::main]
async fn run_server(ctx: AppContext, port: u16) -> Result<()> {
    api::serve(ctx, port).await
}
