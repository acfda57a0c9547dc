use std::time::Duration;

use clap::Subcommand;
use ringdown_core::present::display_snapshot;
use ringdown_core::storage::Database;
use ringdown_core::{Event, Settings, SoundRequest, TimerConfig, TimerEngine};

const ENGINE_KEY: &str = "timer_engine";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Toggle running/paused; a finished timer resets without starting
    Toggle,
    /// Reset to the configured default duration
    Reset,
    /// Add one step (rejected past the configured default)
    Add,
    /// Subtract one step (floored at zero)
    Sub,
    /// Print current timer state as JSON
    Status {
        /// Also print the render-sink display snapshot
        #[arg(long)]
        display: bool,
    },
    /// Drive the countdown in the foreground until it finishes
    Run,
}

fn load_engine(db: &Database, config: &TimerConfig) -> TimerEngine {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_str::<TimerEngine>(&json) {
            return engine;
        }
    }
    TimerEngine::new(config)
}

fn save_engine(db: &Database, engine: &TimerEngine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

/// Print an operation's event (sound cue to stderr, event JSON to stdout),
/// falling back to a snapshot when the operation was a no-op.
fn report(
    event: Option<Event>,
    engine: &TimerEngine,
    config: &TimerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => {
            if let Some(sound) = SoundRequest::for_event(&event, config) {
                eprintln!("sound: {}", sound.file_name());
            }
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        None => println!("{}", serde_json::to_string_pretty(&engine.snapshot())?),
    }
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    let config = settings.timer_config()?;
    let db = Database::open()?;
    let mut engine = load_engine(&db, &config);

    match action {
        TimerAction::Start => {
            let event = engine.start();
            report(event, &engine, &config)?;
        }
        TimerAction::Pause => {
            let event = engine.pause();
            report(event, &engine, &config)?;
        }
        TimerAction::Toggle => {
            let event = engine.toggle(&config);
            report(event, &engine, &config)?;
        }
        TimerAction::Reset => {
            let event = engine.reset(&config);
            report(event, &engine, &config)?;
        }
        TimerAction::Add => {
            let event = engine.add_time(&config);
            report(event, &engine, &config)?;
        }
        TimerAction::Sub => {
            let event = engine.subtract_time(&config);
            report(event, &engine, &config)?;
        }
        TimerAction::Status { display } => {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            if display {
                let snap = display_snapshot(&engine, &config);
                println!("{}", serde_json::to_string_pretty(&snap)?);
            }
        }
        TimerAction::Run => {
            run_loop(&mut engine, &config)?;
        }
    }

    save_engine(&db, &engine)?;
    Ok(())
}

/// Foreground tick loop: the one scheduler handle driving the engine.
///
/// Ticks at the configured interval and prints one status line per
/// displayed-second change. Returns once the countdown finishes (or
/// immediately if there is nothing to run).
fn run_loop(engine: &mut TimerEngine, config: &TimerConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(event) = engine.start() {
        if let Some(sound) = SoundRequest::for_event(&event, config) {
            eprintln!("sound: {}", sound.file_name());
        }
    }
    if !engine.is_running() || engine.precise_remaining_secs() <= 0.0 {
        // Finished timer, or a countdown already subtracted to zero.
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(async {
        let mut interval = tokio::time::interval(Duration::from_millis(config.tick_interval_ms));
        // The first tick of a tokio interval completes immediately.
        interval.tick().await;
        let mut last_displayed = engine.displayed_whole_secs();
        loop {
            interval.tick().await;
            if let Some(event) = engine.tick(config) {
                if let Some(sound) = SoundRequest::for_event(&event, config) {
                    eprintln!("sound: {}", sound.file_name());
                }
            }
            if engine.displayed_whole_secs() != last_displayed {
                last_displayed = engine.displayed_whole_secs();
                let snap = display_snapshot(engine, config);
                println!("{} phase={:?}", snap.formatted_time, snap.phase);
            }
            if !engine.is_running() {
                break;
            }
        }
    });
    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}
