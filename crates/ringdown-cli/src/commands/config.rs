use clap::Subcommand;
use ringdown_core::Settings;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print current settings as TOML
    Show,
    /// Print the resolved, validated timer configuration as JSON
    Resolved,
    /// Set a settings key, e.g. `timer.default_duration_secs 90`
    Set { key: String, value: String },
    /// Reset all settings to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let settings = Settings::load()?;
            print!("{}", toml::to_string_pretty(&settings)?);
        }
        ConfigAction::Resolved => {
            let settings = Settings::load()?;
            let config = settings.timer_config()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load()?;
            apply_set(&mut settings, &key, &value)?;
            // Reject values the core would refuse before persisting them.
            settings.timer_config()?;
            settings.save()?;
            println!("{key} = {value}");
        }
        ConfigAction::Reset => {
            Settings::default().save()?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}

fn apply_set(
    settings: &mut Settings,
    key: &str,
    value: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match key {
        "timer.default_duration_secs" => settings.timer.default_duration_secs = value.parse()?,
        "timer.min_duration_secs" => settings.timer.min_duration_secs = value.parse()?,
        "timer.max_duration_secs" => settings.timer.max_duration_secs = value.parse()?,
        "timer.step_secs" => settings.timer.step_secs = value.parse()?,
        "timer.tick_interval_ms" => settings.timer.tick_interval_ms = value.parse()?,
        "timer.tick_decrement_secs" => settings.timer.tick_decrement_secs = value.parse()?,
        "timer.warning_threshold_secs" => settings.timer.warning_threshold_secs = value.parse()?,
        "timer.ending_threshold_secs" => settings.timer.ending_threshold_secs = value.parse()?,
        "display.theme" => settings.display.theme = value.to_string(),
        "display.format" => settings.display.format = value.to_string(),
        "display.font" => settings.display.font = value.to_string(),
        "display.show_progress" => settings.display.show_progress = value.parse()?,
        "sound.enabled" => settings.sound.enabled = value.parse()?,
        "sound.set" => settings.sound.set = value.parse()?,
        "behavior.auto_start" => settings.behavior.auto_start = value.parse()?,
        _ => return Err(format!("unknown settings key: {key}").into()),
    }
    Ok(())
}
