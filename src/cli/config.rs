//! CLI commands for setup and settings

use clap::Subcommand;

use crate::config::settings::SETTING_KEYS;
use crate::config::{LensPaths, Settings};
use crate::error::LensResult;

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,

    /// Change one setting and save it
    Set {
        /// Setting name (e.g. boundary_mode)
        key: String,
        /// New value
        value: String,
    },
}

/// Create the base directory and write default settings
pub fn handle_init_command(paths: &LensPaths, settings: &Settings) -> LensResult<()> {
    println!("Initializing ledgerlens at: {}", paths.base_dir().display());
    settings.save(paths)?;
    println!("Settings written to: {}", paths.settings_file().display());
    println!("Exports directory:   {}", paths.export_dir().display());
    println!();
    println!("Run 'ledgerlens dashboard <snapshot.json>' to see your dashboard.");
    Ok(())
}

/// Handle config commands
pub fn handle_config_command(
    paths: &LensPaths,
    settings: &mut Settings,
    cmd: Option<ConfigCommands>,
) -> LensResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            print!("{}", format_settings(paths, settings));
        }
        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            tracing::info!(%key, %value, "setting updated");
            println!("Set {} = {}", key, value.trim());
        }
    }
    Ok(())
}

fn format_settings(paths: &LensPaths, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str("ledgerlens Configuration\n");
    output.push_str("========================\n");
    output.push_str(&format!("Base directory:   {}\n", paths.base_dir().display()));
    output.push_str(&format!("Settings file:    {}\n", paths.settings_file().display()));
    output.push_str(&format!(
        "Initialized:      {}\n\n",
        if paths.is_initialized() { "yes" } else { "no" }
    ));
    output.push_str("Settings:\n");
    output.push_str(&format!("  currency_symbol:            {}\n", settings.currency_symbol));
    output.push_str(&format!("  boundary_mode:              {:?}\n", settings.boundary_mode));
    output.push_str(&format!(
        "  net_series_transfers:       {:?}\n",
        settings.net_series_transfers
    ));
    output.push_str(&format!(
        "  transfer_match_window_days: {}\n",
        settings.transfer_match_window_days
    ));
    output.push_str(&format!("  default_range:              {:?}\n", settings.default_range));
    output.push_str(&format!("  comparison_label:           {}\n", settings.comparison_label));
    output.push_str(&format!("\nSettable keys: {}\n", SETTING_KEYS.join(", ")));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoundaryMode;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LensPaths::with_base_dir(temp_dir.path().join("home"));
        assert!(!paths.is_initialized());

        handle_init_command(&paths, &Settings::default()).unwrap();
        assert!(paths.is_initialized());
        assert!(paths.export_dir().is_dir());
    }

    #[test]
    fn test_set_persists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LensPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        handle_config_command(
            &paths,
            &mut settings,
            Some(ConfigCommands::Set {
                key: "boundary_mode".into(),
                value: "exclusive".into(),
            }),
        )
        .unwrap();

        let reloaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(reloaded.boundary_mode, BoundaryMode::Exclusive);
    }

    #[test]
    fn test_format_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LensPaths::with_base_dir(temp_dir.path().to_path_buf());
        let output = format_settings(&paths, &Settings::default());
        assert!(output.contains("Initialized:      no"));
        assert!(output.contains("comparison_label:           previous period"));
    }
}
