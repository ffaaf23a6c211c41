use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::schema::DEFAULT_ZONE;
use super::{ensure_config_dir, get_config_path, Config};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise uses the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    let config_path = default_path.unwrap_or_else(get_config_path);

    println!();
    println!("RSRTF Configuration Wizard");
    println!("==========================");
    println!();

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!("Config already exists at {}. Overwrite?", config_path.display()),
            false,
        )?;
        if !overwrite {
            println!("Keeping existing config.");
            return Ok(());
        }
    }

    println!("The zone name appears on the auditor banner and on printed certificates.");
    let zone = prompt_with_default("Zone name", DEFAULT_ZONE)?;

    println!();
    println!("A default score table is used when you run rsrtf without a file argument.");
    let input = prompt("Default score table path (empty for none): ")?;

    let config = Config {
        zone: if zone == DEFAULT_ZONE { None } else { Some(zone) },
        input: if input.is_empty() {
            None
        } else {
            Some(PathBuf::from(input))
        },
    };

    let yaml = serde_saphyr::to_string(&config).context("Failed to serialize config")?;

    if config_path == get_config_path() {
        ensure_config_dir()?;
    } else if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }
    }

    std::fs::write(&config_path, yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    Ok(())
}
