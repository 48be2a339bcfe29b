use std::path::Path;
use std::process::Command;

use crate::config::{Config, config_file_path, ensure_config_file};
use crate::error::AppError;
use crate::utils::display_path;

const FALLBACK_EDITOR: &str = "nano";

pub struct ConfigOptions {
    pub show_path: bool,
    pub edit: bool,
    pub add_exclude: Option<String>,
}

pub fn execute_config(options: ConfigOptions) -> Result<(), AppError> {
    let path = config_file_path()?;

    if options.show_path {
        println!("Configuration file: {}", display_path(&path));
    }

    if let Some(pattern) = options.add_exclude.clone() {
        let mut config = Config::load()?;
        config.append_exclude(pattern.clone());
        // Reject the whole set before anything reaches disk.
        config.compile_excludes()?;
        config.save()?;
        println!("Never reporting images matching '{pattern}'.");
    }

    if options.edit {
        let path = ensure_config_file()?;
        open_editor(&path)?;
        // Catch a broken edit now rather than on the next scan.
        Config::load()?.compile_excludes()?;
    }

    if !options.show_path && options.add_exclude.is_none() && !options.edit {
        println!("Configuration file: {}", display_path(&path));
        print_effective(&Config::load()?);
    }

    Ok(())
}

fn print_effective(config: &Config) {
    println!("runtime: {}", config.runtime);
    match config.timeout() {
        Some(timeout) => println!("timeout_secs: {}", timeout.as_secs()),
        None => println!("timeout_secs: none"),
    }
    if config.exclude.is_empty() {
        println!("exclude: none");
    } else {
        println!("exclude:");
        for pattern in &config.exclude {
            println!("  - {pattern}");
        }
    }
}

fn open_editor(path: &Path) -> Result<(), AppError> {
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| FALLBACK_EDITOR.to_string());

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|err| AppError::Editor(format!("{editor}: {err}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(AppError::Editor(format!("{editor} exited with status {status}")))
    }
}
