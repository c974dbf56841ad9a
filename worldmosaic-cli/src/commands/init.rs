//! Init command - initialize configuration file.

use std::path::PathBuf;

use worldmosaic::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
///
/// Loads an existing file (keeping its values) or the defaults, then writes
/// it back so every key is present.
pub fn run(path: Option<PathBuf>) -> Result<(), CliError> {
    let path = path.unwrap_or_else(config_file_path);
    let existed = path.exists();

    let config = ConfigFile::load_from(&path)?;
    config.save_to(&path)?;

    if existed {
        println!("Updated configuration file:");
    } else {
        println!("Created configuration file:");
    }
    println!("  {}", path.display());
    println!();
    println!("Edit this file to set the world, resource pack and render region.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worldmosaic").join("config.ini");

        run(Some(path.clone())).unwrap();

        assert!(path.exists());
        assert_eq!(ConfigFile::load_from(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_init_keeps_existing_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[render]\nscale = 12\n").unwrap();

        run(Some(path.clone())).unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.render.scale, 12);
        assert_eq!(config.world.path, ConfigFile::default().world.path);
    }
}
