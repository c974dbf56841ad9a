//! Configuration file support.
//!
//! Settings live in an INI file at [`config_file_path`]. Every key is
//! optional; missing keys fall back to [`ConfigFile::default`], and CLI
//! arguments override whatever the file says.
//!
//! ```ini
//! [world]
//! path = ./world
//!
//! [render]
//! scale = 32
//! min_x = 0
//! min_z = 0
//!
//! [aliases]
//! air = cave_air
//!
//! [textures]
//! water = colors/water_placeholder.png
//! ```

mod file;

pub use file::{
    config_file_path, ConfigError, ConfigFile, LoggingSettings, OutputSettings, RenderSettings,
    ResourceSettings, WorldSettings,
};
