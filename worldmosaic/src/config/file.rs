//! INI configuration file.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

/// Errors reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid INI.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] ini::ParseError),

    /// A key holds a value of the wrong type.
    #[error("Invalid value '{value}' for [{section}] {key}: {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// The file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `[world]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSettings {
    /// World save directory (contains `region/`).
    pub path: PathBuf,
}

/// `[resources]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSettings {
    /// Resource pack root (contains `blocks.json`).
    pub path: PathBuf,
    /// Texture directory inside the pack.
    pub texture_dir: String,
    /// Face used for per-face manifest entries.
    pub default_face: String,
}

/// `[render]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Chunks per side of the rendered square.
    pub scale: u32,
    /// Chunk X of the top-left chunk.
    pub min_x: i32,
    /// Chunk Z of the top-left chunk.
    pub min_z: i32,
    /// Worker threads, 0 for one per CPU.
    pub threads: usize,
    /// Fail the run if any chunk fails.
    pub strict: bool,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub path: PathBuf,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Default filter when `RUST_LOG` is not set.
    pub level: String,
    /// Directory for `worldmosaic.log`; no file log when unset.
    pub directory: Option<PathBuf>,
}

/// Contents of `config.ini`.
///
/// Block names in `[aliases]`, `[textures]` and `[legacy]` keys are written
/// without the `minecraft:` namespace (INI keys cannot hold `:`); values may
/// be bare or namespaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub world: WorldSettings,
    pub resources: ResourceSettings,
    pub render: RenderSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
    /// Canonical block → aliases, in file order.
    pub aliases: Vec<(String, Vec<String>)>,
    /// Block → texture file, relative to the resource pack root unless absolute.
    pub textures: Vec<(String, String)>,
    /// Legacy block name → current block name.
    pub legacy: Vec<(String, String)>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let textures = [
            ("granite", "colors/stone_granite.png"),
            ("diorite", "colors/stone_diorite.png"),
            ("andesite", "colors/stone_andesite.png"),
            ("lava", "colors/lava_placeholder.png"),
            ("water", "colors/water_placeholder.png"),
            ("grass", "colors/grass_carried.png"),
            ("grass_block", "colors/grass_carried.png"),
        ];

        Self {
            world: WorldSettings {
                path: PathBuf::from("./world"),
            },
            resources: ResourceSettings {
                path: PathBuf::from("./resources/vanilla"),
                texture_dir: "colors".to_string(),
                default_face: "up".to_string(),
            },
            render: RenderSettings {
                scale: 32,
                min_x: 0,
                min_z: 0,
                threads: 0,
                strict: false,
            },
            output: OutputSettings {
                path: PathBuf::from("./result/chunks.png"),
            },
            logging: LoggingSettings {
                level: "info".to_string(),
                directory: None,
            },
            aliases: vec![
                ("air".to_string(), vec!["cave_air".to_string()]),
                ("grass_block".to_string(), vec!["grass".to_string()]),
            ],
            textures: textures
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            legacy: Vec::new(),
        }
    }
}

/// Default location of the configuration file.
///
/// `<config dir>/worldmosaic/config.ini`, or `./worldmosaic/config.ini` when
/// the platform has no config directory.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("worldmosaic")
        .join("config.ini")
}

impl ConfigFile {
    /// Load from [`config_file_path`], or defaults if the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse INI text. Keys not present keep their default values.
    ///
    /// A present `[aliases]`, `[textures]` or `[legacy]` section replaces the
    /// default entries of that section.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text)?;
        let mut config = Self::default();

        if let Some(path) = get(&ini, "world", "path") {
            config.world.path = PathBuf::from(path);
        }

        if let Some(path) = get(&ini, "resources", "path") {
            config.resources.path = PathBuf::from(path);
        }
        if let Some(dir) = get(&ini, "resources", "texture_dir") {
            config.resources.texture_dir = dir.to_string();
        }
        if let Some(face) = get(&ini, "resources", "default_face") {
            config.resources.default_face = face.to_string();
        }

        if let Some(scale) = parse_value(&ini, "render", "scale")? {
            config.render.scale = scale;
        }
        if let Some(min_x) = parse_value(&ini, "render", "min_x")? {
            config.render.min_x = min_x;
        }
        if let Some(min_z) = parse_value(&ini, "render", "min_z")? {
            config.render.min_z = min_z;
        }
        if let Some(threads) = parse_value(&ini, "render", "threads")? {
            config.render.threads = threads;
        }
        if let Some(strict) = parse_value(&ini, "render", "strict")? {
            config.render.strict = strict;
        }

        if let Some(path) = get(&ini, "output", "path") {
            config.output.path = PathBuf::from(path);
        }

        if let Some(level) = get(&ini, "logging", "level") {
            config.logging.level = level.to_string();
        }
        if let Some(dir) = get(&ini, "logging", "directory") {
            config.logging.directory = Some(PathBuf::from(dir));
        }

        if let Some(section) = ini.section(Some("aliases")) {
            config.aliases = section
                .iter()
                .map(|(canonical, list)| {
                    let aliases = list
                        .split(',')
                        .map(str::trim)
                        .filter(|a| !a.is_empty())
                        .map(str::to_string)
                        .collect();
                    (canonical.to_string(), aliases)
                })
                .collect();
        }

        if let Some(section) = ini.section(Some("textures")) {
            config.textures = pairs(section);
        }

        if let Some(section) = ini.section(Some("legacy")) {
            config.legacy = pairs(section);
        }

        Ok(config)
    }

    /// Render as an INI document.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("world"))
            .set("path", self.world.path.display().to_string());

        ini.with_section(Some("resources"))
            .set("path", self.resources.path.display().to_string())
            .set("texture_dir", self.resources.texture_dir.as_str())
            .set("default_face", self.resources.default_face.as_str());

        ini.with_section(Some("render"))
            .set("scale", self.render.scale.to_string())
            .set("min_x", self.render.min_x.to_string())
            .set("min_z", self.render.min_z.to_string())
            .set("threads", self.render.threads.to_string())
            .set("strict", self.render.strict.to_string());

        ini.with_section(Some("output"))
            .set("path", self.output.path.display().to_string());

        ini.with_section(Some("logging"))
            .set("level", self.logging.level.as_str());
        if let Some(dir) = &self.logging.directory {
            ini.set_to(Some("logging"), "directory".to_string(), dir.display().to_string());
        }

        for (canonical, list) in &self.aliases {
            ini.set_to(Some("aliases"), canonical.clone(), list.join(", "));
        }
        for (block, path) in &self.textures {
            ini.set_to(Some("textures"), block.clone(), path.clone());
        }
        for (old, new) in &self.legacy {
            ini.set_to(Some("legacy"), old.clone(), new.clone());
        }

        ini
    }

    /// Save to [`config_file_path`].
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_file_path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        self.to_ini().write_to_file(path).map_err(write_error)
    }
}

fn get<'a>(ini: &'a Ini, section: &str, key: &str) -> Option<&'a str> {
    ini.section(Some(section))
        .and_then(|s| s.get(key))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn parse_value<T>(ini: &Ini, section: &str, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get(ini, section, key)
        .map(|value| {
            value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                section: section.to_string(),
                key: key.to_string(),
                value: value.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn pairs(section: &ini::Properties) -> Vec<(String, String)> {
    section
        .iter()
        .map(|(k, v)| (k.to_string(), v.trim().to_string()))
        .collect()
}
