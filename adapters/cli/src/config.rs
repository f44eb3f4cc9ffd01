//! `hexchess.toml` loading and validation.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use hexchess_core::CheckIndicator;
use hexchess_rendering::{Color, Palette};
use serde::Deserialize;
use tracing::debug;

/// File read when no `--config` path is given.
pub const DEFAULT_CONFIG_PATH: &str = "hexchess.toml";

/// Runtime configuration of the terminal client.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How to start the rule engine.
    pub engine: EngineConfig,
    /// Board display options.
    pub display: DisplayConfig,
    /// Cell colors as `#rrggbb` strings.
    pub palette: PaletteConfig,
}

/// Engine process command line.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Program to spawn.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: "hexchess-engine".to_owned(),
            args: Vec::new(),
        }
    }
}

/// Display options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// When the king of the side to move is marked as in check.
    pub check_indicator: CheckIndicator,
    /// Label empty cells with their display keys.
    pub show_coordinates: bool,
}

/// Palette as written in the configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    /// Zone A fill.
    pub zone_a: String,
    /// Zone B fill.
    pub zone_b: String,
    /// Zone C fill.
    pub zone_c: String,
    /// Fill of cells outside every zone.
    pub neutral: String,
    /// Selected cell override.
    pub selected: String,
    /// Reachable destination override.
    pub reachable: String,
    /// Checked king override.
    pub check: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            zone_a: "#e8c48a".to_owned(),
            zone_b: "#b58650".to_owned(),
            zone_c: "#d19e66".to_owned(),
            neutral: "#808080".to_owned(),
            selected: "#5f9ea0".to_owned(),
            reachable: "#9acd32".to_owned(),
            check: "#cd5c5c".to_owned(),
        }
    }
}

impl PaletteConfig {
    /// Parses every entry into a rendering palette.
    pub fn to_palette(&self) -> Result<Palette> {
        let parse = |name: &str, value: &str| -> Result<Color> {
            Color::from_hex(value).with_context(|| format!("invalid palette entry `{name}`"))
        };
        Ok(Palette {
            zone_a: parse("zone_a", &self.zone_a)?,
            zone_b: parse("zone_b", &self.zone_b)?,
            zone_c: parse("zone_c", &self.zone_c)?,
            neutral: parse("neutral", &self.neutral)?,
            selected: parse("selected", &self.selected)?,
            reachable: parse("reachable", &self.reachable)?,
            check: parse("check", &self.check)?,
        })
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// With `path` set the file must exist. Without it, [`DEFAULT_CONFIG_PATH`]
    /// is read if present and built-in defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) if !required && error.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read config at {}", path.display()))
            }
        };

        Self::from_toml(&contents)
            .with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Parses and validates configuration text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse config toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the client cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.engine.program.trim().is_empty() {
            bail!("engine program must not be empty");
        }
        let _ = self.palette.to_palette()?;
        Ok(())
    }

    /// Replaces the engine command line with values given on the command line.
    ///
    /// Arguments are only replaced when `args` is non-empty or a program is given.
    pub fn override_engine(&mut self, program: Option<String>, args: Vec<String>) {
        if let Some(program) = program {
            self.engine.program = program;
            self.engine.args = args;
        } else if !args.is_empty() {
            self.engine.args = args;
        }
    }

    /// Parsed palette.
    pub fn palette(&self) -> Result<Palette> {
        self.palette.to_palette()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml("").expect("empty config is valid");

        assert_eq!(config, Config::default());
        assert_eq!(config.engine.program, "hexchess-engine");
        assert_eq!(config.display.check_indicator, CheckIndicator::KingWithMoves);
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::from_toml(
            r##"
            [engine]
            program = "./target/release/engine"
            args = ["--stdio"]

            [display]
            check_indicator = "always"
            show_coordinates = true

            [palette]
            check = "#ff0000"
            "##,
        )
        .expect("valid config");

        assert_eq!(config.engine.args, vec!["--stdio".to_owned()]);
        assert_eq!(config.display.check_indicator, CheckIndicator::Always);
        assert!(config.display.show_coordinates);
        let palette = config.palette().expect("valid palette");
        assert_eq!(palette.check, Color::from_rgb_u8(0xff, 0, 0));
        assert_eq!(palette.zone_a, Palette::default().zone_a);
    }

    #[test]
    fn empty_engine_program_is_rejected() {
        let error = Config::from_toml("[engine]\nprogram = \"  \"\n")
            .expect_err("blank program must be rejected");

        assert!(error.to_string().contains("engine program"));
    }

    #[test]
    fn malformed_palette_entry_is_rejected() {
        let error = Config::from_toml("[palette]\nzone_b = \"brown\"\n")
            .expect_err("named colors are not supported");

        assert!(format!("{error:#}").contains("zone_b"));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(Config::from_toml("[display]\ncheck_indicator = \"never\"\n").is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let missing = Path::new("definitely/not/here/hexchess.toml");

        assert!(Config::load(Some(missing)).is_err());
    }

    #[test]
    fn missing_default_file_falls_back_to_defaults() {
        assert!(!Path::new(DEFAULT_CONFIG_PATH).exists());

        let config = Config::load(None).expect("defaults are used");

        assert_eq!(config, Config::default());
    }

    #[test]
    fn explicit_path_is_read() {
        let path =
            std::env::temp_dir().join(format!("hexchess-config-{}.toml", std::process::id()));
        fs::write(&path, "[display]\nshow_coordinates = true\n").expect("temp dir is writable");

        let loaded = Config::load(Some(&path));
        let _ = fs::remove_file(&path);

        assert!(loaded.expect("config loads").display.show_coordinates);
    }

    #[test]
    fn engine_override_replaces_program_and_args() {
        let mut config = Config::default();
        config.engine.args = vec!["--old".to_owned()];

        config.override_engine(Some("my-engine".to_owned()), Vec::new());
        assert_eq!(config.engine.program, "my-engine");
        assert!(config.engine.args.is_empty());

        config.override_engine(None, vec!["--depth".to_owned(), "3".to_owned()]);
        assert_eq!(config.engine.program, "my-engine");
        assert_eq!(config.engine.args, vec!["--depth".to_owned(), "3".to_owned()]);
    }
}
