use crate::{color::TrackPalette, track::WaveParameters};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};

/// Embedded default theme
const DEFAULT_THEME_YAML: &str = include_str!("../themes/default.yaml");

static DEFAULT_THEME: Lazy<Theme> =
    Lazy::new(|| serde_yaml::from_str(DEFAULT_THEME_YAML).expect("corrupted embedded theme"));

/// Wave configuration carried by a theme.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WaveSpec {
    pub amplitude: f32,
    pub wavelength: f32,
    /// Duration of one full phase cycle, in milliseconds.
    pub cycle_millis: u64,
}

impl WaveSpec {
    pub fn cycle(&self) -> Duration {
        Duration::from_millis(self.cycle_millis.max(1))
    }

    /// Wave parameters for a given phase factor.
    pub fn parameters(&self, phase_factor: f32) -> WaveParameters {
        WaveParameters { amplitude: self.amplitude, wavelength: self.wavelength, phase_factor }
    }
}

/// Track sizing carried by a theme.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TrackSpec {
    pub thickness: f32,
    pub active_extra_thickness: f32,
}

/// A wavetrack theme: colors, wave shape, and track sizing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Theme {
    pub colors: TrackPalette,
    pub wave: WaveSpec,
    pub track: TrackSpec,
}

/// Errors that can occur when loading themes
#[derive(thiserror::Error, Debug)]
pub enum ThemeError {
    #[error("theme '{0}' is not available")]
    NotFound(String),

    #[error("failed to parse theme: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("theme sets a non-zero amplitude with wavelength {0}")]
    InvalidWavelength(f32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Theme {
    /// The embedded default theme.
    pub fn default_theme() -> &'static Theme {
        &DEFAULT_THEME
    }

    /// Load a theme from an explicit path, or by name from the user theme
    /// directory (`<config dir>/wavetrack/themes/<name>.yaml`).
    ///
    /// Unknown names are rejected rather than silently falling back.
    pub fn load(name_or_path: &str) -> Result<Theme, ThemeError> {
        let direct = PathBuf::from(name_or_path);
        let path = if direct.is_file() {
            direct
        } else {
            user_theme_path(name_or_path)
                .filter(|path| path.is_file())
                .ok_or_else(|| ThemeError::NotFound(name_or_path.to_string()))?
        };
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn parse(content: &str) -> Result<Theme, ThemeError> {
        let theme: Theme = serde_yaml::from_str(content)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Enforce the renderer's precondition at the configuration boundary:
    /// the wavelength is divided by whenever the amplitude is non-zero.
    fn validate(&self) -> Result<(), ThemeError> {
        if self.wave.amplitude != 0.0 && self.wave.wavelength <= 0.0 {
            return Err(ThemeError::InvalidWavelength(self.wave.wavelength));
        }
        Ok(())
    }
}

fn user_theme_path(name: &str) -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "wavetrack")?;
    Some(dirs.config_dir().join("themes").join(format!("{name}.yaml")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn embedded_default_theme_is_valid() {
        let theme = Theme::default_theme();
        assert_eq!(theme.colors.active.enabled, Color::new(0x5f, 0xd7, 0xff));
        assert_eq!(theme.wave.wavelength, 20.0);
        assert_eq!(theme.wave.cycle(), Duration::from_millis(1200));
        assert_eq!(theme.track.thickness, 4.0);
    }

    #[test]
    fn loads_theme_from_an_explicit_path() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("custom.yaml");
        let contents = DEFAULT_THEME_YAML.replace("amplitude: 4.0", "amplitude: 6.5");
        fs::write(&path, contents).expect("failed to write theme");

        let theme = Theme::load(path.to_str().expect("non-utf8 path")).expect("failed to load");
        assert_eq!(theme.wave.amplitude, 6.5);
    }

    #[test]
    fn unknown_theme_names_are_rejected() {
        let result = Theme::load("no-such-theme-exists");
        assert!(matches!(result, Err(ThemeError::NotFound(_))));
    }

    #[test]
    fn wavy_theme_requires_a_positive_wavelength() {
        let contents = DEFAULT_THEME_YAML.replace("wavelength: 20.0", "wavelength: 0.0");
        let result = Theme::parse(&contents);
        assert!(matches!(result, Err(ThemeError::InvalidWavelength(_))));
    }

    #[test]
    fn flat_theme_may_leave_the_wavelength_at_zero() {
        let contents = DEFAULT_THEME_YAML
            .replace("amplitude: 4.0", "amplitude: 0.0")
            .replace("wavelength: 20.0", "wavelength: 0.0");
        let theme = Theme::parse(&contents).expect("failed to parse");
        assert_eq!(theme.wave.amplitude, 0.0);
    }

    #[test]
    fn malformed_themes_fail_to_parse() {
        assert!(matches!(Theme::parse("colors: 3"), Err(ThemeError::Parse(_))));
        let bad_color = DEFAULT_THEME_YAML.replace("#5fd7ff", "#xyz");
        assert!(matches!(Theme::parse(&bad_color), Err(ThemeError::Parse(_))));
    }

    #[test]
    fn wave_spec_produces_parameters() {
        let parameters = Theme::default_theme().wave.parameters(1.5);
        assert_eq!(parameters.amplitude, 4.0);
        assert_eq!(parameters.wavelength, 20.0);
        assert_eq!(parameters.phase_factor, 1.5);
    }
}
