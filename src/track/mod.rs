use crate::{geometry::Rect, surface::Surface};
use strum::{Display, EnumString};

mod common;
mod flat;
mod wavy;

pub use common::{TrackContext, WaveParameters};
pub use flat::FlatTrack;
pub use wavy::WavyTrack;

/// Selectable track shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum TrackStyle {
    Flat,
    #[default]
    Wavy,
}

/// A track shape strategy.
///
/// Shapes are stateless: `render` draws the whole two-segment track (plus the
/// optional secondary segment) for one frame and retains nothing. The single
/// skip condition is a non-positive track thickness, which renders nothing
/// without raising an error.
pub trait TrackShape {
    /// The extent the shape may paint into for the given context.
    fn preferred_bounds(&self, ctx: &TrackContext) -> Rect;

    /// Draw the track into `surface`.
    fn render(&self, ctx: &TrackContext, surface: &mut dyn Surface);
}

/// Get the shape implementation for a given style.
pub fn shape_for(style: TrackStyle) -> Box<dyn TrackShape> {
    match style {
        TrackStyle::Flat => Box::new(FlatTrack),
        TrackStyle::Wavy => Box::new(WavyTrack),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::{Color, StatePair, TrackPalette},
        geometry::{LayoutDirection, TrackGeometry},
        surface::CommandRecorder,
    };

    #[test]
    fn style_parses_from_kebab_case() {
        let style: TrackStyle = "wavy".parse().expect("failed to parse");
        assert_eq!(style, TrackStyle::Wavy);
        assert_eq!(TrackStyle::Flat.to_string(), "flat");
    }

    #[test]
    fn registry_returns_a_working_shape() {
        let geometry = TrackGeometry::new(Rect::new(0.0, 0.0, 100.0, 4.0), 50.0);
        let palette = TrackPalette {
            active: StatePair { enabled: Color::new(255, 0, 0), disabled: Color::new(55, 0, 0) },
            inactive: StatePair { enabled: Color::new(0, 255, 0), disabled: Color::new(0, 55, 0) },
            secondary: StatePair { enabled: Color::new(0, 0, 255), disabled: Color::new(0, 0, 55) },
        };
        let ctx = TrackContext {
            geometry: &geometry,
            palette: &palette,
            direction: LayoutDirection::LeftToRight,
            enabled: true,
            enable_blend: 1.0,
            wave: WaveParameters { amplitude: 3.0, wavelength: 10.0, phase_factor: 0.0 },
            active_extra_thickness: 0.0,
        };
        for style in [TrackStyle::Flat, TrackStyle::Wavy] {
            let shape = shape_for(style);
            let mut recorder = CommandRecorder::new();
            shape.render(&ctx, &mut recorder);
            assert!(!recorder.commands().is_empty());
            assert!(!shape.preferred_bounds(&ctx).is_empty());
        }
    }
}
