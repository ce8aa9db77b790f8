use crate::{
    color::{Color, TrackPalette},
    geometry::{LayoutDirection, Rect, TrackGeometry},
    surface::{CornerRadii, Surface},
};

/// Wave configuration for the active segment, immutable per paint call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParameters {
    /// Peak vertical deviation of the curve. `0` selects the flat rendering
    /// mode; there is no interpolation between flat and wavy.
    pub amplitude: f32,
    /// Horizontal distance for one full sine cycle.
    ///
    /// Must be non-zero whenever `amplitude` is non-zero. This is a caller
    /// precondition and is not checked at render time.
    pub wavelength: f32,
    /// Phase offset as a multiple of `wavelength`, supplied by an external
    /// continuous animation to produce the scrolling effect.
    pub phase_factor: f32,
}

impl WaveParameters {
    pub fn flat() -> Self {
        Self { amplitude: 0.0, wavelength: 1.0, phase_factor: 0.0 }
    }
}

/// Every input a track shape needs for one paint call.
///
/// All visual parameters are passed in explicitly; shapes never read ambient
/// theme or animation state, so identical contexts render identically.
#[derive(Debug, Clone, Copy)]
pub struct TrackContext<'a> {
    pub geometry: &'a TrackGeometry,
    pub palette: &'a TrackPalette,
    pub direction: LayoutDirection,
    /// Whether the host control is enabled. Advisory: `enable_blend` is what
    /// carries the enable state into the resolved colors.
    pub enabled: bool,
    /// Progress of the external enable/disable transition in `[0, 1]`.
    pub enable_blend: f32,
    pub wave: WaveParameters,
    /// Extra thickness applied to the active segment only.
    pub active_extra_thickness: f32,
}

impl TrackContext<'_> {
    /// The active segment's full thickness.
    pub fn active_thickness(&self) -> f32 {
        self.geometry.bounds.height + self.active_extra_thickness
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedColors {
    pub(crate) active: Color,
    pub(crate) inactive: Color,
    pub(crate) secondary: Color,
}

pub(crate) fn resolve_colors(ctx: &TrackContext) -> ResolvedColors {
    let palette = ctx.palette;
    ResolvedColors {
        active: palette.active.resolve(ctx.enable_blend),
        inactive: palette.inactive.resolve(ctx.enable_blend),
        secondary: palette.secondary.resolve(ctx.enable_blend),
    }
}

fn span_rect(span: (f32, f32), top: f32, height: f32) -> Rect {
    Rect::new(span.0, top, span.1 - span.0, height)
}

/// The inactive segment: a flat bar from the thumb to the track end, rounded
/// on its trailing corners, at base thickness. Never wavy.
pub(crate) fn draw_inactive(ctx: &TrackContext, surface: &mut dyn Surface, color: Color) {
    let bounds = ctx.geometry.bounds;
    let rect = span_rect(ctx.geometry.inactive_span(ctx.direction), bounds.top(), bounds.height);
    if rect.is_empty() {
        return;
    }
    surface.fill_rounded_rect(rect, CornerRadii::trailing(bounds.height / 2.0, ctx.direction), color);
}

/// The secondary segment: a flat bar between the thumb and the secondary
/// position, rounded on its far-edge corners, drawn only when the secondary
/// position lies past the thumb. Never wavy.
pub(crate) fn draw_secondary(ctx: &TrackContext, surface: &mut dyn Surface, color: Color) {
    let Some(span) = ctx.geometry.secondary_span(ctx.direction) else {
        return;
    };
    let bounds = ctx.geometry.bounds;
    let rect = span_rect(span, bounds.top(), bounds.height);
    if rect.is_empty() {
        return;
    }
    surface.fill_rounded_rect(rect, CornerRadii::trailing(bounds.height / 2.0, ctx.direction), color);
}

/// The active segment in flat mode: a bar from the track start to the thumb
/// at full active thickness, rounded on its leading corners.
pub(crate) fn draw_flat_active(ctx: &TrackContext, surface: &mut dyn Surface, color: Color) {
    let thickness = ctx.active_thickness();
    let top = ctx.geometry.bounds.center_y() - thickness / 2.0;
    let rect = span_rect(ctx.geometry.active_span(ctx.direction), top, thickness);
    if rect.is_empty() {
        return;
    }
    surface.fill_rounded_rect(rect, CornerRadii::leading(thickness / 2.0, ctx.direction), color);
}
