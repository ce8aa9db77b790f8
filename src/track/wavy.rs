use super::{
    common::{self, TrackContext, WaveParameters},
    TrackShape,
};
use crate::{
    geometry::{LayoutDirection, Point, Rect},
    surface::Surface,
};
use std::f32::consts::TAU;

/// The amplitude ease ramps span this many wavelengths at each end of the
/// active segment, suppressing the discontinuity where the curve meets the
/// flat track edge and the thumb.
const RAMP_WAVELENGTHS: f32 = 3.0;

/// Fixed sampling resolution: one sample per horizontal unit.
const SAMPLE_STEP: f32 = 1.0;

/// Wavy track shape: the active segment is a scrolling damped sine curve.
///
/// With `amplitude == 0` the active segment renders as the flat bar instead;
/// no wave sampling occurs.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavyTrack;

impl TrackShape for WavyTrack {
    fn preferred_bounds(&self, ctx: &TrackContext) -> Rect {
        let bounds = ctx.geometry.bounds;
        let thickness = ctx.active_thickness();
        let height = (2.0 * ctx.wave.amplitude.abs() + thickness).max(bounds.height);
        // round caps can extend past the span ends by the stroke radius
        Rect::new(
            bounds.x - thickness / 2.0,
            bounds.center_y() - height / 2.0,
            bounds.width + thickness,
            height,
        )
    }

    fn render(&self, ctx: &TrackContext, surface: &mut dyn Surface) {
        if ctx.geometry.bounds.height <= 0.0 {
            return;
        }
        let colors = common::resolve_colors(ctx);
        common::draw_inactive(ctx, surface, colors.inactive);
        common::draw_secondary(ctx, surface, colors.secondary);
        if ctx.wave.amplitude == 0.0 {
            common::draw_flat_active(ctx, surface, colors.active);
            return;
        }
        let points = sample_wave(ctx);
        surface.stroke_polyline(&points, ctx.active_thickness(), colors.active);
    }
}

/// Sample the active-segment curve at fixed 1-unit steps, from the track
/// start to the thumb. The final sample always lands exactly on the thumb.
fn sample_wave(ctx: &TrackContext) -> Vec<Point> {
    let span = ctx.geometry.active_span(ctx.direction);
    let span_length = span.1 - span.0;
    let center_y = ctx.geometry.bounds.center_y();
    let wave = ctx.wave;
    let phase = wave.wavelength * wave.phase_factor;

    let point_at = |x_offset: f32| {
        let x = match ctx.direction {
            LayoutDirection::LeftToRight => span.0 + x_offset,
            LayoutDirection::RightToLeft => span.1 - x_offset,
        };
        let deviation = (x_offset / wave.wavelength + phase * TAU).sin()
            * wave.amplitude
            * ease_factor(x_offset, span_length, wave.wavelength);
        Point::new(x, center_y + deviation)
    };

    let mut points = Vec::with_capacity(span_length as usize + 2);
    let mut x_offset = 0.0;
    while x_offset < span_length {
        points.push(point_at(x_offset));
        x_offset += SAMPLE_STEP;
    }
    points.push(point_at(span_length));
    points
}

/// Amplitude ease over the active span: a linear ramp from 0 over the first
/// `3 * wavelength` units, a hold at 1 through the middle, and a mirrored
/// ramp back to 0 over the last `3 * wavelength` units. Both ramps are
/// computed unconditionally and the smaller one wins, so spans shorter than
/// `6 * wavelength` get the overlapping-ramp behavior without a special case.
fn ease_factor(x_offset: f32, span_length: f32, wavelength: f32) -> f32 {
    let ramp = RAMP_WAVELENGTHS * wavelength;
    let ramp_in = x_offset / ramp;
    let ramp_out = (span_length - x_offset) / ramp;
    ramp_in.min(ramp_out).min(1.0)
}
