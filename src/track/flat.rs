use super::{
    common::{self, TrackContext},
    TrackShape,
};
use crate::{geometry::Rect, surface::Surface};

/// Flat track shape: the active segment is a plain rounded bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTrack;

impl TrackShape for FlatTrack {
    fn preferred_bounds(&self, ctx: &TrackContext) -> Rect {
        let bounds = ctx.geometry.bounds;
        let height = ctx.active_thickness().max(bounds.height);
        Rect::new(bounds.x, bounds.center_y() - height / 2.0, bounds.width, height)
    }

    fn render(&self, ctx: &TrackContext, surface: &mut dyn Surface) {
        if ctx.geometry.bounds.height <= 0.0 {
            return;
        }
        let colors = common::resolve_colors(ctx);
        common::draw_inactive(ctx, surface, colors.inactive);
        common::draw_secondary(ctx, surface, colors.secondary);
        common::draw_flat_active(ctx, surface, colors.active);
    }
}
