use super::raster::RasterSurface;
use crate::color::Color;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

/// Two vertically stacked pixels per character cell.
const HALF_BLOCK: char = '▀';

/// Presents a [`RasterSurface`] into a terminal using half-block cells.
///
/// Each character cell carries two pixel rows: the top pixel as the
/// foreground of `▀`, the bottom pixel as the background.
#[derive(Debug, Clone, Copy)]
pub struct TerminalCanvas {
    column: u16,
    row: u16,
}

impl TerminalCanvas {
    pub fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }

    /// Terminal rows needed to present a surface of the given pixel height.
    pub fn rows_for(pixel_height: u32) -> u16 {
        pixel_height.div_ceil(2) as u16
    }

    pub fn present<W: Write>(&self, surface: &RasterSurface, output: &mut W) -> io::Result<()> {
        for cell_row in 0..Self::rows_for(surface.height()) {
            queue!(output, MoveTo(self.column, self.row + cell_row))?;
            let top_y = u32::from(cell_row) * 2;
            for x in 0..surface.width() {
                let top = surface.pixel(x, top_y);
                let bottom = if top_y + 1 < surface.height() { surface.pixel(x, top_y + 1) } else { top };
                queue!(
                    output,
                    SetForegroundColor(terminal_color(top)),
                    SetBackgroundColor(terminal_color(bottom)),
                    Print(HALF_BLOCK)
                )?;
            }
        }
        queue!(output, ResetColor)?;
        output.flush()
    }
}

fn terminal_color(color: Color) -> TermColor {
    TermColor::Rgb { r: color.r, g: color.g, b: color.b }
}
