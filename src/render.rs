//! Text rendering of a surface and its placements.
//!
//! Each grid cell shows the kind digit of the shape covering it, or `.`
//! when free. This is the visible artifact of a fill attempt; callers
//! wanting images can build on [`crate::surface::Surface::placed`].

use crate::surface::Surface;

/// Formats the surface as one row of glyphs per grid row.
pub fn format_surface(surface: &Surface) -> String {
    let width = surface.width() as usize;
    let height = surface.height() as usize;
    let mut rows = vec![vec!['.'; width]; height];

    for placement in surface.placed() {
        let glyph = char::from(b'0' + placement.kind() as u8);
        for (x, y) in placement.absolute_cells() {
            rows[y as usize][x as usize] = glyph;
        }
    }

    let mut output = String::with_capacity(height * (width + 1));
    for row in rows {
        output.extend(row);
        output.push('\n');
    }
    output
}
