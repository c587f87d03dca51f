//! Rendering model state to bitmaps and text
//!
//! Solved models render their decided symbols; anything else renders a
//! preview that blends every still-possible symbol of each cell.

use crate::algorithm::executor::{Model, ModelState};
use crate::analysis::patterns::PatternSet;
use crate::analysis::tileset::TileSet;
use crate::io::image::{Bitmap, argb, channels};
use std::fmt::Write;

/// Opaque black, used for uncovered pixels and untouched cells on a black background
pub const BLACK: u32 = 0xff00_0000;

/// Render an overlapping model
///
/// Each output pixel takes its color from the pattern owning it. In a solved
/// model the owner is the cell at the pixel itself, except in the last
/// `N − 1` columns and rows, where the owner is the cell `N − 1` steps back
/// and the color is read from the far edge of its pattern. Partial renders
/// average the colors every possible pattern of every covering cell would
/// put on the pixel; a pixel nothing covers is opaque black.
pub fn render_overlapping(model: &Model, patterns: &PatternSet) -> Bitmap {
    let grid = model.grid();
    let (width, height) = (grid.width(), grid.height());
    let n = patterns.pattern_size();
    let mut bitmap = Bitmap::filled(width, height, 0);

    if model.state() == ModelState::Solved {
        for y in 0..height {
            let dy = if y + n <= height { 0 } else { n - 1 };
            for x in 0..width {
                let dx = if x + n <= width { 0 } else { n - 1 };
                let owner = grid.index(x.saturating_sub(dx), y.saturating_sub(dy));
                let Some(pattern) = model.observed().get(owner).copied().flatten() else {
                    tracing::warn!(x, y, owner, "unresolved owner cell, skipping rest of row");
                    break;
                };
                match patterns.color_at(pattern, dx, dy) {
                    Some(color) => bitmap.set_pixel(x, y, color),
                    None => tracing::warn!(pattern, dx, dy, "pattern color out of range"),
                }
            }
        }
        return bitmap;
    }

    for y in 0..height {
        for x in 0..width {
            let (mut contributors, mut red, mut green, mut blue) = (0u32, 0u32, 0u32, 0u32);
            for dy in 0..n {
                for dx in 0..n {
                    let sx = (x + width - dx % width) % width;
                    let sy = (y + height - dy % height) % height;
                    let cell = grid.index(sx, sy);
                    if !grid.is_eligible(cell) {
                        continue;
                    }
                    for pattern in model.possible_symbols(cell) {
                        let Some(color) = patterns.color_at(pattern, dx, dy) else {
                            continue;
                        };
                        let [_, r, g, b] = channels(color);
                        contributors += 1;
                        red += u32::from(r);
                        green += u32::from(g);
                        blue += u32::from(b);
                    }
                }
            }
            let color = if contributors == 0 {
                BLACK
            } else {
                argb(
                    0xff,
                    (red / contributors) as u8,
                    (green / contributors) as u8,
                    (blue / contributors) as u8,
                )
            };
            bitmap.set_pixel(x, y, color);
        }
    }
    bitmap
}

/// Render a tiled model
///
/// Solved models copy each decided tile's pixels. Partial renders blend the
/// possible tiles of each cell by weight, or paint the cell black when
/// `black_background` is set and nothing has been eliminated there yet.
pub fn render_tiled(model: &Model, tiles: &TileSet, black_background: bool) -> Bitmap {
    let grid = model.grid();
    let size = tiles.tile_size();
    let mut bitmap = Bitmap::filled(grid.width() * size, grid.height() * size, 0);

    for cell in 0..grid.len() {
        let (x, y) = grid.coordinates(cell);
        let (ox, oy) = (x * size, y * size);

        if model.state() == ModelState::Solved {
            let Some(tile) = model
                .observed()
                .get(cell)
                .copied()
                .flatten()
                .and_then(|symbol| tiles.bitmaps().get(symbol))
            else {
                tracing::warn!(cell, "unresolved cell in solved model");
                continue;
            };
            for (offset, &color) in tile.iter().enumerate() {
                bitmap.set_pixel(ox + offset % size, oy + offset / size, color);
            }
            continue;
        }

        if black_background && model.remaining(cell) == model.symbol_count() {
            for dy in 0..size {
                for dx in 0..size {
                    bitmap.set_pixel(ox + dx, oy + dy, BLACK);
                }
            }
            continue;
        }

        let normalization = 1.0 / model.sum_of_weights(cell);
        let possible = model.possible_symbols(cell);
        for offset in 0..size * size {
            let (mut red, mut green, mut blue) = (0.0, 0.0, 0.0);
            for &symbol in &possible {
                let Some(&color) = tiles.bitmaps().get(symbol).and_then(|t| t.get(offset)) else {
                    continue;
                };
                let [_, r, g, b] = channels(color);
                let share = model.alphabet().weight(symbol) * normalization;
                red += f64::from(r) * share;
                green += f64::from(g) * share;
                blue += f64::from(b) * share;
            }
            bitmap.set_pixel(
                ox + offset % size,
                oy + offset / size,
                argb(0xff, red as u8, green as u8, blue as u8),
            );
        }
    }
    bitmap
}

/// List the decided tile of every cell, one grid row per line
///
/// Each cell prints as `"name k, "`. A cell without a usable decision prints
/// `null(ti:observed[i]=t), ` where `t` is the raw decision or `-1`.
pub fn text_output(model: &Model, tiles: &TileSet) -> String {
    let grid = model.grid();
    let mut output = String::new();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = grid.index(x, y);
            let observed = model.observed().get(cell).copied().flatten();
            match observed.and_then(|symbol| tiles.names().get(symbol)) {
                Some(name) => {
                    let _ = write!(output, "{name}, ");
                }
                None => {
                    let raw = observed.map_or(-1, |symbol| symbol as i64);
                    let _ = write!(output, "null(ti:observed[{cell}]={raw}), ");
                }
            }
        }
        output.push('\n');
    }
    output
}
