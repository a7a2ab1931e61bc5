//! Grids of frames in one image

use raykit_core::{Color, Error, Framebuffer, Result};

const DEMO_ROWS: usize = 3;

/// Lay `frames` out on a `rows` by `columns` grid, left to right, top to bottom.
///
/// Frames are separated, and surrounded, by `gap` pixels of `background`.
/// The first frame sits at the top-left corner and cells past the last frame
/// stay `background`, so the sheet size depends only on the grid.
pub fn contact_sheet(
    frames: &[Framebuffer],
    rows: usize,
    columns: usize,
    gap: usize,
    background: Color,
) -> Result<Framebuffer> {
    let first = frames
        .first()
        .ok_or_else(|| Error::InvalidData("contact sheet needs at least one frame".to_string()))?;
    if rows == 0 || columns == 0 {
        return Err(Error::InvalidData(format!(
            "contact sheet grid {}x{} has no cells",
            rows, columns
        )));
    }
    if rows * columns < frames.len() {
        return Err(Error::InvalidData(format!(
            "{} frames do not fit a {}x{} grid",
            frames.len(),
            rows,
            columns
        )));
    }
    let (w, h) = (first.width(), first.height());
    if let Some((i, frame)) = frames
        .iter()
        .enumerate()
        .find(|(_, f)| f.width() != w || f.height() != h)
    {
        return Err(Error::InvalidData(format!(
            "frame {} is {}x{}, expected {}x{}",
            i,
            frame.width(),
            frame.height(),
            w,
            h
        )));
    }

    let mut sheet = Framebuffer::new(
        columns * w + (columns + 1) * gap,
        rows * h + (rows + 1) * gap,
        background,
    );
    for (i, frame) in frames.iter().enumerate() {
        let (row, col) = (i / columns, i % columns);
        sheet.blit_top_down(frame, gap + col * (w + gap), gap + row * (h + gap));
    }
    Ok(sheet)
}

/// The demo figure layout: always three rows of `ceil(n / 3)` columns
pub fn three_row_sheet(frames: &[Framebuffer], gap: usize, background: Color) -> Result<Framebuffer> {
    let columns = frames.len().div_ceil(DEMO_ROWS).max(1);
    contact_sheet(frames, DEMO_ROWS, columns, gap, background)
}
