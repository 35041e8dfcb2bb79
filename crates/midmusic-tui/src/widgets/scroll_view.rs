//! Vertical scrolling for content taller than its viewport.
//!
//! Content is drawn into an off-screen buffer in content coordinates
//! (origin 0,0) and the visible band is copied into the frame.

use ratatui::{buffer::Buffer, crossterm::event::MouseEvent, layout::Rect};

/// Largest useful scroll offset.
pub fn max_offset(content_height: u16, viewport_height: u16) -> u16 {
    content_height.saturating_sub(viewport_height)
}

/// Blank canvas for content of `height` rows at the viewport's width.
pub fn canvas(viewport: Rect, height: u16) -> Buffer {
    Buffer::empty(Rect::new(0, 0, viewport.width, height))
}

/// Copy rows `offset..offset + viewport.height` of `content` into `dst`.
pub fn blit(content: &Buffer, offset: u16, dst: &mut Buffer, viewport: Rect) {
    for row in 0..viewport.height {
        let src_y = offset.saturating_add(row);
        for col in 0..viewport.width {
            let (Some(src), Some(out)) = (
                content.cell((col, src_y)),
                dst.cell_mut((viewport.x + col, viewport.y + row)),
            ) else {
                continue;
            };
            *out = src.clone();
        }
    }
}

/// Translate a screen-space mouse event inside `viewport` to content space.
pub fn to_content(mut event: MouseEvent, viewport: Rect, offset: u16) -> MouseEvent {
    event.column = event.column.saturating_sub(viewport.x);
    event.row = event.row.saturating_sub(viewport.y) + offset;
    event
}

/// Where `section` (content space) lands on screen, clipped to the viewport.
pub fn project(section: Rect, viewport: Rect, offset: u16) -> Rect {
    let top = section.y.max(offset);
    let bottom = (section.y + section.height).min(offset + viewport.height);
    if bottom <= top {
        return Rect::default();
    }
    Rect::new(
        viewport.x + section.x,
        viewport.y + (top - offset),
        section.width.min(viewport.width),
        bottom - top,
    )
}
