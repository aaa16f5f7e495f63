use egui::{Id, LayerId, Order, Rect, Vec2};

use super::movie_tile::{paint_poster, TILE_SIZE};
use crate::input::DragPreview;

/// Paint the dragged movie under the pointer, above every panel
pub fn show_drag_overlay(ctx: &egui::Context, preview: &DragPreview) {
    let Some(pointer) = ctx.pointer_latest_pos() else {
        return;
    };
    ctx.set_cursor_icon(egui::CursorIcon::Grabbing);

    let layer = LayerId::new(Order::Tooltip, Id::new("drag_overlay"));
    let rect = Rect::from_center_size(pointer + Vec2::new(0.0, TILE_SIZE.y / 4.0), TILE_SIZE);
    let ui = egui::Ui::new(
        ctx.clone(),
        Id::new("drag_overlay_ui"),
        egui::UiBuilder::new().layer_id(layer).max_rect(rect),
    );
    paint_poster(&ui, rect, &preview.title, preview.poster_url.clone(), 0.85);
}
