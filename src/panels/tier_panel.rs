use egui::{Align2, Color32, FontId, Id, Rect, RichText, Sense, Stroke, Ui, UiBuilder, Vec2};

use crate::app::TierListApp;
use crate::geometry::DropZones;
use crate::input::{DragSource, InputCoordinator, InputEvent};
use crate::tier::{Container, ContainerId, PlacementId, Target};
use crate::widgets::{MovieTile, TILE_SIZE};

const LABEL_WIDTH: f32 = 96.0;
const TILE_GAP: f32 = 6.0;
const ROW_PADDING: f32 = 6.0;
const HIGHLIGHT: Color32 = Color32::from_rgb(100, 181, 246);

/// Per-frame borrows a container row needs from the app
struct RowContext<'a> {
    zones: &'a mut DropZones,
    events: &'a mut Vec<InputEvent>,
    coordinator: &'a InputCoordinator,
    hovered: Option<&'a ContainerId>,
    removed: Option<PlacementId>,
}

pub fn tier_panel(app: &mut TierListApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let mut reset = false;
        ui.horizontal(|ui| {
            ui.heading("Tier List");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let has_items = app.engine.collection().item_count() > 0;
                if ui
                    .add_enabled(has_items, egui::Button::new("Reset All"))
                    .on_hover_text("Move every movie off the board")
                    .clicked()
                {
                    reset = true;
                }
            });
        });
        ui.separator();

        let mut board = None;
        let mut removed = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let top = ui.cursor().min;
                if let Some(title) = app.title_editor.show(ui, app.preferences.title()) {
                    app.preferences.set_title(&title);
                }
                ui.add_space(8.0);

                let mut rows = RowContext {
                    zones: &mut app.zones,
                    events: &mut app.events,
                    coordinator: &app.coordinator,
                    hovered: app.hovered_container.as_ref(),
                    removed: None,
                };
                let collection = app.engine.collection();
                for tier in collection.tiers() {
                    tier_row(ui, &mut rows, tier);
                    ui.add_space(2.0);
                }
                let bottom = ui.cursor().min.y;
                board = Some(Rect::from_min_max(top, egui::pos2(top.x + ui.available_width(), bottom)));

                ui.add_space(16.0);
                if let Some(unranked) = collection.unranked() {
                    unranked_zone(ui, &mut rows, unranked);
                }
                removed = rows.removed.take();
            });

        app.board_rect = board;
        if let Some(placement_id) = removed {
            app.remove(&placement_id);
        }
        if reset {
            app.reset();
        }
    });
}

fn tier_row(ui: &mut Ui, rows: &mut RowContext<'_>, tier: &Container) {
    let width = ui.available_width();
    let items_width = width - LABEL_WIDTH;
    let height = row_height(items_width, tier.len());
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, height), Sense::hover());

    let label_rect = Rect::from_min_size(rect.min, Vec2::new(LABEL_WIDTH, height));
    let items_rect = Rect::from_min_max(egui::pos2(label_rect.max.x, rect.min.y), rect.max);

    surface(ui, rows, tier, rect);
    ui.painter().rect_filled(items_rect, 0.0, Color32::from_gray(26));
    ui.painter().rect_filled(label_rect, 0.0, tier.color32());
    ui.painter().text(
        label_rect.center(),
        Align2::CENTER_CENTER,
        &tier.label,
        FontId::proportional(22.0),
        tier.label_text_color(),
    );

    if tier.is_empty() && rows.coordinator.state().is_pending_click() {
        ui.painter().text(
            items_rect.center(),
            Align2::CENTER_CENTER,
            "Click to place here",
            FontId::proportional(13.0),
            Color32::from_gray(140),
        );
    }

    tiles(ui, rows, tier, items_rect);
    outline(ui, rows, tier, rect);
}

fn unranked_zone(ui: &mut Ui, rows: &mut RowContext<'_>, unranked: &Container) {
    ui.label(RichText::new(format!("{} ({})", unranked.label, unranked.len())).strong());
    let width = ui.available_width();
    let height = row_height(width, unranked.len());
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, height), Sense::hover());

    surface(ui, rows, unranked, rect);
    ui.painter().rect_filled(rect, 6.0, unranked.color32());

    if unranked.is_empty() {
        let hint = if rows.coordinator.state().is_pending_click() {
            "Click to place here"
        } else {
            "Drop movies here"
        };
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            hint,
            FontId::proportional(14.0),
            Color32::from_gray(150),
        );
    }

    tiles(ui, rows, unranked, rect);
    outline(ui, rows, unranked, rect);
}

/// The clickable container surface. Registered before the tiles so the tiles
/// stay on top for clicks and drags.
fn surface(ui: &mut Ui, rows: &mut RowContext<'_>, container: &Container, rect: Rect) {
    rows.zones.register_container(rect, container.id.clone());
    let mut response = ui.interact(rect, Id::new(("container", container.id.as_str())), Sense::click());
    if rows.coordinator.state().is_pending_click() {
        response = response.on_hover_text("Click to place here");
    }
    if response.clicked() {
        rows.events
            .push(InputEvent::TargetClicked(Target::Container(container.id.clone())));
    }
}

fn tiles(ui: &mut Ui, rows: &mut RowContext<'_>, container: &Container, area: Rect) {
    let per_row = tiles_per_row(area.width());
    for (index, placed) in container.items.iter().enumerate() {
        let (row, column) = (index / per_row, index % per_row);
        let min = area.min
            + Vec2::splat(ROW_PADDING)
            + Vec2::new(
                column as f32 * (TILE_SIZE.x + TILE_GAP),
                row as f32 * (TILE_SIZE.y + TILE_GAP),
            );
        let tile_rect = Rect::from_min_size(min, TILE_SIZE);
        rows.zones.register_item(tile_rect, placed.placement_id.clone());

        let source = DragSource::Placed(placed.placement_id.clone());
        let dragging = rows.coordinator.drag_origin() == Some(&source);
        let mut tile_ui = ui.new_child(UiBuilder::new().max_rect(tile_rect));
        let tile = MovieTile::new(placed)
            .selected(rows.coordinator.is_selected(&source))
            .dimmed(dragging)
            .show(&mut tile_ui);

        if tile.remove_clicked {
            rows.removed = Some(placed.placement_id.clone());
        } else if tile.response.drag_started() {
            rows.events.push(InputEvent::DragStarted(source));
        } else if tile.response.clicked() {
            rows.events.push(InputEvent::SourceClicked(source));
        }
    }
}

fn outline(ui: &Ui, rows: &RowContext<'_>, container: &Container, rect: Rect) {
    let drop_target = rows.hovered == Some(&container.id);
    let click_target = rows.coordinator.state().is_pending_click() && ui.rect_contains_pointer(rect);
    if drop_target || click_target {
        ui.painter().rect_stroke(rect, 4.0, Stroke::new(2.0, HIGHLIGHT));
    }
}

fn tiles_per_row(width: f32) -> usize {
    let usable = (width - 2.0 * ROW_PADDING + TILE_GAP).max(0.0);
    ((usable / (TILE_SIZE.x + TILE_GAP)).floor() as usize).max(1)
}

fn row_height(width: f32, count: usize) -> f32 {
    let lines = count.div_ceil(tiles_per_row(width)).max(1);
    lines as f32 * (TILE_SIZE.y + TILE_GAP) - TILE_GAP + 2.0 * ROW_PADDING
}
