use egui::{Align2, Color32, FontId, Id, Rect, Response, Sense, Stroke, Ui, Vec2};

use crate::tier::PlacedItem;

pub const TILE_SIZE: Vec2 = Vec2::new(80.0, 120.0);
const REMOVE_BUTTON_SIZE: f32 = 18.0;

/// What happened to a tile this frame
pub struct TileResponse {
    pub response: Response,
    pub remove_clicked: bool,
}

/// A placed movie on the board: poster (or title fallback) with a remove
/// button in the corner
pub struct MovieTile<'a> {
    placed: &'a PlacedItem,
    selected: bool,
    dimmed: bool,
}

impl<'a> MovieTile<'a> {
    pub fn new(placed: &'a PlacedItem) -> Self {
        Self {
            placed,
            selected: false,
            dimmed: false,
        }
    }

    /// Armed for click placement
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Being dragged; the floating preview stands in for it
    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    pub fn show(self, ui: &mut Ui) -> TileResponse {
        let id = Id::new(("tile", self.placed.placement_id.as_str()));
        let (rect, _) = ui.allocate_exact_size(TILE_SIZE, Sense::hover());
        let response = ui
            .interact(rect, id, Sense::click_and_drag())
            .on_hover_text(format!("{} ({})", self.placed.item.title, self.placed.item.year()));

        if ui.is_rect_visible(rect) {
            let opacity = if self.dimmed { 0.4 } else { 1.0 };
            paint_poster(
                ui,
                rect,
                &self.placed.item.title,
                self.placed.item.poster_url(),
                opacity,
            );
            if self.selected {
                ui.painter()
                    .rect_stroke(rect, 4.0, Stroke::new(3.0, Color32::from_rgb(100, 181, 246)));
            } else if response.hovered() {
                ui.painter().rect_stroke(rect, 4.0, Stroke::new(1.0, Color32::from_gray(200)));
            }
        }

        // Painted after the tile so it sits on top in hit testing
        let mut remove_clicked = false;
        if response.hovered() || ui.rect_contains_pointer(remove_rect(rect)) {
            let button_rect = remove_rect(rect);
            let button = ui
                .interact(button_rect, id.with("remove"), Sense::click())
                .on_hover_text("Remove");
            let fill = if button.hovered() {
                Color32::from_rgb(220, 60, 60)
            } else {
                Color32::from_black_alpha(180)
            };
            ui.painter().circle_filled(button_rect.center(), REMOVE_BUTTON_SIZE / 2.0, fill);
            ui.painter().text(
                button_rect.center(),
                Align2::CENTER_CENTER,
                "×",
                FontId::proportional(14.0),
                Color32::WHITE,
            );
            remove_clicked = button.clicked();
        }

        TileResponse {
            response,
            remove_clicked,
        }
    }
}

fn remove_rect(tile: Rect) -> Rect {
    Rect::from_min_size(
        tile.right_top() + Vec2::new(-REMOVE_BUTTON_SIZE - 2.0, 2.0),
        Vec2::splat(REMOVE_BUTTON_SIZE),
    )
}

/// Poster image, or a dark card with the title when there is none
pub fn paint_poster(ui: &Ui, rect: Rect, title: &str, poster_url: Option<String>, opacity: f32) {
    match poster_url {
        Some(url) => {
            egui::Image::new(url)
                .rounding(4.0)
                .tint(Color32::WHITE.gamma_multiply(opacity))
                .paint_at(ui, rect);
        }
        None => {
            ui.painter()
                .rect_filled(rect, 4.0, Color32::from_gray(45).gamma_multiply(opacity));
            let galley = ui.painter().layout(
                title.to_owned(),
                FontId::proportional(11.0),
                Color32::from_gray(220).gamma_multiply(opacity),
                rect.width() - 8.0,
            );
            let pos = rect.center() - galley.size() / 2.0;
            ui.painter().galley(pos, galley, Color32::WHITE);
        }
    }
}
