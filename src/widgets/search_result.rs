use std::collections::HashMap;

use egui::{Color32, Id, Response, RichText, Sense, Stroke, Ui, Vec2};

use super::movie_tile::paint_poster;
use crate::catalog::{format_runtime, CatalogItem};

const THUMB_SIZE: Vec2 = Vec2::new(46.0, 69.0);
const ROW_HEIGHT: f32 = 77.0;

/// One row of the search result list. Draggable onto a tier, or clickable to
/// arm click placement.
pub struct SearchResultRow<'a> {
    item: &'a CatalogItem,
    genres: &'a HashMap<u64, String>,
    runtime: Option<u32>,
    selected: bool,
}

impl<'a> SearchResultRow<'a> {
    pub fn new(item: &'a CatalogItem, genres: &'a HashMap<u64, String>) -> Self {
        Self {
            item,
            genres,
            runtime: None,
            selected: false,
        }
    }

    pub fn runtime(mut self, runtime: Option<u32>) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn show(self, ui: &mut Ui) -> Response {
        let width = ui.available_width();
        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, ROW_HEIGHT), Sense::hover());
        let hint = if self.selected {
            format!("Click a tier to place {}", self.item.title)
        } else {
            format!("Click to select or drag {} to a tier", self.item.title)
        };
        let response = ui
            .interact(rect, Id::new(("search", self.item.id)), Sense::click_and_drag())
            .on_hover_text(hint);

        if !ui.is_rect_visible(rect) {
            return response;
        }

        let fill = if self.selected {
            Color32::from_rgb(30, 60, 90)
        } else if response.hovered() {
            Color32::from_gray(40)
        } else {
            Color32::TRANSPARENT
        };
        ui.painter().rect_filled(rect, 4.0, fill);
        if self.selected {
            ui.painter()
                .rect_stroke(rect, 4.0, Stroke::new(2.0, Color32::from_rgb(100, 181, 246)));
        }

        let thumb = egui::Rect::from_min_size(rect.min + Vec2::splat(4.0), THUMB_SIZE);
        paint_poster(ui, thumb, &self.item.title, self.item.poster_url(), 1.0);

        let text_rect = egui::Rect::from_min_max(
            egui::pos2(thumb.max.x + 8.0, rect.min.y + 4.0),
            rect.max - Vec2::splat(4.0),
        );
        let mut text_ui = ui.new_child(egui::UiBuilder::new().max_rect(text_rect));
        text_ui.add(egui::Label::new(RichText::new(&self.item.title).strong()).truncate());
        text_ui.label(RichText::new(self.item.year()).weak());

        let mut extras = Vec::new();
        if let Some(rating) = self.item.rating_label() {
            extras.push(rating);
        }
        let genres = self.item.genre_label(self.genres);
        if !genres.is_empty() {
            extras.push(genres);
        }
        if let Some(runtime) = self.runtime {
            extras.push(format_runtime(runtime));
        }
        if !extras.is_empty() {
            text_ui.add(egui::Label::new(RichText::new(extras.join("  ")).small()).truncate());
        }

        response
    }
}
