use egui::{Color32, RichText};

use crate::app::TierListApp;
use crate::input::{DragSource, InputEvent};
use crate::tier::DuplicatePolicy;
use crate::widgets::SearchResultRow;

const WARNING: Color32 = Color32::from_rgb(255, 193, 7);

pub fn search_panel(app: &mut TierListApp, ctx: &egui::Context) {
    let bounds = app.preferences.bounds();
    let panel = egui::SidePanel::left("search_panel")
        .resizable(true)
        .default_width(app.preferences.sidebar_width())
        .width_range(bounds.min..=bounds.max)
        .show(ctx, |ui| {
            ui.heading("Search Movies");
            ui.add_space(4.0);

            if !app.catalog.has_api_key() {
                ui.colored_label(WARNING, "⚠ A TMDB API key is required to search.");
                if ui.button("Enter API Key").clicked() {
                    app.show_api_key_modal = true;
                }
                return;
            }

            let response = ui.add(
                egui::TextEdit::singleline(&mut app.search_input)
                    .hint_text("Search for movies...")
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                let now = ctx.input(|i| i.time);
                app.catalog.set_query(&app.search_input, now);
            }

            if app.coordinator.state().is_pending_click() {
                ui.label(
                    RichText::new("Click a tier to place the selected movie, or click it again to cancel")
                        .small()
                        .color(Color32::from_rgb(100, 181, 246)),
                );
            }
            ui.separator();

            let controller = app.catalog.controller();
            if controller.is_loading() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Searching...");
                });
            }
            if let Some(error) = controller.error() {
                ui.colored_label(Color32::LIGHT_RED, error);
            } else if controller.results().is_empty()
                && !controller.query().trim().is_empty()
                && !controller.is_loading()
            {
                ui.label(RichText::new("No movies found").weak());
            }

            let hide_placed = app.engine.duplicate_policy() == DuplicatePolicy::Reject;
            let lookups = app.catalog.lookups();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for item in controller.results() {
                        if hide_placed && app.engine.contains_catalog_id(item.id) {
                            continue;
                        }
                        let source = DragSource::Search(item.clone());
                        let response = SearchResultRow::new(item, lookups.genres())
                            .runtime(lookups.runtime(item.id))
                            .selected(app.coordinator.is_selected(&source))
                            .show(ui);

                        if response.drag_started() {
                            app.events.push(InputEvent::DragStarted(source));
                        } else if response.clicked() {
                            app.events.push(InputEvent::SourceClicked(source));
                        }
                    }
                });
        });

    // Persist once the user lets go of the resize handle
    let width = panel.response.rect.width();
    let resizing = ctx.input(|i| i.pointer.any_down());
    if !resizing && (width - app.preferences.sidebar_width()).abs() > 0.5 {
        let stored = app.preferences.set_sidebar_width(width);
        log::debug!("Sidebar width stored as {stored}");
    }
}
