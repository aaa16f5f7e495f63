use egui::{Layout, RichText};

use crate::app::TierListApp;

pub fn header(app: &mut TierListApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("🎬 Movie Tier List").strong());
            ui.separator();
            if let Some(status) = &app.status {
                ui.label(RichText::new(status).weak());
            }

            ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                let exporting = app.export_pending;
                let export = ui
                    .add_enabled(!exporting, egui::Button::new("📷 Export PNG"))
                    .on_hover_text("Save the tier list as an image");
                if export.clicked() {
                    app.request_export(ctx);
                }
                if ui.button("🔑 Change API Key").clicked() {
                    app.show_api_key_modal = true;
                }
            });
        });
    });
}
