use egui::{Align2, Key, RichText};

pub enum ModalAction {
    None,
    Submit(String),
    Close,
}

/// Prompt for a TMDB v3 API key
#[derive(Debug, Default)]
pub struct ApiKeyModal {
    input: String,
}

impl ApiKeyModal {
    pub fn show(&mut self, ctx: &egui::Context) -> ModalAction {
        let mut action = ModalAction::None;
        let mut open = true;

        egui::Window::new("TMDB API Key Required")
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.set_max_width(420.0);
                ui.label(
                    "This app uses The Movie Database (TMDB) to search for movies and fetch \
                     poster art. You need a free API key to continue.",
                );
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label("1. Create a free account at");
                    ui.hyperlink_to("themoviedb.org", "https://www.themoviedb.org/signup");
                });
                ui.label("2. Go to Settings → API and request a key (choose \"Developer\")");
                ui.label(RichText::new("3. Copy your API Key (v3 auth) and paste it below"));
                ui.add_space(6.0);

                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.input)
                        .hint_text("Paste your TMDB API key here")
                        .desired_width(f32::INFINITY),
                );
                let key = self.input.trim();
                let entered = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                let saved = ui
                    .add_enabled(!key.is_empty(), egui::Button::new("Save & Continue"))
                    .clicked();
                if (entered || saved) && !key.is_empty() {
                    action = ModalAction::Submit(key.to_owned());
                }
            });

        if !open {
            action = ModalAction::Close;
        }
        if matches!(action, ModalAction::Submit(_)) {
            self.input.clear();
        }
        action
    }
}
