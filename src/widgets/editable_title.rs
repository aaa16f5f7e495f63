use egui::{Key, RichText, Sense, Ui};

use crate::state::{clamp_title, MAX_TITLE_CHARS};

/// Click-to-edit heading. Enter or losing focus commits, Escape reverts, and
/// a blank commit keeps the previous title.
#[derive(Debug, Default)]
pub struct TitleEditor {
    buffer: Option<String>,
    focus_requested: bool,
}

impl TitleEditor {
    pub fn is_editing(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn begin(&mut self, current: &str) {
        self.buffer = Some(current.to_owned());
        self.focus_requested = false;
    }

    /// Replace the text being edited, cut to the character limit
    pub fn set_text(&mut self, text: &str) {
        if let Some(buffer) = &mut self.buffer {
            *buffer = text.chars().take(MAX_TITLE_CHARS).collect();
        }
    }

    /// Leave edit mode. Returns the new title unless it came out blank.
    pub fn commit(&mut self) -> Option<String> {
        let title = clamp_title(&self.buffer.take()?);
        (!title.is_empty()).then_some(title)
    }

    pub fn cancel(&mut self) {
        self.buffer = None;
    }

    /// Show the heading; returns a committed title
    pub fn show(&mut self, ui: &mut Ui, current: &str) -> Option<String> {
        let Some(buffer) = &mut self.buffer else {
            let response = ui
                .add(egui::Label::new(RichText::new(current).heading().strong()).sense(Sense::click()))
                .on_hover_text(format!("Click to edit (max {MAX_TITLE_CHARS} characters)"));
            if response.clicked() {
                self.begin(current);
            }
            return None;
        };

        let response = ui.add(
            egui::TextEdit::singleline(buffer)
                .char_limit(MAX_TITLE_CHARS)
                .font(egui::TextStyle::Heading)
                .desired_width(360.0),
        );
        if !self.focus_requested {
            response.request_focus();
            self.focus_requested = true;
        }

        if ui.input(|i| i.key_pressed(Key::Escape)) {
            self.cancel();
            None
        } else if response.lost_focus() {
            self.commit()
        } else {
            None
        }
    }
}
