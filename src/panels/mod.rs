mod header;
mod search_panel;
mod tier_panel;

pub use header::header;
pub use search_panel::search_panel;
pub use tier_panel::tier_panel;
