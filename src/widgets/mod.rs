pub mod api_key_modal;
pub mod drag_overlay;
pub mod editable_title;
pub mod movie_tile;
pub mod search_result;

pub use api_key_modal::{ApiKeyModal, ModalAction};
pub use drag_overlay::show_drag_overlay;
pub use editable_title::TitleEditor;
pub use movie_tile::{MovieTile, TileResponse, TILE_SIZE};
pub use search_result::SearchResultRow;
