mod persistence;
mod preferences;

pub use persistence::{
    load_collection,
    save_collection,
    KeyValueStore,
    LocalStore,
    MemoryStore,
    PersistenceError,
    PersistenceResult,
    SessionPolicy,
};
pub use preferences::{
    clamp_title,
    Preferences,
    WidthBounds,
    API_KEY_KEY,
    DEFAULT_TITLE,
    MAX_TITLE_CHARS,
    SIDEBAR_WIDTH_KEY,
    TITLE_KEY,
};
