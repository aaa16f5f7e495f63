use super::KeyValueStore;

pub const TITLE_KEY: &str = "tier-list-title";
pub const SIDEBAR_WIDTH_KEY: &str = "sidebar-width";
pub const API_KEY_KEY: &str = "tmdb-api-key";

pub const DEFAULT_TITLE: &str = "My Movie Tier List";
/// Longest title the editor accepts, in characters
pub const MAX_TITLE_CHARS: usize = 40;

/// Allowed sidebar widths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthBounds {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl Default for WidthBounds {
    fn default() -> Self {
        Self {
            min: 220.0,
            max: 520.0,
            default: 300.0,
        }
    }
}

impl WidthBounds {
    /// Parse a stored width, clamping into range. Garbage yields the default.
    pub fn from_stored(&self, stored: Option<&str>) -> f32 {
        stored
            .and_then(|s| s.trim().parse::<f32>().ok())
            .filter(|w| w.is_finite())
            .map_or(self.default, |w| w.clamp(self.min, self.max))
    }
}

/// User preferences stored next to, but separate from, the board snapshot
pub struct Preferences {
    store: Box<dyn KeyValueStore>,
    title: String,
    sidebar_width: f32,
    api_key: String,
    bounds: WidthBounds,
}

impl Preferences {
    /// Load every preference, falling back to defaults on read errors.
    /// `default_api_key` is used when no key has been stored yet.
    pub fn load(store: Box<dyn KeyValueStore>, bounds: WidthBounds, default_api_key: &str) -> Self {
        let read = |key: &str| match store.get(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to read preference {key}: {err}");
                None
            }
        };

        let title = read(TITLE_KEY)
            .map(|t| clamp_title(&t))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_owned());
        let sidebar_width = bounds.from_stored(read(SIDEBAR_WIDTH_KEY).as_deref());
        let api_key = read(API_KEY_KEY)
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| default_api_key.trim().to_owned());

        Self {
            store,
            title,
            sidebar_width,
            api_key,
            bounds,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sidebar_width(&self) -> f32 {
        self.sidebar_width
    }

    pub fn bounds(&self) -> WidthBounds {
        self.bounds
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn set_title(&mut self, title: &str) {
        let title = clamp_title(title);
        if title.is_empty() || title == self.title {
            return;
        }
        self.write(TITLE_KEY, &title);
        self.title = title;
    }

    /// Returns the clamped width actually stored
    pub fn set_sidebar_width(&mut self, width: f32) -> f32 {
        let width = width.clamp(self.bounds.min, self.bounds.max).round();
        if width != self.sidebar_width {
            self.sidebar_width = width;
            self.write(SIDEBAR_WIDTH_KEY, &width.to_string());
        }
        width
    }

    pub fn set_api_key(&mut self, key: &str) {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        self.api_key = key.to_owned();
        self.write(API_KEY_KEY, key);
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            log::warn!("Failed to store preference {key}: {err}");
        }
    }
}

/// Trim and cut to [`MAX_TITLE_CHARS`]
pub fn clamp_title(title: &str) -> String {
    title.trim().chars().take(MAX_TITLE_CHARS).collect::<String>().trim_end().to_owned()
}
