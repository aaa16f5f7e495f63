//! Turning a viewport screenshot into a downloadable PNG of the tier board.

use std::io::Cursor;

use egui::{Color32, ColorImage, Rect};

use crate::error::{ExportError, ExportResult};

/// Lowercase ASCII slug of `title`; "tier-list" when nothing survives
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "tier-list".to_owned()
    } else {
        slug.to_owned()
    }
}

/// `"{slug}-{stamp}.png"`
pub fn export_file_name(title: &str, stamp: &str) -> String {
    format!("{}-{stamp}.png", slugify(title))
}

/// Cut `region` (in points) out of a full-viewport screenshot. The region is
/// clipped to the screenshot; nothing left means the board was off screen.
pub fn crop(screenshot: &ColorImage, region: Rect, pixels_per_point: f32) -> ExportResult<ColorImage> {
    let [width, height] = screenshot.size;
    let to_px = |v: f32, limit: usize| ((v * pixels_per_point).round().max(0.0) as usize).min(limit);
    let (min_x, max_x) = (to_px(region.min.x, width), to_px(region.max.x, width));
    let (min_y, max_y) = (to_px(region.min.y, height), to_px(region.max.y, height));
    if min_x >= max_x || min_y >= max_y {
        return Err(ExportError::EmptyCapture);
    }

    let mut pixels: Vec<Color32> = Vec::with_capacity((max_x - min_x) * (max_y - min_y));
    for row in min_y..max_y {
        let start = row * width;
        pixels.extend_from_slice(&screenshot.pixels[start + min_x..start + max_x]);
    }
    Ok(ColorImage {
        size: [max_x - min_x, max_y - min_y],
        pixels,
    })
}

pub fn encode_png(image: &ColorImage) -> ExportResult<Vec<u8>> {
    let [width, height] = image.size;
    let raw: Vec<u8> = image.pixels.iter().flat_map(|c| c.to_array()).collect();
    let buffer = image::RgbaImage::from_raw(width as u32, height as u32, raw)
        .ok_or(ExportError::EmptyCapture)?;

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// Save into the user's download directory. Returns where the file went.
#[cfg(not(target_arch = "wasm32"))]
pub fn offer_download(file_name: &str, bytes: &[u8]) -> ExportResult<String> {
    let dir = dirs::download_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)?;
    Ok(path.display().to_string())
}

/// Hand the PNG to the browser as a blob download
#[cfg(target_arch = "wasm32")]
pub fn offer_download(file_name: &str, bytes: &[u8]) -> ExportResult<String> {
    use wasm_bindgen::JsCast as _;

    let platform = |e: wasm_bindgen::JsValue| ExportError::Platform(format!("{e:?}"));

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(platform)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(platform)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExportError::Platform("no document".to_owned()))?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(platform)?
        .dyn_into()
        .map_err(|_| ExportError::Platform("anchor element".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url).map_err(platform)?;

    Ok(file_name.to_owned())
}

/// Crop, encode and offer the board as `file_name`
pub fn export_board(
    screenshot: &ColorImage,
    board: Rect,
    pixels_per_point: f32,
    file_name: &str,
) -> ExportResult<String> {
    let image = crop(screenshot, board, pixels_per_point)?;
    let bytes = encode_png(&image)?;
    offer_download(file_name, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs() {
        assert_eq!(slugify("My Movie Tier List"), "my-movie-tier-list");
        assert_eq!(slugify("  90's -- Horror!! "), "90-s-horror");
        assert_eq!(slugify("日本映画"), "tier-list");
        assert_eq!(
            export_file_name("Best of 2024", "20250101-120000"),
            "best-of-2024-20250101-120000.png"
        );
    }
}
