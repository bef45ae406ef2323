use std::path::Path;

use image::DynamicImage;

/// Larger images are downscaled before upload to the GPU.
const MAX_TEXTURE_SIDE: u32 = 2048;

/// Decode an image file into an egui ColorImage.
pub fn load_color_image(path: &Path) -> Result<egui::ColorImage, image::ImageError> {
    let img = image::open(path)?;
    Ok(to_color_image(&img))
}

/// Convert a decoded image to an egui ColorImage, downscaling oversized ones.
pub fn to_color_image(img: &DynamicImage) -> egui::ColorImage {
    let rgba = if img.width() > MAX_TEXTURE_SIDE || img.height() > MAX_TEXTURE_SIDE {
        img.thumbnail(MAX_TEXTURE_SIDE, MAX_TEXTURE_SIDE).to_rgba8()
    } else {
        img.to_rgba8()
    };
    let (w, h) = rgba.dimensions();
    let pixels = rgba
        .pixels()
        .map(|p| egui::Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
        .collect();

    egui::ColorImage {
        size: [w as usize, h as usize],
        pixels,
        source_size: Default::default(),
    }
}
