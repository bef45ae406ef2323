pub mod gallery;
pub mod lightbox;
pub mod menu_bar;
pub mod status;

/// Largest rect with the texture's aspect ratio that fits in `bounds`.
pub(crate) fn fit_size(texture_size: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    if texture_size.x <= 0.0 || texture_size.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (bounds.x / texture_size.x).min(bounds.y / texture_size.y);
    texture_size * scale
}

pub(crate) fn draw_texture(ui: &egui::Ui, texture_id: egui::TextureId, rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}
