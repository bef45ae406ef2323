use lightbox_core::page::{ImageId, PageImage};

use crate::app::LightboxApp;
use crate::panels::{draw_texture, fit_size};

const TILE_SIZE: f32 = 180.0;
const LABEL_HEIGHT: f32 = 28.0;
const LABEL_MAX_CHARS: usize = 26;
const BROKEN_BORDER: egui::Color32 = egui::Color32::from_rgb(220, 50, 50);

pub fn show(ctx: &egui::Context, app: &mut LightboxApp) {
    let mut clicked: Option<ImageId> = None;

    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(ref page) = app.gallery.page else {
            show_placeholder(ui, "Open a page to begin");
            return;
        };
        let images = page.images();
        if images.is_empty() {
            show_placeholder(ui, "This page has no images");
            return;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .enable_scrolling(!app.viewer.scroll_lock().is_locked())
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for image in images {
                        let texture = app.gallery.texture(image.id);
                        let clickable = app.viewer.is_clickable(image.id);
                        if draw_tile(ui, image, texture, clickable) {
                            clicked = Some(image.id);
                        }
                    }
                });
            });
    });

    if let Some(id) = clicked {
        app.open_image(id);
    }
}

/// Draw one thumbnail. Returns true when a clickable tile was clicked.
fn draw_tile(
    ui: &mut egui::Ui,
    image: &PageImage,
    texture: Option<&egui::TextureHandle>,
    clickable: bool,
) -> bool {
    let sense = if clickable {
        egui::Sense::click()
    } else {
        egui::Sense::hover()
    };
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(TILE_SIZE, TILE_SIZE + LABEL_HEIGHT), sense);
    let thumb_rect = egui::Rect::from_min_size(rect.min, egui::vec2(TILE_SIZE, TILE_SIZE));

    ui.painter()
        .rect_filled(thumb_rect, 4.0, egui::Color32::from_gray(40));

    match texture {
        Some(tex) => {
            let size = fit_size(tex.size_vec2(), thumb_rect.shrink(6.0).size());
            draw_texture(ui, tex.id(), egui::Rect::from_center_size(thumb_rect.center(), size));
        }
        None => {
            ui.painter().text(
                thumb_rect.center(),
                egui::Align2::CENTER_CENTER,
                truncate(&image.alt, LABEL_MAX_CHARS),
                egui::FontId::proportional(12.0),
                egui::Color32::from_gray(150),
            );
        }
    }

    if image.broken {
        ui.painter().rect_stroke(
            thumb_rect,
            4.0,
            egui::Stroke::new(2.0, BROKEN_BORDER),
            egui::epaint::StrokeKind::Inside,
        );
    } else if clickable && response.hovered() {
        ui.painter().rect_stroke(
            thumb_rect,
            4.0,
            egui::Stroke::new(1.5, egui::Color32::from_gray(200)),
            egui::epaint::StrokeKind::Inside,
        );
    }

    let label = image.caption.as_deref().unwrap_or(&image.alt);
    ui.painter().text(
        egui::pos2(thumb_rect.center().x, thumb_rect.bottom() + 4.0),
        egui::Align2::CENTER_TOP,
        truncate(label, LABEL_MAX_CHARS),
        egui::FontId::proportional(12.0),
        egui::Color32::from_gray(180),
    );

    let was_clicked = clickable && response.clicked();
    let response = if clickable {
        response.on_hover_cursor(egui::CursorIcon::ZoomIn)
    } else {
        response
    };
    response.on_hover_text(image.src.as_str());
    was_clicked
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{head}\u{2026}")
}

fn show_placeholder(ui: &mut egui::Ui, text: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
