use std::time::{Duration, Instant};

use lightbox_core::geometry::Point;
use lightbox_core::viewer::{Key, ViewerEvent};

use crate::app::LightboxApp;
use crate::panels::{draw_texture, fit_size};

const BACKDROP: egui::Color32 = egui::Color32::from_black_alpha(230);
/// Unzoomed image size as a fraction of the window.
const IMAGE_FILL: f32 = 0.9;
const MISSING_SIZE: egui::Vec2 = egui::vec2(320.0, 200.0);
const INSTRUCTIONS: &str =
    "Scroll to zoom \u{b7} Drag to pan when zoomed \u{b7} Double-click to reset \u{b7} Esc to close";

/// Full-window overlay showing the open image.
pub fn show(ctx: &egui::Context, app: &mut LightboxApp) {
    if !app.viewer.state().is_open() {
        return;
    }
    let screen = ctx.screen_rect();

    egui::Area::new(egui::Id::new("lightbox_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let center = screen.center();
            let backdrop = ui.allocate_rect(screen, egui::Sense::click());
            ui.painter().rect_filled(screen, 0.0, BACKDROP);

            let texture = app
                .gallery
                .open_image
                .and_then(|id| app.gallery.texture(id))
                .map(|tex| (tex.id(), tex.size_vec2()));
            let base_size = match texture {
                Some((_, size)) => fit_size(size, screen.size() * IMAGE_FILL),
                None => MISSING_SIZE,
            };

            let state = app.viewer.state();
            let img_rect = image_rect(center, base_size, state.scale(), state.pan());
            let image = ui.interact(
                img_rect,
                ui.id().with("lightbox_image"),
                egui::Sense::click_and_drag(),
            );

            let close_rect = egui::Rect::from_min_size(
                egui::pos2(screen.right() - 48.0, screen.top() + 12.0),
                egui::vec2(36.0, 36.0),
            );
            let close = ui.put(
                close_rect,
                egui::Button::new(egui::RichText::new("\u{2715}").size(20.0)).frame(false),
            );

            for event in collect_events(ui, &backdrop, &image, &close, center) {
                app.viewer.handle(event);
            }
            if !app.viewer.state().is_open() {
                return;
            }

            let state = app.viewer.state();
            let img_rect = image_rect(center, base_size, state.scale(), state.pan());
            match texture {
                Some((texture_id, _)) => draw_texture(ui, texture_id, img_rect),
                None => draw_missing(ui, img_rect, state.image().map(|i| i.alt_text()).unwrap_or_default()),
            }

            if let Some(caption) = state.image().map(|i| i.caption_text()) {
                draw_caption(ui, screen, caption);
            }

            if state.is_panning() {
                ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
            } else if state.is_zoomed() && image.hovered() {
                ctx.set_cursor_icon(egui::CursorIcon::Grab);
            }

            if app.viewer.instructions_visible_at(Instant::now()) {
                draw_instructions(ui, screen);
                ctx.request_repaint_after(Duration::from_millis(200));
            }
        });
}

/// Where the image sits for the given zoom and pan. Pan is measured from the
/// window center.
fn image_rect(center: egui::Pos2, base_size: egui::Vec2, scale: f32, pan: Point) -> egui::Rect {
    egui::Rect::from_center_size(center + egui::vec2(pan.x, pan.y), base_size * scale)
}

/// Translate this frame's input into viewer events, in dispatch order.
fn collect_events(
    ui: &egui::Ui,
    backdrop: &egui::Response,
    image: &egui::Response,
    close: &egui::Response,
    center: egui::Pos2,
) -> Vec<ViewerEvent> {
    let to_point = |p: egui::Pos2| Point::new(p.x - center.x, p.y - center.y);
    let mut events = Vec::new();

    if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
        events.push(ViewerEvent::Key(Key::Escape));
    }
    if close.clicked() {
        events.push(ViewerEvent::CloseButton);
    }
    if backdrop.clicked() {
        events.push(ViewerEvent::Backdrop);
    }

    if image.double_clicked() {
        events.push(ViewerEvent::DoubleClick);
    } else if image.clicked() {
        events.push(ViewerEvent::ImageClick);
    }

    // One wheel notch per frame; positive egui scroll is "up", which zooms in.
    let (scroll, hover) = ui.input(|i| (i.raw_scroll_delta.y, i.pointer.hover_pos()));
    if scroll != 0.0 {
        if let Some(pos) = hover {
            events.push(ViewerEvent::Wheel {
                delta: -scroll.signum(),
                pointer: to_point(pos),
            });
        }
    }

    if let Some(pos) = image.interact_pointer_pos() {
        if image.drag_started() {
            events.push(ViewerEvent::PointerDown(to_point(pos)));
        } else if image.dragged() {
            events.push(ViewerEvent::PointerMove(to_point(pos)));
        }
    }
    if image.drag_stopped() {
        events.push(ViewerEvent::PointerUp);
    }

    events
}

fn draw_missing(ui: &egui::Ui, rect: egui::Rect, alt: &str) {
    ui.painter().rect_filled(rect, 4.0, egui::Color32::from_gray(50));
    ui.painter().rect_stroke(
        rect,
        4.0,
        egui::Stroke::new(2.0, egui::Color32::from_rgb(220, 50, 50)),
        egui::epaint::StrokeKind::Inside,
    );
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        alt,
        egui::FontId::proportional(14.0),
        egui::Color32::from_gray(200),
    );
}

fn draw_caption(ui: &egui::Ui, screen: egui::Rect, caption: &str) {
    if caption.is_empty() {
        return;
    }
    ui.painter().text(
        egui::pos2(screen.center().x, screen.bottom() - 24.0),
        egui::Align2::CENTER_BOTTOM,
        caption,
        egui::FontId::proportional(16.0),
        egui::Color32::from_white_alpha(230),
    );
}

fn draw_instructions(ui: &egui::Ui, screen: egui::Rect) {
    let pos = egui::pos2(screen.center().x, screen.top() + 20.0);
    let galley = ui.painter().layout_no_wrap(
        INSTRUCTIONS.to_string(),
        egui::FontId::proportional(13.0),
        egui::Color32::from_white_alpha(220),
    );
    let bg = egui::Rect::from_center_size(
        pos + egui::vec2(0.0, galley.size().y / 2.0),
        galley.size() + egui::vec2(24.0, 12.0),
    );
    ui.painter()
        .rect_filled(bg, 6.0, egui::Color32::from_black_alpha(180));
    ui.painter().galley(
        bg.center() - galley.size() / 2.0,
        galley,
        egui::Color32::WHITE,
    );
}
