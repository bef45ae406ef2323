use crate::app::LightboxApp;

pub fn show(ctx: &egui::Context, app: &mut LightboxApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Progress bar
        if let Some(ref label) = app.ui_state.running {
            let (fraction, detail) = match (
                app.ui_state.progress_items_done,
                app.ui_state.progress_items_total,
            ) {
                (Some(done), Some(total)) if total > 0 => (
                    done as f32 / total as f32,
                    format!("{label} ({done}/{total})"),
                ),
                _ => (0.0, format!("{label}...")),
            };
            ui.add(egui::ProgressBar::new(fraction).text(detail).animate(true));
        } else {
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            match app.ui_state.visit_count {
                Some(count) => ui.label(format!("Visits: {count}")),
                None => ui.label("Visits: -"),
            };
            if let Some(ref page) = app.gallery.page {
                ui.separator();
                ui.label(page.path());
                ui.separator();
                ui.label(format!(
                    "{} images, {} clickable",
                    page.images().len(),
                    app.viewer.clickable_count()
                ));
            }
            let state = app.viewer.state();
            if state.is_open() {
                ui.separator();
                ui.label(format!("Zoom: {:.0}%", state.scale() * 100.0));
            }
        });

        ui.add_space(2.0);
    });
}
