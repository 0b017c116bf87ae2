//! Intro view explaining the dikaryotic condition.

use eframe::egui::{pos2, vec2, Color32, RichText, Sense, Shape, Stroke, Ui};

#[derive(Debug, Default, Clone)]
pub struct IntroPanel {}

impl IntroPanel {
    /// Returns true when the user asks to continue to the species selection.
    pub fn render(&mut self, ui: &mut Ui) -> bool {
        let mut enter = false;
        ui.vertical_centered(|ui| {
            ui.add_space(28.0);
            ui.heading(RichText::new("The Dikaryon Foundation").size(26.0));
            ui.label(
                RichText::new("Why higher fungi run on paired genomes")
                    .color(Color32::from_rgb(168, 162, 158)),
            );
            ui.add_space(16.0);

            dikaryon_diagram(ui);
            ui.add_space(6.0);
            ui.label(
                RichText::new("Condition: n + n (Dikaryotic)")
                    .monospace()
                    .color(Color32::from_rgb(251, 191, 36)),
            );
            ui.add_space(16.0);

            ui.set_max_width(520.0);
            ui.label(
                "Unlike plants and animals, the fruiting body of a higher fungus is built \
                 from cells that keep two distinct parental nuclei side by side instead of \
                 fusing them. Each cell carries both haploid genomes, unfused, for most of \
                 the life cycle.",
            );
            ui.add_space(8.0);
            ui.label(
                "The karyotypes in this atlas therefore describe one haploid chromosome \
                 set per species. Counts, sizes and gene clusters refer to a single \
                 parental genome, the unit the integrity audit validates.",
            );
            ui.add_space(20.0);

            if ui
                .button(RichText::new("Enter Species Explorer").size(16.0))
                .clicked()
            {
                enter = true;
            }
        });
        enter
    }
}

fn dikaryon_diagram(ui: &mut Ui) {
    let (response, painter) = ui.allocate_painter(vec2(280.0, 130.0), Sense::hover());
    let rect = response.rect;

    // Cell membrane as a filled ring.
    painter.rect_filled(rect, 14.0, Color32::from_rgb(68, 64, 60));
    painter.rect_filled(rect.shrink(2.0), 12.0, Color32::from_rgb(28, 25, 23));

    let radius = rect.height() * 0.30;
    let left = pos2(rect.center().x - rect.width() * 0.20, rect.center().y);
    let right = pos2(rect.center().x + rect.width() * 0.20, rect.center().y);
    nucleus(&painter, left, radius, Color32::from_rgb(59, 130, 246));
    nucleus(&painter, right, radius, Color32::from_rgb(244, 63, 94));

    painter.text(
        pos2(left.x, rect.bottom() - 10.0),
        eframe::egui::Align2::CENTER_CENTER,
        "Nucleus A",
        eframe::egui::FontId::monospace(10.0),
        Color32::from_rgb(168, 162, 158),
    );
    painter.text(
        pos2(right.x, rect.bottom() - 10.0),
        eframe::egui::Align2::CENTER_CENTER,
        "Nucleus B",
        eframe::egui::FontId::monospace(10.0),
        Color32::from_rgb(168, 162, 158),
    );
}

// Dashed membrane ring with a solid center.
fn nucleus(painter: &eframe::egui::Painter, center: eframe::egui::Pos2, radius: f32, color: Color32) {
    let points: Vec<_> = (0..=48)
        .map(|n| {
            let angle = std::f32::consts::TAU * n as f32 / 48.0;
            pos2(
                center.x + angle.cos() * radius,
                center.y + angle.sin() * radius,
            )
        })
        .collect();
    painter.extend(Shape::dashed_line(
        &points,
        Stroke::new(1.5, color),
        4.0,
        3.0,
    ));
    painter.circle_filled(center, radius * 0.45, color);
}
