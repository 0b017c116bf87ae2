//! Side-by-side karyotype comparison across the whole catalog.

use crate::comparison;
use crate::species::{EducationalLevel, Species, SpeciesCatalog};
use crate::widgets;
use crate::UI_STRINGS;
use eframe::egui::{
    self, pos2, vec2, Align2, Color32, FontId, Rect, RichText, ScrollArea, Sense, Ui,
};

pub enum ComparisonAction {
    Back,
}

#[derive(Default)]
pub struct ComparisonPanel;

impl ComparisonPanel {
    pub fn render(
        &mut self,
        ui: &mut Ui,
        catalog: &SpeciesCatalog,
        level: &mut EducationalLevel,
    ) -> Option<ComparisonAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.heading("Comparative Architecture");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(UI_STRINGS.get("btn_back")).clicked() {
                    action = Some(ComparisonAction::Back);
                }
                if let Some(new_level) = widgets::level_toggle(ui, *level) {
                    *level = new_level;
                }
            });
        });
        ui.separator();

        ScrollArea::vertical().show(ui, |ui| {
            for species in catalog.species() {
                ui.group(|ui| {
                    ui.set_width(ui.available_width() - 8.0);
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(&species.scientific_name).italics().size(15.0),
                        );
                        ui.label(
                            RichText::new(&species.common_name)
                                .size(11.0)
                                .color(Color32::from_rgb(168, 162, 158)),
                        );
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.label(
                                    RichText::new(&species.genome_size)
                                        .monospace()
                                        .size(11.0)
                                        .color(Color32::from_rgb(52, 211, 153)),
                                );
                                ui.label(
                                    RichText::new(format!(
                                        "CHR {}",
                                        species.chromosome_count
                                    ))
                                    .monospace()
                                    .size(11.0)
                                    .color(Color32::from_rgb(168, 162, 158)),
                                );
                            },
                        );
                    });
                    mini_karyotype(ui, species, *level);
                    ui.horizontal_wrapped(|ui| {
                        for (function, count) in comparison::function_distribution(species) {
                            ui.label(
                                RichText::new(format!(
                                    "{} {count}",
                                    function.display_name()
                                ))
                                .size(10.0)
                                .color(function.color()),
                            );
                            ui.add_space(6.0);
                        }
                    });
                });
                ui.add_space(6.0);
            }

            ui.add_space(4.0);
            ui.label(
                RichText::new("RELATIVE GENOME MASS")
                    .size(10.0)
                    .color(Color32::from_rgb(120, 113, 108)),
            );
            egui::Grid::new("genome_mass_grid")
                .num_columns(3)
                .show(ui, |ui| {
                    for species in catalog.species() {
                        let fraction = comparison::genome_mass_fraction(species, catalog);
                        ui.label(RichText::new(&species.scientific_name).italics().size(12.0));
                        mass_bar(ui, fraction);
                        ui.label(RichText::new(&species.genome_size).monospace().size(11.0));
                        ui.end_row();
                    }
                });

            ui.add_space(8.0);
            widgets::function_legend(ui);
            ui.add_space(6.0);
            ui.label(
                RichText::new(
                    "Analyst note: unit count does not track genome mass. Repeat content and \
                     gene density vary independently of chromosome number, so architectural \
                     complexity is read from functional composition rather than raw counts.",
                )
                .size(11.0)
                .italics()
                .color(Color32::from_rgb(168, 162, 158)),
            );
        });

        action
    }
}

const MINI_BAR_MAX_DESIGN_HEIGHT: f32 = 80.0 + 4.0 * 15.0;

fn mini_bar_design_height(id: u32) -> f32 {
    80.0 + (id % 5) as f32 * 15.0
}

fn mini_karyotype(ui: &mut Ui, species: &Species, level: EducationalLevel) {
    let count = species.chromosomes.len().max(1);
    let height = 96.0;
    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width(), height), Sense::hover());
    let rect = response.rect;

    let baseline = rect.bottom() - 4.0;
    let scale = (baseline - rect.top() - 16.0) / MINI_BAR_MAX_DESIGN_HEIGHT;
    let slot = rect.width() / count as f32;
    let bar_width = (slot * 0.5).clamp(5.0, 18.0);
    let hover_pos = response.hover_pos();
    let mut hovered = None;

    for (index, chromosome) in species.chromosomes.iter().enumerate() {
        let center_x = rect.left() + slot * (index as f32 + 0.5);
        let bar_height = mini_bar_design_height(chromosome.id) * scale;
        let bar = Rect::from_min_max(
            pos2(center_x - bar_width / 2.0, baseline - bar_height),
            pos2(center_x + bar_width / 2.0, baseline),
        );
        painter.rect_filled(bar, 3.0, chromosome.primary_function.color());
        if chromosome.is_highlight {
            let band = Rect::from_min_max(
                bar.min,
                pos2(bar.right(), bar.top() + bar.height() * 0.25),
            );
            painter.rect_filled(band, 3.0, Color32::from_rgba_unmultiplied(255, 255, 255, 70));
        }
        if hover_pos.is_some_and(|pos| bar.expand2(vec2(slot * 0.2, 4.0)).contains(pos)) {
            hovered = Some(chromosome);
        }
    }

    if let Some(chromosome) = hovered {
        painter.text(
            pos2(rect.left() + 2.0, rect.top()),
            Align2::LEFT_TOP,
            format!(
                "CHR {}  {}  ({})",
                chromosome.id,
                chromosome.label_for_level(level),
                chromosome.primary_function.display_name()
            ),
            FontId::proportional(11.0),
            Color32::from_rgb(231, 229, 228),
        );
    }
}

fn mass_bar(ui: &mut Ui, fraction: f32) {
    let width = 150.0;
    let (response, painter) = ui.allocate_painter(vec2(width, 10.0), Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 3.0, Color32::from_rgb(68, 64, 60));
    let filled = Rect::from_min_size(
        rect.min,
        vec2(rect.width() * fraction.clamp(0.0, 1.0), rect.height()),
    );
    painter.rect_filled(filled, 3.0, Color32::from_rgb(52, 211, 153));
}
