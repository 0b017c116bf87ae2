//! Species selection cards.

use crate::glyphs;
use crate::species::{Species, SpeciesCatalog};
use crate::widgets;
use eframe::egui::{Color32, RichText, ScrollArea, Ui};

pub enum SelectionAction {
    Initialize(String),
    Compare,
}

#[derive(Debug, Default, Clone)]
pub struct SelectionPanel {}

impl SelectionPanel {
    pub fn render(&mut self, ui: &mut Ui, catalog: &SpeciesCatalog) -> Option<SelectionAction> {
        let mut action = None;
        ScrollArea::vertical().show(ui, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(
                        "JGI MycoCosm now hosts 80+ chromosome-level fungal assemblies. \
                         Three reference architectures are curated here for guided \
                         exploration.",
                    )
                    .color(Color32::from_rgb(168, 162, 158)),
                );
                if ui
                    .button(RichText::new("Compare Architectures").strong())
                    .clicked()
                {
                    action = Some(SelectionAction::Compare);
                }
            });
            ui.separator();
            ui.add_space(8.0);

            let species = catalog.species();
            ui.columns(species.len().max(1), |columns| {
                for (column, species) in columns.iter_mut().zip(species) {
                    if species_card(column, species) {
                        action = Some(SelectionAction::Initialize(species.id.clone()));
                    }
                }
            });
        });
        action
    }
}

fn species_card(ui: &mut Ui, species: &Species) -> bool {
    let mut initialize = false;
    ui.group(|ui| {
        ui.vertical_centered(|ui| {
            glyphs::mushroom_glyph(ui, glyphs::glyph_size(), &species.id);
            ui.heading(RichText::new(&species.scientific_name).italics().size(17.0));
            ui.label(
                RichText::new(&species.common_name).color(Color32::from_rgb(168, 162, 158)),
            );
            widgets::difficulty_dots(ui, species.difficulty);
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                chip(ui, &format!("CHR {}", species.chromosome_count));
                chip(ui, &species.genome_size);
            });
            if !species.focus.is_empty() {
                ui.label(
                    RichText::new(&species.focus)
                        .size(11.0)
                        .color(Color32::from_rgb(251, 191, 36)),
                );
            }
            ui.add_space(4.0);
            ui.label(RichText::new(&species.description).size(12.0));
            ui.add_space(8.0);
            if ui.button("Initialize Explorer").clicked() {
                initialize = true;
            }
        });
    });
    initialize
}

fn chip(ui: &mut Ui, text: &str) {
    ui.label(
        RichText::new(text)
            .monospace()
            .size(11.0)
            .color(Color32::from_rgb(52, 211, 153)),
    );
}
