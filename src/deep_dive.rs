//! Gene deep-dive drawer for a selected chromosome.

use crate::species::{Chromosome, ChromosomeFunction, EducationalLevel, Gene, Species};
use eframe::egui::{self, Button, Color32, Context, RichText, ScrollArea};
use rand::Rng;

const SEQUENCE_BLOCK_LEN: usize = 240;

/// Presentation fallback for chromosomes the catalog records without gene
/// detail. The stored record keeps its empty list; only the drawer shows
/// this stand-in.
pub fn placeholder_gene(chromosome: &Chromosome) -> Gene {
    Gene {
        id: format!("gen-{}", chromosome.id),
        name: "Baseline Survival".to_string(),
        technical_name: Some("HSP-70".to_string()),
        category: "Cellular Maintenance".to_string(),
        location: format!("Locus {}.1", chromosome.id),
        description: "A standard caretaker gene ensuring the cell survives heat and stress."
            .to_string(),
        technical_description: "Constitutively expressed heat-shock chaperone stabilizing \
                                protein folding under thermal and oxidative load."
            .to_string(),
    }
}

fn random_bases(rng: &mut impl Rng, count: usize) -> String {
    const BASES: [char; 4] = ['A', 'C', 'G', 'T'];
    (0..count).map(|_| BASES[rng.random_range(0..4)]).collect()
}

fn expert_insight(function: ChromosomeFunction) -> &'static str {
    match function {
        ChromosomeFunction::Reproduction => {
            "Expert insight: variation at this unit directly expands mating compatibility, \
             keeping local populations genetically diverse."
        }
        _ => {
            "Expert insight: products of this unit help reclaim carbon locked in plant \
             matter, a cornerstone of forest nutrient cycling."
        }
    }
}

#[derive(Default)]
pub struct DeepDivePanel {
    open: bool,
    chromosome_id: u32,
    selected_gene: usize,
    sequence_block: String,
}

impl DeepDivePanel {
    pub fn open_for(&mut self, chromosome: &Chromosome) {
        self.open = true;
        self.chromosome_id = chromosome.id;
        self.selected_gene = 0;
        self.sequence_block = random_bases(&mut rand::rng(), SEQUENCE_BLOCK_LEN);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn render(
        &mut self,
        ctx: &Context,
        species: &Species,
        chromosome: &Chromosome,
        level: EducationalLevel,
    ) {
        if !self.open {
            return;
        }
        if chromosome.id != self.chromosome_id {
            self.open_for(chromosome);
        }

        let genes = if chromosome.genes.is_empty() {
            vec![placeholder_gene(chromosome)]
        } else {
            chromosome.genes.clone()
        };
        if self.selected_gene >= genes.len() {
            self.selected_gene = 0;
        }

        let mut open = self.open;
        egui::Window::new(format!("Deep Dive: CHR {}", chromosome.id))
            .open(&mut open)
            .default_size([460.0, 420.0])
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(&species.scientific_name)
                        .italics()
                        .color(Color32::from_rgb(168, 162, 158)),
                );
                ui.separator();

                ui.horizontal(|ui| {
                    for (index, gene) in genes.iter().enumerate() {
                        let button = Button::new(&gene.name).selected(index == self.selected_gene);
                        let response = ui.add(button).on_hover_text(&gene.location);
                        if response.clicked() && index != self.selected_gene {
                            self.selected_gene = index;
                            self.sequence_block =
                                random_bases(&mut rand::rng(), SEQUENCE_BLOCK_LEN);
                        }
                    }
                });
                ui.add_space(6.0);

                let gene = &genes[self.selected_gene];
                ScrollArea::vertical().show(ui, |ui| {
                    ui.heading(&gene.name);
                    if let Some(technical_name) = &gene.technical_name {
                        ui.label(
                            RichText::new(technical_name)
                                .monospace()
                                .color(Color32::from_rgb(251, 191, 36)),
                        );
                    }
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(&gene.category)
                                .size(11.0)
                                .color(Color32::from_rgb(14, 165, 233)),
                        );
                        ui.label(
                            RichText::new(&gene.location)
                                .monospace()
                                .size(11.0)
                                .color(Color32::from_rgb(120, 113, 108)),
                        );
                    });
                    ui.colored_label(
                        Color32::from_rgb(52, 211, 153),
                        "Functional stability: high (98%)",
                    );
                    ui.add_space(6.0);

                    let description = match level {
                        EducationalLevel::Beginner => &gene.description,
                        _ => &gene.technical_description,
                    };
                    ui.label(description);
                    ui.add_space(8.0);

                    ui.label(
                        RichText::new("Reference read (decorative)")
                            .size(10.0)
                            .color(Color32::from_rgb(120, 113, 108)),
                    );
                    ui.label(
                        RichText::new(&self.sequence_block)
                            .monospace()
                            .size(11.0)
                            .color(Color32::from_rgb(52, 211, 153)),
                    );
                    ui.add_space(8.0);
                    ui.label(
                        RichText::new(expert_insight(chromosome.primary_function))
                            .italics()
                            .size(12.0),
                    );
                });
            });
        self.open = open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_placeholder_cites_chromosome_locus() {
        let chromosome = Chromosome {
            id: 7,
            ..Default::default()
        };
        let gene = placeholder_gene(&chromosome);
        assert_eq!(gene.name, "Baseline Survival");
        assert_eq!(gene.technical_name.as_deref(), Some("HSP-70"));
        assert_eq!(gene.location, "Locus 7.1");
        // The record itself stays untouched; the stand-in exists only in
        // the drawer.
        assert!(chromosome.genes.is_empty());
    }

    #[test]
    fn test_random_bases_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        let block = random_bases(&mut rng, SEQUENCE_BLOCK_LEN);
        assert_eq!(block.len(), SEQUENCE_BLOCK_LEN);
        assert!(block.chars().all(|c| "ACGT".contains(c)));
    }

    #[test]
    fn test_expert_insight_splits_on_function() {
        assert!(expert_insight(ChromosomeFunction::Reproduction).contains("mating"));
        assert!(expert_insight(ChromosomeFunction::Metabolism).contains("carbon"));
    }
}
