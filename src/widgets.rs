//! Small controls shared between the explorer and comparison views.

use crate::species::{ChromosomeFunction, EducationalLevel};
use crate::UI_STRINGS;
use eframe::egui::{vec2, Button, Color32, RichText, Sense, Ui};

/// Three-state detail selector. Returns the newly picked level on change.
pub fn level_toggle(ui: &mut Ui, level: EducationalLevel) -> Option<EducationalLevel> {
    let mut changed = None;
    ui.horizontal(|ui| {
        for candidate in EducationalLevel::ALL {
            let key = match candidate {
                EducationalLevel::Beginner => "level_beginner",
                EducationalLevel::Intermediate => "level_intermediate",
                EducationalLevel::Advanced => "level_advanced",
            };
            let selected = candidate == level;
            let button = Button::new(UI_STRINGS.get(key)).selected(selected);
            if ui.add(button).clicked() && !selected {
                changed = Some(candidate);
            }
        }
    });
    changed
}

/// Swatch-and-name row for the function color mapping. `Unknown` is left
/// out; it only ever appears on malformed data.
pub fn function_legend(ui: &mut Ui) {
    ui.horizontal_wrapped(|ui| {
        for function in ChromosomeFunction::ALL {
            if function == ChromosomeFunction::Unknown {
                continue;
            }
            swatch(ui, function.color());
            ui.label(
                RichText::new(function.display_name())
                    .size(11.0)
                    .color(Color32::from_rgb(168, 162, 158)),
            );
            ui.add_space(8.0);
        }
    });
}

fn swatch(ui: &mut Ui, color: Color32) {
    let (rect, _response) = ui.allocate_exact_size(vec2(10.0, 10.0), Sense::hover());
    ui.painter().rect_filled(rect, 2.0, color);
}

/// Difficulty grade rendered as five dots, `filled` of them lit.
pub fn difficulty_dots(ui: &mut Ui, filled: u8) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 3.0;
        for n in 1..=5u8 {
            let (rect, _response) = ui.allocate_exact_size(vec2(7.0, 7.0), Sense::hover());
            let color = if n <= filled {
                Color32::from_rgb(251, 191, 36)
            } else {
                Color32::from_rgb(68, 64, 60)
            };
            ui.painter().circle_filled(rect.center(), 3.0, color);
        }
    });
}

/// Status token on a colored background, for the diagnostic chips.
pub fn status_chip(ui: &mut Ui, caption: &str, token: &str, color: Color32) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(caption)
                .size(10.0)
                .color(Color32::from_rgb(120, 113, 108)),
        );
        ui.label(RichText::new(token).size(12.0).strong().color(color));
    });
}
