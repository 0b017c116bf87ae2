use lazy_static::lazy_static;
use species::SpeciesCatalog;
use ui_strings::UiStrings;

pub mod about;
pub mod app;
pub mod assistant;
pub mod comparison;
pub mod comparison_panel;
pub mod deep_dive;
pub mod diag_overlay;
pub mod diagnostics;
pub mod explorer_panel;
pub mod glyphs;
pub mod integrity;
pub mod intro_panel;
pub mod resources;
pub mod selection_panel;
pub mod species;
pub mod stream;
pub mod ui_strings;
pub mod widgets;

lazy_static! {
    // Interface strings
    pub static ref UI_STRINGS: UiStrings = UiStrings::default();

    // Built-in species catalog
    pub static ref CATALOG: SpeciesCatalog = SpeciesCatalog::default();
}
