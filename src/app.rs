//! Top-level eframe application: navigation, menu bar, and window chrome.

use std::time::Instant;

use crate::about;
use crate::comparison_panel::{ComparisonAction, ComparisonPanel};
use crate::diag_overlay::DiagOverlay;
use crate::diagnostics::DiagnosticBus;
use crate::explorer_panel::{ExplorerAction, ExplorerPanel};
use crate::intro_panel::IntroPanel;
use crate::resources::{self, ResourceKind};
use crate::selection_panel::{SelectionAction, SelectionPanel};
use crate::species::{EducationalLevel, SpeciesCatalog};
use crate::{CATALOG, UI_STRINGS};
use eframe::egui::{self, menu, Color32, Context, Key, RichText, ScrollArea, Ui};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum AppStep {
    #[default]
    Intro,
    Selection,
    Explorer,
    Comparison,
}

#[derive(Default)]
pub struct MycoAtlasApp {
    bus: DiagnosticBus,
    level: EducationalLevel,
    step: AppStep,
    intro: IntroPanel,
    selection: SelectionPanel,
    explorer: Option<(String, ExplorerPanel)>,
    comparison: ComparisonPanel,
    overlay: DiagOverlay,
    resource_window: Option<ResourceKind>,
    about_open: bool,
    update_has_run_before: bool,
}

impl MycoAtlasApp {
    pub fn new() -> Self {
        Self::default()
    }

    fn go_to(&mut self, step: AppStep) {
        if self.step == step {
            return;
        }
        match step {
            AppStep::Intro => self.bus.info("Navigation: returned to intro"),
            AppStep::Selection => self.bus.info("Navigation: returned to species selection"),
            AppStep::Comparison => self.bus.info("Navigation: entered comparative mode"),
            AppStep::Explorer => {}
        }
        self.step = step;
    }

    fn initialize_explorer(&mut self, species_id: &str) {
        let Some(species) = CATALOG.get(species_id) else {
            return;
        };
        self.bus
            .success(&format!("Specimen initialized: {}", species.scientific_name));
        self.explorer = Some((
            species_id.to_string(),
            ExplorerPanel::new(species, Instant::now()),
        ));
        self.step = AppStep::Explorer;
    }

    /// One-shot audit of a catalog picked via the file dialog. The built-in
    /// catalog stays active; only the report and log reflect the external one.
    fn audit_external_catalog(&mut self, path: &str) {
        if !self.overlay.is_open() {
            self.overlay.open(&self.bus, &CATALOG);
        }
        match SpeciesCatalog::from_json_file(path) {
            Ok(external) => {
                self.bus.info(&format!("External catalog loaded: {path}"));
                self.overlay.run_audit_against(&self.bus, &external);
            }
            Err(err) => self.bus.error(&err.to_string()),
        }
    }

    fn handle_keys(&mut self, ctx: &Context) {
        if ctx.input(|i| i.modifiers.shift && i.key_pressed(Key::D)) {
            self.overlay.toggle(&self.bus, &CATALOG);
        }
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            if self.resource_window.take().is_some() {
                return;
            }
            if let Some((_, panel)) = &mut self.explorer {
                panel.close_overlays();
            }
        }
    }

    fn render_menu_bar(&mut self, ctx: &Context, ui: &mut Ui) {
        menu::bar(ui, |ui| {
            ui.menu_button(UI_STRINGS.get("m_file"), |ui| {
                if ui.button(UI_STRINGS.get("m_open_catalog")).clicked() {
                    if let Some(path) = rfd::FileDialog::new().pick_file() {
                        self.audit_external_catalog(&path.display().to_string());
                    }
                }
                if ui.button(UI_STRINGS.get("m_quit")).clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
            ui.menu_button(UI_STRINGS.get("m_view"), |ui| {
                if ui.button(UI_STRINGS.get("m_diagnostics")).clicked() {
                    self.overlay.toggle(&self.bus, &CATALOG);
                }
            });
            ui.menu_button(UI_STRINGS.get("m_resources"), |ui| {
                for (kind, key) in [
                    (ResourceKind::Documentation, "m_res_documentation"),
                    (ResourceKind::Protocols, "m_res_protocols"),
                    (ResourceKind::Glossary, "m_res_glossary"),
                ] {
                    if ui.button(UI_STRINGS.get(key)).clicked() {
                        self.resource_window = Some(kind);
                    }
                }
            });
            ui.menu_button(UI_STRINGS.get("m_help"), |ui| {
                if ui.button(UI_STRINGS.get("m_about")).clicked() {
                    self.about_open = true;
                }
            });
        });
    }

    fn render_brand_row(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(UI_STRINGS.get("brand_title"))
                    .strong()
                    .size(16.0),
            );
            ui.label(
                RichText::new(UI_STRINGS.get("brand_subtitle"))
                    .size(11.0)
                    .color(Color32::from_rgb(168, 162, 158)),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(UI_STRINGS.get("nav_compare")).clicked() {
                    self.go_to(AppStep::Comparison);
                }
                if ui.button(UI_STRINGS.get("nav_species")).clicked() {
                    self.go_to(AppStep::Selection);
                }
                if ui.button(UI_STRINGS.get("nav_intro")).clicked() {
                    self.go_to(AppStep::Intro);
                }
            });
        });
    }

    fn render_step(&mut self, ctx: &Context, ui: &mut Ui) {
        match self.step {
            AppStep::Intro => {
                if self.intro.render(ui) {
                    self.go_to(AppStep::Selection);
                }
            }
            AppStep::Selection => match self.selection.render(ui, &CATALOG) {
                Some(SelectionAction::Initialize(id)) => self.initialize_explorer(&id),
                Some(SelectionAction::Compare) => self.go_to(AppStep::Comparison),
                None => {}
            },
            AppStep::Explorer => {
                let mut back = true;
                if let Some((species_id, panel)) = &mut self.explorer {
                    if let Some(species) = CATALOG.get(species_id) {
                        back = matches!(
                            panel.render(ctx, ui, species, &mut self.level),
                            Some(ExplorerAction::Back)
                        );
                    }
                }
                if back {
                    self.go_to(AppStep::Selection);
                }
            }
            AppStep::Comparison => {
                if let Some(ComparisonAction::Back) =
                    self.comparison.render(ui, &CATALOG, &mut self.level)
                {
                    self.go_to(AppStep::Selection);
                }
            }
        }
    }

    fn render_resource_window(&mut self, ctx: &Context) {
        let Some(kind) = self.resource_window else {
            return;
        };
        let article = match resources::article(kind) {
            Ok(article) => article,
            Err(err) => {
                self.bus.error(&err);
                self.resource_window = None;
                return;
            }
        };
        let mut open = true;
        let mut close_clicked = false;
        egui::Window::new(article.title.as_str())
            .open(&mut open)
            .default_size([440.0, 420.0])
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    if !article.subtitle.is_empty() {
                        ui.label(
                            RichText::new(&article.subtitle)
                                .italics()
                                .color(Color32::from_rgb(168, 162, 158)),
                        );
                    }
                    for section in &article.sections {
                        ui.add_space(6.0);
                        ui.label(RichText::new(&section.heading).strong());
                        ui.label(RichText::new(&section.body).size(12.0));
                    }
                    ui.add_space(8.0);
                    if let Ok(reference) = resources::reference() {
                        ui.label(
                            RichText::new(reference)
                                .monospace()
                                .size(10.0)
                                .color(Color32::from_rgb(120, 113, 108)),
                        );
                    }
                    if ui.button(UI_STRINGS.get("btn_close")).clicked() {
                        close_clicked = true;
                    }
                });
            });
        if !open || close_clicked {
            self.resource_window = None;
        }
    }

    fn render_about_window(&mut self, ctx: &Context) {
        if !self.about_open {
            return;
        }
        let mut open = self.about_open;
        egui::Window::new(UI_STRINGS.get("m_about"))
            .open(&mut open)
            .default_size([340.0, 200.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("MycoAtlas");
                    ui.label(
                        RichText::new(format!("Version {}", about::MYCOATLAS_DISPLAY_VERSION))
                            .monospace(),
                    );
                    ui.label(
                        RichText::new(format!("Build {}", about::MYCOATLAS_BUILD_N))
                            .monospace()
                            .size(10.0)
                            .color(Color32::from_rgb(120, 113, 108)),
                    );
                    ui.add_space(6.0);
                    ui.label("Educational fungal genomics atlas");
                    ui.label(
                        RichText::new("Data: DOE JGI MycoCosm reference assemblies")
                            .size(10.0)
                            .color(Color32::from_rgb(168, 162, 158)),
                    );
                });
            });
        self.about_open = open;
    }
}

impl eframe::App for MycoAtlasApp {
    // The runner invokes the deprecated `update` (below) right before `ui`
    // each frame; all rendering happens there via context-level panels, so
    // the root `Ui` pass has nothing left to draw.
    fn ui(&mut self, _ui: &mut Ui, _frame: &mut eframe::Frame) {}

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.update_has_run_before {
            egui_extras::install_image_loaders(ctx);
            self.update_has_run_before = true;
        }

        self.handle_keys(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            self.render_menu_bar(ctx, ui);
            self.render_brand_row(ui);
            ui.add_space(2.0);
        });

        self.overlay.render(ctx, &self.bus, &CATALOG);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_step(ctx, ui);
        });

        self.render_resource_window(ctx);
        self.render_about_window(ctx);
    }
}
