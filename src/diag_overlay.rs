//! Right-hand diagnostic overlay showing the integrity report and event log.

use crate::assistant;
use crate::diagnostics::{DiagnosticBus, DiagnosticLog};
use crate::integrity::{self, IntegrityReport, IntegrityStatus};
use crate::species::SpeciesCatalog;
use crate::widgets;
use crate::UI_STRINGS;
use eframe::egui::{self, Color32, Context, RichText, ScrollArea};

pub struct DiagOverlay {
    open: bool,
    log: DiagnosticLog,
    report: IntegrityReport,
    assistant_ready: bool,
}

impl Default for DiagOverlay {
    fn default() -> Self {
        Self {
            open: false,
            log: DiagnosticLog::new(),
            report: IntegrityReport::default(),
            assistant_ready: false,
        }
    }
}

impl DiagOverlay {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self, bus: &DiagnosticBus, catalog: &SpeciesCatalog) {
        if self.open {
            self.close();
        } else {
            self.open(bus, catalog);
        }
    }

    /// The log only records while the overlay is open; each open starts
    /// from a clean history.
    pub fn open(&mut self, bus: &DiagnosticBus, catalog: &SpeciesCatalog) {
        self.assistant_ready = assistant::capability_present();
        self.log.activate(bus);
        bus.info("System diagnostic initialized");
        self.report = integrity::run_audit(catalog, bus);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.log.deactivate();
        self.open = false;
    }

    /// Audits an arbitrary catalog (an externally opened file) and shows
    /// its result in the status chip until the next re-run.
    pub fn run_audit_against(&mut self, bus: &DiagnosticBus, catalog: &SpeciesCatalog) {
        self.report = integrity::run_audit(catalog, bus);
    }

    pub fn render(&mut self, ctx: &Context, bus: &DiagnosticBus, catalog: &SpeciesCatalog) {
        if !self.open {
            return;
        }
        egui::SidePanel::right("diag_overlay")
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(UI_STRINGS.get("m_diagnostics"))
                        .strong()
                        .size(14.0),
                );
                ui.separator();

                let (status_token, status_color) = match self.report.status {
                    IntegrityStatus::Idle => {
                        (IntegrityStatus::Idle.as_str(), Color32::from_rgb(148, 163, 184))
                    }
                    IntegrityStatus::Pass => {
                        (IntegrityStatus::Pass.as_str(), Color32::from_rgb(16, 185, 129))
                    }
                    IntegrityStatus::Fail => {
                        (IntegrityStatus::Fail.as_str(), Color32::from_rgb(244, 63, 94))
                    }
                };
                widgets::status_chip(ui, "DATA INTEGRITY", status_token, status_color);
                let (ai_token, ai_color) = if self.assistant_ready {
                    ("READY", Color32::from_rgb(16, 185, 129))
                } else {
                    ("MISSING", Color32::from_rgb(244, 63, 94))
                };
                widgets::status_chip(ui, "AI HUB KEY", ai_token, ai_color);

                ui.add_space(6.0);
                if ui.button(UI_STRINGS.get("diag_rerun")).clicked() {
                    self.report = integrity::run_audit(catalog, bus);
                }
                ui.separator();

                let footer_height = 26.0;
                let feed_height = (ui.available_height() - footer_height).max(60.0);
                ScrollArea::vertical()
                    .id_salt("diag_log")
                    .max_height(feed_height)
                    .show(ui, |ui| {
                        for entry in self.log.entries() {
                            ui.horizontal_wrapped(|ui| {
                                ui.spacing_mut().item_spacing.x = 6.0;
                                ui.label(
                                    RichText::new(&entry.timestamp)
                                        .monospace()
                                        .size(10.0)
                                        .color(Color32::from_rgb(120, 113, 108)),
                                );
                                ui.label(
                                    RichText::new(format!("{:<7}", entry.level.as_str()))
                                        .monospace()
                                        .size(10.0)
                                        .color(entry.level.color()),
                                );
                                ui.label(
                                    RichText::new(&entry.message).monospace().size(10.0),
                                );
                            });
                        }
                    });

                ui.separator();
                ui.label(
                    RichText::new("Atlas Core v1.6.0 | Build: Release-Candidate")
                        .monospace()
                        .size(9.0)
                        .color(Color32::from_rgb(120, 113, 108)),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_runs_audit_and_records() {
        let bus = DiagnosticBus::default();
        let catalog = SpeciesCatalog::default();
        let mut overlay = DiagOverlay::default();

        overlay.open(&bus, &catalog);
        assert!(overlay.is_open());
        assert_eq!(overlay.report.status, IntegrityStatus::Pass);

        let entries = overlay.log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "All genomic constants validated (GM ready)");
        assert_eq!(entries[1].message, "Starting data integrity audit...");
        assert_eq!(entries[2].message, "System diagnostic initialized");
    }

    #[test]
    fn test_close_discards_history() {
        let bus = DiagnosticBus::default();
        let catalog = SpeciesCatalog::default();
        let mut overlay = DiagOverlay::default();

        overlay.open(&bus, &catalog);
        overlay.close();
        assert!(!overlay.is_open());
        assert!(overlay.log.entries().is_empty());

        bus.info("unheard");
        assert!(overlay.log.entries().is_empty());
    }

    #[test]
    fn test_toggle_cycles() {
        let bus = DiagnosticBus::default();
        let catalog = SpeciesCatalog::default();
        let mut overlay = DiagOverlay::default();

        overlay.toggle(&bus, &catalog);
        assert!(overlay.is_open());
        overlay.toggle(&bus, &catalog);
        assert!(!overlay.is_open());
    }
}
