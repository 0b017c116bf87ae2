//! Karyotype explorer for a selected species.

use crate::assistant::{self, ChatRole, ChatTurn};
use crate::deep_dive::DeepDivePanel;
use crate::species::{Chromosome, EducationalLevel, Species};
use crate::stream::{StreamFocus, TerminalStream};
use crate::widgets;
use crate::UI_STRINGS;
use crossbeam_channel::Receiver;
use eframe::egui::{
    self, pos2, vec2, Align2, Color32, Context, FontId, Key, Rect, RichText, ScrollArea, Sense,
    Stroke, TextEdit, Ui,
};
use std::time::{Duration, Instant};

pub enum ExplorerAction {
    Back,
}

#[derive(Clone, Copy, Eq, PartialEq)]
enum RightColumn {
    Terminal,
    Chat,
}

pub struct ExplorerPanel {
    selected_chromosome: Option<u32>,
    stream: TerminalStream,
    right_column: RightColumn,
    chat_history: Vec<ChatTurn>,
    chat_seeded: bool,
    chat_input: String,
    pending_reply: Option<Receiver<String>>,
    deep_dive: DeepDivePanel,
}

impl ExplorerPanel {
    pub fn new(species: &Species, now: Instant) -> Self {
        Self {
            selected_chromosome: None,
            stream: TerminalStream::new(&species.id, StreamFocus::Global, now),
            right_column: RightColumn::Terminal,
            chat_history: Vec::new(),
            chat_seeded: false,
            chat_input: String::new(),
            pending_reply: None,
            deep_dive: DeepDivePanel::default(),
        }
    }

    pub fn close_overlays(&mut self) -> bool {
        if self.deep_dive.is_open() {
            self.deep_dive.close();
            return true;
        }
        if matches!(self.right_column, RightColumn::Chat) {
            self.right_column = RightColumn::Terminal;
            return true;
        }
        false
    }

    pub fn render(
        &mut self,
        ctx: &Context,
        ui: &mut Ui,
        species: &Species,
        level: &mut EducationalLevel,
    ) -> Option<ExplorerAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.heading(RichText::new(&species.scientific_name).italics().size(20.0));
            ui.label(
                RichText::new(&species.common_name).color(Color32::from_rgb(168, 162, 158)),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(UI_STRINGS.get("btn_back")).clicked() {
                    action = Some(ExplorerAction::Back);
                }
                if let Some(new_level) = widgets::level_toggle(ui, *level) {
                    *level = new_level;
                }
            });
        });
        ui.separator();

        let right_width = (ui.available_width() * 0.34).clamp(220.0, 360.0);
        ui.horizontal_top(|ui| {
            let left_width = ui.available_width() - right_width - 12.0;
            ui.vertical(|ui| {
                ui.set_width(left_width);
                self.render_map_column(ui, species, *level);
            });
            ui.separator();
            ui.vertical(|ui| {
                ui.set_width(ui.available_width());
                match self.right_column {
                    RightColumn::Terminal => self.render_terminal(ctx, ui, *level),
                    RightColumn::Chat => self.render_chat(ui, species, *level),
                }
            });
        });

        if let Some(id) = self.selected_chromosome {
            if let Some(chromosome) = species.chromosomes.iter().find(|c| c.id == id) {
                self.deep_dive.render(ctx, species, chromosome, *level);
            }
        }
        action
    }

    fn render_map_column(&mut self, ui: &mut Ui, species: &Species, level: EducationalLevel) {
        ScrollArea::vertical()
            .id_salt("map_column")
            .show(ui, |ui| {
                if let Some(clicked) = karyotype_map(ui, species, level, self.selected_chromosome)
                {
                    self.select_chromosome(species, clicked);
                }
                ui.add_space(4.0);
                widgets::function_legend(ui);

                if let Some(synopsis) = &species.technical_synopsis {
                    ui.add_space(4.0);
                    ui.horizontal_wrapped(|ui| {
                        for (caption, value) in [
                            ("ASSEMBLY", &synopsis.base_pairs),
                            ("GENES", &synopsis.gene_count),
                            ("GC", &synopsis.gc_content),
                            ("STRAIN", &synopsis.strain_ref),
                        ] {
                            ui.label(
                                RichText::new(caption)
                                    .size(9.0)
                                    .color(Color32::from_rgb(120, 113, 108)),
                            );
                            ui.label(RichText::new(value).monospace().size(11.0));
                            ui.add_space(10.0);
                        }
                    });
                    if level == EducationalLevel::Advanced {
                        ui.label(
                            RichText::new(&synopsis.assembly_note)
                                .size(10.0)
                                .color(Color32::from_rgb(120, 113, 108)),
                        );
                    }
                }

                ui.add_space(8.0);
                if let Some(id) = self.selected_chromosome {
                    if let Some(chromosome) = species.chromosomes.iter().find(|c| c.id == id) {
                        self.render_active_unit(ui, species, chromosome, level);
                    }
                }
            });
    }

    fn render_active_unit(
        &mut self,
        ui: &mut Ui,
        species: &Species,
        chromosome: &Chromosome,
        level: EducationalLevel,
    ) {
        let mut open_chat = false;
        let mut open_dive = false;
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("ACTIVE UNIT")
                        .size(10.0)
                        .color(Color32::from_rgb(120, 113, 108)),
                );
                ui.label(
                    RichText::new(format!("CHR {}", chromosome.id))
                        .monospace()
                        .color(Color32::from_rgb(251, 191, 36)),
                );
                ui.label(
                    RichText::new(chromosome.primary_function.display_name())
                        .size(11.0)
                        .color(chromosome.primary_function.color()),
                );
            });
            ui.heading(chromosome.label_for_level(level));
            ui.label(RichText::new(&chromosome.description).size(12.0));
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("AI Hub").clicked() {
                    open_chat = true;
                }
                if ui.button("Deep Dive").clicked() {
                    open_dive = true;
                }
            });
        });
        if open_chat {
            self.open_chat(species, chromosome, level);
        }
        if open_dive {
            self.deep_dive.open_for(chromosome);
        }
    }

    fn select_chromosome(&mut self, species: &Species, id: u32) {
        if self.selected_chromosome == Some(id) {
            return;
        }
        self.selected_chromosome = Some(id);
        self.stream
            .configure(&species.id, StreamFocus::Chromosome(id), Instant::now());
    }

    fn render_terminal(&mut self, ctx: &Context, ui: &mut Ui, level: EducationalLevel) {
        self.stream.tick(Instant::now(), &mut rand::rng());
        ctx.request_repaint_after(self.stream.tick_interval());

        ui.label(
            RichText::new(self.stream.status_line())
                .monospace()
                .size(11.0)
                .color(Color32::from_rgb(251, 191, 36)),
        );
        ui.separator();

        let footer_height = 24.0;
        let feed_height = (ui.available_height() - footer_height).max(80.0);
        ScrollArea::vertical()
            .id_salt("terminal_feed")
            .max_height(feed_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in self.stream.lines() {
                    let color = if line.starts_with(">>") || line.starts_with(">seq") {
                        Color32::from_rgb(251, 191, 36)
                    } else {
                        Color32::from_rgb(52, 211, 153)
                    };
                    ui.label(RichText::new(line).monospace().size(11.0).color(color));
                }
            });

        ui.separator();
        let (mode, target) = self.stream.footer_status(level);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(mode)
                    .size(9.0)
                    .color(Color32::from_rgb(120, 113, 108)),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(target)
                        .monospace()
                        .size(9.0)
                        .color(Color32::from_rgb(120, 113, 108)),
                );
            });
        });
    }

    fn open_chat(&mut self, species: &Species, chromosome: &Chromosome, level: EducationalLevel) {
        self.right_column = RightColumn::Chat;
        self.chat_history.clear();
        self.chat_input.clear();
        self.chat_seeded = true;
        self.chat_history
            .push(ChatTurn::user(assistant::opening_prompt(
                species, chromosome, level,
            )));
        self.pending_reply = Some(assistant::spawn_consult(
            assistant::system_instruction(species, chromosome, level),
            self.chat_history.clone(),
        ));
    }

    fn send_chat(&mut self, species: &Species, level: EducationalLevel) {
        let text = self.chat_input.trim().to_string();
        if text.is_empty() || self.pending_reply.is_some() {
            return;
        }
        let Some(chromosome) = self
            .selected_chromosome
            .and_then(|id| species.chromosomes.iter().find(|c| c.id == id))
        else {
            return;
        };
        self.chat_input.clear();
        self.chat_history.push(ChatTurn::user(text));
        self.pending_reply = Some(assistant::spawn_consult(
            assistant::system_instruction(species, chromosome, level),
            self.chat_history.clone(),
        ));
    }

    fn render_chat(&mut self, ui: &mut Ui, species: &Species, level: EducationalLevel) {
        if let Some(receiver) = &self.pending_reply {
            if let Ok(reply) = receiver.try_recv() {
                self.chat_history.push(ChatTurn::model(reply));
                self.pending_reply = None;
            } else {
                // Keep polling while the worker is out consulting.
                ui.ctx().request_repaint_after(Duration::from_millis(120));
            }
        }

        ui.horizontal(|ui| {
            ui.label(
                RichText::new("GENOMIC AI HUB")
                    .monospace()
                    .size(11.0)
                    .color(Color32::from_rgb(14, 165, 233)),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(UI_STRINGS.get("chat_return")).clicked() {
                    self.right_column = RightColumn::Terminal;
                    self.pending_reply = None;
                }
            });
        });
        ui.separator();

        let input_height = 30.0;
        let feed_height = (ui.available_height() - input_height).max(80.0);
        ScrollArea::vertical()
            .id_salt("chat_feed")
            .max_height(feed_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                let skip = if self.chat_seeded { 1 } else { 0 };
                for turn in self.chat_history.iter().skip(skip) {
                    match turn.role {
                        ChatRole::User => {
                            ui.label(
                                RichText::new(format!("You: {}", turn.text))
                                    .size(12.0)
                                    .color(Color32::from_rgb(231, 229, 228)),
                            );
                        }
                        ChatRole::Model => {
                            ui.label(
                                RichText::new(&turn.text)
                                    .size(12.0)
                                    .color(Color32::from_rgb(52, 211, 153)),
                            );
                        }
                    }
                    ui.add_space(6.0);
                }
                if self.pending_reply.is_some() {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(
                            RichText::new("Consulting genomic hub...")
                                .size(11.0)
                                .color(Color32::from_rgb(120, 113, 108)),
                        );
                    });
                }
            });

        ui.separator();
        ui.horizontal(|ui| {
            let send_label = UI_STRINGS.get("chat_send");
            let button_width = 50.0;
            let edit = TextEdit::singleline(&mut self.chat_input)
                .hint_text("Ask about this chromosome...")
                .desired_width(ui.available_width() - button_width - 8.0);
            let response = ui.add(edit);
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            if ui.button(send_label).clicked() || submitted {
                self.send_chat(species, level);
            }
        });
    }
}

const MAX_BAR_DESIGN_HEIGHT: f32 = 180.0 + 4.0 * 30.0;

fn bar_design_height(id: u32) -> f32 {
    180.0 + (id % 5) as f32 * 30.0
}

/// Paints one vertical bar per chromosome and returns a clicked id.
fn karyotype_map(
    ui: &mut Ui,
    species: &Species,
    level: EducationalLevel,
    selected: Option<u32>,
) -> Option<u32> {
    let count = species.chromosomes.len().max(1);
    let height = (ui.available_height() * 0.52).clamp(180.0, 320.0);
    let width = ui.available_width();
    let (response, painter) = ui.allocate_painter(vec2(width, height), Sense::click());
    let rect = response.rect;

    let label_band = 26.0;
    let baseline = rect.bottom() - 18.0;
    let scale = (baseline - rect.top() - label_band) / MAX_BAR_DESIGN_HEIGHT;
    let slot = rect.width() / count as f32;
    let bar_width = (slot * 0.55).clamp(8.0, 30.0);

    let mut clicked = None;
    let hover_pos = response.hover_pos();
    let click_pos = response.interact_pointer_pos().filter(|_| response.clicked());

    for (index, chromosome) in species.chromosomes.iter().enumerate() {
        let center_x = rect.left() + slot * (index as f32 + 0.5);
        let bar_height = bar_design_height(chromosome.id) * scale;
        let bar = Rect::from_min_max(
            pos2(center_x - bar_width / 2.0, baseline - bar_height),
            pos2(center_x + bar_width / 2.0, baseline),
        );
        let hit = bar.expand2(vec2(slot * 0.2, 6.0));

        if selected == Some(chromosome.id) {
            painter.rect_filled(bar.expand(2.5), 5.0, Color32::from_rgb(251, 191, 36));
        }
        painter.rect_filled(bar, 4.0, chromosome.primary_function.color());
        if chromosome.is_highlight {
            let band = Rect::from_min_max(
                bar.min,
                pos2(bar.right(), bar.top() + bar.height() * 0.25),
            );
            painter.rect_filled(band, 4.0, Color32::from_rgba_unmultiplied(255, 255, 255, 70));
        }
        let mid_y = bar.top() + bar.height() * 0.5;
        painter.line_segment(
            [pos2(bar.left(), mid_y), pos2(bar.right(), mid_y)],
            Stroke::new(1.5, Color32::from_rgba_unmultiplied(0, 0, 0, 110)),
        );
        painter.text(
            pos2(center_x, baseline + 4.0),
            Align2::CENTER_TOP,
            format!("{}", chromosome.id),
            FontId::monospace(10.0),
            Color32::from_rgb(120, 113, 108),
        );

        if hover_pos.is_some_and(|pos| hit.contains(pos)) {
            painter.text(
                pos2(rect.center().x, rect.top() + 4.0),
                Align2::CENTER_TOP,
                format!(
                    "CHR {}  {}",
                    chromosome.id,
                    chromosome.label_for_level(level)
                ),
                FontId::proportional(13.0),
                Color32::from_rgb(231, 229, 228),
            );
        }
        if click_pos.is_some_and(|pos| hit.contains(pos)) {
            clicked = Some(chromosome.id);
        }
    }
    clicked
}
