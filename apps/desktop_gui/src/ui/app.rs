use std::time::{Duration, Instant};

use arboard::Clipboard;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{ClipboardSink, InteractionController, ScrollTarget};
use crate::ui::theme::Palette;
use crate::ui::widgets::{card_entrance_alpha, cards_animating, idea_card, toast_banner};

/// System clipboard, opened per copy so a missing display server only fails
/// the copy action.
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
        clipboard.set_text(text).map_err(|err| err.to_string())
    }
}

pub struct StudioApp {
    controller: InteractionController,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,
    clipboard: Box<dyn ClipboardSink>,
}

impl StudioApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, server_url: String) -> Self {
        Self::with_clipboard(cmd_tx, ui_rx, server_url, Box::new(SystemClipboard))
    }

    pub fn with_clipboard(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url: String,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        Self {
            controller: InteractionController::new(),
            cmd_tx,
            ui_rx,
            server_url,
            clipboard,
        }
    }

    /// Topic submission and card selection wait for the in-flight request.
    /// Copy and Start Over stay available.
    fn generation_inputs_enabled(&self) -> bool {
        !self.controller.is_loading()
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.apply(event);
        }
        self.controller.expire_toast(Instant::now());
    }

    fn submit_topic(&mut self) {
        let topic = self.controller.topic_input.clone();
        if let Ok(cmd) = self.controller.submit_topic(&topic) {
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.controller);
        }
    }

    fn select_card(&mut self, index: usize) {
        match self.controller.select_card(index) {
            Ok(cmd) => dispatch_backend_command(&self.cmd_tx, cmd, &mut self.controller),
            Err(rejected) => tracing::debug!(%rejected, "card click ignored"),
        }
    }

    fn copy_script(&mut self) {
        if let Err(err) = self.controller.copy_script(self.clipboard.as_mut()) {
            tracing::debug!(detail = err.message(), "copy failed");
        }
    }

    fn start_over(&mut self) {
        self.controller.reset();
    }

    fn show_workspace(&mut self, ctx: &egui::Context, palette: &Palette) {
        let scroll = self.controller.take_scroll_request();
        let inputs_enabled = self.generation_inputs_enabled();

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut area = egui::ScrollArea::vertical().auto_shrink([false, false]);
            if scroll == Some(ScrollTarget::Top) {
                area = area.vertical_scroll_offset(0.0);
            }
            area.show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(720.0);
                    ui.add_enabled_ui(inputs_enabled, |ui| {
                        self.show_topic_form(ui);
                        if self.controller.ideas_visible() {
                            ui.add_space(18.0);
                            self.show_ideas(ui, palette, scroll);
                        }
                    });
                    if self.controller.script_visible() {
                        ui.add_space(18.0);
                        self.show_script(ui, scroll);
                    }
                });
            });
        });
    }

    fn show_topic_form(&mut self, ui: &mut egui::Ui) {
        ui.add_space(24.0);
        ui.heading("Script Studio");
        ui.weak(format!("Connected to {}", self.server_url));
        ui.add_space(12.0);

        let mut submit = false;
        ui.horizontal(|ui| {
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.controller.topic_input)
                    .hint_text("Enter a topic, e.g. space travel")
                    .desired_width(ui.available_width() - 140.0),
            );
            if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            if ui.button("Generate Ideas").clicked() {
                submit = true;
            }
        });
        if submit {
            self.submit_topic();
        }
    }

    fn show_ideas(&mut self, ui: &mut egui::Ui, palette: &Palette, scroll: Option<ScrollTarget>) {
        let heading = ui.heading("Pick an idea");
        if scroll == Some(ScrollTarget::Ideas) {
            heading.scroll_to_me(Some(egui::Align::Center));
        }
        ui.add_space(8.0);

        let elapsed = self
            .controller
            .ideas_revealed_at()
            .map(|at| at.elapsed())
            .unwrap_or(Duration::MAX);
        let mut clicked = None;
        for card in self.controller.idea_cards() {
            let alpha = card_entrance_alpha(card.index, elapsed);
            if idea_card(ui, &card, alpha, palette).clicked() {
                clicked = Some(card.index);
            }
            ui.add_space(6.0);
        }
        if let Some(index) = clicked {
            self.select_card(index);
        }
    }

    fn show_script(&mut self, ui: &mut egui::Ui, scroll: Option<ScrollTarget>) {
        let heading = ui.heading("Your script");
        if scroll == Some(ScrollTarget::Script) {
            heading.scroll_to_me(Some(egui::Align::TOP));
        }
        ui.add_space(8.0);

        let mut text = self.controller.session().script.as_str();
        ui.add(
            egui::TextEdit::multiline(&mut text)
                .font(egui::TextStyle::Monospace)
                .desired_width(f32::INFINITY)
                .desired_rows(16),
        );
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button("Copy Script").clicked() {
                self.copy_script();
            }
            if ui.button("Start Over").clicked() {
                self.start_over();
            }
        });
    }

    fn show_loading_overlay(&self, ctx: &egui::Context, palette: &Palette) {
        let Some(label) = self.controller.loading_label() else {
            return;
        };
        ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("loading_overlay_backdrop"),
        ))
        .rect_filled(ctx.screen_rect(), 0.0, palette.overlay);

        egui::Area::new(egui::Id::new("loading_overlay"))
            .order(egui::Order::Tooltip)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .interactable(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add(egui::Spinner::new().size(36.0));
                    ui.add_space(10.0);
                    ui.label(egui::RichText::new(label).size(18.0).color(egui::Color32::WHITE));
                });
            });
    }

    fn show_toast(&self, ctx: &egui::Context, palette: &Palette) {
        let Some(toast) = self.controller.toast() else {
            return;
        };
        egui::Area::new(egui::Id::new("toast"))
            .order(egui::Order::Tooltip)
            .anchor(egui::Align2::RIGHT_BOTTOM, [-20.0, -20.0])
            .interactable(false)
            .show(ctx, |ui| toast_banner(ui, toast, palette));
    }

    fn needs_fast_repaint(&self) -> bool {
        let animating = self
            .controller
            .ideas_revealed_at()
            .is_some_and(|at| cards_animating(self.controller.session().ideas.len(), at.elapsed()));
        animating || self.controller.is_loading()
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let palette = Palette::for_visuals(&ctx.style().visuals);
        self.show_workspace(ctx, &palette);
        self.show_loading_overlay(ctx, &palette);
        self.show_toast(ctx, &palette);

        if self.needs_fast_repaint() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
