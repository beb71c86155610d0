use std::collections::HashMap;

use activity_core::{ActivityController, ActivityPhase, Feedback, InputEvent, TileBounds};
use eframe::egui;
use shared::domain::{Step, StepId};

use crate::{
    backend_bridge::runtime::BackendRuntime,
    controller::{
        events::{gestures_for_frame, PointerFrame, TileSignals},
        orchestration::{dispatch_input, start_activity},
    },
};

const SUCCESS_COLOR: egui::Color32 = egui::Color32::from_rgb(46, 125, 50);
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(198, 40, 40);

pub struct ActivityApp {
    controller: ActivityController,
    title: String,
    name_draft: String,
    email_draft: String,
    start_notice: Option<String>,
    tile_bounds: HashMap<StepId, TileBounds>,
    // Keeps report tasks alive while the window is open.
    _backend: BackendRuntime,
}

impl ActivityApp {
    pub fn new(controller: ActivityController, title: String, backend: BackendRuntime) -> Self {
        Self {
            controller,
            title,
            name_draft: String::new(),
            email_draft: String::new(),
            start_notice: None,
            tile_bounds: HashMap::new(),
            _backend: backend,
        }
    }

    fn show_start_form(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(40.0);
            ui.vertical_centered(|ui| {
                ui.set_max_width(420.0);
                ui.heading(&self.title);
                ui.weak("Enter your details to begin.");
                ui.add_space(12.0);

                ui.label("Name");
                let name_resp = ui.add(
                    egui::TextEdit::singleline(&mut self.name_draft)
                        .hint_text("Your name")
                        .desired_width(f32::INFINITY),
                );
                ui.label("Email");
                let email_resp = ui.add(
                    egui::TextEdit::singleline(&mut self.email_draft)
                        .hint_text("you@example.com")
                        .desired_width(f32::INFINITY),
                );

                if let Some(notice) = &self.start_notice {
                    ui.colored_label(ERROR_COLOR, notice);
                }

                ui.add_space(8.0);
                let enter_pressed = ctx.input(|i| i.key_pressed(egui::Key::Enter))
                    && (name_resp.lost_focus() || email_resp.lost_focus());
                let start_btn = egui::Button::new(egui::RichText::new("Start activity").strong())
                    .min_size(egui::vec2(ui.available_width(), 36.0));
                if ui.add(start_btn).clicked() || enter_pressed {
                    self.start_notice =
                        start_activity(&mut self.controller, &self.name_draft, &self.email_draft);
                }
            });
        });
    }

    fn show_activity(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.title);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("End session").clicked() {
                        self.controller.end_session();
                        self.tile_bounds.clear();
                    }
                    if ui.button("Shuffle again").clicked() {
                        if let Err(err) = self.controller.restart() {
                            tracing::warn!("restart refused: {err}");
                        }
                    }
                });
            });
            if let Some(identity) = self.controller.identity() {
                ui.weak(format!("Signed in as {} <{}>", identity.name(), identity.email()));
            }
            ui.label("Drag the steps into the correct order, then submit.");
            ui.add_space(8.0);

            if self.controller.phase() == ActivityPhase::NotStarted {
                return;
            }
            self.show_tiles(ui);

            ui.add_space(12.0);
            if ui
                .add(egui::Button::new(egui::RichText::new("Submit").strong()))
                .clicked()
            {
                dispatch_input(&mut self.controller, InputEvent::Submit, &self.tile_bounds);
            }
            if let Some(feedback) = self.controller.feedback() {
                show_feedback(ui, feedback);
            }
        });
    }

    fn show_tiles(&mut self, ui: &mut egui::Ui) {
        let tiles: Vec<Step> = self.controller.surface().tiles().to_vec();
        let active = self.controller.surface().active();
        let mut signals = Vec::with_capacity(tiles.len());
        self.tile_bounds.clear();

        for step in &tiles {
            let is_active = active == Some(step.id);
            let fill = if is_active {
                ui.visuals().selection.bg_fill
            } else {
                ui.visuals().faint_bg_color
            };
            let frame = egui::Frame::group(ui.style())
                .fill(fill)
                .inner_margin(egui::Margin::same(10));
            let inner = frame.show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(&step.label);
            });
            let rect = inner.response.rect;
            let response = ui
                .interact(
                    rect,
                    egui::Id::new(("activity_tile", step.id.0)),
                    egui::Sense::drag(),
                )
                .on_hover_cursor(egui::CursorIcon::Grab);

            self.tile_bounds
                .insert(step.id, TileBounds::new(rect.top(), rect.height()));
            signals.push(TileSignals {
                id: step.id,
                drag_started: response.drag_started(),
                drag_stopped: response.drag_stopped(),
            });
        }

        let pointer = ui.ctx().input(|i| PointerFrame {
            y: i.pointer.interact_pos().map(|pos| pos.y),
            primary_down: i.pointer.primary_down(),
            released: i.pointer.any_released(),
        });
        let mut repaint = false;
        for event in gestures_for_frame(&signals, active, pointer) {
            repaint |= dispatch_input(&mut self.controller, event, &self.tile_bounds);
        }
        if repaint {
            ui.ctx().request_repaint();
        }
    }
}

fn show_feedback(ui: &mut egui::Ui, feedback: Feedback) {
    let color = if feedback.outcome.is_correct() {
        SUCCESS_COLOR
    } else {
        ERROR_COLOR
    };
    ui.add_space(8.0);
    egui::Frame::new()
        .stroke(egui::Stroke::new(1.0, color))
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.colored_label(color, feedback.message());
        });
}

impl eframe::App for ActivityApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.controller.phase() {
            ActivityPhase::NotStarted => self.show_start_form(ctx),
            ActivityPhase::InProgress | ActivityPhase::Submitted => self.show_activity(ctx),
        }
    }
}
