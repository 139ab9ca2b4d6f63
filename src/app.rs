use crate::{
    controller::{CaptureMode, Controller, WINDOW_TITLE},
    hotkeys::HotkeyListener,
    job::ClickJob,
    platform::EnigoPointer,
    session::{Session, READOUT_INTERVAL},
    settings::SettingsStore,
};
use eframe::egui::{self, Color32};
use parking_lot::Mutex;
use rand::{rngs::StdRng, SeedableRng};
use std::{sync::Arc, time::Instant};

// -------------- UI State --------------
pub struct ClickerApp {
    session: Arc<Mutex<Session<EnigoPointer>>>,
    job: ClickJob,
    shown_title: String,
}

impl ClickerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, store: Option<SettingsStore>) -> Self {
        let mut controller = Controller::new(EnigoPointer::new());
        if let Some(store) = &store {
            controller.load(store);
        }

        let session = Arc::new(Mutex::new(Session::new(
            controller,
            store,
            StdRng::from_entropy(),
            Instant::now(),
        )));

        let ctx = cc.egui_ctx.clone();
        let job = ClickJob::spawn(Arc::clone(&session), HotkeyListener::spawn(), move || {
            ctx.request_repaint()
        });

        Self { session, job, shown_title: WINDOW_TITLE.to_string() }
    }

    fn sync_title(&mut self, ctx: &egui::Context, title: String) {
        if title != self.shown_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.shown_title = title;
        }
    }
}

fn draw_form(ui: &mut egui::Ui, session: &mut Session<EnigoPointer>) {
    let (cur_x, cur_y) = session.readout();
    let controller = &mut session.controller;
    let mode = controller.mode();

    egui::Grid::new("settings").num_columns(4).spacing([12.0, 6.0]).show(ui, |ui| {
        ui.label("Current X:");
        ui.monospace(cur_x.to_string());
        ui.label("Current Y:");
        ui.monospace(cur_y.to_string());
        ui.end_row();

        let form = &mut controller.form;
        ui.label("Min Delay:");
        text_field(ui, &mut form.min_delay);
        ui.label("Max Delay:");
        text_field(ui, &mut form.max_delay);
        ui.end_row();

        ui.label("Width:");
        text_field(ui, &mut form.jitter_width);
        ui.label("Height:");
        text_field(ui, &mut form.jitter_height);
        ui.end_row();

        ui.label("Start X:");
        text_field(ui, &mut form.mark_x);
        ui.label("Start Y:");
        text_field(ui, &mut form.mark_y);
        ui.end_row();

        ui.label("Toggle Key:");
        let toggle_key = controller.settings().toggle_key.clone();
        if ui.selectable_label(mode == CaptureMode::AwaitingToggleKey, toggle_key).clicked() {
            controller.arm_toggle_rebind();
        }
        ui.label("");
        if ui.button("Update").clicked() {
            controller.commit_form();
        }
        ui.end_row();

        ui.label("Mark X,Y Key:");
        let mark_key = controller.settings().mark_key.clone();
        if ui.selectable_label(mode == CaptureMode::AwaitingMarkKey, mark_key).clicked() {
            controller.arm_mark_rebind();
        }
        ui.end_row();
    });

    ui.add_space(6.0);
    ui.colored_label(Color32::RED, controller.error());

    ui.horizontal(|ui| {
        ui.label("Turn on/off");
        if ui.button(controller.button_label()).clicked() {
            controller.toggle();
        }
    });
}

fn text_field(ui: &mut egui::Ui, text: &mut String) {
    ui.add(egui::TextEdit::singleline(text).desired_width(100.0));
}

impl eframe::App for ClickerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let title = {
            let mut session = self.session.lock();
            egui::CentralPanel::default().show(ctx, |ui| draw_form(ui, &mut session));

            if ctx.input(|i| i.viewport().close_requested()) && session.persist() {
                self.job.stop();
            }
            session.controller.title()
        };
        self.sync_title(ctx, title);

        // clicks and hotkeys run in the job; this only refreshes the readout
        ctx.request_repaint_after(READOUT_INTERVAL);
    }
}
