//! Desktop form, result dialog, and chart wiring.
//!
//! The form constructs a [`MachineReading`] value, calls the pure
//! prediction engine, and renders the returned record. Parse and inference
//! errors surface in the error dialog and leave the prior result and chart
//! untouched.

use crate::alert::{AlarmTone, AlertSink};
use crate::config::AppConfig;
use crate::metrics::SessionMetrics;
use crate::models::inference::PredictionEngine;
use crate::types::outcome::Prediction;
use crate::types::reading::{MachineReading, FEATURE_COUNT, FIELD_LABELS};
use crate::ui::chart;
use anyhow::{anyhow, Result};
use eframe::egui;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub const APP_TITLE: &str = "Machine Failure Prediction";

pub struct PredictorApp {
    engine: PredictionEngine,
    alert: Box<dyn AlertSink>,
    metrics: Arc<SessionMetrics>,
    alarm_tone: AlarmTone,

    /// Raw form fields, one per feature
    fields: [String; FEATURE_COUNT],
    /// Last successful prediction; drives the result dialog and the chart
    last_prediction: Option<Prediction>,
    /// Pending error dialog text
    error_message: Option<String>,
    show_result: bool,
}

impl PredictorApp {
    pub fn new(
        engine: PredictionEngine,
        alert: Box<dyn AlertSink>,
        metrics: Arc<SessionMetrics>,
        config: &AppConfig,
    ) -> Self {
        Self {
            engine,
            alert,
            metrics,
            alarm_tone: AlarmTone::from(&config.alarm),
            fields: std::array::from_fn(|_| String::new()),
            last_prediction: None,
            error_message: None,
            show_result: false,
        }
    }

    /// Handle the Predict trigger: parse the form, run the engine, render.
    ///
    /// Single recovery boundary: a parse failure or a prediction-time fault
    /// lands in the error dialog without committing any partial state.
    fn on_predict(&mut self) {
        let started = Instant::now();

        let outcome = MachineReading::parse_fields(&self.fields)
            .and_then(|reading| self.engine.predict(&reading));

        match outcome {
            Ok(prediction) => {
                self.metrics.record_prediction(&prediction, started.elapsed());

                if prediction.requires_alarm() {
                    self.alert.alarm(self.alarm_tone);
                    self.metrics.record_alarm();
                }

                info!(
                    prediction_id = %prediction.prediction_id,
                    category = prediction.category.label(),
                    combined = prediction.combined,
                    "Prediction served"
                );

                self.last_prediction = Some(prediction);
                self.show_result = true;
                self.error_message = None;
            }
            Err(e) => {
                warn!(error = %e, "Prediction request rejected");
                self.error_message = Some(format!("Invalid input: {e:#}"));
            }
        }
    }

    fn form(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("reading_form")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for (label, field) in FIELD_LABELS.iter().zip(self.fields.iter_mut()) {
                    ui.label(*label);
                    ui.text_edit_singleline(field);
                    ui.end_row();
                }
            });
    }

    fn result_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_result {
            return;
        }

        let mut open = true;
        if let Some(prediction) = &self.last_prediction {
            egui::Window::new("Prediction Result")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(prediction.summary());
                });
        }
        if !open {
            self.show_result = false;
        }
    }

    fn error_dialog(&mut self, ctx: &egui::Context) {
        let mut open = true;
        let mut dismissed = false;

        if let Some(message) = &self.error_message {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
        }
        if !open || dismissed {
            self.error_message = None;
        }
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(APP_TITLE);
            ui.add_space(8.0);

            self.form(ui);

            ui.add_space(10.0);
            if ui.button("Predict").clicked() {
                self.on_predict();
            }

            if let Some(prediction) = &self.last_prediction {
                ui.add_space(14.0);
                chart::draw(ui, prediction.category);
            }
        });

        self.result_dialog(ctx);
        self.error_dialog(ctx);
    }
}

/// Run the desk UI until the window closes.
pub fn run(config: &AppConfig, app: PredictorApp) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(APP_TITLE, options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow!("UI event loop failed: {e}"))
}
