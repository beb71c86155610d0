mod backend_bridge;
mod controller;
mod ui;

use std::sync::Arc;

use activity_core::{
    load_settings, ActivityController, AttemptCollector, AttemptReporter, MissingCollector,
    SequenceModel, Settings,
};
use anyhow::{anyhow, Context, Result};
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::{backend_bridge::runtime::BackendRuntime, ui::ActivityApp};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings().unwrap_or_else(|err| {
        tracing::error!("falling back to default settings: {err}");
        Settings::default()
    });
    let model = settings.sequence_model().unwrap_or_else(|err| {
        tracing::error!("falling back to the built-in steps: {err}");
        SequenceModel::registration_flow()
    });
    let collector: Arc<dyn AttemptCollector> = settings.collector().unwrap_or_else(|err| {
        tracing::error!("attempts will not be recorded: {err}");
        Arc::new(MissingCollector)
    });

    let backend = BackendRuntime::launch().context("failed to build report runtime")?;
    let reporter = AttemptReporter::new(collector, backend.handle());
    let controller = ActivityController::new(model, reporter);
    let title = settings.activity_title.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([720.0, 820.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Step Ordering Activity",
        options,
        Box::new(move |_cc| Ok(Box::new(ActivityApp::new(controller, title, backend)))),
    )
    .map_err(|err| anyhow!("activity window failed: {err}"))
}
