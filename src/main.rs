mod app;
mod clicker;
mod controller;
mod hotkeys;
mod job;
mod platform;
mod session;
mod settings;
mod timer;
mod validate;

#[cfg(test)]
mod tests;

use eframe::egui;
use settings::SettingsStore;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = match SettingsStore::per_user() {
        Ok(store) => {
            tracing::info!("settings directory: {}", store.dir().display());
            Some(store)
        }
        Err(e) => {
            tracing::error!("settings will not be persisted: {e:#}");
            None
        }
    };

    let mut opts = eframe::NativeOptions::default();
    opts.viewport.inner_size = Some(egui::vec2(440.0, 240.0));
    opts.viewport.resizable = Some(true);
    opts.follow_system_theme = true;

    tracing::info!("starting");
    eframe::run_native(
        controller::WINDOW_TITLE,
        opts,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Box::new(app::ClickerApp::new(cc, store))
        }),
    )
}
