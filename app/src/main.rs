use eframe::egui;

mod app;
mod config;
mod scenes;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let config = config::load_config();
    eframe::run_native(
        "Scene Transition Editor",
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size(config.window_size),
            ..Default::default()
        },
        Box::new(|cc| Ok(Box::new(app::TransitionEditorApp::new(cc, config)))),
    )
}
