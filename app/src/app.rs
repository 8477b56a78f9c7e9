use eframe::egui::{self, Visuals};
use log::info;
use node_editor::host;

use crate::config::{self, AppConfig};
use crate::scenes::SceneGraph;

pub struct TransitionEditorApp {
    graph: SceneGraph,
    config: AppConfig,
    new_scene_name: String,
    saved_on_close: bool,
}

impl TransitionEditorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        cc.egui_ctx.set_visuals(Visuals::dark());
        let graph = SceneGraph::demo(config.editor.clone());
        cc.egui_ctx.request_repaint();
        Self {
            graph,
            config,
            new_scene_name: String::new(),
            saved_on_close: false,
        }
    }

    fn add_scene(&mut self) {
        let name = self.new_scene_name.trim();
        if name.is_empty() {
            return;
        }
        // Stagger new scenes around the middle of the view.
        let state = self.graph.editor().state();
        let offset = (self.graph.scene_count() % 8) as f32 * 20.0;
        let position = state.screen_to_graph(state.area().center()) + egui::vec2(offset, offset);
        let name = name.to_string();
        self.graph.add_scene(&name, position);
        info!("Added scene {}", name);
        self.new_scene_name.clear();
    }

    fn save_settings(&mut self, ctx: &egui::Context) {
        self.config.editor = self.graph.editor().state().settings.clone();
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.config.window_size = [rect.width(), rect.height()];
        }
        config::save_config(&self.config);
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let response = ui.text_edit_singleline(&mut self.new_scene_name);
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Add Scene").clicked() || submitted {
                self.add_scene();
            }

            ui.separator();
            let settings = &mut self.graph.editor_mut().state_mut().settings;
            ui.checkbox(&mut settings.show_grid, "Grid");
            if ui.button("Reset View").clicked() {
                self.graph.editor_mut().state_mut().camera = Default::default();
            }
            if ui.button("Save Settings").clicked() {
                self.save_settings(ui.ctx());
            }

            ui.separator();
            let zoom = self.graph.editor().state().camera.zoom;
            ui.label(format!("Zoom {:.0}%", zoom * 100.0));
            if self.graph.is_connecting() {
                ui.label("Click the source scene, then the destination. Esc cancels.");
            }
        });
    }
}

impl eframe::App for TransitionEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                host::show_editor(ui, self.graph.editor_mut());
            });

        if self.graph.apply_menu_commands() > 0 {
            ctx.request_repaint();
        }

        if ctx.input(|i| i.viewport().close_requested()) && !self.saved_on_close {
            self.saved_on_close = true;
            self.save_settings(ctx);
        }
    }
}
