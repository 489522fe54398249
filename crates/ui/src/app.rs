use std::sync::{Arc, Mutex};

use web_time::Instant;

use eframe::egui;
use simview_core::{InteractionController, SceneModel, Viewport, compose_frame};
use simview_protocol::{ControlIntent, PixelPos, ScreenSize, ViewConfig};

use crate::renderer;

/// One egui scroll point ≈ half a browser wheel-delta unit; the zoom
/// formula was tuned against browser deltas.
const WHEEL_DELTA_PER_POINT: f64 = 2.0;

/// Search algorithms the simulator exposes, in sidebar order.
const ALGORITHMS: &[&str] = &[
    "a_star_search",
    "best_first_search",
    "breadth_first_search",
    "depth_first_search",
    "dynamic_a_star",
    "rrt_search",
    "rrt_star_search",
    "dynamic_rrt_search",
    "informed_rrt_star_search",
];

/// Cloneable handle the transport uses to push scene snapshots into the
/// viewer. Only the latest undrawn snapshot is kept: if delivery outpaces
/// rendering, a newer document simply supersedes the pending one.
#[derive(Clone, Default)]
pub struct SceneFeed {
    pending: Arc<Mutex<Option<Vec<u8>>>>,
}

impl SceneFeed {
    pub fn push(&self, snapshot: Vec<u8>) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        *pending = Some(snapshot);
    }

    fn take(&self) -> Option<Vec<u8>> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.take()
    }
}

/// Sink for outbound control intents; the control channel transport
/// installs one. Intents emitted with no sink installed are only logged.
pub type ControlSink = Box<dyn Fn(&ControlIntent) + Send>;

/// Main viewer application: owns the transform, the scene model, and the
/// interaction state machine, and repaints continuously.
pub struct ViewerApp {
    config: ViewConfig,
    viewport: Viewport,
    scene: SceneModel,
    interaction: InteractionController,
    feed: SceneFeed,
    sink: Option<ControlSink>,
    show_obstacle_ids: bool,
    selected_algorithm: usize,
    last_error: Option<String>,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        let viewport = Viewport::new(&config, ScreenSize::new(800.0, 600.0));
        Self {
            config,
            viewport,
            scene: SceneModel::new(),
            interaction: InteractionController::new(),
            feed: SceneFeed::default(),
            sink: None,
            show_obstacle_ids: false,
            selected_algorithm: 0,
            last_error: None,
        }
    }

    /// Handle for the push channel delivering scene snapshots.
    pub fn feed(&self) -> SceneFeed {
        self.feed.clone()
    }

    /// Install the outbound control channel.
    pub fn with_control_sink(mut self, sink: ControlSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Explicit teardown: cancels any armed click deadline so nothing is
    /// emitted after the view closes.
    pub fn teardown(&mut self) {
        self.interaction.teardown();
    }

    fn emit(&self, intent: ControlIntent) {
        match serde_json::to_string(&intent) {
            Ok(json) => log::info!("control intent: {json}"),
            Err(err) => log::warn!("unserializable control intent: {err}"),
        }
        if let Some(sink) = &self.sink {
            sink(&intent);
        }
    }

    fn drain_feed(&mut self) {
        let Some(snapshot) = self.feed.take() else {
            return;
        };
        match self.scene.apply_snapshot(&snapshot) {
            Ok(_) => self.last_error = None,
            Err(err) => self.last_error = Some(err.to_string()),
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("simview");
            ui.separator();

            if ui.button("⌂ Home").clicked() {
                self.viewport.home();
            }

            ui.separator();

            let before = self.selected_algorithm;
            egui::ComboBox::from_label("algorithm")
                .selected_text(ALGORITHMS[self.selected_algorithm])
                .show_ui(ui, |ui| {
                    for (i, name) in ALGORITHMS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_algorithm, i, *name);
                    }
                });
            if self.selected_algorithm != before {
                self.emit(InteractionController::select_algorithm(
                    ALGORITHMS[self.selected_algorithm],
                ));
            }

            ui.separator();
            ui.checkbox(&mut self.show_obstacle_ids, "Show obstacle ids");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{:.0} px/{}", self.viewport.scale(), self.config.unit));
            });
        });
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(err) = &self.last_error {
                ui.colored_label(egui::Color32::RED, err);
            } else {
                let scene = self.scene.current();
                ui.label(format!("{} shapes", scene.len()));
            }
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let canvas = ui.available_rect_before_wrap();
        self.viewport.set_screen_size(ScreenSize::new(
            f64::from(canvas.width()),
            f64::from(canvas.height()),
        ));

        let response = ui.allocate_rect(canvas, egui::Sense::click_and_drag());
        let now = Instant::now();

        // The debounce deadline is polled every frame; a fired deadline is
        // the single-click intent.
        if let Some(intent) = self.interaction.poll(now) {
            self.emit(intent);
        }

        let (pressed, released, down, latest) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.primary_down(),
                i.pointer.latest_pos(),
            )
        });
        if let Some(pos) = latest {
            let pixel = PixelPos::new(
                f64::from(pos.x - canvas.left()),
                f64::from(pos.y - canvas.top()),
            );
            if pressed && canvas.contains(pos) {
                self.interaction.on_press(&self.viewport, pixel);
            }
            if down {
                self.interaction.on_move(&mut self.viewport, pixel);
            }
            if released
                && let Some(intent) = self.interaction.on_release(&self.viewport, pixel, now)
            {
                self.emit(intent);
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta);
            if scroll.y.abs() > 0.0 {
                self.interaction
                    .on_wheel(&mut self.viewport, -f64::from(scroll.y) * WHEEL_DELTA_PER_POINT);
            }
        }

        let commands = compose_frame(
            &self.viewport,
            &self.scene.current(),
            &self.config,
            self.show_obstacle_ids,
        );
        let painter = ui.painter_at(canvas);
        renderer::execute_commands(&painter, canvas, &commands);
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_feed();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.status_bar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.canvas(ui));

        // Self-perpetuating frame loop: each pass re-requests the next
        // display-refresh callback until the host tears the view down.
        ctx.request_repaint();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.teardown();
    }
}
