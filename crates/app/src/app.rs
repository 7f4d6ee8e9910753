use std::time::{Duration, Instant};

use simcore::{DeckConfig, Model, TelemetryConfig, TelemetrySample, Trace, TransportMode};
use transport::{Readout, Simulator};

use crate::{deck_view, plots};

pub struct TapePilotApp {
    // Simulation
    sim: Simulator,
    config: DeckConfig,
    last_frame: Instant,

    // Front panel
    friction_pct: u32, // 0..=100
    jitter_pct: u32,   // 0..=100
    window_s: f64,

    // Plotting
    trace: Trace,
}

impl TapePilotApp {
    pub fn new(config: DeckConfig) -> Self {
        let window_s = config.telemetry.window_s;
        let mut app = Self {
            sim: Simulator::new(&config),
            config,
            last_frame: Instant::now(),
            friction_pct: 0,
            jitter_pct: 0,
            window_s,
            trace: Trace::new(window_s),
        };

        // Seed first sample
        app.sample();
        app
    }

    fn reset(&mut self) {
        self.sim.reset();
        self.trace.clear();
        self.sample();
    }

    fn update_sim(&mut self) {
        let now = Instant::now();
        let wall_dt = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;

        self.sim.set_faults(percent_to_unit(self.friction_pct), percent_to_unit(self.jitter_pct));
        self.sim.step(frame_dt(wall_dt, self.config.ui.max_frame_dt));
        self.sample();
    }

    fn sample(&mut self) {
        self.trace.push(TelemetrySample::from_state(self.sim.time(), self.sim.state()));
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Transport");
        let current = self.sim.state().transport;
        egui::Grid::new("transport_buttons")
            .num_columns(2)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for (i, mode) in TransportMode::ALL.into_iter().enumerate() {
                    let button = egui::Button::new(mode.label())
                        .selected(mode == current)
                        .min_size(egui::vec2(96.0, 28.0));
                    if ui.add(button).clicked() {
                        self.sim.set_transport(mode);
                    }
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });

        ui.add_space(6.0);
        if ui.button("Reset").clicked() {
            self.reset();
        }

        ui.separator();
        ui.heading("Faults (live)");
        ui.label("Tape friction");
        ui.add(egui::Slider::new(&mut self.friction_pct, 0..=100).suffix(" %"));
        ui.label("Encoder jitter");
        ui.add(egui::Slider::new(&mut self.jitter_pct, 0..=100).suffix(" %"));

        ui.separator();
        ui.label("Trace window");
        if ui
            .add(egui::Slider::new(
                &mut self.window_s,
                TelemetryConfig::MIN_WINDOW_S..=TelemetryConfig::MAX_WINDOW_S,
            ).suffix(" s"))
            .changed()
        {
            self.trace.set_window_seconds(self.window_s);
        }

        ui.separator();
        ui.heading("Telemetry");
        ui.label(egui::RichText::new(Readout(self.sim.state()).to_string()).monospace());
    }
}

/// Simulation step for one frame. A stalled window (drag, minimize) should not
/// produce one giant step.
fn frame_dt(wall_dt: f64, max_frame_dt: f64) -> f64 {
    if !wall_dt.is_finite() || wall_dt <= 0.0 {
        return 0.0;
    }
    wall_dt.min(max_frame_dt)
}

/// Slider percent to a fault level in [0, 1]
fn percent_to_unit(pct: u32) -> f64 {
    f64::from(pct.min(100)) / 100.0
}

impl eframe::App for TapePilotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_sim();

        egui::SidePanel::right("controls")
            .resizable(false)
            .min_width(240.0)
            .show(ctx, |ui| self.controls(ui));

        egui::TopBottomPanel::bottom("telemetry")
            .resizable(true)
            .default_height(240.0)
            .show(ctx, |ui| plots::show(ui, &self.trace));

        egui::CentralPanel::default().show(ctx, |ui| {
            deck_view::show(ui, self.sim.state());
        });

        // Request another frame to keep the deck spinning
        ctx.request_repaint_after(Duration::from_millis(self.config.ui.tick_ms));
    }
}
