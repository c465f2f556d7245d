//! Interactive dendrogram viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a random neuron, the display
//! configuration and the dendrogram figure of the selected neurite, and
//! implements [`eframe::App`] to draw it.

use eframe::App;
use glam::Vec2;
use rand::rng;
use tracing::{error, info, warn};

use dendro_core::{
    config::{DendrogramConfig, Rotation},
    figure::{Bounds, DendrogramFigure, dendrogram},
    neuron::{Neuron, Soma},
    synth::{SynthParams, random_neuron},
};

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The morphology: a [`Neuron`] grown from [`SynthParams`].
/// - The figure of the selected neurite, rebuilt whenever the
///   [`DendrogramConfig`] or the selection changes.
/// - Camera state (pan/zoom) and the eframe/egui callbacks.
///
/// ### Fields
/// - `neuron` - Current neuron.
/// - `selected` - Index of the neurite shown.
/// - `cfg` - Diameter and rotation options.
/// - `params` - Parameters for growing new neurons.
/// - `n_neurites` - Number of neurites of the next grown neuron.
///
/// - `rng` - Random number generator used for growing neurons.
///
/// - `figure` - Figure of the selected neurite, if it could be laid out.
/// - `status` - Last layout error or width fallback, shown in the status bar.
///
/// - `zoom` - Zoom factor for world-to-screen coordinate mapping.
/// - `pan` - Screen-space pan offset in pixels.
/// - `line_scale` - Pixel width of a unit-width line.
/// - `needs_fit` - Refit the camera to the figure on the next frame.
pub struct Viewer {
    neuron: Neuron,
    selected: usize,
    cfg: DendrogramConfig,
    params: SynthParams,
    n_neurites: usize,

    rng: rand::rngs::ThreadRng,

    figure: Option<DendrogramFigure>,
    status: Option<String>,

    zoom: f32,
    pan: egui::Vec2,
    line_scale: f32,
    needs_fit: bool,
}

impl Viewer {
    /// Creates a viewer showing the first neurite of a fresh random neuron.
    pub fn new() -> Self {
        let mut viewer = Self {
            neuron: Neuron::new(
                Soma {
                    center: glam::Vec3::ZERO,
                    radius: 1.0,
                },
                Vec::new(),
            ),
            selected: 0,
            cfg: DendrogramConfig::default(),
            params: SynthParams::default(),
            n_neurites: 4,
            rng: rng(),
            figure: None,
            status: None,
            zoom: 3.0,
            pan: egui::vec2(0.0, 0.0),
            line_scale: 1.5,
            needs_fit: true,
        };
        viewer.regenerate();
        viewer
    }

    /// Grows a new neuron with the current parameters and shows its first
    /// neurite.
    fn regenerate(&mut self) {
        match random_neuron(self.n_neurites, &self.params, &mut self.rng) {
            Ok(neuron) => {
                info!(neurites = neuron.neurites.len(), "grew new neuron");
                self.neuron = neuron;
                self.selected = 0;
                self.rebuild();
                self.needs_fit = true;
            }
            Err(e) => {
                error!(%e, "could not grow neuron");
                self.status = Some(e.to_string());
            }
        }
    }

    /// Recomputes the figure of the selected neurite.
    fn rebuild(&mut self) {
        self.status = None;
        let Some(neurite) = self.neuron.neurites.get(self.selected) else {
            self.figure = None;
            return;
        };

        match dendrogram(neurite.tree(), &self.cfg) {
            Ok(fig) => {
                if let Some(w) = fig.warning {
                    warn!(%w, "line widths");
                    self.status = Some(w.to_string());
                }
                self.figure = Some(fig);
            }
            Err(e) => {
                error!(%e, "dendrogram layout failed");
                self.status = Some(e.to_string());
                self.figure = None;
            }
        }
    }

    /// Sets zoom and pan so that `bounds` fills most of `rect`.
    fn fit_view(&mut self, bounds: Bounds, rect: egui::Rect) {
        let size = bounds.size().max(Vec2::splat(1e-3));
        let zoom_x = rect.width() / size.x;
        let zoom_y = rect.height() / size.y;
        self.zoom = (zoom_x.min(zoom_y) * 0.9).clamp(0.01, 100.0);

        let c = bounds.center();
        self.pan = egui::vec2(-c.x * self.zoom, c.y * self.zoom);
    }

    /// Converts a world-space position to screen-space.
    ///
    /// World coordinates are scaled by `zoom`, offset by `pan`, and then
    /// centered inside the given `rect`. The y-axis is flipped so that
    /// positive y goes up in world space.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + p.x * self.zoom + self.pan.x,
            center.y - p.y * self.zoom + self.pan.y,
        )
    }

    /// Converts a screen-space position back to world-space.
    ///
    /// This is the inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (center.y - p.y + self.pan.y) / self.zoom;
        Vec2::new(x, y)
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel (regenerate, fit, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("New neuron").clicked() {
                    self.regenerate();
                }

                if ui.button("Fit").clicked() {
                    self.needs_fit = true;
                }

                ui.separator();
                ui.add(
                    egui::Slider::new(&mut self.zoom, 0.01..=100.0)
                        .logarithmic(true)
                        .text("Zoom"),
                );
                ui.add(egui::Slider::new(&mut self.line_scale, 0.5..=8.0).text("Line width"));
            });
        });
    }

    /// Builds the bottom status bar (neurite, line count, warnings).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(neurite) = self.neuron.neurites.get(self.selected) {
                    ui.label(format!("sections = {}", neurite.tree().len()));
                    ui.label(format!("points = {}", neurite.points().len()));
                }
                ui.label(format!(
                    "lines = {}",
                    self.figure.as_ref().map_or(0, |f| f.lines.len())
                ));
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.colored_label(egui::Color32::YELLOW, status);
                }
            });
        });
    }

    /// Builds the right-hand panel with display options and growth parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Dendrogram");

                let mut changed = false;

                ui.separator();
                let selected_text = self
                    .neuron
                    .neurites
                    .get(self.selected)
                    .map_or("none".to_owned(), |n| {
                        format!("{} ({})", self.selected, n.kind.label())
                    });
                egui::ComboBox::from_label("Neurite")
                    .selected_text(selected_text)
                    .show_ui(ui, |ui| {
                        for (i, n) in self.neuron.neurites.iter().enumerate() {
                            let text = format!("{i} ({})", n.kind.label());
                            changed |= ui.selectable_value(&mut self.selected, i, text).changed();
                        }
                    });

                changed |= ui
                    .checkbox(&mut self.cfg.show_diameters, "Show diameters")
                    .changed();

                ui.label("Rotation");
                ui.horizontal(|ui| {
                    for r in Rotation::ALL {
                        changed |= ui
                            .selectable_value(&mut self.cfg.rotation, r, r.label())
                            .changed();
                    }
                });

                if changed {
                    self.rebuild();
                    self.needs_fit = true;
                }

                ui.separator();
                ui.heading("Growth");
                Self::labeled_drag_usize(ui, "neurites:", &mut self.n_neurites, 1..=12, 1.0);
                Self::labeled_drag_usize(ui, "max_depth:", &mut self.params.max_depth, 0..=10, 1.0);
                Self::labeled_drag_usize(
                    ui,
                    "points/section:",
                    &mut self.params.points_per_section,
                    2..=20,
                    1.0,
                );
                Self::labeled_drag_f32(ui, "step_len:", &mut self.params.step_len, 0.1..=50.0, 0.2);
                Self::labeled_drag_f32(ui, "radius:", &mut self.params.radius, 0.0..=10.0, 0.05);
                Self::labeled_drag_f32(ui, "taper:", &mut self.params.taper, 0.0..=1.5, 0.01);
                Self::labeled_drag_f32(ui, "jitter:", &mut self.params.jitter, 0.0..=2.0, 0.01);
                ui.horizontal(|ui| {
                    ui.label("branch_prob:");
                    ui.add(
                        egui::DragValue::new(&mut self.params.branch_prob)
                            .range(0.0..=1.0)
                            .speed(0.01),
                    );
                });

                ui.separator();
                if ui.button("Reset growth to default").clicked() {
                    self.params = SynthParams::default();
                }
            });
    }

    /// Builds the central panel where the dendrogram is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            if self.needs_fit {
                if let Some(bounds) = self.figure.as_ref().and_then(|f| f.bounds) {
                    self.fit_view(bounds, rect);
                }
                self.needs_fit = false;
            }

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.01, 100.0);

                let screen_after = self.world_to_screen(world_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            let Some(fig) = &self.figure else {
                return;
            };

            let color = ui.visuals().strong_text_color();
            for (line, &w) in fig.lines.iter().zip(&fig.widths) {
                let a = self.world_to_screen(line[0], rect);
                let b = self.world_to_screen(line[1], rect);
                painter.line_segment([a, b], egui::Stroke::new(w * self.line_scale, color));
            }

            let font = egui::FontId::proportional(14.0);
            painter.text(
                rect.center_top() + egui::vec2(0.0, 8.0),
                egui::Align2::CENTER_TOP,
                fig.title,
                font.clone(),
                color,
            );
            painter.text(
                rect.center_bottom() - egui::vec2(0.0, 8.0),
                egui::Align2::CENTER_BOTTOM,
                fig.xlabel,
                font.clone(),
                color,
            );
            painter.text(
                rect.left_center() + egui::vec2(8.0, 0.0),
                egui::Align2::LEFT_CENTER,
                fig.ylabel,
                font,
                color,
            );
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
