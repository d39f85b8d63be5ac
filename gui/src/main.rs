use eframe::egui;
use eframe::egui::{Color32, Key, Rect, ScrollArea, Sense, Stroke, Ui, Vec2};
use eframe::run_native;
use life::controller::{Playback, SimulationController};
use life::grid::CellState::Alive;
use std::time::{Duration, Instant};

const GRID_WIDTH: usize = 118;
const GRID_HEIGHT: usize = 75;
const CELL_SIZE: f32 = 10.0;
const CANVAS_COLOR: Color32 = Color32::BLACK;
const ACTIVE_COLOR: Color32 = Color32::WHITE;
const GRIDLINE_COLOR: Color32 = Color32::from_gray(90);
const DEFAULT_SECS_PER_TICK: f32 = 0.1;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 880.0]),
        ..Default::default()
    };

    run_native(
        "Conway's Game of Life",
        options,
        Box::new(|cc| Ok(Box::new(LifeApp::new(cc)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run the ui: {err}"))
}

struct LifeApp {
    controller: SimulationController,
    last_advance: Instant,
    secs_per_tick: f32,
    show_gridlines: bool,
}

impl LifeApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut controller = SimulationController::new(GRID_WIDTH, GRID_HEIGHT);
        controller.set_interval(Duration::from_secs_f32(DEFAULT_SECS_PER_TICK));
        Self {
            controller,
            last_advance: Instant::now(),
            secs_per_tick: DEFAULT_SECS_PER_TICK,
            show_gridlines: true,
        }
    }

    fn running(&self) -> bool {
        self.controller.playback() == Playback::Running
    }

    fn toggle_playback(&mut self) {
        let report = if self.running() {
            self.controller.pause()
        } else {
            // Restart the tick clock so the first advance waits a full interval.
            self.last_advance = Instant::now();
            self.controller.play()
        };
        log::info!("playback is now {:?}", report.playback);
    }

    fn create_grid(&mut self, ui: &mut Ui) {
        let size = egui::vec2(
            CELL_SIZE * GRID_WIDTH as f32,
            CELL_SIZE * GRID_HEIGHT as f32,
        );
        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, CANVAS_COLOR);

        // Draw each live cell as a filled rectangle at its position
        for change in self.controller.grid().snapshot() {
            if change.state == Alive {
                let pos =
                    origin + egui::vec2(change.x as f32 * CELL_SIZE, change.y as f32 * CELL_SIZE);
                painter.rect_filled(
                    Rect::from_min_size(pos, Vec2::splat(CELL_SIZE)),
                    0.0,
                    ACTIVE_COLOR,
                );
            }
        }

        // Gridlines hide during playback so the motion reads cleanly.
        if self.show_gridlines && !self.running() {
            let stroke = Stroke::new(1.0, GRIDLINE_COLOR);
            for x in 0..=GRID_WIDTH {
                let x = origin.x + x as f32 * CELL_SIZE;
                painter.line_segment(
                    [egui::pos2(x, origin.y), egui::pos2(x, origin.y + size.y)],
                    stroke,
                );
            }
            for y in 0..=GRID_HEIGHT {
                let y = origin.y + y as f32 * CELL_SIZE;
                painter.line_segment(
                    [egui::pos2(origin.x, y), egui::pos2(origin.x + size.x, y)],
                    stroke,
                );
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let x = ((pos.x - origin.x) / CELL_SIZE) as usize;
                let y = ((pos.y - origin.y) / CELL_SIZE) as usize;
                if x < GRID_WIDTH && y < GRID_HEIGHT {
                    if let Err(err) = self.controller.toggle_cell(x, y) {
                        log::debug!("toggle ({x}, {y}) rejected: {err}");
                    }
                }
            }
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(Key::Space)) {
            self.toggle_playback();
        }

        if self.running() {
            if self.last_advance.elapsed() >= self.controller.interval() {
                if self.controller.tick().is_some() {
                    self.last_advance = Instant::now();
                }
            }
            // Keep repainting so the next due tick fires promptly.
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::both().show(ui, |ui| {
                ui.heading("Conway's Game of Life");

                ui.horizontal(|ui| {
                    let label = if self.running() { "PAUSE" } else { "PLAY" };
                    if ui.button(label).clicked() {
                        self.toggle_playback();
                    }
                    if ui.button("ONE TICK").clicked() {
                        if let Err(err) = self.controller.step() {
                            log::debug!("step rejected: {err}");
                        }
                    }
                    if ui.button("CLEAR").clicked() {
                        if let Err(err) = self.controller.clear() {
                            log::debug!("clear rejected: {err}");
                        }
                    }
                    if ui.button("RANDOMIZE").clicked() {
                        if let Err(err) = self.controller.randomize() {
                            log::debug!("randomize rejected: {err}");
                        }
                    }
                    ui.separator();
                    ui.label(format!("Generations: {}", self.controller.generation()));
                    ui.separator();
                    ui.label(format!(
                        "Live cells: {}",
                        self.controller.grid().live_count()
                    ));
                });

                ui.horizontal(|ui| {
                    ui.label("Sec. per tick");
                    if ui
                        .add(egui::Slider::new(&mut self.secs_per_tick, 0.0..=1.0))
                        .changed()
                    {
                        self.controller
                            .set_interval(Duration::from_secs_f32(self.secs_per_tick));
                    }
                    ui.checkbox(&mut self.show_gridlines, "Gridlines");
                });

                self.create_grid(ui);
            });
        });
    }
}
