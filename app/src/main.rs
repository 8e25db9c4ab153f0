mod controls;

use std::time::Instant;

use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{ColorImage, TextureHandle};
use noisetex::{NoiseParameters, ScalarField, Simplex2D, generate_field, save_png, to_rgba8};

use crate::controls::ParamInputs;

const DEFAULT_SIZE: usize = 512;

struct NoiseApp {
    // current settings, replaced wholesale on every Generate
    params: NoiseParameters,
    inputs: ParamInputs,

    // noise source seed
    seed: u64,
    // draw a fresh seed for every generation
    reseed: bool,
    // output is size×size
    size: usize,

    // set when a generation is due; the Generate button is disabled meanwhile
    generating: bool,

    // generated texture
    texture: Option<TextureHandle>,
    // last generated field, kept for Save PNG
    last_field: Option<ScalarField>,

    // status line
    status_message: String,
}

impl Default for NoiseApp {
    fn default() -> Self {
        let params = NoiseParameters::default();
        Self {
            inputs: ParamInputs::from_params(&params),
            params,
            seed: 2025,
            reseed: true,
            size: DEFAULT_SIZE,
            // generate on startup
            generating: true,
            texture: None,
            last_field: None,
            status_message: String::new(),
        }
    }
}

impl NoiseApp {
    fn generate(&mut self, ctx: &egui::Context) {
        let start = Instant::now();

        if self.reseed {
            self.seed = rand::random();
        }
        // fresh source per generation
        let noise = Simplex2D::new(self.seed);

        match generate_field(self.size, self.size, &noise, &self.params) {
            Ok(field) => {
                let rgba = to_rgba8(&field);
                let image = ColorImage::from_rgba_unmultiplied([field.width(), field.height()], &rgba);
                self.texture = Some(ctx.load_texture("noise", image, egui::TextureOptions::NEAREST));
                self.last_field = Some(field);

                let ms = start.elapsed().as_secs_f32() * 1000.0;
                self.status_message = format!("Generated in {:.2} ms (seed {})", ms, self.seed);
                tracing::info!(seed = self.seed, size = self.size, params = ?self.params, ms, "generated");
            }
            Err(e) => {
                tracing::error!("generation failed: {}", e);
                self.status_message = format!("Generation failed: {}", e);
            }
        }
        ctx.request_repaint();
    }

    fn save(&mut self) {
        let Some(field) = &self.last_field else {
            self.status_message = "Nothing generated yet".into();
            return;
        };
        let filename = format!("fbm_{}.png", self.seed);
        self.status_message = match save_png(field, &filename) {
            Ok(()) => format!("Saved {}", filename),
            Err(e) => {
                tracing::error!("saving {} failed: {}", filename, e);
                format!("Save failed: {}", e)
            }
        };
    }
}

fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::TextEdit::singleline(value).desired_width(80.0));
    });
}

impl App for NoiseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // A click only schedules work; it runs on the next frame, once the
        // disabled button has been shown
        let due = self.generating;

        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("fBm Noise");
            ui.separator();

            text_row(ui, "Octaves", &mut self.inputs.octaves);
            text_row(ui, "Persistence", &mut self.inputs.persistence);
            text_row(ui, "Lacunarity", &mut self.inputs.lacunarity);
            text_row(ui, "Exponent", &mut self.inputs.exponent);

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Resolution:");
                let size_label = format!("{}×{}", self.size, self.size);
                ui.add(egui::Slider::new(&mut self.size, 64..=1024).text(size_label));
            });

            ui.label("Seed");
            ui.add_enabled(!self.reseed, egui::DragValue::new(&mut self.seed).speed(1.0));
            ui.checkbox(&mut self.reseed, "New seed every generation");

            ui.separator();

            let clicked = ui
                .add_enabled(!self.generating, egui::Button::new("Generate"))
                .clicked();
            if clicked {
                // Unusable inputs keep their previous values
                self.params = self.inputs.resolve(&self.params);
                self.inputs = ParamInputs::from_params(&self.params);
                self.generating = true;
                ctx.request_repaint();
            }

            if ui.button("Save PNG…").clicked() {
                self.save();
            }

            ui.separator();
            if self.generating {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Generating…");
                });
            } else {
                ui.label(&self.status_message);
            }
        });

        // central display
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(tex) = &self.texture {
                ui.image((tex.id(), tex.size_vec2()));
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("Click “Generate” to start");
                });
            }
        });

        if due {
            self.generate(ctx);
            self.generating = false;
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().init();

    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    run_native(
        "fBm Noise Texture",
        opts,
        Box::new(|_cc| Ok(Box::new(NoiseApp::default()))),
    )
}
