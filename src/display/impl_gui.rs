use crate::display::interface::FrameDisplay;
use crate::frame::mat_to_rgb_image;
use egui::{CentralPanel, ColorImage, Context, Event, TextureHandle, TextureOptions, ViewportCommand};
use opencv::core::Mat;
use std::sync::{Arc, Mutex};

struct StillImageWindow {
    image: ColorImage,
    texture: Option<TextureHandle>,
    pressed: Arc<Mutex<Option<char>>>,
}

/// First key of the frame, with non-text keys reported as NUL.
fn pressed_key(events: &[Event]) -> Option<char> {
    events.iter().find_map(|event| match event {
        Event::Text(text) => text.chars().next(),
        Event::Key { pressed: true, .. } => Some('\0'),
        _ => None,
    })
}

impl eframe::App for StillImageWindow {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let texture = self.texture.get_or_insert_with(|| {
            ctx.load_texture("detection", self.image.clone(), TextureOptions::default())
        });

        CentralPanel::default().show(ctx, |ui| {
            ui.image((texture.id(), texture.size_vec2()));
        });

        if let Some(key) = ctx.input(|i| pressed_key(&i.events)) {
            if let Ok(mut pressed) = self.pressed.lock() {
                *pressed = Some(key);
            }
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }
    }
}

/// Native window for a single annotated image. `show` blocks until a key is
/// pressed or the window is closed.
pub struct DisplayGui {
    title: String,
}

impl DisplayGui {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }
}

impl FrameDisplay for DisplayGui {
    fn show(&mut self, frame: &Mat) -> Result<Option<char>, Box<dyn std::error::Error + Send + Sync>> {
        let rgb = mat_to_rgb_image(frame)?;
        let (width, height) = rgb.dimensions();
        let image = ColorImage::from_rgb([width as usize, height as usize], rgb.as_raw());

        let pressed = Arc::new(Mutex::new(None));
        let window = StillImageWindow {
            image,
            texture: None,
            pressed: pressed.clone(),
        };

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([width as f32, height as f32])
                .with_title(self.title.clone()),
            ..Default::default()
        };

        eframe::run_native(&self.title, options, Box::new(|_cc| Box::new(window)))
            .map_err(|e| format!("Display window failed: {}", e))?;

        let key = *pressed.lock().map_err(|_| "key state poisoned")?;
        Ok(key)
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}
