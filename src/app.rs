use crate::bridge::{BridgeError, BridgeMessage, HostBridge};
use crate::history::History;
use crate::input::{InputEvent, InputHandler};
use crate::renderer::CanvasSurface;
use crate::state::{AppEvent, Model, Settings};

/// Bridge stand-in used before `new()` wires the real port.
struct DisconnectedBridge;

impl HostBridge for DisconnectedBridge {
    fn request_save(&self) -> Result<(), BridgeError> {
        Err(BridgeError::PortClosed)
    }
    fn request_load(&self, _encoded: &str) -> Result<(), BridgeError> {
        Err(BridgeError::PortClosed)
    }
    fn poll(&self) -> Vec<BridgeMessage> {
        Vec::new()
    }
}

static DISCONNECTED: DisconnectedBridge = DisconnectedBridge;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct KaleidoApp {
    settings: Settings,
    history: History,
    // Everything below is rebuilt at startup.
    #[serde(skip)]
    model: Model,
    #[serde(skip)]
    surface: CanvasSurface,
    #[serde(skip)]
    input: InputHandler,
    #[serde(skip)]
    bridge: Option<Box<dyn HostBridge>>,
    #[serde(skip)]
    sections_text: String,
    #[serde(skip)]
    width_text: String,
}

impl Default for KaleidoApp {
    fn default() -> Self {
        let settings = Settings::default();
        let history = History::new();
        Self {
            model: Model::new(settings.clone(), history.clone(), (800.0, 800.0)),
            surface: CanvasSurface::new(),
            input: InputHandler::new(),
            bridge: None,
            sections_text: settings.sections.to_string(),
            width_text: settings.brush_width.to_string(),
            settings,
            history,
        }
    }
}

impl KaleidoApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, bridge: Box<dyn HostBridge>) -> Self {
        let mut app: KaleidoApp = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        app.model = Model::new(app.settings.clone(), app.history.clone(), (800.0, 800.0));
        app.sections_text = app.settings.sections.to_string();
        app.width_text = app.settings.brush_width.to_string();
        app.bridge = Some(bridge);
        app
    }

    fn controls_panel(&mut self, ui: &mut egui::Ui, events: &mut Vec<AppEvent>) {
        ui.heading("Kaleidoscope");
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Sections:");
            let response = ui.text_edit_singleline(&mut self.sections_text);
            if response.lost_focus() {
                events.push(AppEvent::SectionsInput(self.sections_text.clone()));
            }
        });

        ui.horizontal(|ui| {
            ui.label("Brush size:");
            let response = ui.text_edit_singleline(&mut self.width_text);
            if response.lost_focus() {
                events.push(AppEvent::BrushWidthInput(self.width_text.clone()));
            }
        });

        ui.horizontal(|ui| {
            ui.label("Color:");
            let mut color = self.model.settings().brush_color;
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut color,
                egui::color_picker::Alpha::Opaque,
            )
            .changed()
            {
                events.push(AppEvent::SetBrushColor(color));
            }
        });

        let mut draw_outside = self.model.settings().draw_outside;
        if ui
            .checkbox(&mut draw_outside, "Keep drawing outside canvas")
            .changed()
        {
            events.push(AppEvent::SetDrawOutside(draw_outside));
        }

        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("Clear").clicked() {
                events.push(AppEvent::Clear);
            }
            if ui.button("Save").clicked() {
                events.push(AppEvent::RequestSave);
            }
        });

        ui.separator();
        ui.label("History");
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (i, entry) in self.model.history().iter().enumerate() {
                let label = format!("Snapshot {}", self.model.history().len() - i);
                if ui.selectable_label(false, label).clicked() {
                    events.push(AppEvent::LoadEntry(entry.id));
                }
            }
        });
    }
}

impl eframe::App for KaleidoApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let (settings, history) = self.model.persisted();
        self.settings = settings;
        self.history = history;
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events: Vec<AppEvent> = Vec::new();

        egui::SidePanel::left("controls").show(ctx, |ui| {
            self.controls_panel(ui, &mut events);
        });

        let canvas = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let available_size = ui.available_size();
                let (response, painter) = ui.allocate_painter(available_size, egui::Sense::drag());
                (response.rect, painter)
            })
            .inner;
        let (rect, painter) = canvas;

        self.input.set_canvas_rect(rect);
        events.push(AppEvent::CanvasResized(
            rect.width() as f64,
            rect.height() as f64,
        ));
        for input_event in self.input.process_input(ctx) {
            events.push(match input_event {
                InputEvent::PointerDown(p) => AppEvent::PointerDown(p),
                InputEvent::PointerMove(p) => AppEvent::PointerMove(p),
                InputEvent::PointerUp(p) => AppEvent::PointerUp(p),
                InputEvent::PointerLeave(p) => AppEvent::PointerLeave(p),
            });
        }

        let bridge = self.bridge.take();
        {
            let bridge_ref: &dyn HostBridge = bridge.as_deref().unwrap_or(&DISCONNECTED);
            for event in events.drain(..) {
                self.model.apply(event, bridge_ref);
            }
            self.model.drain_bridge(bridge_ref);
        }
        self.bridge = bridge;

        // The animation tick: flush this tick's commands to the surface and
        // repaint, then ask for the next tick.
        let flushed = self.model.tick();
        self.surface.flush(flushed);
        self.surface.paint(&painter, rect);
        ctx.request_repaint();
    }
}
