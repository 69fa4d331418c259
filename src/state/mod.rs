mod settings;

pub use settings::{Settings, parse_brush_width, parse_sections};

use egui::Color32;
use log::warn;
use uuid::Uuid;

use crate::bridge::{BridgeMessage, HostBridge};
use crate::command::CommandBuffer;
use crate::engine::Engine;
use crate::geometry::Point;
use crate::history::History;

/// Everything the update loop reacts to: pointer motion, form controls, and
/// host-bridge acknowledgments. Positions are canvas-relative.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    PointerLeave(Point),
    CanvasResized(f64, f64),
    /// Raw text from the section-count field; bad input is ignored.
    SectionsInput(String),
    /// Raw text from the brush-width field; bad input is ignored.
    BrushWidthInput(String),
    SetBrushColor(Color32),
    SetDrawOutside(bool),
    Clear,
    RequestSave,
    LoadEntry(Uuid),
    Saved(String),
}

/// The application model: drawing engine plus snapshot history, driven by a
/// single synchronous update function.
pub struct Model {
    settings: Settings,
    engine: Engine,
    history: History,
}

impl Default for Model {
    fn default() -> Self {
        Model::new(Settings::default(), History::new(), (800.0, 800.0))
    }
}

impl Model {
    pub fn new(settings: Settings, history: History, canvas_size: (f64, f64)) -> Self {
        let mut engine = Engine::new(settings.sections, canvas_size, settings.brush_style());
        engine.set_draw_outside(settings.draw_outside);
        Self {
            settings,
            engine,
            history,
        }
    }

    /// Applies one event. All transitions are synchronous; the only outward
    /// effect is a fire-and-forget bridge send, where failure is logged and
    /// otherwise ignored.
    pub fn apply(&mut self, event: AppEvent, bridge: &dyn HostBridge) {
        match event {
            AppEvent::PointerDown(p) => self.engine.pointer_down(p),
            AppEvent::PointerMove(p) => self.engine.pointer_move(p),
            AppEvent::PointerUp(p) => self.engine.pointer_up(p),
            AppEvent::PointerLeave(p) => self.engine.pointer_leave(p),
            AppEvent::CanvasResized(w, h) => self.engine.resize((w, h)),
            AppEvent::SectionsInput(text) => {
                if let Some(sections) = parse_sections(&text) {
                    self.settings.sections = sections;
                    self.engine.set_sections(sections);
                }
            }
            AppEvent::BrushWidthInput(text) => {
                if let Some(width) = parse_brush_width(&text) {
                    self.settings.brush_width = width;
                    self.engine.set_brush_width(width);
                }
            }
            AppEvent::SetBrushColor(color) => {
                self.settings.brush_color = color;
                self.engine.set_brush_color(color);
            }
            AppEvent::SetDrawOutside(allow) => {
                self.settings.draw_outside = allow;
                self.engine.set_draw_outside(allow);
            }
            AppEvent::Clear => self.engine.clear(),
            AppEvent::RequestSave => {
                if let Err(err) = bridge.request_save() {
                    warn!("save request failed: {err}");
                }
            }
            AppEvent::LoadEntry(id) => {
                if let Some(entry) = self.history.get(id) {
                    if let Err(err) = bridge.request_load(&entry.encoded) {
                        warn!("load request failed: {err}");
                    }
                }
            }
            AppEvent::Saved(encoded) => {
                self.history.record(encoded);
            }
        }
    }

    /// Drains the bridge and applies any host acknowledgments.
    pub fn drain_bridge(&mut self, bridge: &dyn HostBridge) {
        for message in bridge.poll() {
            match message {
                BridgeMessage::Saved(encoded) => self.apply(AppEvent::Saved(encoded), bridge),
                // SAVE/LOAD travel the other way; a host echoing them back
                // is misbehaving, not fatal.
                other => warn!("unexpected message from host: {other:?}"),
            }
        }
    }

    /// The animation tick: swaps the double buffer and hands back the newly
    /// visible commands for the display surface.
    pub fn tick(&mut self) -> &CommandBuffer {
        self.engine.tick()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Snapshot of persisted state for eframe storage.
    pub fn persisted(&self) -> (Settings, History) {
        (self.settings.clone(), self.history.clone())
    }
}
