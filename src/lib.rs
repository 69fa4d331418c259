#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod bridge;
pub mod command;
pub mod engine;
pub mod geometry;
pub mod history;
pub mod input;
pub mod renderer;
pub mod state;

pub use app::KaleidoApp;
pub use bridge::{BridgeMessage, ChannelBridge, HostBridge, HostPort};
pub use command::{BrushStyle, CommandBuffer, DrawCommand, FrameBuffers};
pub use engine::Engine;
pub use geometry::{Frame, Point};
pub use history::History;
pub use input::{InputEvent, InputHandler};
pub use renderer::CanvasSurface;
pub use state::{AppEvent, Model, Settings};
