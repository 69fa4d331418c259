#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::thread;
use std::time::Duration;

use log::{info, warn};

use eframe_kaleido::bridge::{BridgeMessage, ChannelBridge, HostPort};
use eframe_kaleido::KaleidoApp;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let (bridge, host) = ChannelBridge::pair();
    thread::spawn(move || host_stub(host));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 850.0])
            .with_min_inner_size([500.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "eframe_kaleido",
        native_options,
        Box::new(|cc| Ok(Box::new(KaleidoApp::new(cc, Box::new(bridge))))),
    )
}

/// Stand-in for the real host: acknowledges save requests with a generated
/// token and logs load requests. The real host owns bitmap encoding; the
/// app only ever sees the opaque payload string.
fn host_stub(host: HostPort) {
    let mut counter = 0u64;
    while host.connected() {
        match host.recv() {
            Ok(Some(BridgeMessage::Save(_))) => {
                counter += 1;
                let encoded = format!("snapshot-{counter}");
                if let Err(err) = host.send(&BridgeMessage::Saved(encoded)) {
                    warn!("host ack failed: {err}");
                    break;
                }
            }
            Ok(Some(BridgeMessage::Load(encoded))) => {
                info!("host asked to restore snapshot ({} bytes)", encoded.len());
            }
            Ok(Some(other)) => {
                warn!("host received unexpected message: {other:?}");
            }
            Ok(None) => thread::sleep(Duration::from_millis(10)),
            Err(err) => {
                warn!("host port error: {err}");
                break;
            }
        }
    }
}
