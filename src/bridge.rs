use std::collections::VecDeque;
use std::sync::Arc;

use log::warn;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The tagged envelope carried over the host port, as JSON text:
/// `{"msg": "SAVE", "payload": ""}` and friends.
///
/// The payload is an opaque encoded-image string; encoding and decoding the
/// actual bitmap is entirely the host's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "msg", content = "payload")]
pub enum BridgeMessage {
    /// App -> host: snapshot the canvas.
    #[serde(rename = "SAVE")]
    Save(String),
    /// App -> host: restore this snapshot.
    #[serde(rename = "LOAD")]
    Load(String),
    /// Host -> app: snapshot taken, here is its encoding.
    #[serde(rename = "SAVED")]
    Saved(String),
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("host port closed")]
    PortClosed,
    #[error("malformed bridge envelope: {0}")]
    Envelope(#[from] serde_json::Error),
}

/// The app-facing side of the save/load channel.
///
/// Fire-and-forget: there is no request/response correlation, timeout, or
/// retry. Acknowledgments arrive independently via `poll`.
pub trait HostBridge {
    fn request_save(&self) -> Result<(), BridgeError>;
    fn request_load(&self, encoded: &str) -> Result<(), BridgeError>;
    /// Drains messages the host has sent since the last poll.
    fn poll(&self) -> Vec<BridgeMessage>;
}

#[derive(Default)]
struct Shared {
    to_host: Mutex<VecDeque<String>>,
    to_app: Mutex<VecDeque<String>>,
}

/// In-process port pair backed by two message queues.
pub struct ChannelBridge {
    shared: Arc<Shared>,
}

/// The host-facing end of a [`ChannelBridge`].
pub struct HostPort {
    shared: Arc<Shared>,
}

impl ChannelBridge {
    /// Creates a connected bridge/port pair.
    pub fn pair() -> (ChannelBridge, HostPort) {
        let shared = Arc::new(Shared::default());
        (
            ChannelBridge {
                shared: Arc::clone(&shared),
            },
            HostPort { shared },
        )
    }

    fn send(&self, message: &BridgeMessage) -> Result<(), BridgeError> {
        // Both ends hold one Arc each; anything less means the host is gone.
        if Arc::strong_count(&self.shared) < 2 {
            return Err(BridgeError::PortClosed);
        }
        let envelope = serde_json::to_string(message)?;
        self.shared.to_host.lock().push_back(envelope);
        Ok(())
    }
}

impl HostBridge for ChannelBridge {
    fn request_save(&self) -> Result<(), BridgeError> {
        self.send(&BridgeMessage::Save(String::new()))
    }

    fn request_load(&self, encoded: &str) -> Result<(), BridgeError> {
        self.send(&BridgeMessage::Load(encoded.to_owned()))
    }

    fn poll(&self) -> Vec<BridgeMessage> {
        let mut queue = self.shared.to_app.lock();
        queue
            .drain(..)
            .filter_map(|envelope| match serde_json::from_str(&envelope) {
                Ok(message) => Some(message),
                Err(err) => {
                    warn!("dropping malformed host message: {err}");
                    None
                }
            })
            .collect()
    }
}

impl HostPort {
    /// Takes the next pending app request, if any.
    pub fn recv(&self) -> Result<Option<BridgeMessage>, BridgeError> {
        match self.shared.to_host.lock().pop_front() {
            Some(envelope) => Ok(Some(serde_json::from_str(&envelope)?)),
            None => Ok(None),
        }
    }

    /// Sends a message back to the app.
    pub fn send(&self, message: &BridgeMessage) -> Result<(), BridgeError> {
        if Arc::strong_count(&self.shared) < 2 {
            return Err(BridgeError::PortClosed);
        }
        let envelope = serde_json::to_string(message)?;
        self.shared.to_app.lock().push_back(envelope);
        Ok(())
    }

    /// True while the app end is still alive.
    pub fn connected(&self) -> bool {
        Arc::strong_count(&self.shared) >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wire_shape() {
        let json = serde_json::to_string(&BridgeMessage::Save(String::new())).unwrap();
        assert_eq!(json, r#"{"msg":"SAVE","payload":""}"#);

        let parsed: BridgeMessage =
            serde_json::from_str(r#"{"msg":"SAVED","payload":"img-data"}"#).unwrap();
        assert_eq!(parsed, BridgeMessage::Saved("img-data".to_owned()));
    }

    #[test]
    fn save_request_reaches_host() {
        let (bridge, host) = ChannelBridge::pair();
        bridge.request_save().unwrap();
        assert_eq!(
            host.recv().unwrap(),
            Some(BridgeMessage::Save(String::new()))
        );
        assert_eq!(host.recv().unwrap(), None);
    }

    #[test]
    fn saved_ack_reaches_app() {
        let (bridge, host) = ChannelBridge::pair();
        host.send(&BridgeMessage::Saved("snapshot".to_owned()))
            .unwrap();
        assert_eq!(
            bridge.poll(),
            vec![BridgeMessage::Saved("snapshot".to_owned())]
        );
        assert!(bridge.poll().is_empty());
    }

    #[test]
    fn malformed_host_message_is_dropped() {
        let (bridge, host) = ChannelBridge::pair();
        host.shared
            .to_app
            .lock()
            .push_back("not json".to_owned());
        host.send(&BridgeMessage::Saved("ok".to_owned())).unwrap();
        assert_eq!(bridge.poll(), vec![BridgeMessage::Saved("ok".to_owned())]);
    }

    #[test]
    fn send_to_closed_port_fails() {
        let (bridge, host) = ChannelBridge::pair();
        drop(host);
        assert!(matches!(
            bridge.request_save(),
            Err(BridgeError::PortClosed)
        ));
    }
}
