//! Communication channel interface and a channel-backed implementation.
//!
//! The physical transport (serial/Bluetooth/network) and its framing live
//! outside this crate. [`CommunicationManager`] is the seam: the transport
//! delivers input samples and state events on its own schedule, serially —
//! no two data callbacks overlap from the same channel.

use crate::types::{StateEvent, VRInputData};
use crate::{GloveError, Result};
use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub type DataCallback = Box<dyn FnMut(VRInputData) + Send>;
pub type StateCallback = Box<dyn FnMut(StateEvent) + Send>;

pub trait CommunicationManager: Send {
    /// Register the two event callbacks and start delivery. Delivery
    /// ordering across the callbacks is implementation-defined; data
    /// callbacks are invoked serially.
    fn begin_listener(&mut self, on_data: DataCallback, on_state: StateCallback) -> Result<()>;

    /// Stop delivery and release the channel. Idempotent.
    fn disconnect(&mut self);
}

/// Event injected into a [`ChannelComm`] by the transport side.
#[derive(Debug, Clone, Copy)]
pub enum CommEvent {
    Data(VRInputData),
    State(StateEvent),
}

/// Communication manager backed by a crossbeam channel.
///
/// A transport bridge (or a test) pushes [`CommEvent`]s through the sender;
/// a dedicated dispatch thread drains them and invokes the callbacks one at
/// a time, so the serial-delivery contract holds by construction.
pub struct ChannelComm {
    sender: Sender<CommEvent>,
    receiver: Option<Receiver<CommEvent>>,
    stop_flag: Arc<AtomicBool>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl ChannelComm {
    pub fn new() -> ChannelComm {
        let (sender, receiver) = crossbeam_channel::bounded(256);
        ChannelComm {
            sender,
            receiver: Some(receiver),
            stop_flag: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    /// Sender half for the transport side. Events pushed here are delivered
    /// once the listener has started.
    pub fn sender(&self) -> Sender<CommEvent> {
        self.sender.clone()
    }
}

impl Default for ChannelComm {
    fn default() -> Self {
        ChannelComm::new()
    }
}

impl CommunicationManager for ChannelComm {
    fn begin_listener(&mut self, on_data: DataCallback, on_state: StateCallback) -> Result<()> {
        let receiver = self
            .receiver
            .take()
            .ok_or_else(|| GloveError::Comm("listener already started".into()))?;
        let stop_clone = self.stop_flag.clone();

        let thread = std::thread::Builder::new()
            .name("glove-comm".into())
            .spawn(move || {
                dispatch_loop(receiver, on_data, on_state, stop_clone);
            })
            .map_err(|e| GloveError::Comm(format!("failed to spawn dispatch thread: {e}")))?;

        self.thread = Some(thread);
        Ok(())
    }

    fn disconnect(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ChannelComm {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn dispatch_loop(
    receiver: Receiver<CommEvent>,
    mut on_data: DataCallback,
    mut on_state: StateCallback,
    stop_flag: Arc<AtomicBool>,
) {
    log::info!("communication dispatch started");

    loop {
        if stop_flag.load(Ordering::Relaxed) {
            log::info!("communication dispatch stopping (stop flag set)");
            break;
        }

        // recv_timeout: 100ms to periodically check the stop flag
        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(CommEvent::Data(sample)) => on_data(sample),
            Ok(CommEvent::State(event)) => on_state(event),
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => continue,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                log::info!("communication channel disconnected, stopping dispatch");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeviceConnectionEvent, StateEvent};
    use std::sync::atomic::AtomicUsize;
    use std::time::Instant;

    fn wait_until(condition: impl Fn() -> bool, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        condition()
    }

    #[test]
    fn test_delivers_data_and_state_events() {
        let data_count = Arc::new(AtomicUsize::new(0));
        let state_count = Arc::new(AtomicUsize::new(0));

        let mut comm = ChannelComm::new();
        let sender = comm.sender();

        let data_clone = data_count.clone();
        let state_clone = state_count.clone();
        comm.begin_listener(
            Box::new(move |_| {
                data_clone.fetch_add(1, Ordering::SeqCst);
            }),
            Box::new(move |_| {
                state_clone.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();

        for _ in 0..3 {
            sender.send(CommEvent::Data(VRInputData::default())).unwrap();
        }
        sender
            .send(CommEvent::State(StateEvent::DeviceConnection(
                DeviceConnectionEvent {
                    valid: true,
                    connected: true,
                },
            )))
            .unwrap();

        assert!(wait_until(
            || data_count.load(Ordering::SeqCst) == 3 && state_count.load(Ordering::SeqCst) == 1,
            Duration::from_secs(1),
        ));

        comm.disconnect();
    }

    #[test]
    fn test_disconnect_stops_delivery() {
        let data_count = Arc::new(AtomicUsize::new(0));

        let mut comm = ChannelComm::new();
        let sender = comm.sender();

        let data_clone = data_count.clone();
        comm.begin_listener(
            Box::new(move |_| {
                data_clone.fetch_add(1, Ordering::SeqCst);
            }),
            Box::new(|_| {}),
        )
        .unwrap();

        comm.disconnect();
        let _ = sender.send(CommEvent::Data(VRInputData::default()));
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(data_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_second_listener_is_rejected() {
        let mut comm = ChannelComm::new();
        comm.begin_listener(Box::new(|_| {}), Box::new(|_| {})).unwrap();
        assert!(comm
            .begin_listener(Box::new(|_| {}), Box::new(|_| {}))
            .is_err());
        comm.disconnect();
    }
}
