//! Device lifecycle controller.
//!
//! Owns activation/deactivation, the background pose-streaming thread, and
//! the wiring between the communication channel, the bone animator, and the
//! calibration gate. Two execution contexts run concurrently per device:
//! the pose loop and the communication dispatch. The activation flag is the
//! single cross-context synchronization point; the pose transformer and the
//! skeleton each sit behind their own mutex with short critical sections.

use crate::animator::BoneAnimator;
use crate::calibration::CalibrationMethod;
use crate::comm::{CommunicationManager, DataCallback, StateCallback};
use crate::pose::PoseTransformer;
use crate::runtime::TrackingRuntime;
use crate::skeleton::HandSkeleton;
use crate::types::{
    DeviceConfiguration, DeviceIndex, DevicePose, MotionRange, SkeletonHandle, StateEvent,
    VRInputData,
};
use crate::{GloveError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Manufacturer name this driver registers under; discovery excludes it so
/// one glove never shadows another.
pub const DEVICE_MANUFACTURER: &str = "LucidCo";

/// A glove device instance.
///
/// Lifecycle is Inactive -> Activated -> Deactivated, terminal: a
/// deactivated instance is never reactivated, a fresh one is constructed
/// instead. [`deactivate`](GloveDevice::deactivate) blocks until the pose
/// thread has exited and must not be called from the pose loop or from a
/// communication callback.
pub struct GloveDevice {
    runtime: Arc<dyn TrackingRuntime>,
    comm: Box<dyn CommunicationManager>,
    animator: Arc<dyn BoneAnimator>,
    configuration: DeviceConfiguration,
    serial_number: String,
    skeleton: Arc<Mutex<HandSkeleton>>,
    transformer: Option<Arc<Mutex<PoseTransformer>>>,
    skeleton_handle: Option<SkeletonHandle>,
    active: Arc<AtomicBool>,
    device_id: Option<DeviceIndex>,
    pose_thread: Option<std::thread::JoinHandle<()>>,
}

impl GloveDevice {
    pub fn new(
        runtime: Arc<dyn TrackingRuntime>,
        comm: Box<dyn CommunicationManager>,
        animator: Arc<dyn BoneAnimator>,
        serial_number: String,
        configuration: DeviceConfiguration,
    ) -> GloveDevice {
        let skeleton = HandSkeleton::open_hand(configuration.role);

        GloveDevice {
            runtime,
            comm,
            animator,
            configuration,
            serial_number,
            skeleton: Arc::new(Mutex::new(skeleton)),
            transformer: None,
            skeleton_handle: None,
            active: Arc::new(AtomicBool::new(false)),
            device_id: None,
            pose_thread: None,
        }
    }

    /// Activate with the runtime-assigned device id: resolve the shadow
    /// target, register the skeletal component, and start streaming.
    ///
    /// Skeletal registration failure is logged and degrades to running
    /// without skeletal input; it never fails activation.
    pub fn activate(&mut self, device_id: DeviceIndex) {
        self.device_id = Some(device_id);

        let transformer = Arc::new(Mutex::new(PoseTransformer::new(
            self.runtime.clone(),
            self.configuration.role,
            DEVICE_MANUFACTURER,
            self.configuration.pose,
        )));
        self.transformer = Some(transformer.clone());

        self.skeleton_handle = match self.skeleton.lock() {
            Ok(skeleton) => {
                match self
                    .runtime
                    .register_skeleton(device_id, self.configuration.role, &skeleton)
                {
                    Ok(handle) => Some(handle),
                    Err(e) => {
                        log::warn!("continuing without skeletal input: {e}");
                        None
                    }
                }
            }
            Err(_) => None,
        };

        self.active.store(true, Ordering::SeqCst);
        self.start_device(device_id, transformer);
    }

    /// Deactivate: stop the device, disconnect the communication channel,
    /// and join the pose thread. Idempotent under concurrent calls; after
    /// this returns, no further pose publication occurs.
    pub fn deactivate(&mut self) {
        if self.active.swap(false, Ordering::SeqCst) {
            self.comm.disconnect();
            self.device_id = None;

            if let Some(thread) = self.pose_thread.take() {
                let _ = thread.join();
            }
        }
    }

    /// Live computed pose while activated, a zeroed invalid pose otherwise.
    /// Never fails.
    pub fn get_pose(&self) -> DevicePose {
        if self.active.load(Ordering::SeqCst) {
            if let Some(transformer) = &self.transformer {
                if let Ok(mut transformer) = transformer.lock() {
                    return transformer.update_pose();
                }
            }
        }

        DevicePose::default()
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Runtime-assigned device id; `None` before activation and after
    /// deactivation.
    pub fn device_id(&self) -> Option<DeviceIndex> {
        self.device_id
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn start_device(&mut self, device_id: DeviceIndex, transformer: Arc<Mutex<PoseTransformer>>) {
        // Seed both motion-range channels with the rest pose so the hand
        // renders before the first input sample arrives.
        if let (Some(handle), Ok(skeleton)) = (self.skeleton_handle, self.skeleton.lock()) {
            for range in [MotionRange::WithoutController, MotionRange::WithController] {
                if let Err(e) = self.runtime.update_skeleton(handle, range, &skeleton) {
                    log::warn!("rest pose update failed: {e}");
                }
            }
        }

        let on_data = self.data_callback(device_id, transformer.clone());
        let on_state = self.state_callback(transformer.clone());
        if let Err(e) = self.comm.begin_listener(on_data, on_state) {
            log::warn!("failed to start communication listener: {e}");
        }

        let runtime = self.runtime.clone();
        let active = self.active.clone();
        let interval = self.configuration.pose.update_interval;
        self.pose_thread = match std::thread::Builder::new()
            .name("glove-pose".into())
            .spawn(move || {
                pose_update_loop(runtime, transformer, active, device_id, interval);
            }) {
            Ok(thread) => Some(thread),
            Err(e) => {
                log::warn!("failed to spawn pose thread: {e}");
                None
            }
        };
    }

    fn data_callback(
        &self,
        device_id: DeviceIndex,
        transformer: Arc<Mutex<PoseTransformer>>,
    ) -> DataCallback {
        let runtime = self.runtime.clone();
        let animator = self.animator.clone();
        let skeleton = self.skeleton.clone();
        let skeleton_handle = self.skeleton_handle;
        let right_hand = self.configuration.role.is_right();
        let calibration_button = self.configuration.pose.calibration_button_enabled;

        // Faults are isolated per sample: log, drop, keep listening.
        Box::new(move |sample| {
            let outcome = process_sample(
                &*runtime,
                &*animator,
                &skeleton,
                &transformer,
                skeleton_handle,
                device_id,
                right_hand,
                calibration_button,
                &sample,
            );
            if let Err(e) = outcome {
                log::warn!("dropping input sample: {e}");
            }
        })
    }

    fn state_callback(&self, transformer: Arc<Mutex<PoseTransformer>>) -> StateCallback {
        let right_hand = self.configuration.role.is_right();

        Box::new(move |event| match event {
            StateEvent::DeviceConnection(data) => {
                if !data.valid {
                    return;
                }
                log::debug!(
                    "device connection event: hand={} connected={}",
                    if right_hand { "right" } else { "left" },
                    data.connected
                );
                if let Ok(mut transformer) = transformer.lock() {
                    transformer.set_connected(data.connected);
                }
            }
        })
    }
}

impl Drop for GloveDevice {
    fn drop(&mut self) {
        self.deactivate();
    }
}

/// Handle one inbound input sample: recompute the skeleton, republish both
/// motion ranges, forward the raw sample, and edge-toggle hardware
/// calibration. Returns the per-sample outcome for the caller to log.
#[allow(clippy::too_many_arguments)]
fn process_sample(
    runtime: &dyn TrackingRuntime,
    animator: &dyn BoneAnimator,
    skeleton: &Mutex<HandSkeleton>,
    transformer: &Mutex<PoseTransformer>,
    skeleton_handle: Option<SkeletonHandle>,
    device_id: DeviceIndex,
    right_hand: bool,
    calibration_button: bool,
    sample: &VRInputData,
) -> Result<()> {
    {
        let mut skeleton = skeleton
            .lock()
            .map_err(|_| GloveError::InputProcessing("skeleton lock poisoned".into()))?;
        animator.compute_skeleton_transforms(&mut skeleton, sample, right_hand);

        if let Some(handle) = skeleton_handle {
            runtime.update_skeleton(handle, MotionRange::WithoutController, &skeleton)?;
            runtime.update_skeleton(handle, MotionRange::WithController, &skeleton)?;
        }
    }

    runtime.publish_input(device_id, sample)?;

    if calibration_button {
        let mut transformer = transformer
            .lock()
            .map_err(|_| GloveError::InputProcessing("pose lock poisoned".into()))?;
        if sample.calibrate {
            if !transformer.is_calibrating() {
                transformer.start_calibration(CalibrationMethod::Hardware);
            }
        } else if transformer.is_calibrating() {
            transformer.complete_calibration(CalibrationMethod::Hardware);
        }
    }

    Ok(())
}

/// Background pose-streaming loop: recompute and publish on a fixed cadence
/// while the device stays activated. Shutdown latency is bounded by the
/// interval.
fn pose_update_loop(
    runtime: Arc<dyn TrackingRuntime>,
    transformer: Arc<Mutex<PoseTransformer>>,
    active: Arc<AtomicBool>,
    device_id: DeviceIndex,
    interval: Duration,
) {
    while active.load(Ordering::SeqCst) {
        let pose = match transformer.lock() {
            Ok(mut transformer) => transformer.update_pose(),
            Err(_) => break,
        };
        runtime.publish_pose(device_id, &pose);

        std::thread::sleep(interval);
    }

    log::info!("closing pose thread");
}
