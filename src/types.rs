use crate::math::Quat;
use std::time::Duration;

/// Index into the host runtime's tracked-device list.
pub type DeviceIndex = u32;

/// Which hand this glove represents. Doubles as the controller role to
/// shadow: the glove derives its pose from an already-tracked controller
/// advertising the same role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandRole {
    LeftHand,
    RightHand,
}

impl HandRole {
    /// Integer role hint as advertised in the host runtime's property store.
    pub fn hint(&self) -> i32 {
        match self {
            HandRole::LeftHand => 1,
            HandRole::RightHand => 2,
        }
    }

    pub fn is_right(&self) -> bool {
        matches!(self, HandRole::RightHand)
    }
}

/// Why/whether a device's pose should be trusted this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingResult {
    #[default]
    Uninitialized,
    RunningOk,
    Calibrating,
    NotTracked,
}

/// Spatial pose reported to the host runtime for this glove.
///
/// If `valid` is false, consumers must ignore the positional fields; they
/// hold stale data from the last valid computation. Mutated exclusively by
/// [`PoseTransformer`](crate::pose::PoseTransformer).
#[derive(Debug, Clone, Copy, Default)]
pub struct DevicePose {
    pub connected: bool,
    pub valid: bool,
    /// World-space position in meters.
    pub position: [f64; 3],
    pub rotation: Quat,
    /// Linear velocity in m/s, passed through from the shadow device.
    pub velocity: [f64; 3],
    /// Angular velocity in rad/s, passed through from the shadow device.
    pub angular_velocity: [f64; 3],
    /// Measurement-to-publish latency compensation in seconds.
    pub time_offset: f64,
    pub result: TrackingResult,
}

/// Raw pose snapshot of a tracked device as the host runtime reports it.
/// Single precision at the source; the pose transformer widens to f64.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawTrackedPose {
    pub valid: bool,
    /// Device-to-world transform, 3x4 row-major. Column 3 is the world
    /// position, the 3x3 left block the rotation.
    pub transform: [[f32; 4]; 3],
    pub velocity: [f32; 3],
    pub angular_velocity: [f32; 3],
}

/// Cached index of the controller this glove shadows.
///
/// Resolved once at activation. An invalid handle means "no shadow target
/// found": subsequent pose computations mark the pose invalid instead of
/// dereferencing a nonexistent device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowDeviceHandle(Option<DeviceIndex>);

impl ShadowDeviceHandle {
    pub const INVALID: ShadowDeviceHandle = ShadowDeviceHandle(None);

    pub fn new(index: DeviceIndex) -> Self {
        ShadowDeviceHandle(Some(index))
    }

    pub fn index(&self) -> Option<DeviceIndex> {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }
}

/// Pose-specific configuration, immutable after construction.
#[derive(Debug, Clone, Copy)]
pub struct PoseConfiguration {
    /// Position offset from the shadowed controller, in its local frame.
    pub offset: [f32; 3],
    /// Seconds of measurement-to-publish latency to report.
    pub time_offset: f64,
    /// Whether the hardware calibration gesture toggles calibration.
    pub calibration_button_enabled: bool,
    /// Cadence of the background pose-streaming loop.
    pub update_interval: Duration,
}

impl Default for PoseConfiguration {
    fn default() -> Self {
        PoseConfiguration {
            offset: [0.0; 3],
            time_offset: 0.05,
            calibration_button_enabled: false,
            update_interval: Duration::from_millis(2),
        }
    }
}

/// Device configuration, copied in at construction and never mutated.
#[derive(Debug, Clone, Copy)]
pub struct DeviceConfiguration {
    pub role: HandRole,
    pub pose: PoseConfiguration,
}

bitflags::bitflags! {
    /// Button states carried by an input sample.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InputButtons: u16 {
        const TRIGGER = 1 << 0;
        const A       = 1 << 1;
        const B       = 1 << 2;
        const GRAB    = 1 << 3;
        const PINCH   = 1 << 4;
        const MENU    = 1 << 5;
    }
}

/// One inbound telemetry sample from the glove hardware.
#[derive(Debug, Clone, Copy, Default)]
pub struct VRInputData {
    /// Per-finger curl, 0.0 (open) to 1.0 (closed), thumb first.
    pub flexion: [f32; 5],
    /// Per-finger splay, -1.0 to 1.0.
    pub splay: [f32; 5],
    /// Joystick [x, y], each -1.0 to 1.0.
    pub joystick: [f32; 2],
    pub buttons: InputButtons,
    /// Hardware calibration gesture flag; edge-triggered by the driver.
    pub calibrate: bool,
}

/// Connection-state transition delivered by the communication channel.
#[derive(Debug, Clone, Copy)]
pub struct DeviceConnectionEvent {
    /// Malformed events arrive with `valid == false` and are ignored.
    pub valid: bool,
    pub connected: bool,
}

/// State events delivered on the communication channel's schedule.
#[derive(Debug, Clone, Copy)]
pub enum StateEvent {
    DeviceConnection(DeviceConnectionEvent),
}

/// The host runtime's two skeletal publication channels: poses rendered
/// with vs. without an underlying controller model. Independent targets;
/// every skeleton change is pushed to both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionRange {
    WithController,
    WithoutController,
}

/// Opaque handle returned by skeletal component registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkeletonHandle(pub u64);
