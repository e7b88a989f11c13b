//! Host tracking runtime interface.
//!
//! The core never owns the runtime; it reads tracked-device properties and
//! raw pose snapshots from it and publishes poses, skeletons, and input back
//! into it. Property and snapshot misses are treated as "no match"/"invalid"
//! by callers, never as fatal errors, and skeletal registration failure
//! degrades to running without skeletal input.

use crate::skeleton::HandSkeleton;
use crate::types::{
    DeviceIndex, DevicePose, HandRole, MotionRange, RawTrackedPose, SkeletonHandle, VRInputData,
};
use crate::Result;

pub trait TrackingRuntime: Send + Sync {
    /// Number of device slots currently known to the runtime. Index 0 is
    /// reserved for the head-mounted device.
    fn device_count(&self) -> DeviceIndex;

    /// Manufacturer-name property of the device at `index`.
    fn manufacturer_name(&self, index: DeviceIndex) -> Result<String>;

    /// Integer controller-role hint of the device at `index`.
    fn role_hint(&self, index: DeviceIndex) -> Result<i32>;

    /// Current raw pose snapshot of the device at `index`.
    fn raw_pose(&self, index: DeviceIndex) -> Result<RawTrackedPose>;

    /// Register a skeletal input component at full tracking level, seeded
    /// with the given rest pose. Returns an opaque handle for updates.
    fn register_skeleton(
        &self,
        device_id: DeviceIndex,
        role: HandRole,
        rest_pose: &HandSkeleton,
    ) -> Result<SkeletonHandle>;

    /// Push a skeleton to one motion-range publication channel.
    fn update_skeleton(
        &self,
        handle: SkeletonHandle,
        range: MotionRange,
        skeleton: &HandSkeleton,
    ) -> Result<()>;

    /// Publish a device pose into the runtime's device slot.
    fn publish_pose(&self, device_id: DeviceIndex, pose: &DevicePose);

    /// Forward a raw input sample to device-specific input components.
    fn publish_input(&self, device_id: DeviceIndex, input: &VRInputData) -> Result<()>;
}
