//! Pose computation for a glove that shadows a tracked controller.

use crate::calibration::{CalibrationMethod, CalibrationSession};
use crate::locator;
use crate::math::{self, Quat};
use crate::runtime::TrackingRuntime;
use crate::types::{DevicePose, HandRole, PoseConfiguration, ShadowDeviceHandle, TrackingResult};
use std::sync::Arc;

/// Computes the glove's corrected spatial pose from the shadow controller's
/// raw snapshot, and owns the calibration gate.
///
/// The shadow handle is resolved once at construction (which the driver does
/// at activation, not at its own construction — the shadow controller may
/// not be enumerated earlier). Offset or pose-frame recalibration may only
/// be applied inside the calibration start/complete transitions.
pub struct PoseTransformer {
    runtime: Arc<dyn TrackingRuntime>,
    shadow: ShadowDeviceHandle,
    config: PoseConfiguration,
    calibration: CalibrationSession,
    pose: DevicePose,
}

impl PoseTransformer {
    pub fn new(
        runtime: Arc<dyn TrackingRuntime>,
        role: HandRole,
        own_manufacturer: &str,
        config: PoseConfiguration,
    ) -> PoseTransformer {
        let shadow = locator::discover(&*runtime, role, own_manufacturer);

        let pose = DevicePose {
            connected: shadow.is_valid(),
            valid: true,
            time_offset: config.time_offset,
            ..DevicePose::default()
        };

        PoseTransformer {
            runtime,
            shadow,
            config,
            calibration: CalibrationSession::new(),
            pose,
        }
    }

    pub fn shadow_handle(&self) -> ShadowDeviceHandle {
        self.shadow
    }

    /// Recompute the pose from the shadow device's current snapshot.
    ///
    /// With no shadow target, or an invalid/unreadable snapshot, the pose is
    /// returned stale-but-marked-invalid: the validity flag mirrors the
    /// snapshot, positional fields keep their last computed values.
    pub fn update_pose(&mut self) -> DevicePose {
        let Some(index) = self.shadow.index() else {
            self.pose.valid = false;
            return self.pose;
        };

        let snapshot = match self.runtime.raw_pose(index) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::trace!("shadow snapshot unavailable: {e}");
                self.pose.valid = false;
                return self.pose;
            }
        };

        if !snapshot.valid {
            self.pose.valid = false;
            return self.pose;
        }

        self.pose.connected = true;

        // The offset is given in the controller's local frame; rotate it
        // into world space before adding.
        let rotation = math::rotation_part(&snapshot.transform);
        let offset = math::rotate(&rotation, self.config.offset);

        for axis in 0..3 {
            self.pose.position[axis] =
                f64::from(snapshot.transform[axis][3]) + f64::from(offset[axis]);
        }

        self.pose.rotation = Quat::from_rotation_matrix(&rotation) * math::mounting_correction();

        // Velocities pass through unchanged; the offset's rotational
        // contribution is deliberately not modeled.
        self.pose.velocity = snapshot.velocity.map(f64::from);
        self.pose.angular_velocity = snapshot.angular_velocity.map(f64::from);

        self.pose.valid = true;
        self.pose.result = TrackingResult::RunningOk;

        self.pose
    }

    /// Connection-state hook from the communication channel; feeds into the
    /// published pose on the next tick.
    pub fn set_connected(&mut self, connected: bool) {
        self.pose.connected = connected;
    }

    pub fn start_calibration(&mut self, method: CalibrationMethod) {
        if self.calibration.start(method) {
            log::info!("calibration started ({method:?})");
        }
    }

    pub fn complete_calibration(&mut self, method: CalibrationMethod) {
        if self.calibration.complete(method) {
            log::info!("calibration completed ({method:?})");
        }
    }

    pub fn is_calibrating(&self) -> bool {
        self.calibration.is_calibrating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::mock::{snapshot_at, MockDevice, MockRuntime};
    use crate::types::RawTrackedPose;

    const OWN: &str = "LucidCo";

    fn runtime_with_shadow(pose: RawTrackedPose) -> Arc<MockRuntime> {
        Arc::new(MockRuntime::new(vec![MockDevice::new(
            "OtherCo",
            HandRole::RightHand.hint(),
            pose,
        )]))
    }

    fn transformer(runtime: &Arc<MockRuntime>, config: PoseConfiguration) -> PoseTransformer {
        PoseTransformer::new(runtime.clone(), HandRole::RightHand, OWN, config)
    }

    #[test]
    fn test_position_adds_rotated_offset() {
        // Shadow rotated 90 degrees about Z: a local +X offset points at
        // world +Y.
        let snapshot = RawTrackedPose {
            valid: true,
            transform: [
                [0.0, -1.0, 0.0, 1.0],
                [1.0, 0.0, 0.0, 2.0],
                [0.0, 0.0, 1.0, 3.0],
            ],
            velocity: [0.0; 3],
            angular_velocity: [0.0; 3],
        };
        let runtime = runtime_with_shadow(snapshot);
        let config = PoseConfiguration {
            offset: [0.5, 0.0, 0.0],
            ..PoseConfiguration::default()
        };
        let pose = transformer(&runtime, config).update_pose();

        assert!(pose.valid);
        assert_eq!(pose.result, TrackingResult::RunningOk);
        assert!((pose.position[0] - 1.0).abs() < 1e-6);
        assert!((pose.position[1] - 2.5).abs() < 1e-6);
        assert!((pose.position[2] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_composes_mounting_correction() {
        let runtime = runtime_with_shadow(snapshot_at([0.0; 3]));
        let pose = transformer(&runtime, PoseConfiguration::default()).update_pose();

        // Identity shadow rotation: the output is exactly the correction,
        // and composing with its inverse restores the shadow rotation.
        assert!(pose.rotation.approx_eq(&math::mounting_correction(), 1e-12));
        let restored = pose.rotation * math::mounting_correction().conjugate();
        assert!(restored.approx_eq(&Quat::IDENTITY, 1e-12));
    }

    #[test]
    fn test_velocities_pass_through() {
        let snapshot = RawTrackedPose {
            velocity: [0.1, 0.2, 0.3],
            angular_velocity: [-1.0, 0.5, 0.0],
            ..snapshot_at([0.0; 3])
        };
        let runtime = runtime_with_shadow(snapshot);
        let pose = transformer(&runtime, PoseConfiguration::default()).update_pose();

        assert_eq!(pose.velocity, [0.1f32 as f64, 0.2f32 as f64, 0.3f32 as f64]);
        assert_eq!(pose.angular_velocity, [-1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_invalid_snapshot_keeps_stale_fields() {
        let runtime = runtime_with_shadow(snapshot_at([1.0, 2.0, 3.0]));
        let mut transformer = transformer(&runtime, PoseConfiguration::default());

        let first = transformer.update_pose();
        assert!(first.valid);

        runtime.set_device_pose(1, RawTrackedPose::default());
        let second = transformer.update_pose();
        assert!(!second.valid);
        assert_eq!(second.position, first.position);
        assert_eq!(second.rotation, first.rotation);
    }

    #[test]
    fn test_missing_shadow_yields_invalid_pose() {
        // Nothing advertises LeftHand, so discovery fails and every tick
        // reports an invalid pose.
        let runtime = runtime_with_shadow(snapshot_at([0.0; 3]));
        let mut transformer = PoseTransformer::new(
            runtime.clone(),
            HandRole::LeftHand,
            OWN,
            PoseConfiguration::default(),
        );

        assert!(!transformer.shadow_handle().is_valid());
        let pose = transformer.update_pose();
        assert!(!pose.valid);
        assert!(!pose.connected);
    }

    #[test]
    fn test_time_offset_comes_from_configuration() {
        let runtime = runtime_with_shadow(snapshot_at([0.0; 3]));
        let pose = transformer(&runtime, PoseConfiguration::default()).update_pose();
        assert!((pose.time_offset - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_calibration_gate_delegates() {
        let runtime = runtime_with_shadow(snapshot_at([0.0; 3]));
        let mut transformer = transformer(&runtime, PoseConfiguration::default());

        assert!(!transformer.is_calibrating());
        transformer.start_calibration(CalibrationMethod::Hardware);
        assert!(transformer.is_calibrating());
        transformer.complete_calibration(CalibrationMethod::Hardware);
        assert!(!transformer.is_calibrating());
    }
}
