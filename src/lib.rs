//! # glovetrack - Tracking core for a motion-capture glove driver
//!
//! Turns raw glove telemetry (a shadow controller's spatial pose plus
//! per-finger sensor data) into a continuously updated hand pose and full
//! hand skeleton for a host tracking runtime. Provides:
//! - Shadow device discovery over the runtime's tracked-device list
//! - Corrected pose computation (rotated offset + fixed mounting correction)
//! - A calibration state machine gating pose-frame adjustments
//! - Lifecycle-safe activation/deactivation with a background pose stream
//!
//! ## Architecture
//! ```text
//! CommunicationManager ──data/state──▶ GloveDevice ──pose/skeleton/input──▶ TrackingRuntime
//!                                        │    ▲
//!                                 BoneAnimator PoseTransformer ◀── shadow snapshot
//! ```
//!
//! The host runtime, the hardware transport, and the finger animation
//! algorithm are external collaborators behind the [`runtime::TrackingRuntime`],
//! [`comm::CommunicationManager`], and [`animator::BoneAnimator`] traits.
//! [`GloveDevice::activate`] resolves the shadow controller once, then a
//! dedicated thread republishes the corrected pose on a fixed short cadence
//! while inbound samples drive skeleton updates asynchronously.

pub mod animator;
pub mod calibration;
pub mod comm;
pub mod device;
pub mod error;
pub mod locator;
pub mod math;
pub mod pose;
pub mod runtime;
pub mod skeleton;
pub mod types;

pub use calibration::{CalibrationMethod, CalibrationSession};
pub use device::{GloveDevice, DEVICE_MANUFACTURER};
pub use error::GloveError;
pub use skeleton::{BoneTransform, HandSkeleton, NUM_BONES};
pub use types::*;

/// Result type alias for glovetrack operations.
pub type Result<T> = std::result::Result<T, GloveError>;
