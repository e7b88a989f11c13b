use crate::skeleton::HandSkeleton;
use crate::types::VRInputData;

/// Seam to the finger-curl animation algorithm.
///
/// Implementations turn an input sample into per-bone transforms, mutating
/// the skeleton in place. Pure from the core's perspective: no side effects
/// on calibration or pose.
pub trait BoneAnimator: Send + Sync {
    fn compute_skeleton_transforms(
        &self,
        skeleton: &mut HandSkeleton,
        input: &VRInputData,
        right_hand: bool,
    );
}
