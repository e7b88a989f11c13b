//! Full hand skeleton published to the host runtime's skeletal input.
//!
//! The bone layout follows the standard full-hand skeletal layout: root,
//! wrist, four bones per digit (five for the four fingers counting the
//! metacarpal), and five auxiliary fingertip bones, 31 in total. Bone data
//! is given in parent space.

use crate::types::HandRole;

/// Number of bones in the hand skeleton.
pub const NUM_BONES: usize = 31;

/// One bone's transform in parent space. Position is homogeneous
/// [x, y, z, 1], orientation is a quaternion [w, x, y, z].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneTransform {
    pub position: [f32; 4],
    pub orientation: [f32; 4],
}

const fn bone(position: [f32; 3], orientation: [f32; 4]) -> BoneTransform {
    BoneTransform {
        position: [position[0], position[1], position[2], 1.0],
        orientation,
    }
}

/// Open-hand rest pose for the left hand, in parent space.
#[rustfmt::skip]
static LEFT_OPEN_POSE: [BoneTransform; NUM_BONES] = [
    bone([0.00000, 0.00000, 0.00000], [1.00000, 0.00000, 0.00000, 0.00000]),  // root
    bone([-0.03404, 0.03650, 0.16472], [-0.05515, -0.07861, 0.92028, -0.37930]), // wrist
    bone([-0.01208, 0.02807, 0.02505], [0.56459, 0.45102, 0.64243, 0.25111]),  // thumb0
    bone([0.04041, 0.00000, 0.00000], [0.99484, 0.08294, 0.01945, 0.05513]),   // thumb1
    bone([0.03252, 0.00000, 0.00000], [0.97479, 0.00321, 0.02187, -0.22201]),  // thumb2
    bone([0.03046, 0.00000, 0.00000], [1.00000, 0.00000, 0.00000, 0.00000]),   // thumb3
    bone([0.00063, 0.02687, 0.01543], [0.64425, 0.42198, -0.47820, 0.42213]),  // index0
    bone([0.07420, -0.00500, 0.00023], [0.99533, 0.00701, -0.03912, 0.08795]), // index1
    bone([0.04393, 0.00000, 0.00000], [0.99789, 0.04581, 0.00214, -0.04594]),  // index2
    bone([0.02870, 0.00000, 0.00000], [0.99965, 0.00185, -0.02278, -0.01341]), // index3
    bone([0.02282, 0.00000, 0.00000], [1.00000, 0.00000, 0.00000, 0.00000]),   // index tip
    bone([0.00218, 0.00712, 0.01632], [0.54672, 0.54128, -0.44252, 0.46075]),  // middle0
    bone([0.07095, 0.00078, 0.00100], [0.98029, -0.16726, -0.07896, 0.06937]), // middle1
    bone([0.04311, 0.00000, 0.00000], [0.99794, 0.01849, 0.01320, 0.05887]),   // middle2
    bone([0.03327, 0.00000, 0.00000], [0.99739, -0.00333, -0.02823, -0.06632]),// middle3
    bone([0.02589, 0.00000, 0.00000], [0.99919, 0.00000, 0.00000, 0.04013]),   // middle tip
    bone([0.00051, -0.00655, 0.01635], [0.51669, 0.55014, -0.49555, 0.42989]), // ring0
    bone([0.06588, 0.00179, 0.00069], [0.99042, -0.05870, -0.10182, 0.07249]), // ring1
    bone([0.04070, 0.00000, 0.00000], [0.99954, -0.00224, 0.00000, 0.03008]),  // ring2
    bone([0.02875, 0.00000, 0.00000], [0.99910, -0.00072, -0.01269, 0.04042]), // ring3
    bone([0.02243, 0.00000, 0.00000], [1.00000, 0.00000, 0.00000, 0.00000]),   // ring tip
    bone([-0.00248, -0.01898, 0.01521], [0.52692, 0.52394, -0.58403, 0.32674]),// pinky0
    bone([0.06288, 0.00284, 0.00033], [0.98661, -0.05961, -0.13516, 0.06913]), // pinky1
    bone([0.03022, 0.00000, 0.00000], [0.99432, 0.00190, 0.00000, 0.10645]),   // pinky2
    bone([0.01819, 0.00000, 0.00000], [0.99593, -0.00201, -0.05208, -0.07353]),// pinky3
    bone([0.01802, 0.00000, 0.00000], [1.00000, 0.00000, 0.00000, 0.00000]),   // pinky tip
    bone([-0.00606, 0.05629, 0.06006], [0.73724, 0.20275, 0.59427, 0.24944]),  // aux thumb
    bone([-0.04042, -0.04302, 0.01935], [-0.29033, 0.62353, -0.66381, -0.29373]), // aux index
    bone([-0.03935, -0.07567, 0.04704], [-0.18705, 0.67806, -0.65929, -0.26568]), // aux middle
    bone([-0.03834, -0.09099, 0.08258], [-0.18304, 0.73679, -0.63476, -0.14394]), // aux ring
    bone([-0.03181, -0.08721, 0.12102], [-0.00366, 0.75841, -0.63934, -0.12668]), // aux pinky
];

/// Mirror a left-hand bone across the YZ plane to produce its right-hand
/// counterpart.
fn mirrored(bone: &BoneTransform) -> BoneTransform {
    BoneTransform {
        position: [
            -bone.position[0],
            bone.position[1],
            bone.position[2],
            bone.position[3],
        ],
        orientation: [
            bone.orientation[0],
            bone.orientation[1],
            -bone.orientation[2],
            -bone.orientation[3],
        ],
    }
}

/// Ordered per-bone transforms for one hand, fixed length, mutated in place
/// by the bone animator and republished on every input sample.
#[derive(Debug, Clone, PartialEq)]
pub struct HandSkeleton {
    bones: [BoneTransform; NUM_BONES],
}

impl HandSkeleton {
    /// The open-hand rest pose for the given hand.
    pub fn open_hand(role: HandRole) -> HandSkeleton {
        let mut bones = LEFT_OPEN_POSE;
        if role.is_right() {
            for bone in &mut bones {
                *bone = mirrored(bone);
            }
        }
        HandSkeleton { bones }
    }

    pub fn bones(&self) -> &[BoneTransform; NUM_BONES] {
        &self.bones
    }

    pub fn bones_mut(&mut self) -> &mut [BoneTransform; NUM_BONES] {
        &mut self.bones
    }
}
