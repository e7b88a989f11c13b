//! Shadow device discovery.

use crate::runtime::TrackingRuntime;
use crate::types::{HandRole, ShadowDeviceHandle};

/// Find the tracked controller this glove should shadow.
///
/// Linear first-match scan over device indices `1..N` — index 0 is the
/// headset and always skipped, and the lowest matching index wins. A device
/// matches when its role hint equals the requested role and its manufacturer
/// differs from `own_manufacturer`, which keeps previously registered
/// instances of this driver from shadowing themselves. Property read errors
/// are treated as empty/zero, so an unreadable slot simply never matches on
/// role.
pub fn discover(
    runtime: &dyn TrackingRuntime,
    role: HandRole,
    own_manufacturer: &str,
) -> ShadowDeviceHandle {
    for index in 1..runtime.device_count() {
        let manufacturer = runtime.manufacturer_name(index).unwrap_or_default();
        let role_hint = runtime.role_hint(index).unwrap_or(0);

        if role_hint == role.hint() && manufacturer != own_manufacturer {
            log::info!(
                "shadowing device {index} ({manufacturer}) for {role:?}"
            );
            return ShadowDeviceHandle::new(index);
        }
    }

    log::warn!("no shadow device found for {role:?}");
    ShadowDeviceHandle::INVALID
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::mock::{snapshot_at, MockDevice, MockRuntime};

    const OWN: &str = "LucidCo";

    fn device(manufacturer: &str, role_hint: i32) -> MockDevice {
        MockDevice::new(manufacturer, role_hint, snapshot_at([0.0; 3]))
    }

    #[test]
    fn test_lowest_matching_index_wins() {
        let runtime = MockRuntime::new(vec![
            device("OtherCo", HandRole::LeftHand.hint()),
            device("OtherCo", HandRole::RightHand.hint()),
            device("ThirdCo", HandRole::RightHand.hint()),
        ]);
        let handle = discover(&runtime, HandRole::RightHand, OWN);
        assert_eq!(handle.index(), Some(2));
    }

    #[test]
    fn test_own_manufacturer_is_excluded() {
        let runtime = MockRuntime::new(vec![
            device(OWN, HandRole::RightHand.hint()),
            device("OtherCo", HandRole::RightHand.hint()),
        ]);
        let handle = discover(&runtime, HandRole::RightHand, OWN);
        assert_eq!(handle.index(), Some(2));
    }

    #[test]
    fn test_no_match_returns_invalid() {
        let runtime = MockRuntime::new(vec![device("OtherCo", HandRole::RightHand.hint())]);
        let handle = discover(&runtime, HandRole::LeftHand, OWN);
        assert!(!handle.is_valid());
    }

    #[test]
    fn test_headset_slot_is_skipped() {
        // Slot 0 always carries the headset; even a role-matching entry
        // there must not be picked up.
        let runtime = MockRuntime::new(vec![]);
        runtime.devices.lock().unwrap()[0].role_hint = Some(HandRole::RightHand.hint());
        let handle = discover(&runtime, HandRole::RightHand, OWN);
        assert!(!handle.is_valid());
    }

    #[test]
    fn test_property_errors_exclude_the_slot() {
        let unreadable = MockDevice {
            manufacturer: None,
            role_hint: None,
            pose: snapshot_at([0.0; 3]),
        };
        let runtime = MockRuntime::new(vec![
            unreadable,
            device("OtherCo", HandRole::RightHand.hint()),
        ]);
        let handle = discover(&runtime, HandRole::RightHand, OWN);
        assert_eq!(handle.index(), Some(2));
    }

    #[test]
    fn test_shadow_at_index_three() {
        let runtime = MockRuntime::new(vec![
            device("OtherCo", 0),
            device(OWN, HandRole::RightHand.hint()),
            device("OtherCo", HandRole::RightHand.hint()),
        ]);
        let handle = discover(&runtime, HandRole::RightHand, OWN);
        assert_eq!(handle.index(), Some(3));
    }
}
