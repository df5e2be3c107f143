//! Normalised pointer input

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Mouse or touch sample in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    Mouse(PointerPosition),
    Touch(PointerPosition),
}

impl PointerEvent {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::Mouse(PointerPosition::new(x, y))
    }

    pub fn touch(x: f64, y: f64) -> Self {
        Self::Touch(PointerPosition::new(x, y))
    }

    /// Build a touch event from a touch list, falling back to the changed
    /// touches (a `touchend` has an empty `touches` list).
    pub fn from_touches(touches: &[PointerPosition], changed: &[PointerPosition]) -> Option<Self> {
        touches.first().or_else(|| changed.first()).copied().map(Self::Touch)
    }

    pub fn position(&self) -> PointerPosition {
        match self {
            Self::Mouse(pos) | Self::Touch(pos) => *pos,
        }
    }

    pub fn y(&self) -> f64 {
        self.position().y
    }

    pub fn is_touch(&self) -> bool {
        matches!(self, Self::Touch(_))
    }
}

/// Media-query and feature probes reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceCapabilities {
    pub coarse_pointer: bool,
    pub fine_pointer: bool,
    pub touch_events: bool,
}

impl DeviceCapabilities {
    /// Touch is primary only with a coarse pointer, no fine pointer and touch
    /// events available. Touch laptops keep mouse behaviour.
    pub fn is_touch_primary(&self) -> bool {
        self.coarse_pointer && !self.fine_pointer && self.touch_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_touches_prefers_active_list() {
        let active = [PointerPosition::new(1.0, 2.0)];
        let changed = [PointerPosition::new(9.0, 9.0)];
        assert_eq!(PointerEvent::from_touches(&active, &changed), Some(PointerEvent::touch(1.0, 2.0)));
        assert_eq!(PointerEvent::from_touches(&[], &changed), Some(PointerEvent::touch(9.0, 9.0)));
        assert_eq!(PointerEvent::from_touches(&[], &[]), None);
    }

    #[test]
    fn test_touch_primary_detection() {
        let phone = DeviceCapabilities { coarse_pointer: true, fine_pointer: false, touch_events: true };
        let touch_laptop = DeviceCapabilities { coarse_pointer: true, fine_pointer: true, touch_events: true };
        let desktop = DeviceCapabilities { coarse_pointer: false, fine_pointer: true, touch_events: false };
        assert!(phone.is_touch_primary());
        assert!(!touch_laptop.is_touch_primary());
        assert!(!desktop.is_touch_primary());
    }

    #[test]
    fn test_distance_and_accessors() {
        let event = PointerEvent::mouse(3.0, 4.0);
        assert_eq!(event.position().distance_to(&PointerPosition::default()), 5.0);
        assert_eq!(event.y(), 4.0);
        assert!(!event.is_touch());
    }
}
