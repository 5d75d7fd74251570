/// Which input drives card tilt on this device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    /// Orientation sensors drive tilt; pointer logic is skipped.
    TouchPrimary,
    /// Mouse proximity and keyboard focus drive tilt; orientation is ignored.
    PointerPrimary,
}

/// Answers to the input-capability media queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CapabilityProbe {
    /// `(hover: none)` matched.
    pub hover_none: bool,
    /// `(pointer: coarse)` matched.
    pub pointer_coarse: bool,
}

impl CapabilityProbe {
    pub fn classify(&self) -> DeviceClass {
        if self.hover_none && self.pointer_coarse {
            DeviceClass::TouchPrimary
        } else {
            DeviceClass::PointerPrimary
        }
    }
}
