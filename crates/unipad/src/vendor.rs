use crate::types::ControllerType;

/// Hardware vendor ids with a dedicated label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum VendorId {
    /// Microsoft.
    Xbox = 0x045E,
    /// Sony.
    Playstation = 0x054C,
}

impl VendorId {
    pub const fn id(self) -> u16 {
        self as u16
    }

    pub const fn from_id(id: u16) -> Option<Self> {
        match id {
            0x045E => Some(VendorId::Xbox),
            0x054C => Some(VendorId::Playstation),
            _ => None,
        }
    }
}

/// Human readable label of a hardware vendor id.
pub const fn type_string(vendor: u16) -> &'static str {
    match VendorId::from_id(vendor) {
        Some(VendorId::Xbox) => "Xbox",
        Some(VendorId::Playstation) => "Playstation",
        None => "Generic",
    }
}

impl ControllerType {
    /// Controller family of a hardware vendor id.
    pub const fn from_vendor(vendor: u16) -> Self {
        match VendorId::from_id(vendor) {
            Some(VendorId::Xbox) => ControllerType::Xbox,
            Some(VendorId::Playstation) => ControllerType::Playstation,
            None => ControllerType::Generic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vendors_have_labels() {
        assert_eq!(type_string(0x045E), "Xbox");
        assert_eq!(type_string(0x054C), "Playstation");
    }

    #[test]
    fn unknown_vendors_are_generic() {
        assert_eq!(type_string(0x9999), "Generic");
        assert_eq!(type_string(0), "Generic");
        assert_eq!(ControllerType::from_vendor(0x9999), ControllerType::Generic);
    }

    #[test]
    fn vendor_ids_match_usb_assignments() {
        assert_eq!(VendorId::Xbox.id(), 0x045E);
        assert_eq!(VendorId::Playstation.id(), 0x054C);
        assert_eq!(ControllerType::from_vendor(0x054C), ControllerType::Playstation);
    }
}
