//! Fixed member names of the inner firmware archive

/// Low-level boot firmware components. Not every device ships all six.
pub const BOOTLOADER_FILES: [&str; 6] = [
    "aboot.mbn",
    "sbl1.mbn",
    "sbl2.mbn",
    "sbl3.mbn",
    "rpm.mbn",
    "tz.mbn",
];

/// GSM modem image.
pub const GSM_MODEM_FILE: &str = "modem.bin";

/// LTE modem image.
pub const LTE_MODEM_FILE: &str = "NON-HLOS.bin";

/// Both modem images, GSM first.
pub const MODEM_FILES: [&str; 2] = [GSM_MODEM_FILE, LTE_MODEM_FILE];

/// Which of the three disjoint name sets a member belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberClass {
    Bootloader,
    GsmModem,
    LteModem,
}

impl MemberClass {
    /// Classify an archive member by its exact name.
    ///
    /// Returns `None` for members that are not extracted at all.
    #[must_use]
    pub fn classify(name: &str) -> Option<Self> {
        if name == GSM_MODEM_FILE {
            Some(MemberClass::GsmModem)
        } else if name == LTE_MODEM_FILE {
            Some(MemberClass::LteModem)
        } else if BOOTLOADER_FILES.contains(&name) {
            Some(MemberClass::Bootloader)
        } else {
            None
        }
    }
}

/// The constant spelling of a bootloader or modem file name.
#[must_use]
pub fn known_member(name: &str) -> Option<&'static str> {
    BOOTLOADER_FILES
        .iter()
        .chain(MODEM_FILES.iter())
        .find(|known| **known == name)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_names() {
        assert_eq!(MemberClass::classify("aboot.mbn"), Some(MemberClass::Bootloader));
        assert_eq!(MemberClass::classify("tz.mbn"), Some(MemberClass::Bootloader));
        assert_eq!(MemberClass::classify("modem.bin"), Some(MemberClass::GsmModem));
        assert_eq!(MemberClass::classify("NON-HLOS.bin"), Some(MemberClass::LteModem));
    }

    #[test]
    fn test_classify_is_exact() {
        assert_eq!(MemberClass::classify("system.img"), None);
        assert_eq!(MemberClass::classify("./aboot.mbn"), None);
        assert_eq!(MemberClass::classify("ABOOT.MBN"), None);
        assert_eq!(MemberClass::classify("non-hlos.bin"), None);
        assert_eq!(known_member("../modem.bin"), None);
    }

    #[test]
    fn test_known_member_returns_constant() {
        assert_eq!(known_member("rpm.mbn"), Some("rpm.mbn"));
        assert_eq!(known_member("NON-HLOS.bin"), Some(LTE_MODEM_FILE));
        assert_eq!(known_member("boot.img"), None);
    }

    #[test]
    fn test_sets_are_disjoint() {
        for name in BOOTLOADER_FILES {
            assert!(!MODEM_FILES.contains(&name));
        }
        assert_ne!(GSM_MODEM_FILE, LTE_MODEM_FILE);
    }
}
