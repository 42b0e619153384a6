//! Derivative archive naming

use super::members::{GSM_MODEM_FILE, LTE_MODEM_FILE};

/// The four archives produced per job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivativeKind {
    /// `BL_{product}_user_low_ship_MULTI_CERT.tar`
    Bootloader,
    /// `{product}_MODEM.tar`
    GsmModem,
    /// `{product}_WiFi_FIX.tar`
    LteModem,
    /// `GSM_Modem_{product}_and_LTE_Modem_{product}.tar`
    CombinedModem,
}

impl DerivativeKind {
    /// All kinds, in the order archives are listed in reports.
    pub const ALL: [DerivativeKind; 4] = [
        DerivativeKind::Bootloader,
        DerivativeKind::GsmModem,
        DerivativeKind::LteModem,
        DerivativeKind::CombinedModem,
    ];

    /// Output archive name for a product code.
    #[must_use]
    pub fn archive_name(self, product: &str) -> String {
        match self {
            DerivativeKind::Bootloader => format!("BL_{product}_user_low_ship_MULTI_CERT.tar"),
            DerivativeKind::GsmModem => format!("{product}_MODEM.tar"),
            DerivativeKind::LteModem => format!("{product}_WiFi_FIX.tar"),
            DerivativeKind::CombinedModem => {
                format!("GSM_Modem_{product}_and_LTE_Modem_{product}.tar")
            }
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            DerivativeKind::Bootloader => "bootloader",
            DerivativeKind::GsmModem => "GSM modem",
            DerivativeKind::LteModem => "LTE modem",
            DerivativeKind::CombinedModem => "combined modem",
        }
    }
}

/// An output archive name paired with the working files it must contain.
///
/// Specs are built once per job and only read afterwards; each build worker
/// gets its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivativeArchiveSpec {
    pub kind: DerivativeKind,
    pub archive_name: String,
    pub files: Vec<&'static str>,
}

impl DerivativeArchiveSpec {
    /// Build the four specs for `product`.
    ///
    /// The bootloader archive gets exactly `bootloader_files`, which may be
    /// empty.
    #[must_use]
    pub fn for_product(product: &str, bootloader_files: &[&'static str]) -> Vec<Self> {
        DerivativeKind::ALL
            .into_iter()
            .map(|kind| {
                let files = match kind {
                    DerivativeKind::Bootloader => bootloader_files.to_vec(),
                    DerivativeKind::GsmModem => vec![GSM_MODEM_FILE],
                    DerivativeKind::LteModem => vec![LTE_MODEM_FILE],
                    DerivativeKind::CombinedModem => vec![GSM_MODEM_FILE, LTE_MODEM_FILE],
                };
                Self {
                    kind,
                    archive_name: kind.archive_name(product),
                    files,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_archive_names() {
        let names: Vec<_> = DerivativeKind::ALL
            .iter()
            .map(|k| k.archive_name("G960"))
            .collect();
        assert_eq!(
            names,
            vec![
                "BL_G960_user_low_ship_MULTI_CERT.tar",
                "G960_MODEM.tar",
                "G960_WiFi_FIX.tar",
                "GSM_Modem_G960_and_LTE_Modem_G960.tar",
            ]
        );
    }

    #[test]
    fn test_specs_contents() {
        let specs = DerivativeArchiveSpec::for_product("G960", &["aboot.mbn", "tz.mbn"]);
        assert_eq!(specs.len(), 4);
        assert_eq!(specs[0].files, vec!["aboot.mbn", "tz.mbn"]);
        assert_eq!(specs[1].files, vec!["modem.bin"]);
        assert_eq!(specs[2].files, vec!["NON-HLOS.bin"]);
        assert_eq!(specs[3].files, vec!["modem.bin", "NON-HLOS.bin"]);
    }

    #[test]
    fn test_empty_bootloader_spec_is_kept() {
        let specs = DerivativeArchiveSpec::for_product("G960", &[]);
        assert_eq!(specs[0].kind, DerivativeKind::Bootloader);
        assert!(specs[0].files.is_empty());
    }
}
