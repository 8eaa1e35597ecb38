use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// How an energy-point summary was obtained.
///
/// `Indirect` marks estimates interpolated from bracketing calibration
/// measurements; downstream combination may exclude or down-weight such rows
/// (they carry no luminosity of their own).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
pub enum Provenance {
    #[strum(serialize = "direct measurement")]
    #[serde(rename = "direct measurement")]
    Direct,
    #[strum(serialize = "indirect measurement")]
    #[serde(rename = "indirect measurement")]
    Indirect,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_matches_report_tag() {
        assert_eq!(Provenance::Indirect.to_string(), "indirect measurement");
        assert_eq!(Provenance::Direct.to_string(), "direct measurement");
    }

    #[test]
    fn parses_back_from_tag() {
        assert_eq!(
            Provenance::from_str("indirect measurement").unwrap(),
            Provenance::Indirect
        );
    }

    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&Provenance::Indirect).unwrap();
        assert_eq!(json, "\"indirect measurement\"");
        let back: Provenance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Provenance::Indirect);
    }
}
