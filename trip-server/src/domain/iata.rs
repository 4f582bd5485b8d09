//! Three-letter location codes used to key cities, prices and hotels.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Why a string was not accepted as a location code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidIataCode {
    #[error("location code needs 3 letters, got {0}")]
    Length(usize),

    #[error("location code contains {0:?}, only A-Z is allowed")]
    Character(char),
}

/// City or airport code such as `TAS` or `DXB`.
///
/// Stored inline as three bytes, so it is `Copy` and cheap to use as a map
/// key. The constructors only admit the letters A-Z.
///
/// ```
/// use trip_server::domain::IataCode;
///
/// let dxb = IataCode::parse("DXB").unwrap();
/// assert_eq!(dxb.to_string(), "DXB");
/// assert!(IataCode::parse("dxb").is_err());
/// assert_eq!(IataCode::parse_normalized("dxb\n").unwrap(), dxb);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IataCode([u8; 3]);

impl IataCode {
    /// Strict parse, as used for stored reference data.
    pub fn parse(s: &str) -> Result<Self, InvalidIataCode> {
        if let Some(c) = s.chars().find(|c| !c.is_ascii_uppercase()) {
            return Err(InvalidIataCode::Character(c));
        }
        let letters: [u8; 3] = s
            .as_bytes()
            .try_into()
            .map_err(|_| InvalidIataCode::Length(s.len()))?;
        Ok(IataCode(letters))
    }

    /// Lenient parse for request input: trims and upper-cases first.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidIataCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        // A-Z bytes only
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IataCode({})", self.as_str())
    }
}

impl fmt::Display for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IataCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IataCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        IataCode::parse_normalized(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(IataCode::parse("TAS").is_ok());
        assert!(IataCode::parse("IST").is_ok());
        assert!(IataCode::parse("DXB").is_ok());
        assert!(IataCode::parse("AAA").is_ok());
        assert!(IataCode::parse("ZZZ").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(IataCode::parse("ist").is_err());
        assert!(IataCode::parse("Ist").is_err());
        assert!(IataCode::parse("ISt").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(IataCode::parse("").is_err());
        assert!(IataCode::parse("I").is_err());
        assert!(IataCode::parse("IS").is_err());
        assert!(IataCode::parse("ISTX").is_err());
        assert!(IataCode::parse("DUBAI").is_err());
    }

    #[test]
    fn reject_non_letters() {
        assert!(IataCode::parse("I5T").is_err());
        assert!(IataCode::parse("I-T").is_err());
        assert!(IataCode::parse("I T").is_err());
        assert!(IataCode::parse("IÖT").is_err());
    }

    #[test]
    fn error_names_the_problem() {
        assert_eq!(IataCode::parse("ISTX"), Err(InvalidIataCode::Length(4)));
        assert_eq!(IataCode::parse(""), Err(InvalidIataCode::Length(0)));
        assert_eq!(IataCode::parse("I5T"), Err(InvalidIataCode::Character('5')));
        assert_eq!(IataCode::parse("IÖT"), Err(InvalidIataCode::Character('Ö')));
        assert_eq!(
            InvalidIataCode::Length(2).to_string(),
            "location code needs 3 letters, got 2"
        );
    }

    #[test]
    fn normalized_parsing() {
        let ist = IataCode::parse("IST").unwrap();
        assert_eq!(IataCode::parse_normalized("ist").unwrap(), ist);
        assert_eq!(IataCode::parse_normalized("  iSt\n").unwrap(), ist);
        assert!(IataCode::parse_normalized("is").is_err());
    }

    #[test]
    fn display_and_debug() {
        let code = IataCode::parse("DOH").unwrap();
        assert_eq!(format!("{}", code), "DOH");
        assert_eq!(format!("{:?}", code), "IataCode(DOH)");
    }

    #[test]
    fn ordering_is_alphabetical() {
        let mut codes = vec![
            IataCode::parse("SIN").unwrap(),
            IataCode::parse("BKK").unwrap(),
            IataCode::parse("DXB").unwrap(),
        ];
        codes.sort();
        let sorted: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
        assert_eq!(sorted, vec!["BKK", "DXB", "SIN"]);
    }

    #[test]
    fn serde_as_plain_string() {
        let code = IataCode::parse("KUL").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"KUL\"");

        let parsed: IataCode = serde_json::from_str("\"kul\"").unwrap();
        assert_eq!(parsed, code);

        assert!(serde_json::from_str::<IataCode>("\"KL\"").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in "[A-Z]{3}") {
            let code = IataCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Lowercase input is rejected strictly but accepted normalized
        #[test]
        fn lowercase_needs_normalization(s in "[a-z]{3}") {
            prop_assert!(IataCode::parse(&s).is_err());
            let code = IataCode::parse_normalized(&s).unwrap();
            let upper = s.to_ascii_uppercase();
            prop_assert_eq!(code.as_str(), upper.as_str());
        }

        /// Wrong-length strings are always rejected
        #[test]
        fn wrong_length_rejected(s in "[A-Z]{0,2}|[A-Z]{4,10}") {
            prop_assert!(IataCode::parse(&s).is_err());
        }

        /// Ordering agrees with string ordering
        #[test]
        fn ord_matches_str(a in "[A-Z]{3}", b in "[A-Z]{3}") {
            let ca = IataCode::parse(&a).unwrap();
            let cb = IataCode::parse(&b).unwrap();
            prop_assert_eq!(ca.cmp(&cb), a.cmp(&b));
        }
    }
}
