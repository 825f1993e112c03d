//! The canonical textual form of a price.
//!
//! Gateway signatures are computed over the amount *as text*, so `35.0`, `35.00` and `35` are three different
//! messages. To keep the signing side and the verifying side in agreement, an `Amount` only accepts one form:
//! one or more ASCII digits, a `.`, and exactly two ASCII digits. No sign, no grouping separators, no exponent.
use std::{fmt::Display, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

static CANONICAL_AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]{2}$").unwrap());

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{0}' is not a canonical amount. Amounts must look like 35.00")]
pub struct AmountFormatError(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount(String);

impl Amount {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for Amount {
    type Err = AmountFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if CANONICAL_AMOUNT.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(AmountFormatError(s.to_string()))
        }
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn canonical_amounts() {
        for s in ["35.00", "0.99", "1000.10"] {
            let amount = s.parse::<Amount>().expect("should parse");
            assert_eq!(amount.to_string(), s);
        }
    }

    #[test]
    fn non_canonical_amounts() {
        for s in ["35", "35.0", "35.000", "35,00", "-35.00", "+35.00", " 35.00", "3.5e1", "1,000.00", ".50", ""] {
            assert!(s.parse::<Amount>().is_err(), "{s} should not parse");
        }
    }

    #[test]
    fn serde_keeps_text() {
        let amount = "35.00".parse::<Amount>().unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, r#""35.00""#);
        let err = serde_json::from_str::<Amount>(r#""35.5""#).unwrap_err();
        assert!(err.to_string().contains("not a canonical amount"));
    }
}
