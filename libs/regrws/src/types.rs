//! Scalar adapters shared by the models.
//!
//! The registry writes IPv4 addresses with zero-padded octets
//! (`010.000.000.001`), and uppercases country and region codes.

use crate::error::ValidationError;
use crate::xml::XmlScalar;
use std::borrow::Cow;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

/// Declare an enumeration whose wire form is a fixed string per variant.
///
/// Generates `as_str`, `ALL`, `Display`, `FromStr` (failing with
/// [`ValidationError::UnknownVariant`]) and [`XmlScalar`].
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &[Self] = &[$(Self::$variant),+];

            /// Wire representation
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::ValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim() {
                    $($wire => Ok(Self::$variant),)+
                    other => Err($crate::error::ValidationError::UnknownVariant {
                        kind: $label,
                        value: other.to_owned(),
                    }),
                }
            }
        }

        impl $crate::xml::XmlScalar for $name {
            fn to_xml_text(&self) -> ::std::borrow::Cow<'_, str> {
                ::std::borrow::Cow::Borrowed(self.as_str())
            }
        }
    };
}

pub(crate) use wire_enum;

/// Parse an IP address in standard or zero-padded notation.
///
/// Standard IPv6/IPv4 parsing is tried first. The fallback accepts exactly
/// four dot-separated decimal octets, each in `0..=255`, with any number of
/// leading zeros.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidIpAddress`] when neither form matches.
pub fn parse_ip_address(value: &str) -> Result<IpAddr, ValidationError> {
    let value = value.trim();
    if let Ok(addr) = value.parse::<IpAddr>() {
        return Ok(addr);
    }

    let invalid = || ValidationError::InvalidIpAddress(value.to_owned());
    let mut octets = [0u8; 4];
    let mut parts = value.split('.');
    for octet in &mut octets {
        let part = parts.next().ok_or_else(invalid)?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *octet = part.parse::<u8>().map_err(|_| invalid())?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(IpAddr::V4(Ipv4Addr::from(octets)))
}

impl XmlScalar for IpAddr {
    fn to_xml_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

/// Fixed-length uppercase code (ISO 3166-1 alpha-2/alpha-3).
macro_rules! fixed_code {
    ($(#[$meta:meta])* $name:ident, $field:literal, $len:literal, $expected:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let code = value.trim().to_ascii_uppercase();
                if code.chars().count() != $len {
                    return Err(ValidationError::InvalidLength {
                        field: $field,
                        expected: $expected,
                        value: value.to_owned(),
                    });
                }
                Ok(Self(code))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl XmlScalar for $name {
            fn to_xml_text(&self) -> Cow<'_, str> {
                Cow::Borrowed(&self.0)
            }
        }
    };
}

fixed_code!(
    /// ISO 3166-1 alpha-2 country code, e.g. `US`
    CountryCode2,
    "code2",
    2,
    "exactly 2"
);

fixed_code!(
    /// ISO 3166-1 alpha-3 country code, e.g. `USA`
    CountryCode3,
    "code3",
    3,
    "exactly 3"
);

/// ISO 3166-2 subdivision code without the country prefix, e.g. `VA`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionCode(String);

impl RegionCode {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RegionCode {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let code = value.trim().to_ascii_uppercase();
        if code.chars().count() > 3 {
            return Err(ValidationError::InvalidLength {
                field: "iso3166_2",
                expected: "at most 3",
                value: value.to_owned(),
            });
        }
        Ok(Self(code))
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl XmlScalar for RegionCode {
    fn to_xml_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.0)
    }
}

/// Prefix length of a net block, `0..=128`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CidrLength(u8);

impl CidrLength {
    /// # Errors
    ///
    /// Returns [`ValidationError::CidrLengthOutOfRange`] above 128.
    pub fn new(length: u32) -> Result<Self, ValidationError> {
        u8::try_from(length)
            .ok()
            .filter(|l| *l <= 128)
            .map(Self)
            .ok_or(ValidationError::CidrLengthOutOfRange(length))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for CidrLength {
    type Error = ValidationError;

    fn try_from(length: u8) -> Result<Self, Self::Error> {
        Self::new(u32::from(length))
    }
}

impl FromStr for CidrLength {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let length = trimmed
            .parse::<u32>()
            .map_err(|_| ValidationError::UnknownVariant {
                kind: "cidr length",
                value: trimmed.to_owned(),
            })?;
        Self::new(length)
    }
}

impl fmt::Display for CidrLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl XmlScalar for CidrLength {
    fn to_xml_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.0.to_string())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    #[test]
    fn test_zero_padded_ipv4() {
        assert_eq!(
            parse_ip_address("010.000.000.001").unwrap(),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))
        );
        assert_eq!(
            parse_ip_address("192.168.001.010").unwrap(),
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10))
        );
    }

    #[test]
    fn test_standard_notation_unchanged() {
        assert_eq!(
            parse_ip_address("192.168.1.1").unwrap(),
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1))
        );
        assert_eq!(
            parse_ip_address("2001:db8::1").unwrap(),
            IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1))
        );
    }

    #[test]
    fn test_invalid_addresses() {
        for value in [
            "192.168.abc.1",
            "not-an-ip-address",
            "256.000.000.001",
            "10.0.0",
            "10.0.0.0.1",
            "10..0.1",
            "+10.0.0.1",
        ] {
            assert_eq!(
                parse_ip_address(value),
                Err(ValidationError::InvalidIpAddress(value.to_owned())),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_ip_renders_canonical() {
        let addr = parse_ip_address("010.000.000.000").unwrap();
        assert_eq!(addr.to_xml_text(), "10.0.0.0");
    }

    #[test]
    fn test_country_codes_uppercased() {
        assert_eq!("us".parse::<CountryCode2>().unwrap().as_str(), "US");
        assert_eq!("usa".parse::<CountryCode3>().unwrap().as_str(), "USA");
        assert!("USA".parse::<CountryCode2>().is_err());
        assert!("US".parse::<CountryCode3>().is_err());
    }

    #[test]
    fn test_region_code_length() {
        assert_eq!("va".parse::<RegionCode>().unwrap().as_str(), "VA");
        assert_eq!("qc".parse::<RegionCode>().unwrap().to_string(), "QC");
        assert!(matches!(
            "ABCD".parse::<RegionCode>(),
            Err(ValidationError::InvalidLength { field: "iso3166_2", .. })
        ));
    }

    #[test]
    fn test_cidr_length_bounds() {
        assert_eq!(CidrLength::new(0).unwrap().get(), 0);
        assert_eq!(CidrLength::new(128).unwrap().get(), 128);
        assert_eq!(
            CidrLength::new(129),
            Err(ValidationError::CidrLengthOutOfRange(129))
        );
        assert_eq!("24".parse::<CidrLength>().unwrap().get(), 24);
        assert!("twenty".parse::<CidrLength>().is_err());
    }
}
