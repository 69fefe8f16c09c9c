//! Closed-vocabulary string tokens used throughout CMSIS-SVD documents.
//!
//! Each type parses the exact token spelling defined by the schema. Most are
//! a straight `FromStr`; [`Access`] additionally accepts the legacy
//! `read`/`write` spellings and reports a [`Warning::LegacyAccessToken`] when
//! it does so.

use std::str::FromStr;

use crate::error::ParseError;

macro_rules! token_enum {
    ($name:ident { $($variant:ident => $token:literal),+ $(,)? }) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok(Self::$variant),)+
                    _ => Err(ParseError::UnknownToken {
                        field: stringify!($name),
                        token: s.to_string(),
                    }),
                }
            }
        }

        impl $name {
            pub fn as_token(&self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }
        }
    };
}

token_enum!(Protection {
    Secure => "s",
    NonSecure => "n",
    Any => "any",
});

token_enum!(SauAccess {
    NonSecureCallable => "c",
    NonSecure => "n",
});

token_enum!(Usage {
    Read => "read",
    Write => "write",
    ReadWrite => "read-write",
});

token_enum!(ModifiedWriteValues {
    OneToClear => "oneToClear",
    OneToSet => "oneToSet",
    OneToToggle => "oneToToggle",
    ZeroToClear => "zeroToClear",
    ZeroToSet => "zeroToSet",
    ZeroToToggle => "zeroToToggle",
    Clear => "clear",
    Set => "set",
    Modify => "modify",
});

token_enum!(ReadAction {
    Clear => "clear",
    Set => "set",
    Modify => "modify",
    ModifyExternal => "modifyExternal",
});

token_enum!(Endian {
    Little => "little",
    Big => "big",
    Selectable => "selectable",
    Other => "other",
});

token_enum!(AddressBlockUsage {
    Registers => "registers",
    Buffer => "buffer",
    Reserved => "reserved",
});

token_enum!(DataType {
    Uint8T => "uint8_t",
    Uint16T => "uint16_t",
    Uint32T => "uint32_t",
    Uint64T => "uint64_t",
    Int8T => "int8_t",
    Int16T => "int16_t",
    Int32T => "int32_t",
    Int64T => "int64_t",
    Uint8TPtr => "uint8_t *",
    Uint16TPtr => "uint16_t *",
    Uint32TPtr => "uint32_t *",
    Uint64TPtr => "uint64_t *",
    Int8TPtr => "int8_t *",
    Int16TPtr => "int16_t *",
    Int32TPtr => "int32_t *",
    Int64TPtr => "int64_t *",
});

/// The `cpu/name` token. `CM0PLUS` and its shorthand `CM0+` both map to
/// [`CpuName::Cm0Plus`]; every other variant has a single spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CpuName {
    Cm0,
    Cm0Plus,
    Cm1,
    Cm3,
    Cm4,
    Cm7,
    Cm23,
    Cm33,
    Cm35P,
    Cm52,
    Cm55,
    Cm85,
    Sc000,
    Sc300,
    ArmV8Mml,
    ArmV8Mbl,
    ArmV81Mml,
    Ca5,
    Ca7,
    Ca8,
    Ca9,
    Ca15,
    Ca17,
    Ca53,
    Ca57,
    Ca72,
    Smc1,
    Other,
}

impl FromStr for CpuName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CM0" => Ok(Self::Cm0),
            "CM0PLUS" | "CM0+" => Ok(Self::Cm0Plus),
            "CM1" => Ok(Self::Cm1),
            "CM3" => Ok(Self::Cm3),
            "CM4" => Ok(Self::Cm4),
            "CM7" => Ok(Self::Cm7),
            "CM23" => Ok(Self::Cm23),
            "CM33" => Ok(Self::Cm33),
            "CM35P" => Ok(Self::Cm35P),
            "CM52" => Ok(Self::Cm52),
            "CM55" => Ok(Self::Cm55),
            "CM85" => Ok(Self::Cm85),
            "SC000" => Ok(Self::Sc000),
            "SC300" => Ok(Self::Sc300),
            "ARMV8MML" => Ok(Self::ArmV8Mml),
            "ARMV8MBL" => Ok(Self::ArmV8Mbl),
            "ARMV81MML" => Ok(Self::ArmV81Mml),
            "CA5" => Ok(Self::Ca5),
            "CA7" => Ok(Self::Ca7),
            "CA8" => Ok(Self::Ca8),
            "CA9" => Ok(Self::Ca9),
            "CA15" => Ok(Self::Ca15),
            "CA17" => Ok(Self::Ca17),
            "CA53" => Ok(Self::Ca53),
            "CA57" => Ok(Self::Ca57),
            "CA72" => Ok(Self::Ca72),
            "SMC1" => Ok(Self::Smc1),
            "other" => Ok(Self::Other),
            _ => Err(ParseError::UnknownToken {
                field: "CpuName",
                token: s.to_string(),
            }),
        }
    }
}

impl CpuName {
    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Cm0 => "CM0",
            Self::Cm0Plus => "CM0PLUS",
            Self::Cm1 => "CM1",
            Self::Cm3 => "CM3",
            Self::Cm4 => "CM4",
            Self::Cm7 => "CM7",
            Self::Cm23 => "CM23",
            Self::Cm33 => "CM33",
            Self::Cm35P => "CM35P",
            Self::Cm52 => "CM52",
            Self::Cm55 => "CM55",
            Self::Cm85 => "CM85",
            Self::Sc000 => "SC000",
            Self::Sc300 => "SC300",
            Self::ArmV8Mml => "ARMV8MML",
            Self::ArmV8Mbl => "ARMV8MBL",
            Self::ArmV81Mml => "ARMV81MML",
            Self::Ca5 => "CA5",
            Self::Ca7 => "CA7",
            Self::Ca8 => "CA8",
            Self::Ca9 => "CA9",
            Self::Ca15 => "CA15",
            Self::Ca17 => "CA17",
            Self::Ca53 => "CA53",
            Self::Ca57 => "CA57",
            Self::Ca72 => "CA72",
            Self::Smc1 => "SMC1",
            Self::Other => "other",
        }
    }
}

token_enum!(EnumUsage {
    Read => "read",
    Write => "write",
    ReadWrite => "read-write",
});

/// The `access` token, which also accepts two legacy spellings CMSIS-SVD
/// still permits: `read` (mapped to `ReadOnly`) and `write` (mapped to
/// `WriteOnly`). Callers that care should emit a
/// [`Warning::LegacyAccessToken`](crate::error::Warning::LegacyAccessToken)
/// when [`Access::parse_legacy`] returns `true` in the second element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Access {
    ReadOnly,
    WriteOnly,
    ReadWrite,
    WriteOnce,
    ReadWriteOnce,
}

impl Access {
    /// Parses an `access` token, reporting whether a legacy spelling was used.
    pub fn parse_legacy(s: &str) -> Result<(Self, bool), ParseError> {
        match s {
            "read-only" => Ok((Self::ReadOnly, false)),
            "write-only" => Ok((Self::WriteOnly, false)),
            "read-write" => Ok((Self::ReadWrite, false)),
            "writeOnce" => Ok((Self::WriteOnce, false)),
            "read-writeOnce" => Ok((Self::ReadWriteOnce, false)),
            "read" => Ok((Self::ReadOnly, true)),
            "write" => Ok((Self::WriteOnly, true)),
            _ => Err(ParseError::UnknownToken {
                field: "Access",
                token: s.to_string(),
            }),
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            Self::ReadOnly => "read-only",
            Self::WriteOnly => "write-only",
            Self::ReadWrite => "read-write",
            Self::WriteOnce => "writeOnce",
            Self::ReadWriteOnce => "read-writeOnce",
        }
    }
}

impl FromStr for Access {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_legacy(s).map(|(access, _)| access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_access() {
        assert_eq!(Access::from_str("read-write").unwrap(), Access::ReadWrite);
    }

    #[test]
    fn parses_legacy_access_and_flags_it() {
        let (access, legacy) = Access::parse_legacy("read").unwrap();
        assert_eq!(access, Access::ReadOnly);
        assert!(legacy);

        let (access, legacy) = Access::parse_legacy("write").unwrap();
        assert_eq!(access, Access::WriteOnly);
        assert!(legacy);
    }

    #[test]
    fn rejects_unknown_access() {
        assert!(Access::from_str("bogus").is_err());
    }

    #[test]
    fn parses_protection() {
        assert_eq!(Protection::from_str("s").unwrap(), Protection::Secure);
        assert_eq!(Protection::from_str("any").unwrap(), Protection::Any);
    }

    #[test]
    fn parses_cpu_name_with_plus() {
        assert_eq!(CpuName::from_str("CM0PLUS").unwrap(), CpuName::Cm0Plus);
    }

    #[test]
    fn parses_data_type_pointer() {
        assert_eq!(DataType::from_str("uint32_t *").unwrap(), DataType::Uint32TPtr);
    }
}
