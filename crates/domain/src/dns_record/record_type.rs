use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordType {
    A,
    NS,
    CNAME,
    SOA,
    PTR,
    MX,
    TXT,
    AAAA,
    SRV,
    NAPTR,
    DS,
    SSHFP,
    DNSKEY,
    SPF,
    CAA,

    IXFR,
    AXFR,
    ANY,

    Unknown(u16),
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::NS => "NS",
            RecordType::CNAME => "CNAME",
            RecordType::SOA => "SOA",
            RecordType::PTR => "PTR",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
            RecordType::AAAA => "AAAA",
            RecordType::SRV => "SRV",
            RecordType::NAPTR => "NAPTR",
            RecordType::DS => "DS",
            RecordType::SSHFP => "SSHFP",
            RecordType::DNSKEY => "DNSKEY",
            RecordType::SPF => "SPF",
            RecordType::CAA => "CAA",
            RecordType::IXFR => "IXFR",
            RecordType::AXFR => "AXFR",
            RecordType::ANY => "ANY",
            RecordType::Unknown(_) => "UNKNOWN",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::PTR => 12,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
            RecordType::SRV => 33,
            RecordType::NAPTR => 35,
            RecordType::DS => 43,
            RecordType::SSHFP => 44,
            RecordType::DNSKEY => 48,
            RecordType::SPF => 99,
            RecordType::CAA => 257,
            RecordType::IXFR => 251,
            RecordType::AXFR => 252,
            RecordType::ANY => 255,
            RecordType::Unknown(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => RecordType::A,
            2 => RecordType::NS,
            5 => RecordType::CNAME,
            6 => RecordType::SOA,
            12 => RecordType::PTR,
            15 => RecordType::MX,
            16 => RecordType::TXT,
            28 => RecordType::AAAA,
            33 => RecordType::SRV,
            35 => RecordType::NAPTR,
            43 => RecordType::DS,
            44 => RecordType::SSHFP,
            48 => RecordType::DNSKEY,
            99 => RecordType::SPF,
            257 => RecordType::CAA,
            251 => RecordType::IXFR,
            252 => RecordType::AXFR,
            255 => RecordType::ANY,
            other => RecordType::Unknown(other),
        }
    }

    /// AXFR and IXFR questions are both answered with a full transfer.
    pub fn is_zone_transfer(&self) -> bool {
        matches!(self, RecordType::AXFR | RecordType::IXFR)
    }

    /// Meta types only ever appear in questions, never in stored record-sets.
    pub fn is_meta(&self) -> bool {
        matches!(self, RecordType::AXFR | RecordType::IXFR | RecordType::ANY)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Unknown(code) => write!(f, "TYPE{}", code),
            known => write!(f, "{}", known.as_str()),
        }
    }
}

impl FromStr for RecordType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let parsed = match upper.as_str() {
            "A" => RecordType::A,
            "NS" => RecordType::NS,
            "CNAME" => RecordType::CNAME,
            "SOA" => RecordType::SOA,
            "PTR" => RecordType::PTR,
            "MX" => RecordType::MX,
            "TXT" => RecordType::TXT,
            "AAAA" => RecordType::AAAA,
            "SRV" => RecordType::SRV,
            "NAPTR" => RecordType::NAPTR,
            "DS" => RecordType::DS,
            "SSHFP" => RecordType::SSHFP,
            "DNSKEY" => RecordType::DNSKEY,
            "SPF" => RecordType::SPF,
            "CAA" => RecordType::CAA,
            "IXFR" => RecordType::IXFR,
            "AXFR" => RecordType::AXFR,
            "ANY" => RecordType::ANY,
            other => {
                let code = other
                    .strip_prefix("TYPE")
                    .and_then(|n| n.parse::<u16>().ok())
                    .ok_or_else(|| DomainError::InvalidRecordData(format!("Unknown record type: {}", s)))?;
                RecordType::from_u16(code)
            }
        };
        Ok(parsed)
    }
}
