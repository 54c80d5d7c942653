//! Presentation-format record data to hickory `RData`.
//!
//! Common types map onto hickory's typed rdata. CAA, NAPTR, SSHFP, SPF and
//! the RFC 3597 `\# <len> <hex>` form are packed into wire bytes here and
//! carried as opaque rdata.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, NULL, PTR, SOA, SRV, TXT};
use hickory_proto::rr::{Name, RData, RecordType as HickoryRecordType};
use zoneward_domain::{DomainError, RecordType};

pub struct RdataParser;

impl RdataParser {
    pub fn parse(record_type: RecordType, data: &str) -> Result<RData, DomainError> {
        let tokens = tokenize(data)?;

        if tokens.first().map(String::as_str) == Some("\\#") {
            return generic(record_type, &tokens[1..], data);
        }

        match record_type {
            RecordType::A => {
                let ip = single(&tokens, data)?
                    .parse::<Ipv4Addr>()
                    .map_err(|e| invalid(data, e))?;
                Ok(RData::A(A(ip)))
            }
            RecordType::AAAA => {
                let ip = single(&tokens, data)?
                    .parse::<Ipv6Addr>()
                    .map_err(|e| invalid(data, e))?;
                Ok(RData::AAAA(AAAA(ip)))
            }
            RecordType::NS => Ok(RData::NS(NS(parse_name(single(&tokens, data)?)?))),
            RecordType::CNAME => Ok(RData::CNAME(CNAME(parse_name(single(&tokens, data)?)?))),
            RecordType::PTR => Ok(RData::PTR(PTR(parse_name(single(&tokens, data)?)?))),
            RecordType::MX => {
                let [preference, exchange] = fields::<2>(&tokens, data)?;
                Ok(RData::MX(MX::new(
                    parse_num(preference, data)?,
                    parse_name(exchange)?,
                )))
            }
            RecordType::TXT => {
                if tokens.is_empty() {
                    return Err(invalid(data, "no character-strings"));
                }
                Ok(RData::TXT(TXT::new(tokens)))
            }
            RecordType::SRV => {
                let [priority, weight, port, target] = fields::<4>(&tokens, data)?;
                Ok(RData::SRV(SRV::new(
                    parse_num(priority, data)?,
                    parse_num(weight, data)?,
                    parse_num(port, data)?,
                    parse_name(target)?,
                )))
            }
            RecordType::SOA => {
                let [mname, rname, serial, refresh, retry, expire, minimum] =
                    fields::<7>(&tokens, data)?;
                Ok(RData::SOA(SOA::new(
                    parse_name(mname)?,
                    parse_name(rname)?,
                    parse_num(serial, data)?,
                    parse_num(refresh, data)?,
                    parse_num(retry, data)?,
                    parse_num(expire, data)?,
                    parse_num(minimum, data)?,
                )))
            }
            RecordType::SPF => {
                let mut wire = Vec::new();
                for token in &tokens {
                    push_character_string(&mut wire, token, data)?;
                }
                Ok(opaque(record_type, wire))
            }
            RecordType::CAA => {
                let [flags, tag, value] = fields::<3>(&tokens, data)?;
                let flags: u8 = parse_num(flags, data)?;
                if tag.is_empty() || tag.len() > 255 {
                    return Err(invalid(data, "bad CAA tag"));
                }
                let mut wire = vec![flags, tag.len() as u8];
                wire.extend_from_slice(tag.as_bytes());
                wire.extend_from_slice(value.as_bytes());
                Ok(opaque(record_type, wire))
            }
            RecordType::NAPTR => {
                let [order, preference, flags, services, regexp, replacement] =
                    fields::<6>(&tokens, data)?;
                let mut wire = Vec::new();
                wire.extend_from_slice(&parse_num::<u16>(order, data)?.to_be_bytes());
                wire.extend_from_slice(&parse_num::<u16>(preference, data)?.to_be_bytes());
                push_character_string(&mut wire, flags, data)?;
                push_character_string(&mut wire, services, data)?;
                push_character_string(&mut wire, regexp, data)?;
                push_wire_name(&mut wire, replacement, data)?;
                Ok(opaque(record_type, wire))
            }
            RecordType::SSHFP => {
                let [algorithm, fingerprint_type, fingerprint] = fields::<3>(&tokens, data)?;
                let mut wire = vec![
                    parse_num::<u8>(algorithm, data)?,
                    parse_num::<u8>(fingerprint_type, data)?,
                ];
                wire.extend(decode_hex(fingerprint, data)?);
                Ok(opaque(record_type, wire))
            }
            other => Err(DomainError::InvalidRecordData(format!(
                "{} data must use the \\# generic form: {}",
                other, data
            ))),
        }
    }
}

fn invalid(data: &str, reason: impl std::fmt::Display) -> DomainError {
    DomainError::InvalidRecordData(format!("{} ({})", data, reason))
}

fn opaque(record_type: RecordType, wire: Vec<u8>) -> RData {
    RData::Unknown {
        code: HickoryRecordType::from(record_type.to_u16()),
        rdata: NULL::with(wire),
    }
}

fn generic(record_type: RecordType, tokens: &[String], data: &str) -> Result<RData, DomainError> {
    let (len, hex) = tokens
        .split_first()
        .ok_or_else(|| invalid(data, "missing length"))?;
    let len: usize = parse_num(len, data)?;
    let wire = decode_hex(&hex.concat(), data)?;
    if wire.len() != len {
        return Err(invalid(data, "length does not match data"));
    }
    Ok(opaque(record_type, wire))
}

fn single<'a>(tokens: &'a [String], data: &str) -> Result<&'a str, DomainError> {
    let [value] = fields::<1>(tokens, data)?;
    Ok(value)
}

fn fields<'a, const N: usize>(tokens: &'a [String], data: &str) -> Result<[&'a str; N], DomainError> {
    if tokens.len() != N {
        return Err(invalid(
            data,
            format!("expected {} fields, got {}", N, tokens.len()),
        ));
    }
    let mut out = [""; N];
    for (slot, token) in out.iter_mut().zip(tokens) {
        *slot = token.as_str();
    }
    Ok(out)
}

fn parse_num<T: FromStr>(value: &str, data: &str) -> Result<T, DomainError>
where
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| invalid(data, e))
}

fn parse_name(value: &str) -> Result<Name, DomainError> {
    let mut name = Name::from_str(value).map_err(|e| {
        DomainError::InvalidDomainName(format!("Invalid name '{}': {}", value, e))
    })?;
    name.set_fqdn(true);
    Ok(name)
}

fn push_character_string(wire: &mut Vec<u8>, value: &str, data: &str) -> Result<(), DomainError> {
    if value.len() > 255 {
        return Err(invalid(data, "character-string longer than 255 bytes"));
    }
    wire.push(value.len() as u8);
    wire.extend_from_slice(value.as_bytes());
    Ok(())
}

fn push_wire_name(wire: &mut Vec<u8>, name: &str, data: &str) -> Result<(), DomainError> {
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        if label.len() > 63 {
            return Err(invalid(data, "label longer than 63 bytes"));
        }
        wire.push(label.len() as u8);
        wire.extend_from_slice(label.to_ascii_lowercase().as_bytes());
    }
    wire.push(0);
    Ok(())
}

fn decode_hex(hex: &str, data: &str) -> Result<Vec<u8>, DomainError> {
    if hex.len() % 2 != 0 {
        return Err(invalid(data, "odd number of hex digits"));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| invalid(data, "bad hex digit"))
        })
        .collect()
}

/// Splits presentation data on whitespace, keeping quoted strings together
/// and resolving `\"`, `\\` and `\DDD` escapes inside them.
fn tokenize(data: &str) -> Result<Vec<String>, DomainError> {
    let mut tokens = Vec::new();
    let mut chars = data.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut token = String::new();
        if c == '"' {
            chars.next();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => token.push(unescape(&mut chars, data)?),
                    other => token.push(other),
                }
            }
            if !closed {
                return Err(invalid(data, "unterminated quoted string"));
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }

    Ok(tokens)
}

fn unescape(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    data: &str,
) -> Result<char, DomainError> {
    let first = chars
        .next()
        .ok_or_else(|| invalid(data, "dangling escape"))?;
    if !first.is_ascii_digit() {
        return Ok(first);
    }

    let mut digits = String::from(first);
    for _ in 0..2 {
        match chars.next() {
            Some(d) if d.is_ascii_digit() => digits.push(d),
            _ => return Err(invalid(data, "bad \\DDD escape")),
        }
    }
    let value: u8 = parse_num(&digits, data)?;
    Ok(value as char)
}
