//! Consensus (SIP-005) serialization of Clarity values.
//!
//! Every value starts with a one-byte type prefix. Integers are 16-byte
//! big-endian, lengths are 4-byte big-endian, names inside principals and
//! tuples carry a one-byte length.

use std::collections::BTreeMap;

use super::{ClarityError, ClarityValue, ContractPrincipal, StandardPrincipal};

const PREFIX_INT: u8 = 0x00;
const PREFIX_UINT: u8 = 0x01;
const PREFIX_BUFFER: u8 = 0x02;
const PREFIX_TRUE: u8 = 0x03;
const PREFIX_FALSE: u8 = 0x04;
const PREFIX_STANDARD_PRINCIPAL: u8 = 0x05;
const PREFIX_CONTRACT_PRINCIPAL: u8 = 0x06;
const PREFIX_OK: u8 = 0x07;
const PREFIX_ERR: u8 = 0x08;
const PREFIX_NONE: u8 = 0x09;
const PREFIX_SOME: u8 = 0x0a;
const PREFIX_LIST: u8 = 0x0b;
const PREFIX_TUPLE: u8 = 0x0c;
const PREFIX_STRING_ASCII: u8 = 0x0d;
const PREFIX_STRING_UTF8: u8 = 0x0e;

/// Same bound the node enforces on value nesting.
const MAX_DEPTH: usize = 32;

impl ClarityValue {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_value(self, &mut out);
        out
    }

    /// Decode exactly one value; trailing bytes are an error.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, ClarityError> {
        let mut reader = Reader { bytes, pos: 0 };
        let value = reader.value(0)?;

        let rest = bytes.len() - reader.pos;
        if rest != 0 {
            return Err(ClarityError::TrailingBytes(rest));
        }
        Ok(value)
    }
}

fn write_len(len: usize, out: &mut Vec<u8>) {
    out.extend_from_slice(&(len as u32).to_be_bytes());
}

fn write_standard(p: &StandardPrincipal, out: &mut Vec<u8>) {
    out.push(p.version);
    out.extend_from_slice(&p.hash160);
}

/// Contract names are bounded at construction; tuple keys are caller-built
/// and must stay within Clarity's 128-byte name limit.
fn write_name(name: &str, out: &mut Vec<u8>) {
    debug_assert!(
        name.len() <= usize::from(u8::MAX),
        "clarity name longer than 255 bytes: {name:?}"
    );
    out.push(name.len() as u8);
    out.extend_from_slice(name.as_bytes());
}

fn write_value(value: &ClarityValue, out: &mut Vec<u8>) {
    match value {
        ClarityValue::Int(v) => {
            out.push(PREFIX_INT);
            out.extend_from_slice(&v.to_be_bytes());
        }
        ClarityValue::UInt(v) => {
            out.push(PREFIX_UINT);
            out.extend_from_slice(&v.to_be_bytes());
        }
        ClarityValue::Buffer(b) => {
            out.push(PREFIX_BUFFER);
            write_len(b.len(), out);
            out.extend_from_slice(b);
        }
        ClarityValue::Bool(true) => out.push(PREFIX_TRUE),
        ClarityValue::Bool(false) => out.push(PREFIX_FALSE),
        ClarityValue::StandardPrincipal(p) => {
            out.push(PREFIX_STANDARD_PRINCIPAL);
            write_standard(p, out);
        }
        ClarityValue::ContractPrincipal(p) => {
            out.push(PREFIX_CONTRACT_PRINCIPAL);
            write_standard(&p.issuer, out);
            write_name(&p.name, out);
        }
        ClarityValue::ResponseOk(v) => {
            out.push(PREFIX_OK);
            write_value(v, out);
        }
        ClarityValue::ResponseErr(v) => {
            out.push(PREFIX_ERR);
            write_value(v, out);
        }
        ClarityValue::OptionalNone => out.push(PREFIX_NONE),
        ClarityValue::OptionalSome(v) => {
            out.push(PREFIX_SOME);
            write_value(v, out);
        }
        ClarityValue::List(items) => {
            out.push(PREFIX_LIST);
            write_len(items.len(), out);
            for item in items {
                write_value(item, out);
            }
        }
        ClarityValue::Tuple(entries) => {
            // BTreeMap iteration keeps keys sorted, as the node requires.
            out.push(PREFIX_TUPLE);
            write_len(entries.len(), out);
            for (name, v) in entries {
                write_name(name, out);
                write_value(v, out);
            }
        }
        ClarityValue::StringAscii(s) => {
            out.push(PREFIX_STRING_ASCII);
            write_len(s.len(), out);
            out.extend_from_slice(s.as_bytes());
        }
        ClarityValue::StringUtf8(s) => {
            out.push(PREFIX_STRING_UTF8);
            write_len(s.len(), out);
            out.extend_from_slice(s.as_bytes());
        }
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], ClarityError> {
        let end = self.pos.checked_add(n).ok_or(ClarityError::UnexpectedEof)?;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(ClarityError::UnexpectedEof)?;
        self.pos = end;
        Ok(slice)
    }

    fn byte(&mut self) -> Result<u8, ClarityError> {
        Ok(self.take(1)?[0])
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], ClarityError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn len(&mut self) -> Result<usize, ClarityError> {
        Ok(u32::from_be_bytes(self.array::<4>()?) as usize)
    }

    fn standard(&mut self) -> Result<StandardPrincipal, ClarityError> {
        let version = self.byte()?;
        if version >= 32 {
            return Err(ClarityError::InvalidVersion(version));
        }
        let hash160 = self.array::<20>()?;
        Ok(StandardPrincipal { version, hash160 })
    }

    fn name(&mut self) -> Result<String, ClarityError> {
        let len = self.byte()? as usize;
        let raw = self.take(len)?;
        if !raw.is_ascii() {
            return Err(ClarityError::InvalidAscii);
        }
        String::from_utf8(raw.to_vec()).map_err(|_| ClarityError::InvalidUtf8)
    }

    fn value(&mut self, depth: usize) -> Result<ClarityValue, ClarityError> {
        if depth > MAX_DEPTH {
            return Err(ClarityError::DepthExceeded(MAX_DEPTH));
        }

        let prefix = self.byte()?;
        let value = match prefix {
            PREFIX_INT => ClarityValue::Int(i128::from_be_bytes(self.array()?)),
            PREFIX_UINT => ClarityValue::UInt(u128::from_be_bytes(self.array()?)),
            PREFIX_BUFFER => {
                let len = self.len()?;
                ClarityValue::Buffer(self.take(len)?.to_vec())
            }
            PREFIX_TRUE => ClarityValue::Bool(true),
            PREFIX_FALSE => ClarityValue::Bool(false),
            PREFIX_STANDARD_PRINCIPAL => ClarityValue::StandardPrincipal(self.standard()?),
            PREFIX_CONTRACT_PRINCIPAL => {
                let issuer = self.standard()?;
                let name = self.name()?;
                ClarityValue::ContractPrincipal(ContractPrincipal::new(issuer, name)?)
            }
            PREFIX_OK => ClarityValue::ok(self.value(depth + 1)?),
            PREFIX_ERR => ClarityValue::err(self.value(depth + 1)?),
            PREFIX_NONE => ClarityValue::OptionalNone,
            PREFIX_SOME => ClarityValue::some(self.value(depth + 1)?),
            PREFIX_LIST => {
                let len = self.len()?;
                // Cap the pre-allocation; a hostile length must not reserve gigabytes.
                let mut items = Vec::with_capacity(len.min(1024));
                for _ in 0..len {
                    items.push(self.value(depth + 1)?);
                }
                ClarityValue::List(items)
            }
            PREFIX_TUPLE => {
                let len = self.len()?;
                let mut entries = BTreeMap::new();
                for _ in 0..len {
                    let name = self.name()?;
                    let v = self.value(depth + 1)?;
                    entries.insert(name, v);
                }
                ClarityValue::Tuple(entries)
            }
            PREFIX_STRING_ASCII => {
                let len = self.len()?;
                let raw = self.take(len)?;
                if !raw.is_ascii() {
                    return Err(ClarityError::InvalidAscii);
                }
                ClarityValue::StringAscii(
                    String::from_utf8(raw.to_vec()).map_err(|_| ClarityError::InvalidUtf8)?,
                )
            }
            PREFIX_STRING_UTF8 => {
                let len = self.len()?;
                let raw = self.take(len)?;
                ClarityValue::StringUtf8(
                    String::from_utf8(raw.to_vec()).map_err(|_| ClarityError::InvalidUtf8)?,
                )
            }
            other => return Err(ClarityError::UnknownPrefix(other)),
        };

        Ok(value)
    }
}
