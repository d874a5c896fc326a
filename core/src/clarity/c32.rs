//! Crockford-style base32 ("c32") used by Stacks addresses.
//!
//! An address is `S` + the version character + c32(hash160 ++ checksum),
//! where the checksum is the first four bytes of
//! `sha256(sha256(version ++ hash160))`.

use sha2::{Digest, Sha256};

use super::ClarityError;

const C32_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

pub fn c32_encode(input: &[u8]) -> String {
    let mut out: Vec<u8> = Vec::with_capacity(input.len() * 8 / 5 + 1);
    let mut carry: u8 = 0;
    let mut carry_bits: u8 = 0;

    // Walk from the least significant byte, emitting 5-bit groups.
    for &byte in input.iter().rev() {
        let take = 5 - carry_bits;
        let low = byte & ((1u8 << take) - 1);
        out.push(C32_ALPHABET[((low << carry_bits) + carry) as usize]);

        carry_bits = 8 + carry_bits - 5;
        carry = byte >> (8 - carry_bits);

        if carry_bits >= 5 {
            out.push(C32_ALPHABET[(carry & 0x1f) as usize]);
            carry_bits -= 5;
            carry >>= 5;
        }
    }

    if carry_bits > 0 {
        out.push(C32_ALPHABET[carry as usize]);
    }

    // Drop high zero digits produced by padding...
    while out.last() == Some(&C32_ALPHABET[0]) {
        out.pop();
    }

    // ...then restore one zero digit per leading zero byte.
    for &byte in input {
        if byte != 0 {
            break;
        }
        out.push(C32_ALPHABET[0]);
    }

    out.reverse();
    // Every byte comes from the ASCII alphabet.
    out.into_iter().map(char::from).collect()
}

fn c32_digit(c: char) -> Option<u8> {
    let normalized = match c.to_ascii_uppercase() {
        'O' => '0',
        'L' | 'I' => '1',
        other => other,
    };
    C32_ALPHABET
        .iter()
        .position(|&a| a as char == normalized)
        .map(|p| p as u8)
}

pub fn c32_decode(input: &str) -> Result<Vec<u8>, ClarityError> {
    let digits = input
        .chars()
        .map(|c| c32_digit(c).ok_or_else(|| ClarityError::InvalidAddress(input.to_string())))
        .collect::<Result<Vec<u8>, _>>()?;

    let mut out: Vec<u8> = Vec::with_capacity(digits.len() * 5 / 8 + 1);
    let mut carry: u16 = 0;
    let mut carry_bits: u16 = 0;

    for &digit in digits.iter().rev() {
        carry += (digit as u16) << carry_bits;
        carry_bits += 5;
        if carry_bits >= 8 {
            out.push((carry & 0xff) as u8);
            carry_bits -= 8;
            carry >>= 8;
        }
    }

    if carry_bits > 0 {
        out.push(carry as u8);
    }

    while out.last() == Some(&0) {
        out.pop();
    }

    for &digit in &digits {
        if digit != 0 {
            break;
        }
        out.push(0);
    }

    out.reverse();
    Ok(out)
}

fn checksum(version: u8, data: &[u8]) -> [u8; 4] {
    let mut hasher = Sha256::new();
    hasher.update([version]);
    hasher.update(data);
    let first = hasher.finalize();
    let second = Sha256::digest(first);

    let mut out = [0u8; 4];
    out.copy_from_slice(&second[..4]);
    out
}

pub fn c32check_encode(version: u8, data: &[u8]) -> Result<String, ClarityError> {
    if version >= 32 {
        return Err(ClarityError::InvalidVersion(version));
    }

    let mut payload = data.to_vec();
    payload.extend_from_slice(&checksum(version, data));

    let mut out = String::with_capacity(payload.len() * 2);
    out.push(C32_ALPHABET[version as usize] as char);
    out.push_str(&c32_encode(&payload));
    Ok(out)
}

pub fn c32check_decode(input: &str) -> Result<(u8, Vec<u8>), ClarityError> {
    let invalid = || ClarityError::InvalidAddress(input.to_string());

    let mut chars = input.chars();
    let version = chars.next().and_then(c32_digit).ok_or_else(invalid)?;
    let mut payload = c32_decode(chars.as_str())?;

    if payload.len() < 4 {
        return Err(invalid());
    }
    let data_len = payload.len() - 4;
    let expected = payload.split_off(data_len);

    if expected != checksum(version, &payload) {
        return Err(ClarityError::BadChecksum(input.to_string()));
    }

    Ok((version, payload))
}

/// Render a Stacks address (`SP…` / `ST…`).
pub fn c32_address(version: u8, hash160: &[u8; 20]) -> Result<String, ClarityError> {
    Ok(format!("S{}", c32check_encode(version, hash160)?))
}

/// Parse a Stacks address into its version byte and hash160.
pub fn c32_address_decode(address: &str) -> Result<(u8, [u8; 20]), ClarityError> {
    let body = address
        .strip_prefix('S')
        .ok_or_else(|| ClarityError::InvalidAddress(address.to_string()))?;

    let (version, data) = c32check_decode(body)?;
    let hash160: [u8; 20] = data
        .try_into()
        .map_err(|_| ClarityError::InvalidAddress(address.to_string()))?;

    Ok((version, hash160))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAINNET: u8 = 22;
    const TESTNET: u8 = 26;

    #[test]
    fn boot_addresses_encode() {
        assert_eq!(
            c32_address(MAINNET, &[0u8; 20]).unwrap(),
            "SP000000000000000000002Q6VF78"
        );
        assert_eq!(
            c32_address(TESTNET, &[0u8; 20]).unwrap(),
            "ST000000000000000000002AMW42H"
        );
    }

    #[test]
    fn known_address_decodes_to_its_hash() {
        let (version, hash) =
            c32_address_decode("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7").unwrap();
        assert_eq!(version, MAINNET);
        assert_eq!(hex::encode(hash), "a46ff88886c2ef9762d970b4d2c63678835bd39d");
    }

    #[test]
    fn lowercase_and_confusable_digits_are_normalized() {
        assert_eq!(c32_decode("o1").unwrap(), c32_decode("01").unwrap());
        assert_eq!(c32_decode("L").unwrap(), c32_decode("1").unwrap());
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        let err = c32_address_decode("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ8").unwrap_err();
        assert!(matches!(err, ClarityError::BadChecksum(_)));
    }

    #[test]
    fn version_must_fit_one_digit() {
        assert!(matches!(
            c32check_encode(32, &[1, 2, 3]),
            Err(ClarityError::InvalidVersion(32))
        ));
    }

    #[test]
    fn leading_zero_bytes_survive() {
        let data = [0u8, 0, 7, 255];
        assert_eq!(c32_decode(&c32_encode(&data)).unwrap(), data);
    }
}
