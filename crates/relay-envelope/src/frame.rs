//! Binary framing: a tag byte plus a sequence of length-prefixed blobs.
//!
//! Wire format: `tag (1 byte) || varint blob count || (varint len || bytes)*`.
//! Lengths use the 1/3/5/9-byte little-endian varint encoding. The format
//! is compact and unambiguous; trailing bytes after the final blob are
//! rejected. It is an internal wire choice of this codec, not a
//! cross-implementation compatibility surface.

use crate::EnvelopeError;

/// Wrap a tag and a sequence of byte blobs into a single byte string.
///
/// # Arguments
/// * `tag` - Small integer discriminator written as the leading byte.
/// * `blobs` - The opaque byte blobs to frame, in order.
///
/// # Returns
/// The framed byte string.
pub(crate) fn frame(tag: u8, blobs: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        1 + 9 + blobs.iter().map(|b| 9 + b.len()).sum::<usize>(),
    );
    out.push(tag);
    write_varint(&mut out, blobs.len() as u64);
    for blob in blobs {
        write_varint(&mut out, blob.len() as u64);
        out.extend_from_slice(blob);
    }
    out
}

/// Unwrap a framed byte string back into its tag and blobs.
///
/// # Arguments
/// * `bytes` - The framed byte string.
///
/// # Returns
/// `Ok((tag, blobs))` on success, or `EnvelopeError::Malformed` if the
/// input is truncated, has an oversized length prefix, or carries trailing
/// bytes after the final blob.
pub(crate) fn unframe(bytes: &[u8]) -> Result<(u8, Vec<Vec<u8>>), EnvelopeError> {
    if bytes.is_empty() {
        return Err(EnvelopeError::Malformed("empty envelope".to_string()));
    }
    let tag = bytes[0];
    let mut offset = 1;

    let count = read_varint(bytes, &mut offset)?;
    // An empty blob still consumes one length byte, so the count can never
    // legitimately exceed the remaining input.
    if count > (bytes.len() - offset) as u64 {
        return Err(EnvelopeError::Malformed(format!(
            "blob count {} exceeds remaining input",
            count
        )));
    }

    let mut blobs = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let len = read_varint(bytes, &mut offset)? as usize;
        // Compare against the remaining input; summing offset + len could
        // overflow on an adversarial length prefix.
        if len > bytes.len() - offset {
            return Err(EnvelopeError::Malformed(format!(
                "blob length {} overruns input",
                len
            )));
        }
        blobs.push(bytes[offset..offset + len].to_vec());
        offset += len;
    }

    if offset != bytes.len() {
        return Err(EnvelopeError::Malformed(format!(
            "{} trailing bytes after final blob",
            bytes.len() - offset
        )));
    }

    Ok((tag, blobs))
}

/// Write a variable-length integer.
///
/// The encoding uses 1, 3, 5, or 9 bytes depending on the magnitude of the
/// value: values below 0xfd are a single byte, otherwise a marker byte
/// (0xfd/0xfe/0xff) followed by a little-endian u16/u32/u64.
fn write_varint(out: &mut Vec<u8>, v: u64) {
    if v < 0xfd {
        out.push(v as u8);
    } else if v < 0x10000 {
        out.push(0xfd);
        out.extend_from_slice(&(v as u16).to_le_bytes());
    } else if v < 0x100000000 {
        out.push(0xfe);
        out.extend_from_slice(&(v as u32).to_le_bytes());
    } else {
        out.push(0xff);
        out.extend_from_slice(&v.to_le_bytes());
    }
}

/// Read a variable-length integer, advancing `offset` past it.
///
/// # Returns
/// `Ok(value)` or `EnvelopeError::Malformed` if the input ends mid-varint.
fn read_varint(data: &[u8], offset: &mut usize) -> Result<u64, EnvelopeError> {
    let truncated = || EnvelopeError::Malformed("truncated varint".to_string());

    let first = *data.get(*offset).ok_or_else(truncated)?;
    *offset += 1;

    let (value, width) = match first {
        0xff => {
            let rest = data.get(*offset..*offset + 8).ok_or_else(truncated)?;
            (u64::from_le_bytes(rest.try_into().unwrap()), 8)
        }
        0xfe => {
            let rest = data.get(*offset..*offset + 4).ok_or_else(truncated)?;
            (u32::from_le_bytes(rest.try_into().unwrap()) as u64, 4)
        }
        0xfd => {
            let rest = data.get(*offset..*offset + 2).ok_or_else(truncated)?;
            (u16::from_le_bytes(rest.try_into().unwrap()) as u64, 2)
        }
        b => (b as u64, 0),
    };
    *offset += width;
    Ok(value)
}
