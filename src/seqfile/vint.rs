//! Zero-compressed variable-length integers and length-prefixed text.
//!
//! Values in `-112..=127` take a single byte. Larger magnitudes are written as
//! a marker byte, which encodes sign and byte count, followed by the value's
//! significant bytes in big-endian order. Negative values store their
//! one's complement.

use std::io::{Read, Write};

use super::SeqFileError;

pub fn write_vlong<W: Write + ?Sized>(out: &mut W, value: i64) -> Result<(), SeqFileError> {
    if (-112..=127).contains(&value) {
        out.write_all(&[value as u8])?;
        return Ok(());
    }

    let (magnitude, base) = if value < 0 { (!value, -120i64) } else { (value, -112i64) };
    let byte_count = 8 - (magnitude.leading_zeros() as usize) / 8;

    let mut buf = Vec::with_capacity(byte_count + 1);
    buf.push((base - byte_count as i64) as u8);
    buf.extend_from_slice(&magnitude.to_be_bytes()[8 - byte_count..]);
    out.write_all(&buf)?;
    Ok(())
}

pub fn read_vlong<R: Read + ?Sized>(input: &mut R) -> Result<i64, SeqFileError> {
    let mut first = [0u8; 1];
    input
        .read_exact(&mut first)
        .map_err(|e| SeqFileError::eof_as_truncated(e, "variable-length integer"))?;
    let marker = first[0] as i8;
    if marker >= -112 {
        return Ok(marker as i64);
    }

    let negative = marker < -120;
    let byte_count = if negative {
        (-120 - marker as i32) as usize
    } else {
        (-112 - marker as i32) as usize
    };

    let mut bytes = [0u8; 8];
    input
        .read_exact(&mut bytes[8 - byte_count..])
        .map_err(|e| SeqFileError::eof_as_truncated(e, "variable-length integer"))?;
    let magnitude = i64::from_be_bytes(bytes);
    Ok(if negative { !magnitude } else { magnitude })
}

pub fn write_vint<W: Write + ?Sized>(out: &mut W, value: i32) -> Result<(), SeqFileError> {
    write_vlong(out, value as i64)
}

pub fn read_vint<R: Read + ?Sized>(input: &mut R) -> Result<i32, SeqFileError> {
    let value = read_vlong(input)?;
    i32::try_from(value).map_err(|_| SeqFileError::Oversized {
        field: "variable-length int",
        len: 8,
        max: 4,
    })
}

/// Write UTF-8 text prefixed with its byte length.
pub fn write_text<W: Write + ?Sized>(out: &mut W, text: &str) -> Result<(), SeqFileError> {
    let len = i32::try_from(text.len()).map_err(|_| SeqFileError::Oversized {
        field: "text",
        len: text.len(),
        max: i32::MAX as usize,
    })?;
    write_vint(out, len)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

pub fn read_text<R: Read + ?Sized>(input: &mut R, what: &'static str) -> Result<String, SeqFileError> {
    let len = read_vint(input)?;
    if len < 0 {
        return Err(SeqFileError::Truncated(what));
    }
    let mut bytes = Vec::new();
    (&mut *input).take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() < len as usize {
        return Err(SeqFileError::Truncated(what));
    }
    Ok(String::from_utf8(bytes)?)
}
