//! CBOR transcoding: convert yamlite values to CBOR binary data.
//!
//! Mapping from yamlite to CBOR:
//!   - Value::Null    -> CBOR null (simple value 22)
//!   - Value::Bool    -> CBOR bool (simple values 20/21)
//!   - Value::Number  -> CBOR integer (smallest encoding) when integral,
//!                       otherwise CBOR float64
//!   - Value::String  -> CBOR text string (determinate length)
//!   - Value::Mapping -> CBOR map (determinate length, text string keys,
//!                       insertion order)

use ciborium::value::Value as CborValue;
use libyamlite::Value;
use std::fmt::Write as FmtWrite;

use super::integral;

// ---------------------------------------------------------------------------
// Encode (yamlite -> CBOR)
//
// We write CBOR directly rather than going through ciborium's Value type
// because ciborium downgrades float64 to float16/float32 when the value is
// representable in fewer bytes. Non-integral numbers always stay float64.
// ---------------------------------------------------------------------------

/// Encode a yamlite Value as CBOR bytes.
pub fn encode(value: &Value) -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    write_value(&mut buf, value)?;
    Ok(buf)
}

fn write_value(buf: &mut Vec<u8>, value: &Value) -> Result<(), String> {
    match value {
        Value::Null => {
            // CBOR simple value 22 = null
            buf.push(0xf6);
        }
        Value::Bool(b) => {
            // CBOR simple value 20 = false, 21 = true
            buf.push(if *b { 0xf5 } else { 0xf4 });
        }
        Value::Number(n) => match integral(*n) {
            Some(i) => write_integer(buf, i),
            None if n.is_finite() => {
                // Major 7, info 27
                buf.push(0xfb);
                buf.extend_from_slice(&n.to_be_bytes());
            }
            None => return Err(format!("number {} is not finite", n)),
        },
        Value::String(s) => write_text(buf, s),
        Value::Mapping(m) => {
            write_type_and_length(buf, 5, m.len() as u64); // major 5 = map
            for (k, v) in m {
                write_text(buf, k);
                write_value(buf, v)?;
            }
        }
    }
    Ok(())
}

fn write_text(buf: &mut Vec<u8>, s: &str) {
    let bytes = s.as_bytes();
    write_type_and_length(buf, 3, bytes.len() as u64); // major 3 = text string
    buf.extend_from_slice(bytes);
}

/// Write a CBOR major type + length/value argument.
///
/// CBOR encodes the major type in the high 3 bits and uses the low 5 bits
/// plus optional following bytes for the argument:
///   0-23:    argument in the low 5 bits (1 byte total)
///   24:      1-byte argument follows
///   25:      2-byte argument follows
///   26:      4-byte argument follows
///   27:      8-byte argument follows
fn write_type_and_length(buf: &mut Vec<u8>, major: u8, val: u64) {
    let high = major << 5;
    match val {
        0..=23 => {
            buf.push(high | val as u8);
        }
        24..=0xff => {
            buf.push(high | 24);
            buf.push(val as u8);
        }
        0x100..=0xffff => {
            buf.push(high | 25);
            buf.extend_from_slice(&(val as u16).to_be_bytes());
        }
        0x10000..=0xffff_ffff => {
            buf.push(high | 26);
            buf.extend_from_slice(&(val as u32).to_be_bytes());
        }
        _ => {
            buf.push(high | 27);
            buf.extend_from_slice(&val.to_be_bytes());
        }
    }
}

/// Major 0 encodes n, major 1 encodes -1 - n.
fn write_integer(buf: &mut Vec<u8>, n: i64) {
    if n < 0 {
        write_type_and_length(buf, 1, (-1 - n) as u64);
    } else {
        write_type_and_length(buf, 0, n as u64);
    }
}

// ---------------------------------------------------------------------------
// Diagnostic Notation (CBOR -> human-readable text, RFC 8949 §8)
// ---------------------------------------------------------------------------

/// Render CBOR bytes as diagnostic notation (RFC 8949 §8).
///
/// Renders from the CBOR binary, not from yamlite values, so it shows the
/// actual wire encoding.
pub fn diagnostic(input: &[u8]) -> Result<String, String> {
    let cbor_value: CborValue =
        ciborium::de::from_reader(input).map_err(|e| format!("CBOR decode error: {}", e))?;
    let mut out = String::new();
    diag_value(&mut out, &cbor_value, 0).map_err(|e| e.to_string())?;
    out.push('\n');
    Ok(out)
}

fn diag_value(out: &mut String, val: &CborValue, indent: usize) -> std::fmt::Result {
    match val {
        CborValue::Null => out.push_str("null"),
        CborValue::Bool(true) => out.push_str("true"),
        CborValue::Bool(false) => out.push_str("false"),
        CborValue::Integer(i) => {
            let n: i128 = (*i).into();
            write!(out, "{}", n)?;
        }
        CborValue::Float(f) => diag_float(out, *f)?,
        CborValue::Text(s) => diag_text(out, s)?,
        CborValue::Map(pairs) => diag_map(out, pairs, indent)?,
        _ => write!(out, "<?unexpected {:?}>", val)?,
    }
    Ok(())
}

fn diag_float(out: &mut String, f: f64) -> std::fmt::Result {
    if f == 0.0 && f.is_sign_negative() {
        out.push_str("-0.0");
    } else if f.fract() == 0.0 && f.abs() < 1e18 {
        write!(out, "{:.1}", f)?;
    } else {
        let s = format!("{}", f);
        out.push_str(&s);
        if !s.contains('.') {
            out.push_str(".0");
        }
    }
    Ok(())
}

fn diag_text(out: &mut String, s: &str) -> std::fmt::Result {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => write!(out, "\\u{:04x}", c as u32)?,
            c => out.push(c),
        }
    }
    out.push('"');
    Ok(())
}

fn diag_map(out: &mut String, pairs: &[(CborValue, CborValue)], indent: usize) -> std::fmt::Result {
    if pairs.is_empty() {
        out.push_str("{}");
        return Ok(());
    }
    out.push_str("{\n");
    let child_indent = indent + 2;
    for (i, (k, v)) in pairs.iter().enumerate() {
        out.push_str(&" ".repeat(child_indent));
        diag_value(out, k, child_indent)?;
        out.push_str(": ");
        diag_value(out, v, child_indent)?;
        if i < pairs.len() - 1 {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str(&" ".repeat(indent));
    out.push('}');
    Ok(())
}
