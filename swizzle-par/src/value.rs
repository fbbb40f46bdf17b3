//! `SetValue`: parsing a literal lexeme into a width-checked tagged value
//! (§4.4). Char literals convert through their decoded code point rather
//! than their raw byte length, so `'\n'` and `'a'` both produce a single
//! integer value regardless of how many source bytes they occupied.

use swizzle_lex::BuiltinType;
use swizzle_util::ValueError;

/// A literal converted to the width its declared type demands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl Value {
    /// The integer value as `i128`, for callers that only care about the
    /// numeric value (duplicate detection, range checks). Returns `None` for
    /// the float variants.
    pub fn as_i128(&self) -> Option<i128> {
        Some(match *self {
            Value::U8(v) => v as i128,
            Value::I8(v) => v as i128,
            Value::U16(v) => v as i128,
            Value::I16(v) => v as i128,
            Value::U32(v) => v as i128,
            Value::I32(v) => v as i128,
            Value::U64(v) => v as i128,
            Value::I64(v) => v as i128,
            Value::F32(_) | Value::F64(_) => return None,
        })
    }

    pub fn underlying(&self) -> BuiltinType {
        match self {
            Value::U8(_) => BuiltinType::U8,
            Value::I8(_) => BuiltinType::I8,
            Value::U16(_) => BuiltinType::U16,
            Value::I16(_) => BuiltinType::I16,
            Value::U32(_) => BuiltinType::U32,
            Value::I32(_) => BuiltinType::I32,
            Value::U64(_) => BuiltinType::U64,
            Value::I64(_) => BuiltinType::I64,
            Value::F32(_) => BuiltinType::F32,
            Value::F64(_) => BuiltinType::F64,
        }
    }

    /// Build a `Value` of `target`'s width from a raw `i128`, checking
    /// bounds. This is the common tail of decimal, hex, and char-literal
    /// conversion, and is also what advances `ParserContext::current_enum_value`
    /// between fields.
    pub fn from_i128(target: BuiltinType, raw: i128, lexeme: &str) -> Result<Value, ValueError> {
        match target {
            BuiltinType::U8 => in_range(raw, u8::MIN as i128, u8::MAX as i128, lexeme)
                .map(|v| Value::U8(v as u8)),
            BuiltinType::I8 => in_range(raw, i8::MIN as i128, i8::MAX as i128, lexeme)
                .map(|v| Value::I8(v as i8)),
            BuiltinType::U16 => in_range(raw, u16::MIN as i128, u16::MAX as i128, lexeme)
                .map(|v| Value::U16(v as u16)),
            BuiltinType::I16 => in_range(raw, i16::MIN as i128, i16::MAX as i128, lexeme)
                .map(|v| Value::I16(v as i16)),
            BuiltinType::U32 => in_range(raw, u32::MIN as i128, u32::MAX as i128, lexeme)
                .map(|v| Value::U32(v as u32)),
            BuiltinType::I32 => in_range(raw, i32::MIN as i128, i32::MAX as i128, lexeme)
                .map(|v| Value::I32(v as i32)),
            BuiltinType::U64 => in_range(raw, u64::MIN as i128, u64::MAX as i128, lexeme)
                .map(|v| Value::U64(v as u64)),
            BuiltinType::I64 => in_range(raw, i64::MIN as i128, i64::MAX as i128, lexeme)
                .map(|v| Value::I64(v as i64)),
            BuiltinType::F32 | BuiltinType::F64 => Err(ValueError::InvalidStreamInput(format!(
                "cannot assign integer literal '{lexeme}' to a floating-point field"
            ))),
            BuiltinType::Bitfield | BuiltinType::VariableBlock => Err(
                ValueError::InvalidStreamInput(format!(
                    "'{lexeme}' does not name a scalar underlying type"
                )),
            ),
        }
    }

    /// Increment this value by one, checking for overflow against its own
    /// width. Used to advance the implicit enum-field counter.
    pub fn checked_increment(&self) -> Result<Value, ValueError> {
        let target = self.underlying();
        let raw = self
            .as_i128()
            .expect("enum underlying types are always integer-typed")
            + 1;
        Value::from_i128(target, raw, &raw.to_string())
    }

    pub fn zero(target: BuiltinType) -> Value {
        Value::from_i128(target, 0, "0").expect("zero always fits any integer width")
    }
}

fn in_range(raw: i128, min: i128, max: i128, lexeme: &str) -> Result<i128, ValueError> {
    if raw > max {
        return Err(ValueError::Overflow(lexeme.to_string()));
    }
    if raw < min {
        return Err(ValueError::Underflow(lexeme.to_string()));
    }
    Ok(raw)
}

/// Parses a decimal lexeme (optionally `-`-prefixed) into `target`'s width.
pub fn set_value(target: BuiltinType, lexeme: &str) -> Result<Value, ValueError> {
    if matches!(target, BuiltinType::F32 | BuiltinType::F64) {
        return lexeme
            .parse::<f64>()
            .map(|v| {
                if matches!(target, BuiltinType::F32) {
                    Value::F32(v as f32)
                } else {
                    Value::F64(v)
                }
            })
            .map_err(|_| ValueError::InvalidStreamInput(lexeme.to_string()));
    }

    let raw: i128 = lexeme
        .parse()
        .map_err(|_| ValueError::InvalidStreamInput(lexeme.to_string()))?;
    Value::from_i128(target, raw, lexeme)
}

/// Parses a `0x...`-prefixed hex lexeme into `target`'s width.
pub fn set_value_hex(target: BuiltinType, lexeme: &str) -> Result<Value, ValueError> {
    let digits = lexeme
        .strip_prefix("0x")
        .or_else(|| lexeme.strip_prefix("0X"))
        .unwrap_or(lexeme);
    let raw = i128::from_str_radix(digits, 16)
        .map_err(|_| ValueError::InvalidStreamInput(lexeme.to_string()))?;
    Value::from_i128(target, raw, lexeme)
}

/// Parses the inner character of a char literal lexeme (quotes and any
/// escape already decoded to a single `char`) as the ordinal value assigned
/// to `target`. Rejects float targets: a character ordinal has no meaningful
/// floating-point form, matching the narrower `uint64_t` return type of the
/// original `setValueFromChar`.
pub fn set_value_from_char(target: BuiltinType, ch: char) -> Result<Value, ValueError> {
    if matches!(target, BuiltinType::F32 | BuiltinType::F64) {
        return Err(ValueError::InvalidStreamInput(format!(
            "cannot assign character literal to a floating-point field"
        )));
    }
    Value::from_i128(target, ch as i128, &ch.to_string())
}

/// Decodes the escape sequences this language recognizes (§6.2) inside a
/// raw char/string lexeme body (quotes stripped by the caller).
/// Shared by struct/enum default-value handling and by tests.
pub fn decode_escapes(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('a') => out.push('\x07'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// A hashable, integer-only view of a `Value`, used for enum-value duplicate
/// detection. `Value`'s `F32`/`F64` variants cannot implement `Eq`/`Hash`
/// without a bit-pattern wrapper, but the grammar restricts enum/bitfield
/// underlying types to integer widths (§4.2.2), so this key type simply
/// never needs to represent a float — `set_value` is never asked to produce
/// one in that context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnumValueKey(i128);

impl EnumValueKey {
    pub fn from_value(value: &Value) -> Self {
        Self(
            value
                .as_i128()
                .expect("enum/bitfield underlying types are always integer-typed"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_literal_in_range_succeeds() {
        assert_eq!(set_value(BuiltinType::U8, "200").unwrap(), Value::U8(200));
    }

    #[test]
    fn decimal_literal_overflow_is_reported() {
        let err = set_value(BuiltinType::U8, "300").unwrap_err();
        assert!(matches!(err, ValueError::Overflow(_)));
    }

    #[test]
    fn signed_literal_underflow_is_reported() {
        let err = set_value(BuiltinType::U8, "-1").unwrap_err();
        assert!(matches!(err, ValueError::Underflow(_)));
    }

    #[test]
    fn hex_literal_parses_into_target_width() {
        assert_eq!(set_value_hex(BuiltinType::U8, "0x04").unwrap(), Value::U8(4));
    }

    #[test]
    fn char_literal_stores_ordinal() {
        assert_eq!(set_value_from_char(BuiltinType::U8, 'a').unwrap(), Value::U8(97));
    }

    #[test]
    fn checked_increment_overflows_at_the_top_of_the_range() {
        let v = Value::U8(255);
        assert!(matches!(v.checked_increment(), Err(ValueError::Overflow(_))));
    }

    #[test]
    fn decode_escapes_handles_the_closed_escape_set() {
        assert_eq!(decode_escapes("a\\nb"), "a\nb");
        assert_eq!(decode_escapes("\\0"), "\0");
    }
}
