// File: crates/chart-core/src/encode.rs
// Summary: Maps arbitrary names (series keys, labels) to CSS-safe class/id tokens.

/// Identifier returned for the empty string.
pub const EMPTY_SENTINEL: &str = "da";

const RADIX32: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

/// Encode `name` as an identifier usable as a CSS class or element id.
///
/// The input is lower-cased first; ASCII letters and digits are kept, spaces
/// become `_` and every other character becomes `U<code point in radix 32>-`.
/// Names that differ only in case therefore share an identifier.
pub fn encode(name: &str) -> String {
    if name.is_empty() {
        return EMPTY_SENTINEL.to_string();
    }
    let mut out = String::with_capacity(3 + name.len());
    out.push_str("da-");
    for ch in name.chars().flat_map(char::to_lowercase) {
        match ch {
            'a'..='z' | '0'..='9' => out.push(ch),
            ' ' => out.push('_'),
            other => {
                out.push('U');
                push_radix32(&mut out, other as u32);
                out.push('-');
            }
        }
    }
    out
}

fn push_radix32(out: &mut String, mut v: u32) {
    let mut digits = [0u8; 7];
    let mut n = 0;
    loop {
        digits[n] = RADIX32[(v % 32) as usize];
        n += 1;
        v /= 32;
        if v == 0 { break; }
    }
    for &d in digits[..n].iter().rev() {
        out.push(d as char);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_use_radix32() {
        assert_eq!(encode("_"), "da-U2v-");
        assert_eq!(encode("."), "da-U1e-");
        assert_eq!(encode("é"), "da-U79-");
        assert_eq!(encode("😀"), "da-U3tg0-");
    }

    #[test]
    fn letters_are_lowercased() {
        assert_eq!(encode("Sales Q1"), "da-sales_q1");
    }
}
