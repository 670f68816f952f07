//! Numeric views of node values.
//!
//! Values are always stored as text. These helpers read them as integers,
//! floats or three-component vectors and write them back in a fixed format.
//! Reading never fails: text that is not a number reads as zero.

use crate::tree::{NodeId, Tree};

/// Leading-integer parse: optional whitespace, an optional sign, then digits.
/// Stops at the first non-digit and saturates at the `i32` bounds. Text with
/// no leading digits is 0.
pub fn parse_int(text: &str) -> i32 {
    let text = text.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut total: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        total = (total * 10 + i64::from(byte - b'0')).min(i64::from(i32::MAX) + 1);
    }
    if negative {
        total = -total;
    }
    total.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Sign, integer digits and an optional `.` fraction. Parsing stops at the
/// first character that does not fit; nothing parsed yields 0.0.
pub fn parse_float(text: &str) -> f32 {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut whole: f64 = 0.0;
    let mut fraction: f64 = 0.0;
    let mut scale: f64 = 1.0;
    let mut in_fraction = false;

    for byte in rest.bytes() {
        match byte {
            b'.' if !in_fraction => in_fraction = true,
            b'0'..=b'9' if in_fraction => {
                fraction = fraction * 10.0 + f64::from(byte - b'0');
                scale *= 10.0;
            }
            b'0'..=b'9' => whole = whole * 10.0 + f64::from(byte - b'0'),
            _ => break,
        }
    }

    let value = (whole + fraction / scale) as f32;
    if negative { -value } else { value }
}

/// Up to three floats separated by spaces and/or commas. Missing components
/// are 0.0; `None` when the text holds no component at all.
pub fn parse_vector(text: &str) -> Option<[f32; 3]> {
    let mut vector = [0.0; 3];
    let mut count = 0;
    for (slot, part) in vector
        .iter_mut()
        .zip(text.split([' ', ',']).filter(|part| !part.is_empty()))
    {
        *slot = parse_float(part);
        count += 1;
    }
    (count > 0).then_some(vector)
}

pub fn format_float(value: f32) -> String {
    format!("{value:.6}")
}

pub fn format_vector(vector: [f32; 3]) -> String {
    format!("{:.6} {:.6} {:.6}", vector[0], vector[1], vector[2])
}

impl Tree {
    /// Value of `id` read as an integer; 0 when missing or not numeric.
    pub fn value_int(&self, id: NodeId) -> i32 {
        self.value(id).map(parse_int).unwrap_or(0)
    }

    pub fn value_float(&self, id: NodeId) -> f32 {
        self.value(id).map(parse_float).unwrap_or(0.0)
    }

    /// Value of `id` read as a vector. `None` when the node is unknown, has
    /// no value, or the value has no component.
    pub fn value_vector(&self, id: NodeId) -> Option<[f32; 3]> {
        self.value(id).and_then(parse_vector)
    }

    pub fn set_value_int(&mut self, id: NodeId, value: i32) -> bool {
        self.set_value(id, value.to_string())
    }

    pub fn set_value_float(&mut self, id: NodeId, value: f32) -> bool {
        self.set_value(id, format_float(value))
    }

    pub fn set_value_vector(&mut self, id: NodeId, vector: [f32; 3]) -> bool {
        self.set_value(id, format_vector(vector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("42", 42)]
    #[case("  -17abc", -17)]
    #[case("+8", 8)]
    #[case("\t12 34", 12)]
    #[case("abc", 0)]
    #[case("", 0)]
    #[case("-", 0)]
    #[case("99999999999", i32::MAX)]
    #[case("-99999999999", i32::MIN)]
    #[case("-2147483648", i32::MIN)]
    fn parse_int_follows_atoi(#[case] text: &str, #[case] expected: i32) {
        assert_eq!(parse_int(text), expected);
    }

    #[rstest]
    #[case("1.5", 1.5)]
    #[case("-2.25", -2.25)]
    #[case("+3", 3.0)]
    #[case("7.", 7.0)]
    #[case(".5", 0.5)]
    #[case("4x", 4.0)]
    #[case("1.2.3", 1.2)]
    #[case(" 1", 0.0)]
    #[case("", 0.0)]
    fn parse_float_stops_at_first_invalid_char(#[case] text: &str, #[case] expected: f32) {
        assert!((parse_float(text) - expected).abs() < 1e-6, "{text}");
    }

    #[test]
    fn parse_vector_splits_on_spaces_and_commas() {
        assert_eq!(parse_vector("1 2.5 -3"), Some([1.0, 2.5, -3.0]));
        assert_eq!(parse_vector("1,2, 3"), Some([1.0, 2.0, 3.0]));
        assert_eq!(parse_vector("1 2 3 4"), Some([1.0, 2.0, 3.0]));
    }

    #[test]
    fn parse_vector_pads_missing_components() {
        assert_eq!(parse_vector("5"), Some([5.0, 0.0, 0.0]));
        assert_eq!(parse_vector(" , "), None);
        assert_eq!(parse_vector(""), None);
    }

    #[test]
    fn formatting_uses_six_decimals() {
        assert_eq!(format_float(1.5), "1.500000");
        assert_eq!(format_vector([1.0, -2.5, 0.0]), "1.000000 -2.500000 0.000000");
    }

    #[test]
    fn tree_value_accessors() {
        let mut tree = Tree::new();
        let node = tree.create_node_with("health", Some("100"));
        assert_eq!(tree.value_int(node), 100);

        assert!(tree.set_value_float(node, 0.25));
        assert_eq!(tree.value(node), Some("0.250000"));
        assert!((tree.value_float(node) - 0.25).abs() < 1e-6);

        assert!(tree.set_value_vector(node, [1.0, 2.0, 3.0]));
        assert_eq!(tree.value_vector(node), Some([1.0, 2.0, 3.0]));

        assert!(tree.set_value_int(node, -4));
        assert_eq!(tree.value(node), Some("-4"));
    }

    #[test]
    fn missing_values_read_as_zero() {
        let mut tree = Tree::new();
        let node = tree.create_node_with("empty", None);
        assert_eq!(tree.value_int(node), 0);
        assert_eq!(tree.value_float(node), 0.0);
        assert_eq!(tree.value_vector(node), None);
    }
}
