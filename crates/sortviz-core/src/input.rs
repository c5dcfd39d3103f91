//! Parsing of user-typed value lists.
//!
//! Tokens are separated by commas and/or whitespace. Each token contributes
//! its leading integer (`"12px"` reads as 12, `"3.9"` as 3); tokens without
//! one, or whose integer overflows `i64`, are dropped silently.

/// Parses every usable integer in `input`, in order.
pub fn parse_values(input: &str) -> Vec<i64> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(leading_integer)
        .collect()
}

fn leading_integer(token: &str) -> Option<i64> {
    let token = token.trim();
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let digits = unsigned
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(unsigned.len(), |(idx, _)| idx);
    if digits == 0 {
        return None;
    }
    let sign_len = token.len() - unsigned.len();
    token[..sign_len + digits].parse().ok()
}

/// Formats values the way they are typed: `5, 3, 8, 1`.
pub fn format_values(values: &[i64]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
