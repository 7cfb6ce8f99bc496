// arg_utils.rs: small parsers shared by the argument definitions

use crate::cli::constants::{GB, KB, MB};

/// Parses an unsigned size from the start of `s`, optionally followed by a
/// size suffix.  Returns `None` if no leading digits are present or the value
/// overflows, or `Some((value, remainder))` where `remainder` is the part of
/// `s` that was not consumed.
///
/// Recognised suffixes (case-sensitive):
///   `K` / `KB` / `KiB`  → multiply by 1 024
///   `M` / `MB` / `MiB`  → multiply by 1 048 576
///   `G` / `GB` / `GiB`  → multiply by 1 073 741 824
pub fn read_size_from_str(s: &str) -> Option<(usize, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let mut value: usize = s[..digits].parse().ok()?;
    let mut rest = &s[digits..];

    let mult = match rest.as_bytes().first() {
        Some(b'K') => KB,
        Some(b'M') => MB,
        Some(b'G') => GB,
        _ => 1,
    };
    if mult > 1 {
        value = value.checked_mul(usize::try_from(mult).ok()?)?;
        rest = &rest[1..];
        rest = rest.strip_prefix('i').unwrap_or(rest);
        rest = rest.strip_prefix('B').unwrap_or(rest);
    }
    Some((value, rest))
}

/// `clap` value parser for sizes such as `65536`, `64K` or `4MiB`.
pub fn parse_size(s: &str) -> Result<usize, String> {
    match read_size_from_str(s) {
        Some((v, "")) => Ok(v),
        _ => Err(format!("invalid size '{}': expected digits with an optional K/M/G suffix", s)),
    }
}
