//! Input limits shared by the metric types

/// Event extra values are capped at 100 bytes
pub(crate) const MAX_EXTRA_VALUE_BYTES: usize = 100;

/// Truncate `value` to at most `max` bytes without splitting a code point
pub(crate) fn truncate_string_at_boundary(mut value: String, max: usize) -> String {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    value.truncate(end);
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_string_at_boundary("hello".into(), 100), "hello");
        assert_eq!(truncate_string_at_boundary("".into(), 100), "");
    }

    #[test]
    fn ascii_truncates_at_the_limit() {
        let long = "x".repeat(150);
        let truncated = truncate_string_at_boundary(long, MAX_EXTRA_VALUE_BYTES);
        assert_eq!(truncated.len(), 100);
    }

    #[test]
    fn exact_length_is_kept() {
        let exact = "y".repeat(100);
        assert_eq!(
            truncate_string_at_boundary(exact.clone(), MAX_EXTRA_VALUE_BYTES),
            exact
        );
    }

    #[test]
    fn multibyte_truncates_to_a_char_boundary() {
        // "é" is 2 bytes; 51 of them straddle the 100 byte limit
        let value = "é".repeat(51);
        let truncated = truncate_string_at_boundary(value, MAX_EXTRA_VALUE_BYTES);
        assert_eq!(truncated.len(), 100);
        assert_eq!(truncated, "é".repeat(50));
    }
}
