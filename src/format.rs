// Display Formatter
// Pure helpers shared by every row transformer. None of these panic;
// malformed input degrades to an empty string.

use crate::models::RawNum;

/// Resolve a two-way field alias: the client_* field wins when present.
/// The same priority applies across all six application types.
pub fn alias<'a>(primary: &'a Option<String>, fallback: &'a Option<String>) -> Option<&'a str> {
    primary.as_deref().or(fallback.as_deref())
}

/// Join the resolved first/last name parts with a single space, dropping
/// empty parts.
pub fn full_name(first: Option<&str>, last: Option<&str>) -> String {
    let parts: Vec<&str> = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    parts.join(" ")
}

/// The backend stores under-contract answers as free text. Only yes/true/y
/// (any case) count as under contract; anything else, including an absent
/// value, is false.
pub fn is_under_contract(value: Option<&str>) -> bool {
    match value {
        Some(v) => matches!(v.trim().to_lowercase().as_str(), "yes" | "true" | "y"),
        None => false,
    }
}

/// en-US currency with no fractional digits: 1234567 -> "$1,234,567".
/// Empty, unparseable, and zero values all render blank.
pub fn format_currency(value: &RawNum) -> String {
    if value.is_falsy() {
        return String::new();
    }
    let Some(num) = value.as_f64() else {
        return String::new();
    };
    let rounded = num.round();
    let magnitude = rounded.abs();
    let digits = if magnitude < 9.0e15 {
        format!("{}", magnitude as i64)
    } else {
        format!("{:.0}", magnitude)
    };
    if rounded < 0.0 {
        format!("-${}", group_digits(&digits))
    } else {
        format!("${}", group_digits(&digits))
    }
}

/// Raw number suffixed with '%': "75" -> "75%". Empty/unparseable/zero
/// render blank.
pub fn format_percent(value: &RawNum) -> String {
    if value.is_falsy() {
        return String::new();
    }
    match value.as_f64() {
        Some(num) => format!("{}%", plain(num)),
        None => String::new(),
    }
}

/// en-US comma grouping without a currency symbol: 720000 -> "720,000".
pub fn format_number(value: &RawNum) -> String {
    if value.is_falsy() {
        return String::new();
    }
    let Some(num) = value.as_f64() else {
        return String::new();
    };
    let text = plain(num);
    let (sign, text) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest.to_string()),
        None => ("", text),
    };
    match text.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{}{}.{}", sign, group_digits(int_part), frac_part)
        }
        None => format!("{}{}", sign, group_digits(&text)),
    }
}

/// Split comma-separated text into trimmed, non-empty tokens. Used for
/// lender coverage fields.
pub fn parse_comma_separated(value: Option<&str>) -> Vec<String> {
    match value {
        Some(text) => text
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// "{min} - {max}" when both bounds format, "{min}+" with only a minimum,
/// "Up to {max}" with only a maximum, "" with neither.
pub fn loan_range_display(loan_min: &RawNum, loan_max: &RawNum) -> String {
    let min_formatted = format_currency(loan_min);
    let max_formatted = format_currency(loan_max);

    match (min_formatted.is_empty(), max_formatted.is_empty()) {
        (false, false) => format!("{} - {}", min_formatted, max_formatted),
        (false, true) => format!("{}+", min_formatted),
        (true, false) => format!("Up to {}", max_formatted),
        (true, true) => String::new(),
    }
}

/// Number display without trailing ".0" for whole values.
fn plain(num: f64) -> String {
    if num.fract() == 0.0 && num.abs() < 9.0e15 {
        format!("{}", num as i64)
    } else {
        format!("{}", num)
    }
}

/// Insert thousands separators into a bare digit string.
fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> RawNum {
        RawNum::Num(n)
    }

    fn text(s: &str) -> RawNum {
        RawNum::Text(s.to_string())
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(&num(1234567.0)), "$1,234,567");
        assert_eq!(format_currency(&num(500000.0)), "$500,000");
        assert_eq!(format_currency(&text("250000")), "$250,000");
        assert_eq!(format_currency(&RawNum::Missing), "");
        assert_eq!(format_currency(&text("abc")), "");
        assert_eq!(format_currency(&num(-98765.0)), "-$98,765");
    }

    #[test]
    fn test_format_currency_beyond_i64_precision() {
        assert_eq!(
            format_currency(&num(1.0e18)),
            "$1,000,000,000,000,000,000"
        );
        assert_eq!(
            format_currency(&num(-1.0e18)),
            "-$1,000,000,000,000,000,000"
        );
    }

    #[test]
    fn test_format_currency_zero_renders_blank() {
        // Pinned behavior: a numeric zero is treated as absent, while the
        // string "0" still formats. See DESIGN.md.
        assert_eq!(format_currency(&num(0.0)), "");
        assert_eq!(format_currency(&text("0")), "$0");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(&num(80.0)), "80%");
        assert_eq!(format_percent(&text("75.5")), "75.5%");
        assert_eq!(format_percent(&num(0.0)), "");
        assert_eq!(format_percent(&RawNum::Missing), "");
        assert_eq!(format_percent(&text("n/a")), "");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(&num(720.0)), "720");
        assert_eq!(format_number(&num(1250000.0)), "1,250,000");
        assert_eq!(format_number(&text("6800")), "6,800");
        assert_eq!(format_number(&RawNum::Missing), "");
    }

    #[test]
    fn test_parse_comma_separated() {
        assert_eq!(
            parse_comma_separated(Some("CA, NY,  TX")),
            vec!["CA", "NY", "TX"]
        );
        assert_eq!(parse_comma_separated(Some("CA,,NY,")), vec!["CA", "NY"]);
        assert_eq!(parse_comma_separated(None), Vec::<String>::new());
    }

    #[test]
    fn test_loan_range_display() {
        assert_eq!(
            loan_range_display(&num(100000.0), &num(500000.0)),
            "$100,000 - $500,000"
        );
        assert_eq!(loan_range_display(&num(100000.0), &RawNum::Missing), "$100,000+");
        assert_eq!(
            loan_range_display(&RawNum::Missing, &num(500000.0)),
            "Up to $500,000"
        );
        assert_eq!(loan_range_display(&RawNum::Missing, &RawNum::Missing), "");
    }

    #[test]
    fn test_full_name() {
        assert_eq!(full_name(Some("Ada"), Some("Lovelace")), "Ada Lovelace");
        assert_eq!(full_name(Some("Ada"), None), "Ada");
        assert_eq!(full_name(None, Some("Lovelace")), "Lovelace");
        assert_eq!(full_name(Some(""), Some("")), "");
        assert_eq!(full_name(None, None), "");
    }

    #[test]
    fn test_alias_priority() {
        let client = Some("Client".to_string());
        let bare = Some("Bare".to_string());
        assert_eq!(alias(&client, &bare), Some("Client"));
        assert_eq!(alias(&None, &bare), Some("Bare"));
        assert_eq!(alias(&None, &None), None);
        // An empty client value still wins; the join drops it later
        let empty = Some(String::new());
        assert_eq!(alias(&empty, &bare), Some(""));
    }

    #[test]
    fn test_is_under_contract() {
        assert!(is_under_contract(Some("Yes")));
        assert!(is_under_contract(Some("YES")));
        assert!(is_under_contract(Some("true")));
        assert!(is_under_contract(Some("y")));
        assert!(!is_under_contract(Some("no")));
        assert!(!is_under_contract(Some("")));
        assert!(!is_under_contract(None));
    }
}
