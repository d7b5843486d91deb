/// Zkracuje počty nad 1000 na jedno desetinné místo s "k" suffixem
/// Příklad: 1500 -> "1.5k", 999 -> "999"
pub fn abbreviate_count(value: f64) -> String {
    if value > 1000.0 {
        format!("{:.1}k", value / 1000.0)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Formátuje číslo s oddělovači pro lepší čitelnost
/// Příklad: 1234567 -> "1 234 567"
pub fn format_number(num: u64) -> String {
    let num_str = num.to_string();
    let mut result = String::new();
    let mut count = 0;

    for c in num_str.chars().rev() {
        if count > 0 && count % 3 == 0 {
            result.push(' ');
        }
        result.push(c);
        count += 1;
    }

    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviate_count() {
        assert_eq!(abbreviate_count(0.0), "0");
        assert_eq!(abbreviate_count(999.0), "999");
        assert_eq!(abbreviate_count(1000.0), "1000");
        assert_eq!(abbreviate_count(1001.0), "1.0k");
        assert_eq!(abbreviate_count(1500.0), "1.5k");
        assert_eq!(abbreviate_count(15000.0), "15.0k");
        assert_eq!(abbreviate_count(1250000.0), "1250.0k");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1 234");
        assert_eq!(format_number(1234567), "1 234 567");
    }
}
