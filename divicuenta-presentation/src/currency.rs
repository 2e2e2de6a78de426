use chrono::{DateTime, Datelike, Utc};
use divicuenta_domain::Money;
use divicuenta_i18n as i18n;

/// Chilean peso amount: `$` followed by the integer with `.` between
/// thousands groups, e.g. `$13.200`.
pub fn format_currency(amount: Money) -> String {
    let value = amount.amount();
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    format!("${grouped}")
}

/// `17 may 2024`, in UTC.
pub fn format_short_date(date: DateTime<Utc>) -> String {
    let month = i18n::MONTHS_SHORT[date.month0() as usize];
    format!("{} {month} {}", date.day(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0, "$0")]
    #[case::hundreds(950, "$950")]
    #[case::thousands(1_500, "$1.500")]
    #[case::tens_of_thousands(13_200, "$13.200")]
    #[case::millions(1_234_567, "$1.234.567")]
    #[case::negative(-4, "$-4")]
    #[case::negative_grouped(-12_000, "$-12.000")]
    fn groups_thousands(#[case] amount: i64, #[case] expected: &str) {
        assert_eq!(format_currency(Money::from_i64(amount)), expected);
    }

    #[test]
    fn short_date_uses_spanish_month() {
        let date = Utc
            .with_ymd_and_hms(2024, 9, 3, 23, 59, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(format_short_date(date), "3 sept 2024");
    }
}
