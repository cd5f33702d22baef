//! Display formatting for cost metrics (en-US, USD)

/// Format an amount as US dollars with two decimals, e.g. `$1,234.50`
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "$∞" } else { "-$∞" }.to_string();
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 { "-" } else { "" };

    format!("{}${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// Format fractional hours as words, e.g. `1 hour and 30 minutes`
pub fn format_duration(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round();

    // Also catches NaN
    if !(total_minutes >= 1.0) {
        return "Less than a minute".to_string();
    }

    let total_minutes = total_minutes as u64;
    let h = total_minutes / 60;
    let m = total_minutes % 60;

    match (h, m) {
        (0, m) => plural(m, "minute"),
        (h, 0) => plural(h, "hour"),
        (h, m) => format!("{} and {}", plural(h, "hour"), plural(m, "minute")),
    }
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
