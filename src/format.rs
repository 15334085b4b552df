//! Number formatting for responses

use crate::models::Delta;

/// `$245,122`, `$1,234.5`, `-$12`
pub fn money(value: f64) -> String {
    let rounded = (value.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc();
    let cents = ((rounded - whole) * 100.0).round() as u8;

    // Sign is decided after rounding so tiny negatives print as `$0`
    let sign = if value < 0.0 && rounded > 0.0 { "-" } else { "" };

    let mut out = format!("{}${}", sign, group_thousands(whole));
    if cents > 0 {
        let frac = format!("{:02}", cents);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

/// Absolute change rounded to whole millions: `$15,775`
pub fn change(delta: &Delta) -> String {
    format!("${}", group_thousands(delta.change.abs().round()))
}

/// Signed percentage with one decimal: `+21.8%`
pub fn percent(delta: &Delta) -> String {
    format!("{:+.1}%", delta.percent)
}

/// Digits of a non-negative whole number, grouped by thousands
fn group_thousands(whole: f64) -> String {
    let digits = format!("{:.0}", whole);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
