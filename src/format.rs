/// Renders values as `{a, b, c}` with three significant digits each.
pub fn format_values(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|&v| significant(v, 3)).collect();
    format!("{{{}}}", parts.join(", "))
}

/// `label {a, b, c}`
pub fn format_labeled(label: &str, values: &[f64]) -> String {
    format!("{} {}", label, format_values(values))
}

/// Renders `value` with `digits` significant digits the way C's `%g`
/// does: fixed notation unless the rounded exponent is below -4 or at
/// least `digits`, trailing zeros dropped in both forms.
fn significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let precision = digits.max(1) - 1;
    // Rounding happens first so 999.6 is seen with exponent 3, not 2.
    let scientific = format!("{value:.precision$e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - exponent).max(0) as usize;
        trim_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_zeros(rendered: &str) -> &str {
    if rendered.contains('.') {
        rendered.trim_end_matches('0').trim_end_matches('.')
    } else {
        rendered
    }
}
