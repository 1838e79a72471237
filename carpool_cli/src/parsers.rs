/// A rate or rounding step: a finite, non-negative number.
pub fn parse_amount(input: &str) -> Result<f64, String> {
    let amount = input
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid amount `{input}`"))?;

    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("Amount must be a non-negative number, got `{input}`"));
    }

    Ok(amount)
}
