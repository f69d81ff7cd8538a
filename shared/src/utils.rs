// Decimal helpers shared by the engine and the server adapters.
pub mod decimal {
    use anyhow::{anyhow, Result};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    /// Parses plain decimals like "58.5" or "-3". Surrounding whitespace is ignored.
    pub fn parse_decimal(s: &str) -> Result<Decimal> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("Failed to parse decimal: value is empty"));
        }
        Decimal::from_str(trimmed).map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))
    }

    // proto3 strings default to "", which means zero for optional amounts.
    pub fn parse_decimal_or_zero(s: &str) -> Result<Decimal> {
        if s.trim().is_empty() {
            Ok(Decimal::ZERO)
        } else {
            parse_decimal(s)
        }
    }

    /// Normalized text form, trailing zeros dropped ("58.50" -> "58.5").
    pub fn format_decimal(value: Decimal) -> String {
        value.normalize().to_string()
    }

}
