use serde::{Deserialize, Deserializer};

/// Deserializes a field, falling back to its default instead of failing the
/// whole document when the stored value is malformed.
pub fn ok_or_default<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Deserialize<'de> + Default,
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|err| {
        log::warn!("Ignoring invalid config value: {err}");
        T::default()
    }))
}

pub fn format_price(price: f32) -> String {
    format!("${price:.2}")
}

/// Signed percent with precision picked from the tick `step`.
pub fn format_pct(val: f32, step: f32) -> String {
    if step >= 1.0 {
        format!("{val:+.1}%")
    } else if step >= 0.1 {
        format!("{val:+.2}%")
    } else {
        format!("{val:+.3}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_have_cents() {
        assert_eq!(format_price(1.7), "$1.70");
        assert_eq!(format_price(2.034), "$2.03");
    }

    #[test]
    fn pct_precision_follows_step() {
        assert_eq!(format_pct(0.901, 0.01), "+0.901%");
        assert_eq!(format_pct(-2.5, 1.0), "-2.5%");
    }
}
