use crate::error::ApiError;

/// Trim and lowercase `raw`, then require `0x` followed by exactly 40 hex characters.
pub fn normalize(raw: Option<&str>) -> Result<String, ApiError> {
    let address = raw.unwrap_or_default().trim().to_lowercase();

    let digits = address.strip_prefix("0x").ok_or(ApiError::InvalidAddress)?;
    if digits.len() != 40 || hex::decode(digits).is_err() {
        return Err(ApiError::InvalidAddress);
    }

    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "0x65e64963f9c5a663e7d7e986de45a9d8324ac0ce";

    #[test]
    fn accepts_and_lowercases_checksummed_address() {
        let got = normalize(Some("  0x65E64963F9C5a663e7d7E986De45A9D8324aC0CE \n")).unwrap();
        assert_eq!(got, VALID);
    }

    #[test]
    fn rejects_malformed_input() {
        let too_short = &VALID[..41];
        let too_long = format!("{}0", VALID);
        let no_prefix = &VALID[2..];
        let non_hex = format!("0x{}", "g".repeat(40));

        for bad in [None, Some(""), Some("0x"), Some(too_short), Some(too_long.as_str()), Some(no_prefix), Some(non_hex.as_str())] {
            assert!(
                matches!(normalize(bad), Err(ApiError::InvalidAddress)),
                "accepted {:?}",
                bad
            );
        }
    }
}
