use crate::utils::error::{RelayError, Result};
use rust_decimal::Decimal;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(RelayError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// 檢查帳戶地址格式：0x 前綴加 40 個十六進位字元
pub fn validate_account_address(field_name: &str, address: &str) -> Result<()> {
    let hex = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"));

    match hex {
        Some(hex) if hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()) => Ok(()),
        _ => Err(RelayError::ValidationError {
            message: format!(
                "{} must be a 0x-prefixed 40-hex-digit account address",
                field_name
            ),
        }),
    }
}

pub fn validate_positive_amount(field_name: &str, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(RelayError::ValidationError {
            message: format!("{} must be a positive amount", field_name),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("rpc_url", "https://example.com").is_ok());
        assert!(validate_url("rpc_url", "http://example.com").is_ok());
        assert!(validate_url("rpc_url", "").is_err());
        assert!(validate_url("rpc_url", "invalid-url").is_err());
        assert!(validate_url("rpc_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_account_address() {
        assert!(validate_account_address(
            "userAddress",
            "0x52908400098527886E0F7030069857D2E4169EE7"
        )
        .is_ok());
        assert!(validate_account_address(
            "userAddress",
            "0x52908400098527886e0f7030069857d2e4169ee7"
        )
        .is_ok());
        assert!(validate_account_address("userAddress", "").is_err());
        assert!(validate_account_address("userAddress", "0xABC").is_err());
        assert!(validate_account_address(
            "userAddress",
            "52908400098527886E0F7030069857D2E4169EE7"
        )
        .is_err());
        // 長度正確但含非十六進位字元
        assert!(validate_account_address(
            "userAddress",
            "0x5290840009852788GE0F7030069857D2E4169EE7"
        )
        .is_err());
    }

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount("amount", dec!(10)).is_ok());
        assert!(validate_positive_amount("amount", dec!(0.001)).is_ok());
        assert!(validate_positive_amount("amount", dec!(0)).is_err());
        assert!(validate_positive_amount("amount", dec!(-5)).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("token_decimals", 18u32, 0, 30).is_ok());
        assert!(validate_range("token_decimals", 31u32, 0, 30).is_err());
    }
}
