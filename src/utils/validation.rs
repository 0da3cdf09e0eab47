use crate::utils::error::{LookupError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LookupError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_bind_addr(field_name: &str, addr: &str) -> Result<()> {
    addr.parse::<std::net::SocketAddr>()
        .map(|_| ())
        .map_err(|e| LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| LookupError::MissingConfigError {
        field: field_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("extractor_endpoint", "https://example.com").is_ok());
        assert!(validate_url("extractor_endpoint", "http://example.com").is_ok());
        assert!(validate_url("extractor_endpoint", "").is_err());
        assert!(validate_url("extractor_endpoint", "invalid-url").is_err());
        assert!(validate_url("extractor_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_bind_addr() {
        assert!(validate_bind_addr("bind_addr", "0.0.0.0:5002").is_ok());
        assert!(validate_bind_addr("bind_addr", "127.0.0.1:8080").is_ok());
        assert!(validate_bind_addr("bind_addr", "localhost:8080").is_err());
        assert!(validate_bind_addr("bind_addr", "5002").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout_seconds", 30, 1).is_ok());
        assert!(validate_positive_number("timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("value".to_string());
        let absent: Option<String> = None;
        assert!(validate_required_field("crm.endpoint", &present).is_ok());
        assert!(validate_required_field("crm.endpoint", &absent).is_err());
    }
}
