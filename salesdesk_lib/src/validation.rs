use crate::error::DashboardError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_RECORD_ID_LENGTH: usize = 64;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: &[i64] = &[10, 20, 30, 40, 50];

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, DashboardError> {
    if input.len() > max_len {
        return Err(DashboardError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect();
    Ok(cleaned.trim().to_string())
}

/// Validate a search string: enforce length, strip control chars, trim.
/// An empty result is allowed and means "no filter".
pub fn validate_search(input: &str) -> Result<String, DashboardError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate page number (must be >= 1).
pub fn validate_page(page: i64) -> Result<i64, DashboardError> {
    if page < 1 {
        return Err(DashboardError::InvalidInput(
            "page must be >= 1".to_string(),
        ));
    }
    Ok(page)
}

/// Validate page size (must be 1..=100).
pub fn validate_page_size(page_size: i64) -> Result<i64, DashboardError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(DashboardError::InvalidInput(format!(
            "page size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

/// Validate a page size picked from the selector.
pub fn validate_page_size_option(page_size: i64) -> Result<i64, DashboardError> {
    if PAGE_SIZE_OPTIONS.contains(&page_size) {
        Ok(page_size)
    } else {
        Err(DashboardError::InvalidInput(format!(
            "page size must be one of {}",
            PAGE_SIZE_OPTIONS
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}

/// Validate a record identifier used in a URL path: non-empty, bounded,
/// and limited to `[A-Za-z0-9_-]`.
pub fn validate_record_id(input: &str) -> Result<String, DashboardError> {
    let id = input.trim();
    if id.is_empty() {
        return Err(DashboardError::InvalidInput(
            "record id must not be empty".to_string(),
        ));
    }
    if id.len() > MAX_RECORD_ID_LENGTH {
        return Err(DashboardError::InvalidInput(format!(
            "record id exceeds maximum length of {} bytes",
            MAX_RECORD_ID_LENGTH
        )));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(DashboardError::InvalidInput(format!(
            "invalid record id '{}': only letters, digits, '_' and '-' are allowed",
            id
        )));
    }
    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_strips_control_chars_and_trims() {
        assert_eq!(validate_search("  asha\u{0007} \n").unwrap(), "asha");
        assert_eq!(validate_search("").unwrap(), "");
    }

    #[test]
    fn search_rejects_long_input() {
        let long = "a".repeat(MAX_SEARCH_LENGTH + 1);
        assert!(validate_search(&long).is_err());
    }

    #[test]
    fn page_must_be_positive() {
        assert_eq!(validate_page(1).unwrap(), 1);
        assert!(validate_page(0).is_err());
        assert!(validate_page(-3).is_err());
    }

    #[test]
    fn page_size_bounds() {
        assert_eq!(validate_page_size(1).unwrap(), 1);
        assert_eq!(validate_page_size(100).unwrap(), 100);
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(101).is_err());
    }

    #[test]
    fn page_size_options() {
        for size in PAGE_SIZE_OPTIONS {
            assert_eq!(validate_page_size_option(*size).unwrap(), *size);
        }
        let err = validate_page_size_option(25).unwrap_err();
        assert_eq!(err.user_message(), "page size must be one of 10, 20, 30, 40, 50");
    }

    #[test]
    fn record_id_rules() {
        assert_eq!(validate_record_id(" pr_501 ").unwrap(), "pr_501");
        assert_eq!(
            validate_record_id("65a1f0c2e4b0a1b2c3d4e5f6").unwrap(),
            "65a1f0c2e4b0a1b2c3d4e5f6"
        );
        assert!(validate_record_id("").is_err());
        assert!(validate_record_id("../admin").is_err());
        assert!(validate_record_id(&"x".repeat(MAX_RECORD_ID_LENGTH + 1)).is_err());
    }
}
