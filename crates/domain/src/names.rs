use crate::errors::DomainError;

const MAX_NAME_LEN: usize = 255;
const MAX_LABEL_LEN: usize = 63;

/// Lower-cases a DNS name and appends the root dot if missing.
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    let mut normalized = trimmed.to_ascii_lowercase();
    if !normalized.ends_with('.') {
        normalized.push('.');
    }
    normalized
}

/// Normalizes and checks label/name length limits.
pub fn parse_name(name: &str) -> Result<String, DomainError> {
    let normalized = normalize_name(name);

    if normalized == "." {
        return Ok(normalized);
    }
    if normalized.len() > MAX_NAME_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "name exceeds {} characters: {}",
            MAX_NAME_LEN, name
        )));
    }

    let body = &normalized[..normalized.len() - 1];
    for label in body.split('.') {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "empty label in {}",
                name
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "label exceeds {} characters in {}",
                MAX_LABEL_LEN, name
            )));
        }
    }

    Ok(normalized)
}
