//! Field-level validators shared by the request handlers. Each returns a
//! client-facing message on failure; handlers collect them into the 422
//! `errors` map.

/// Required string field: present and non-blank
pub fn require_string(value: &Option<String>, field: &str) -> Result<String, String> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(format!("The {} field is required", field)),
    }
}

/// Basic email format check
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if !email.contains('@') || !email.contains('.') {
        return Err("Invalid email format".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Upper length bound in characters
pub fn validate_max_length(value: &str, max: usize, field: &str) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("The {} may not be greater than {} characters", field, max));
    }
    Ok(())
}
