use super::ApiError;

pub fn validate_record_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid record ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_city_name(name: &str) -> Result<&str, ApiError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ApiError::validation("City name cannot be empty"));
    }

    if trimmed.len() > 120 {
        return Err(ApiError::validation(
            "City name must be 120 characters or less",
        ));
    }

    Ok(trimmed)
}

pub fn validate_temperature(value: f64) -> Result<f64, ApiError> {
    if !value.is_finite() {
        return Err(ApiError::validation("Temperature must be a finite number"));
    }
    Ok(value)
}
