//! Общие правила валидации полей форм каталога

/// Минимальная длина названия (после обрезки пробелов)
pub const MIN_NAME_LEN: usize = 2;

pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(format!(
            "Название должно содержать не менее {} символов",
            MIN_NAME_LEN
        ));
    }
    Ok(())
}

pub fn validate_non_negative(field: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("Поле {} не может быть отрицательным", field));
    }
    Ok(())
}

pub fn validate_display_order(order: i32, min: i32) -> Result<(), String> {
    if order < min {
        return Err(format!("Порядок отображения должен быть не меньше {}", min));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_requires_two_visible_characters() {
        assert!(validate_name("Tea").is_ok());
        assert!(validate_name("Чай").is_ok());
        assert!(validate_name(" a ").is_err());
        assert!(validate_name("").is_err());
    }

    #[test]
    fn negative_and_nan_values_are_rejected() {
        assert!(validate_non_negative("price", 0.0).is_ok());
        assert!(validate_non_negative("price", -0.01).is_err());
        assert!(validate_non_negative("price", f64::NAN).is_err());
    }
}
