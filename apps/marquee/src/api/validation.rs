//! # Field Validation Rules
//!
//! Format and range checks applied to request payloads before they reach the
//! catalog. Each rule returns the message reported to the client on failure.

use chrono::NaiveDate;
use marquee_core::CatalogError;
use marquee_core::primitives::{MAX_DESCRIPTION_LENGTH, cinema_birth_date};

fn invalid(message: impl Into<String>) -> CatalogError {
    CatalogError::Validation(message.into())
}

// =============================================================================
// FILM RULES
// =============================================================================

pub fn film_name(name: Option<&str>) -> Result<String, CatalogError> {
    match name {
        Some(n) if !n.trim().is_empty() => Ok(n.to_string()),
        _ => Err(invalid("Specify name field for the film")),
    }
}

pub fn description(description: Option<&str>) -> Result<Option<String>, CatalogError> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LENGTH => Err(invalid(format!(
            "Description should be at most {} characters long",
            MAX_DESCRIPTION_LENGTH
        ))),
        other => Ok(other.map(str::to_string)),
    }
}

pub fn release_date(date: Option<NaiveDate>) -> Result<NaiveDate, CatalogError> {
    let floor = cinema_birth_date();
    match date {
        Some(d) if d >= floor => Ok(d),
        Some(_) => Err(invalid(format!(
            "Release date should not be before {}",
            floor.format("%d.%m.%Y")
        ))),
        None => Err(invalid("Specify release date for the film")),
    }
}

/// Duration in whole seconds; must be strictly positive.
pub fn duration_secs(seconds: Option<i64>) -> Result<u64, CatalogError> {
    match seconds.map(u64::try_from) {
        Some(Ok(s)) if s > 0 => Ok(s),
        _ => Err(invalid("Film duration should be positive")),
    }
}

// =============================================================================
// USER RULES
// =============================================================================

pub fn email(email: Option<&str>) -> Result<String, CatalogError> {
    match email {
        Some(e) if is_valid_email(e) => Ok(e.to_string()),
        _ => Err(invalid("Email format is invalid")),
    }
}

pub fn login(login: Option<&str>) -> Result<String, CatalogError> {
    match login {
        Some(l) if l.trim().is_empty() => Err(invalid("Login can not be blank")),
        Some(l) if l.chars().any(char::is_whitespace) => {
            Err(invalid("Login can not contain spaces"))
        }
        Some(l) => Ok(l.to_string()),
        None => Err(invalid("Login can not be blank")),
    }
}

pub fn birthday(date: Option<NaiveDate>, today: NaiveDate) -> Result<NaiveDate, CatalogError> {
    match date {
        Some(d) if d <= today => Ok(d),
        Some(_) => Err(invalid("Birthday date can't be in future")),
        None => Err(invalid("Specify birthday for the user")),
    }
}

/// Syntactic email check: `local@domain`, no whitespace, one `@`, and a
/// domain without empty dot-separated labels.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !domain.is_empty()
        && domain.split('.').all(|label| !label.is_empty())
}

/// Path identifiers must be positive.
pub fn positive_id(raw: u64, field: &str) -> Result<u64, CatalogError> {
    if raw == 0 {
        return Err(invalid(format!("{field} must be positive")));
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("neo@matrix.io"));
        assert!(is_valid_email("a@localhost"));
        assert!(!is_valid_email("neo.matrix.io"));
        assert!(!is_valid_email("@matrix.io"));
        assert!(!is_valid_email("neo@"));
        assert!(!is_valid_email("neo@@matrix.io"));
        assert!(!is_valid_email("neo@matrix..io"));
        assert!(!is_valid_email("n eo@matrix.io"));
    }

    #[test]
    fn release_date_floor_is_inclusive() {
        assert!(release_date(Some(date(1895, 12, 28))).is_ok());
        assert!(release_date(Some(date(1895, 12, 27))).is_err());
        assert!(release_date(None).is_err());
    }

    #[test]
    fn description_limit_counts_characters() {
        let at_limit = "é".repeat(MAX_DESCRIPTION_LENGTH);
        assert!(description(Some(at_limit.as_str())).is_ok());

        let over = "a".repeat(MAX_DESCRIPTION_LENGTH + 1);
        assert!(description(Some(over.as_str())).is_err());
        assert_eq!(description(None), Ok(None));
    }

    #[test]
    fn duration_must_be_positive() {
        assert_eq!(duration_secs(Some(1)), Ok(1));
        assert!(duration_secs(Some(0)).is_err());
        assert!(duration_secs(Some(-5)).is_err());
        assert!(duration_secs(None).is_err());
    }

    #[test]
    fn login_rules() {
        assert_eq!(login(Some("neo")), Ok("neo".to_string()));
        assert_eq!(
            login(Some("  ")),
            Err(CatalogError::Validation("Login can not be blank".to_string()))
        );
        assert_eq!(
            login(Some("the one")),
            Err(CatalogError::Validation(
                "Login can not contain spaces".to_string()
            ))
        );
    }

    #[test]
    fn birthday_today_is_allowed() {
        let today = date(2024, 5, 1);
        assert!(birthday(Some(today), today).is_ok());
        assert!(birthday(Some(date(2024, 5, 2)), today).is_err());
    }

    #[test]
    fn zero_id_rejected() {
        assert!(positive_id(0, "id").is_err());
        assert_eq!(positive_id(7, "id"), Ok(7));
    }
}
