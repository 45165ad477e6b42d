use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::customer::CreateCustomerRequest;

pub const MIN_NAME_CHARS: usize = 2;

/// Form-level rejection raised before anything is sent or stored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Please provide an email subject")]
    MissingSubject,
    #[error("Please provide an email message")]
    MissingMessage,
    #[error("Note content cannot be empty")]
    EmptyNote,
    #[error("Message cannot be empty")]
    EmptyChatMessage,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .expect("email pattern is valid")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && email_regex().is_match(email)
}

pub fn validate_customer_form(form: &CreateCustomerRequest) -> Result<(), ValidationError> {
    if form.name.trim().chars().count() < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    if !is_valid_email(form.email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Subject is checked before message, matching the order errors are shown.
pub fn validate_email_compose(subject: &str, message: &str) -> Result<(), ValidationError> {
    if subject.trim().is_empty() {
        return Err(ValidationError::MissingSubject);
    }
    if message.trim().is_empty() {
        return Err(ValidationError::MissingMessage);
    }
    Ok(())
}

pub fn validate_note(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyNote);
    }
    Ok(())
}

pub fn validate_chat_message(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyChatMessage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str) -> CreateCustomerRequest {
        CreateCustomerRequest {
            name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_customer_form() {
        assert_eq!(validate_customer_form(&form("Jo", "jo@example.com")), Ok(()));
    }

    #[test]
    fn test_short_name_rejected() {
        assert_eq!(
            validate_customer_form(&form("J", "j@example.com")),
            Err(ValidationError::NameTooShort)
        );
        assert_eq!(
            validate_customer_form(&form("  J  ", "j@example.com")),
            Err(ValidationError::NameTooShort)
        );
    }

    #[test]
    fn test_malformed_emails_rejected() {
        for email in [
            "",
            "plainaddress",
            "@example.com",
            "jane@",
            "jane@example",
            "jane..doe@example.com",
            ".jane@example.com",
            "jane doe@example.com",
        ] {
            assert_eq!(
                validate_customer_form(&form("Jane", email)),
                Err(ValidationError::InvalidEmail),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn test_well_formed_emails_accepted() {
        for email in [
            "jane.cooper@example.com",
            "o'brien+crm@mail.example.co.uk",
            "x_y-z@sub-domain.io",
        ] {
            assert!(is_valid_email(email), "{email} should be accepted");
        }
    }

    #[test]
    fn test_compose_requires_subject_then_message() {
        assert_eq!(
            validate_email_compose("", ""),
            Err(ValidationError::MissingSubject)
        );
        assert_eq!(
            validate_email_compose("Hello", "  \n"),
            Err(ValidationError::MissingMessage)
        );
        assert_eq!(validate_email_compose("Hello", "Body"), Ok(()));
    }

    #[test]
    fn test_note_and_chat_message() {
        assert_eq!(validate_note(" "), Err(ValidationError::EmptyNote));
        assert_eq!(validate_note("Called back"), Ok(()));
        assert_eq!(
            validate_chat_message(""),
            Err(ValidationError::EmptyChatMessage)
        );
    }
}
