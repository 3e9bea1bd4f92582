use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

use super::error::DomainError;
use super::post::validate_id;

const USERNAME_EXTRA_CHARS: &[char] = &['-', '.', '_', '@', '+'];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) bio: Option<String>,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_username(&self.username)?;
        let email = normalize_email(&self.email)?;
        check_password_strength(&self.password)?;

        let bio = match self.bio.map(|bio| bio.trim().to_string()) {
            Some(bio) if bio.chars().count() > 500 => {
                return Err(DomainError::Validation {
                    field: "bio",
                    message: "must be at most 500 chars",
                });
            }
            Some(bio) if bio.is_empty() => None,
            other => other,
        };

        Ok(Self {
            username,
            email,
            password: self.password,
            bio,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || username.chars().count() > 64 {
            return Err(DomainError::Validation {
                field: "username",
                message: "must be 1..64 chars",
            });
        }
        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }

        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}

/// Identity account. The password hash never leaves the data layer.
#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: Uuid,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(
        id: Uuid,
        username: impl Into<String>,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_id("id", id)?;

        Ok(Self {
            id,
            username: normalize_username(&username.into())?,
            email: normalize_email(&email.into())?,
            created_at,
        })
    }
}

fn normalize_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    let len = username.chars().count();
    if !(3..=64).contains(&len) {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 3..64 chars",
        });
    }
    let allowed = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || USERNAME_EXTRA_CHARS.contains(&c));
    if !allowed {
        return Err(DomainError::Validation {
            field: "username",
            message: "may only contain letters, digits and -._@+",
        });
    }
    Ok(username.to_string())
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}

fn check_password_strength(password: &str) -> Result<(), DomainError> {
    let len = password.chars().count();
    if !(8..=128).contains(&len) {
        return Err(DomainError::Validation {
            field: "password",
            message: "must be 8..128 chars",
        });
    }
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Err(DomainError::Validation {
            field: "password",
            message: "must contain a letter and a digit",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{LoginRequest, RegisterRequest, User, normalize_email, normalize_username};

    fn register(password: &str, bio: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            username: "valid_user".to_string(),
            email: "test@example.com".to_string(),
            password: password.to_string(),
            bio: bio.map(str::to_string),
        }
    }

    #[test]
    fn user_new_rejects_nil_id() {
        let result = User::new(Uuid::nil(), "valid_user", "test@example.com", Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  TeSt@Example.COM ").expect("must be valid");
        assert_eq!(value, "test@example.com");
    }

    #[test]
    fn username_rules_are_applied() {
        assert!(normalize_username("ab").is_err());
        assert!(normalize_username("has space").is_err());
        assert!(normalize_username("valid.user-1").is_ok());
    }

    #[test]
    fn register_password_strength_is_checked() {
        assert!(register("short1", None).validate().is_err());
        assert!(register("onlyletters", None).validate().is_err());
        assert!(register("12345678", None).validate().is_err());

        let validated = register("very-secure-password-1", None)
            .validate()
            .expect("must be valid");
        assert_eq!(validated.username, "valid_user");
        assert_eq!(validated.email, "test@example.com");
    }

    #[test]
    fn register_bio_is_trimmed_and_blank_dropped() {
        let with_bio = register("password123", Some("  hello  "))
            .validate()
            .expect("must be valid");
        assert_eq!(with_bio.bio.as_deref(), Some("hello"));

        let blank = register("password123", Some("   "))
            .validate()
            .expect("must be valid");
        assert!(blank.bio.is_none());

        assert!(
            register("password123", Some(&"b".repeat(501)))
                .validate()
                .is_err()
        );
    }

    #[test]
    fn login_request_trims_username_and_keeps_password() {
        let req = LoginRequest {
            username: "  valid_user ".to_string(),
            password: " secret ".to_string(),
        };

        let validated = req.validate().expect("must be valid");
        assert_eq!(validated.username, "valid_user");
        assert_eq!(validated.password, " secret ");
    }
}
