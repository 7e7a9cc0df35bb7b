//! Account forms: registration, login and profile update.
//!
//! Passwords are checked for shape only and never leave the form.

use super::{INVALID_EMAIL, ValidationErrors, check_max, check_min, is_valid_email};
use crate::models::ProfileType;

/// Raw values of the registration form.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub profile_type: String,
}

/// A validated registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub profile_type: ProfileType,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_min(
            &mut errors,
            "name",
            &self.name,
            2,
            "Name must be at least 2 characters.",
        );
        if !is_valid_email(&self.email) {
            errors.add("email", INVALID_EMAIL);
        }
        check_min(
            &mut errors,
            "password",
            &self.password,
            8,
            "Password must be at least 8 characters.",
        );
        let profile_type = self.profile_type.parse::<ProfileType>().ok();
        if profile_type.is_none() {
            errors.add("profile_type", "Please select a profile type.");
        }
        // Only checked once every other field is valid.
        if errors.is_empty() && self.password != self.confirm_password {
            errors.add("confirm_password", "Passwords do not match.");
        }

        errors.into_result(RegisterInput {
            name: self.name.clone(),
            email: self.email.clone(),
            profile_type: profile_type.unwrap_or_default(),
        })
    }
}

/// Raw values of the login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Returns the email that signed in.
    pub fn validate(&self) -> Result<String, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !is_valid_email(&self.email) {
            errors.add("email", INVALID_EMAIL);
        }
        check_min(
            &mut errors,
            "password",
            &self.password,
            6,
            "Password must be at least 6 characters.",
        );
        errors.into_result(self.email.clone())
    }
}

/// Raw values of the profile form.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub profile_type: String,
    pub bio: String,
    pub current_password: String,
    /// Empty means "keep the current password"
    pub new_password: String,
    pub confirm_new_password: String,
}

/// A validated profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInput {
    pub name: String,
    pub email: String,
    pub profile_type: ProfileType,
    pub bio: Option<String>,
    pub password_changed: bool,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<ProfileInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_min(
            &mut errors,
            "name",
            &self.name,
            2,
            "Name must be at least 2 characters.",
        );
        if !is_valid_email(&self.email) {
            errors.add("email", INVALID_EMAIL);
        }
        let profile_type = self.profile_type.parse::<ProfileType>().ok();
        if profile_type.is_none() {
            errors.add("profile_type", "Please select a profile type.");
        }
        check_max(
            &mut errors,
            "bio",
            &self.bio,
            200,
            "Bio cannot exceed 200 characters.",
        );

        let password_changed = !self.new_password.is_empty();
        if password_changed {
            check_min(
                &mut errors,
                "new_password",
                &self.new_password,
                8,
                "New password must be at least 8 characters.",
            );
            if self.confirm_new_password.is_empty()
                || self.confirm_new_password != self.new_password
            {
                errors.add(
                    "confirm_new_password",
                    "New passwords do not match or the confirmation is missing.",
                );
            }
        }

        let bio = if self.bio.is_empty() {
            None
        } else {
            Some(self.bio.clone())
        };

        errors.into_result(ProfileInput {
            name: self.name.clone(),
            email: self.email.clone(),
            profile_type: profile_type.unwrap_or_default(),
            bio,
            password_changed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form() -> RegisterForm {
        RegisterForm {
            name: "Dev".to_string(),
            email: "dev@collabcut.com".to_string(),
            password: "abcdefgh".to_string(),
            confirm_password: "abcdefgh".to_string(),
            profile_type: "developer".to_string(),
        }
    }

    fn profile_form() -> ProfileForm {
        ProfileForm {
            name: "Dev".to_string(),
            email: "dev@collabcut.com".to_string(),
            profile_type: "developer".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_register_valid() {
        let input = register_form().validate().unwrap();
        assert_eq!(input.profile_type, ProfileType::Developer);
    }

    #[test]
    fn test_register_password_mismatch_reported_on_confirmation() {
        let form = RegisterForm {
            confirm_password: "abcdefghX".to_string(),
            ..register_form()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.get("confirm_password"), Some("Passwords do not match."));
    }

    #[test]
    fn test_register_rejects_bad_shape() {
        let form = RegisterForm {
            name: "D".to_string(),
            email: "dev".to_string(),
            password: "short".to_string(),
            confirm_password: "short".to_string(),
            profile_type: "admin".to_string(),
        };
        let err = form.validate().unwrap_err();
        assert!(err.has("name"));
        assert!(err.has("email"));
        assert!(err.has("password"));
        assert!(err.has("profile_type"));
        assert!(!err.has("confirm_password"));
    }

    #[test]
    fn test_register_mismatch_waits_for_valid_fields() {
        let form = RegisterForm {
            name: "D".to_string(),
            confirm_password: "abcdefghX".to_string(),
            ..register_form()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.has("name"));
        assert!(!err.has("confirm_password"));
    }

    #[test]
    fn test_login_rules() {
        let ok = LoginForm {
            email: "dev@collabcut.com".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(ok.validate().unwrap(), "dev@collabcut.com");

        let short = LoginForm {
            password: "12345".to_string(),
            ..ok
        };
        assert!(short.validate().unwrap_err().has("password"));
    }

    #[test]
    fn test_profile_without_password_change() {
        let input = profile_form().validate().unwrap();
        assert!(!input.password_changed);
        assert_eq!(input.bio, None);
    }

    #[test]
    fn test_profile_bio_limit() {
        let mut form = profile_form();
        form.bio = "x".repeat(200);
        assert!(form.validate().is_ok());

        form.bio = "x".repeat(201);
        assert!(form.validate().unwrap_err().has("bio"));
    }

    #[test]
    fn test_profile_password_change_rules() {
        let mut form = profile_form();
        form.new_password = "newpassword".to_string();
        let err = form.validate().unwrap_err();
        assert!(err.has("confirm_new_password"));

        form.confirm_new_password = "newpassworx".to_string();
        assert!(form.validate().unwrap_err().has("confirm_new_password"));

        form.confirm_new_password = "newpassword".to_string();
        assert!(form.validate().unwrap().password_changed);

        form.new_password = "short".to_string();
        form.confirm_new_password = "short".to_string();
        let err = form.validate().unwrap_err();
        assert!(err.has("new_password"));
        assert!(!err.has("confirm_new_password"));
    }
}
