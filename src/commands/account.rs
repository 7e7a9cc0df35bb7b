//! Login, registration, logout and profile.
//!
//! Authentication is a mock: any well-formed submission signs the session in.
//! No account record is created and no password is kept.

use super::{App, Output, json, rejected};
use crate::Result;
use crate::forms::{LoginForm, ProfileForm, RegisterForm};
use crate::models::{ProfileType, User};
use crate::notify::Notification;
use crate::routes::{self, Navigation, Route};
use serde::Serialize;

/// Outcome of a login or registration.
#[derive(Debug, Serialize)]
pub struct AuthResult {
    pub navigation: Navigation,
    pub email: String,
    pub user_id: String,
}

impl Output for AuthResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Signed in as {}. Continue at {}",
            self.email,
            self.navigation.path()
        )
    }
}

#[derive(Debug, Serialize)]
pub struct LogoutResult {
    pub navigation: Navigation,
}

impl Output for LogoutResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Signed out. Continue at {}", self.navigation.path())
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub user: User,
    pub initials: String,
    pub profile_types: Vec<ProfileType>,
}

impl Output for ProfileView {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let u = &self.user;
        let mut lines = vec![
            format!("{} ({})", u.name, self.initials),
            format!("  Email: {}", u.email),
            format!("  Profile: {}", u.profile_type),
        ];
        if let Some(ref role) = u.role {
            lines.push(format!("  Role: {}", role));
        }
        if let Some(ref bio) = u.bio {
            lines.push(format!("  Bio: {}", bio));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdated {
    pub user: User,
    pub password_changed: bool,
}

impl Output for ProfileUpdated {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut out = format!("Profile updated for {}", self.user.name);
        if self.password_changed {
            out.push_str(" (password changed)");
        }
        out
    }
}

impl App {
    fn signed_in(&mut self, email: String) -> AuthResult {
        self.session.sign_in(&email);
        tracing::info!(user = %self.session.user_id(), "signed in");
        AuthResult {
            navigation: routes::resolve(&Route::Dashboard, self.session.as_ref()),
            email,
            user_id: self.user_id(),
        }
    }

    pub fn login(&mut self, form: &LoginForm) -> Result<AuthResult> {
        let email = form.validate().map_err(|e| rejected("login", e))?;
        Ok(self.signed_in(email))
    }

    pub fn register(&mut self, form: &RegisterForm) -> Result<AuthResult> {
        let input = form.validate().map_err(|e| rejected("register", e))?;
        tracing::debug!(profile_type = %input.profile_type, "registration accepted");
        Ok(self.signed_in(input.email))
    }

    pub fn logout(&mut self) -> LogoutResult {
        self.session.sign_out();
        LogoutResult {
            navigation: Navigation::Allowed(Route::Login.path()),
        }
    }

    pub fn profile_show(&self) -> Result<ProfileView> {
        self.guard(&Route::Profile)?;
        let user = self.store.get_user(self.session.user_id())?;
        Ok(ProfileView {
            initials: user.initials(),
            user,
            profile_types: ProfileType::all().to_vec(),
        })
    }

    /// Save the profile form onto the session user's record.
    pub fn profile_update(&mut self, form: &ProfileForm) -> Result<ProfileUpdated> {
        self.guard(&Route::Profile)?;
        let input = form.validate().map_err(|e| rejected("profile", e))?;

        let mut user = self.store.get_user(self.session.user_id())?;
        user.name = input.name;
        user.email = input.email;
        user.profile_type = input.profile_type;
        user.bio = input.bio;
        self.store.update_user(&user)?;

        tracing::info!(user = %user.id, password_changed = input.password_changed, "profile updated");
        self.notify(Notification::info(
            "Profile Updated",
            "Your profile information has been saved.",
        ));
        Ok(ProfileUpdated {
            user,
            password_changed: input.password_changed,
        })
    }
}
