use serde::Deserialize;
use crate::error::AppError;

/// Raw login/registration form. Fields are optional so a missing one
/// reaches validation instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl CredentialsForm {
    /// Shared by login and registration. Values are taken verbatim: usernames
    /// are case-sensitive and neither field is trimmed.
    pub fn validate(self) -> Result<Credentials, AppError> {
        match (self.username, self.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Ok(Credentials { username, password })
            }
            _ => Err(AppError::Validation(
                "Username and password are required".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: Option<&str>, password: Option<&str>) -> CredentialsForm {
        CredentialsForm {
            username: username.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn test_valid() {
        let creds = form(Some("Alice"), Some(" pw ")).validate().unwrap();
        assert_eq!(creds.username, "Alice");
        assert_eq!(creds.password, " pw ");
    }

    #[test]
    fn test_missing_or_empty() {
        for f in [
            form(None, Some("pw")),
            form(Some("alice"), None),
            form(Some(""), Some("pw")),
            form(Some("alice"), Some("")),
            CredentialsForm::default(),
        ] {
            assert!(matches!(f.validate(), Err(AppError::Validation(_))));
        }
    }
}
