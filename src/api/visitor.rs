use serde_json::{json, Value};
use crate::db::SessionData;

/// Who is making the request, resolved from the session cookie.
#[derive(Debug, Clone, Default)]
pub enum Visitor {
    #[default]
    Anonymous,
    User(SessionData),
    Admin(SessionData),
}

impl Visitor {
    pub fn from_session(session: Option<SessionData>) -> Self {
        match session {
            Some(session) if session.is_admin => Visitor::Admin(session),
            Some(session) => Visitor::User(session),
            None => Visitor::Anonymous,
        }
    }

    pub fn session(&self) -> Option<&SessionData> {
        match self {
            Visitor::Anonymous => None,
            Visitor::User(session) | Visitor::Admin(session) => Some(session),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.session().map(|s| s.username.as_str())
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Visitor::Admin(_))
    }

    /// Template context for the navigation bar.
    pub fn to_context(&self) -> Value {
        match self.session() {
            Some(session) => json!({
                "username": session.username,
                "is_admin": session.is_admin,
            }),
            None => Value::Null,
        }
    }
}
