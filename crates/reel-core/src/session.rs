//! Session capability: who is logged in
//!
//! Gating happens outside the schedule core; this is the thin view the UI
//! reads its user label from.

#[derive(Debug, Clone)]
pub struct Session {
    user_label: String,
    authenticated: bool,
}

impl Session {
    pub fn authenticated(user_label: impl Into<String>) -> Self {
        Self {
            user_label: user_label.into(),
            authenticated: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user_label: String::new(),
            authenticated: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn current_user_label(&self) -> &str {
        &self.user_label
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        self.user_label.clear();
    }
}
