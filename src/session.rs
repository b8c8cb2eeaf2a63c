use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::error::AgencyError;

#[derive(Debug, Clone)]
pub struct Session {
    home: Option<PathBuf>,
    config: Config,
    pub user: Option<String>,
    pub loading: bool,
}

impl Session {
    pub fn open(home: Option<&Path>) -> Result<Self, AgencyError> {
        let mut session = Self {
            home: home.map(Path::to_path_buf),
            config: Config::default(),
            user: None,
            loading: true,
        };
        session.config = config::load(home)?;
        session.user = session.config.signed_in_user.clone();
        session.loading = false;
        tracing::debug!(user = session.user.as_deref().unwrap_or("-"), "session opened");
        Ok(session)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The signed-in user, or `NOT_SIGNED_IN`.
    pub fn require_user(&self) -> Result<&str, AgencyError> {
        self.user.as_deref().ok_or_else(AgencyError::not_signed_in)
    }

    pub fn sign_in(&mut self, user: &str) -> Result<(), AgencyError> {
        let user = user.trim();
        if user.is_empty() {
            return Err(AgencyError::validation("User name must not be empty"));
        }
        self.config.signed_in_user = Some(user.to_string());
        config::save(self.home.as_deref(), &self.config)?;
        self.user = Some(user.to_string());
        tracing::info!(user, "signed in");
        Ok(())
    }

    pub fn sign_out(&mut self) -> Result<Option<String>, AgencyError> {
        let previous = self.user.take();
        self.config.signed_in_user = None;
        config::save(self.home.as_deref(), &self.config)?;
        if let Some(ref user) = previous {
            tracing::info!(user = user.as_str(), "signed out");
        }
        Ok(previous)
    }
}
