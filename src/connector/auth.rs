// ABOUTME: Client credentials for binding to one SMSC endpoint
// ABOUTME: Immutable once built; a connector owns its copy

use std::fmt;

/// SMSC address plus the credentials sent in the bind request.
#[derive(Clone, PartialEq, Eq)]
pub struct Auth {
    smsc: String,
    system_id: String,
    password: String,
    system_type: String,
}

impl Auth {
    /// Credentials for `smsc` ("host:port") with an empty system type
    pub fn new(
        smsc: impl Into<String>,
        system_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            smsc: smsc.into(),
            system_id: system_id.into(),
            password: password.into(),
            system_type: String::new(),
        }
    }

    /// Set system type
    pub fn with_system_type(mut self, system_type: impl Into<String>) -> Self {
        self.system_type = system_type.into();
        self
    }

    pub fn smsc(&self) -> &str {
        &self.smsc
    }

    pub fn system_id(&self) -> &str {
        &self.system_id
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn system_type(&self) -> &str {
        &self.system_type
    }
}

// Hand-written so passwords never reach a log line.
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("smsc", &self.smsc)
            .field("system_id", &self.system_id)
            .field("password", &"********")
            .field("system_type", &self.system_type)
            .finish()
    }
}
