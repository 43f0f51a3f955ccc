use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Supervisor,
}

impl Role {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "supervisor" => Some(Role::Supervisor),
            _ => None,
        }
    }
}

/// A stored account. The password is only ever held hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Option<i64>,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub crew: Option<String>,
    pub created_at: Option<String>,
}

impl User {
    pub fn identity(&self) -> Identity {
        match self.role {
            Role::Admin => Identity::Admin {
                username: self.username.clone(),
            },
            Role::Supervisor => Identity::Supervisor {
                username: self.username.clone(),
                crew: self.crew.clone(),
            },
        }
    }
}

/// The acting user, passed explicitly to every operation that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Identity {
    Admin {
        username: String,
    },
    Supervisor {
        username: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        crew: Option<String>,
    },
}

impl Identity {
    pub fn username(&self) -> &str {
        match self {
            Identity::Admin { username } | Identity::Supervisor { username, .. } => username,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Identity::Admin { .. } => Role::Admin,
            Identity::Supervisor { .. } => Role::Supervisor,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Identity::Admin { .. })
    }

    pub fn crew(&self) -> Option<&str> {
        match self {
            Identity::Admin { .. } => None,
            Identity::Supervisor { crew, .. } => crew.as_deref(),
        }
    }
}
