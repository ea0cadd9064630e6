//! User Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use cartwheel::items::LineItem;
use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

/// Collection holding one document per user.
pub const USERS_COLLECTION: &str = "users";

/// Field of the user document holding the cart lines.
pub const CART_FIELD: &str = "cart";

/// Stable identifier supplied by identity resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// How the user proved their identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IdentityProvider {
    Password,
    Google,
    Facebook,
}

/// A resolved identity, handed over by the sign-in flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: Option<String>,
    pub provider: IdentityProvider,
}

/// User document as stored remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub provider: Option<IdentityProvider>,

    /// Missing or `null` in older documents; treated as an empty cart.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cart: Vec<LineItem>,

    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<LineItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<LineItem>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// New User Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub id: UserId,
    pub email: Option<String>,
    pub provider: IdentityProvider,
}

impl From<&Identity> for NewUser {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.user_id.clone(),
            email: identity.email.clone(),
            provider: identity.provider,
        }
    }
}
