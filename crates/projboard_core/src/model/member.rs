//! Member domain model.
//!
//! # Invariants
//! - `index_number` is positional metadata owned by `MemberRoster`; it is
//!   excluded from equality.

use serde::{Deserialize, Serialize};

/// One person on a project roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// 1-based position in the owning roster. `0` until the roster adds it.
    pub index_number: u32,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Member {
    /// Creates an unattached member; the roster assigns `index_number`.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            index_number: 0,
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// Overwrites contact fields in place, keeping the index number.
    pub fn update_details(
        &mut self,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) {
        self.name = name.into();
        self.phone = phone.into();
        self.email = email.into();
    }

    /// Single-line description used by roster and table listings.
    pub fn details(&self) -> String {
        format!(
            "{}. {} (Phone: {} | Email: {})",
            self.index_number, self.name, self.phone, self.email
        )
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.phone == other.phone && self.email == other.email
    }
}

impl Eq for Member {}
