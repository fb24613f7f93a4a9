use crate::id::Id;

/// A signed-in user as exposed by the auth provider.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id           : Id,
    pub display_name : Option<String>,
    pub photo_url    : Option<String>,
}

impl User {
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            photo_url: None,
        }
    }

    pub fn display_name_or_anonymous(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Anonymous")
    }
}
