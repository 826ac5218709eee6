use serde::{Deserialize, Serialize};

/// An acronym and its expansion, owned by a [`User`].
///
/// The `id` is assigned by the store on insert and stays stable for the
/// lifetime of the record. On the wire the owner field is spelled `userID`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acronym {
    pub id: i64,
    pub short: String,
    pub long: String,
    #[serde(rename = "userID")]
    pub user_id: i64,
}

/// Payload for creating or updating an acronym.
///
/// Identical to [`Acronym`] minus the id: create bodies arrive without one
/// and update bodies never move a record to a new id. Both the JSON API and
/// the HTML forms decode into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcronymData {
    pub short: String,
    pub long: String,
    #[serde(rename = "userID")]
    pub user_id: i64,
}

/// A registered user. Acronyms reference their author by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
}

/// Payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub name: String,
    pub username: String,
}

impl Acronym {
    /// The data portion of this record, as an update payload would carry it.
    pub fn data(&self) -> AcronymData {
        AcronymData {
            short: self.short.clone(),
            long: self.long.clone(),
            user_id: self.user_id,
        }
    }
}
