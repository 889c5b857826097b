use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::Document;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: &str, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash,
            created_at: Utc::now(),
        }
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";
    const UNIQUE_FIELD: Option<&'static str> = Some("email");

    fn id(&self) -> Uuid {
        self.id
    }
}
