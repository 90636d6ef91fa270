use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Represents a user record as stored in the database.
///
/// `task_ids` is the owned-task reference list: the ordered set of task ids
/// this user may see or mutate. A task is only discoverable through the list
/// of the user who created it.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Salted one-way hash of the password; never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub task_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether `task_id` is in this user's owned-task list.
    pub fn owns(&self, task_id: Uuid) -> bool {
        self.task_ids.contains(&task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership_membership() {
        let owned = Uuid::new_v4();
        let foreign = Uuid::new_v4();
        let user = User {
            id: Uuid::new_v4(),
            username: "alice1".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            task_ids: vec![owned],
            created_at: Utc::now(),
        };

        assert!(user.owns(owned));
        assert!(!user.owns(foreign));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice1".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            task_ids: vec![],
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice1");
    }
}
