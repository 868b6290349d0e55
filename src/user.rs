//! The logged-in-user header carried by requests in API tests.
//!
//! Services resolve the acting user from a JSON-encoded `CurrentUser`
//! header instead of a live token, so tests impersonate any user by
//! attaching this header to their requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the header holding the JSON-encoded acting user.
pub const CURRENT_USER_HEADER: &str = "CurrentUser";

/// The acting user as the services expect it on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedInUser {
    pub id: Uuid,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub course_memberships: Vec<CourseMembership>,
    pub realm_roles: Vec<RealmRole>,
}

/// Membership of the user in one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseMembership {
    pub course_id: Uuid,
    pub role: CourseRole,
    pub published: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseRole {
    Student,
    Tutor,
    Administrator,
}

/// Realm-wide role of the user, independent of any course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RealmRole {
    CourseCreator,
    SuperUser,
}

impl LoggedInUser {
    /// Placeholder identity with the given id, no memberships and no roles.
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            user_name: String::from("test"),
            first_name: String::from("testFirstName"),
            last_name: String::from("testLastName"),
            course_memberships: Vec::new(),
            realm_roles: Vec::new(),
        }
    }
}

/// Serialize the user into the `CurrentUser` header value.
pub fn current_user_header(user: &LoggedInUser) -> Result<String, serde_json::Error> {
    serde_json::to_string(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_value_uses_the_wire_field_names() {
        let user = LoggedInUser::with_id(Uuid::new_v4());
        let value = current_user_header(&user).unwrap();
        let json: serde_json::Value = serde_json::from_str(&value).unwrap();

        assert_eq!(json["userName"], "test");
        assert_eq!(json["firstName"], "testFirstName");
        assert_eq!(json["lastName"], "testLastName");
        assert!(json["courseMemberships"].as_array().unwrap().is_empty());
        assert!(json["realmRoles"].as_array().unwrap().is_empty());
    }

    #[test]
    fn roles_are_spelled_in_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&CourseRole::Administrator).unwrap(),
            "\"ADMINISTRATOR\""
        );
        assert_eq!(
            serde_json::to_string(&RealmRole::CourseCreator).unwrap(),
            "\"COURSE_CREATOR\""
        );
    }

    #[test]
    fn user_round_trips_through_the_header_value() {
        let user = LoggedInUser {
            id: Uuid::new_v4(),
            user_name: String::from("lecturer"),
            first_name: String::from("Ada"),
            last_name: String::from("Lovelace"),
            course_memberships: vec![CourseMembership {
                course_id: Uuid::new_v4(),
                role: CourseRole::Tutor,
                published: true,
                start_date: Utc::now() - chrono::Duration::days(1),
                end_date: Utc::now() + chrono::Duration::days(1),
            }],
            realm_roles: vec![RealmRole::SuperUser],
        };

        let value = current_user_header(&user).unwrap();
        let parsed: LoggedInUser = serde_json::from_str(&value).unwrap();
        assert_eq!(parsed, user);
    }
}
