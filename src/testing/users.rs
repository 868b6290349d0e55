use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::user::{CourseMembership, CourseRole, LoggedInUser, RealmRole};

/// A user with a valid membership in the course with the given id.
///
/// The course is published and active at the current time.
pub fn user_with_membership_in_course(course_id: Uuid, role: CourseRole) -> LoggedInUser {
    user_with_memberships(vec![active_membership(course_id, role)])
}

/// A user with the given course memberships and no realm roles.
pub fn user_with_memberships(course_memberships: Vec<CourseMembership>) -> LoggedInUser {
    user_with_memberships_and_roles(Vec::new(), course_memberships)
}

/// A user with the given course memberships and realm roles.
pub fn user_with_memberships_and_roles(
    realm_roles: Vec<RealmRole>,
    course_memberships: Vec<CourseMembership>,
) -> LoggedInUser {
    LoggedInUser {
        id: Uuid::new_v4(),
        user_name: String::from("userWithMemberships"),
        first_name: String::from("firstName"),
        last_name: String::from("lastName"),
        course_memberships,
        realm_roles,
    }
}

fn active_membership(course_id: Uuid, role: CourseRole) -> CourseMembership {
    CourseMembership {
        course_id,
        role,
        published: true,
        start_date: Utc::now() - Duration::days(1),
        end_date: Utc::now() + Duration::days(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_published_and_currently_active() {
        let course_id = Uuid::new_v4();
        let user = user_with_membership_in_course(course_id, CourseRole::Student);

        assert_eq!(user.course_memberships.len(), 1);
        let membership = &user.course_memberships[0];
        assert_eq!(membership.course_id, course_id);
        assert!(membership.published);
        let now = Utc::now();
        assert!(membership.start_date < now && now < membership.end_date);
    }

    #[test]
    fn realm_roles_are_carried_through() {
        let user = user_with_memberships_and_roles(vec![RealmRole::CourseCreator], Vec::new());
        assert_eq!(user.realm_roles, vec![RealmRole::CourseCreator]);
        assert!(user.course_memberships.is_empty());
    }
}
