//! Test utilities for resetdb consumers.
//!
//! This module provides reusable factories for users to impersonate in API
//! tests via the `CurrentUser` header.
//!
//! # Feature Flag
//!
//! This module is only available when the `testing` feature is enabled or
//! during tests:
//!
//! ```toml
//! [dev-dependencies]
//! resetdb = { version = "0.1", features = ["testing"] }
//! ```

mod users;

pub use users::{
    user_with_membership_in_course, user_with_memberships, user_with_memberships_and_roles,
};
