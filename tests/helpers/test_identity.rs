// Test identity store
//
// Two fixed keys: ADMIN_KEY resolves to an admin, STAFF_KEY to a non-admin.

use async_trait::async_trait;

use reportdesk::core::Result;
use reportdesk::identity::{CurrentUser, IdentityProvider, Role};

pub const ADMIN_KEY: &str = "key-admin.s3cret";
pub const STAFF_KEY: &str = "key-staff.s3cret";

pub fn admin_user() -> CurrentUser {
    CurrentUser::new("user-admin", "Alex Admin", vec![Role::Admin])
}

pub fn staff_user() -> CurrentUser {
    CurrentUser::new("user-staff", "Sam Staff", vec![Role::Staff])
}

pub struct StaticIdentityProvider;

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn authenticate(&self, api_key: &str) -> Result<Option<CurrentUser>> {
        Ok(match api_key {
            ADMIN_KEY => Some(admin_user()),
            STAFF_KEY => Some(staff_user()),
            _ => None,
        })
    }
}
