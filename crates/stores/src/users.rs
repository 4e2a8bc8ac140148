//! User accounts.

use fundhub_core::models::User;
use fundhub_core::resource::Suspendable;

use crate::state::StoreState;
use crate::store::ResourceStore;

pub type UserStore = ResourceStore<User>;

impl StoreState<User> {
    /// Suspended accounts among the records currently displayed.
    pub fn suspended_users(&self) -> impl Iterator<Item = &User> {
        self.visible().iter().filter(|user| user.is_suspended())
    }
}
