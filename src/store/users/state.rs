use crate::api::types::User;
use crate::paging::{filter_collection, matches_filter, Pager};
use crate::store::users::USER_FILTER_PATH;
use crate::store::{OpStatus, SliceState};

/// State slice for the users domain.
///
/// `items` always holds the full collection from the last load; filter and
/// pager are applied on read so changing either never loses data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UsersState {
    pub items: Vec<User>,
    /// Free-text filter, matched against the person display name.
    pub filter: String,
    /// Pager over the filtered collection.
    pub pager: Pager,
    /// Uuid of the user picked as the active item.
    pub active: Option<String>,
    /// Row currently armed for delete confirmation.
    pub pending_delete: Option<String>,
    pub load: OpStatus,
    pub create: OpStatus,
    pub delete: OpStatus,
}

impl SliceState for UsersState {}

impl UsersState {
    /// Initial state with the configured rows-per-page.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            pager: Pager::build(0, 1, page_size),
            ..Self::default()
        }
    }

    /// How many items survive the current filter.
    pub fn filtered_len(&self) -> usize {
        count_filtered(&self.items, &self.filter)
    }

    /// The filtered collection, in load order.
    pub fn filtered(&self) -> Vec<User> {
        filter_collection(self.items.clone(), USER_FILTER_PATH, &self.filter)
    }

    /// The rows visible on the current page.
    pub fn page_items(&self) -> Vec<User> {
        let filtered = self.filtered();
        filtered
            .get(self.pager.window())
            .map(<[User]>::to_vec)
            .unwrap_or_default()
    }

    /// Look up a user by uuid in the full collection.
    pub fn by_uuid(&self, uuid: &str) -> Option<&User> {
        self.items.iter().find(|user| user.uuid == uuid)
    }
}

/// Filtered length without cloning the collection.
pub(super) fn count_filtered(items: &[User], filter: &str) -> usize {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return items.len();
    }
    items
        .iter()
        .filter(|user| matches_filter(user, USER_FILTER_PATH, &needle))
        .count()
}
