//! [`Preferences`] definitions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::{Complex, SubField};
use crate::domain::{field, user};

/// Per-user view settings and local favorites.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Preferences {
    /// ID of the user these [`Preferences`] belong to.
    pub user_id: user::Id,

    /// [`ViewMode`] of [`SubField`] listings.
    #[serde(default)]
    pub view_mode: ViewMode,

    /// [`Tab`] opened on a [`Complex`] page.
    #[serde(default)]
    pub active_tab: Tab,

    /// [`SubField`]s marked as favorites.
    #[serde(default)]
    pub favorites: BTreeSet<field::Id>,
}

impl Preferences {
    /// Creates default [`Preferences`] of the provided user.
    #[must_use]
    pub fn new(user_id: user::Id) -> Self {
        Self {
            user_id,
            view_mode: ViewMode::default(),
            active_tab: Tab::default(),
            favorites: BTreeSet::new(),
        }
    }

    /// Indicates whether the provided [`SubField`] is a favorite.
    #[must_use]
    pub fn is_favorite(&self, id: field::Id) -> bool {
        self.favorites.contains(&id)
    }

    /// Flips the favorite mark of the provided [`SubField`], returning
    /// whether it's a favorite now.
    pub fn toggle_favorite(&mut self, id: field::Id) -> bool {
        if self.favorites.remove(&id) {
            false
        } else {
            _ = self.favorites.insert(id);
            true
        }
    }
}

/// Favorite mark of a [`SubField`] as stored by the booking site.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// ID of the user marking the [`SubField`].
    pub user_id: user::Id,

    /// ID of the marked [`SubField`].
    pub field_id: field::Id,
}

/// Layout of [`SubField`] listings.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Cards in a grid.
    #[default]
    Grid,

    /// Rows in a list.
    List,
}

/// Section of a [`Complex`] page.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// General information.
    #[default]
    Overview,

    /// [`SubField`]s with their prices.
    Fields,

    /// Availability by [`TimeSlot`].
    ///
    /// [`TimeSlot`]: crate::domain::TimeSlot
    Schedule,

    /// Visitor reviews.
    Reviews,
}

#[cfg(test)]
mod spec {
    use crate::domain::{field, user};

    use super::{Preferences, Tab, ViewMode};

    #[test]
    fn toggles_favorite() {
        let mut prefs = Preferences::new(user::Id::from(1));
        let id = field::Id::from(5);

        assert!(prefs.toggle_favorite(id));
        assert!(prefs.is_favorite(id));
        assert!(!prefs.toggle_favorite(id));
        assert!(!prefs.is_favorite(id));
    }

    #[test]
    fn fills_missing_fields_with_defaults() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"user_id": 3, "view_mode": "list"}"#)
                .unwrap();

        assert_eq!(prefs.user_id, user::Id::from(3));
        assert_eq!(prefs.view_mode, ViewMode::List);
        assert_eq!(prefs.active_tab, Tab::Overview);
        assert!(prefs.favorites.is_empty());
    }
}
