//! [`Preferences`]-related definitions.

use derive_more::From;
use juniper::{graphql_object, GraphQLEnum};
use service::domain::{self, preferences};

use crate::{api, Context};

/// View settings and local favorites of the authenticated user.
#[derive(Clone, Debug, From)]
pub struct Preferences(domain::Preferences);

/// View settings and local favorites of the authenticated user.
#[graphql_object(context = Context)]
impl Preferences {
    /// Layout of `SubField` listings.
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.0.view_mode.into()
    }

    /// Section opened on a `Complex` page.
    #[must_use]
    pub fn active_tab(&self) -> Tab {
        self.0.active_tab.into()
    }

    /// IDs of the `SubField`s marked as favorites.
    #[must_use]
    pub fn favorites(&self) -> Vec<api::complex::FieldId> {
        self.0.favorites.iter().copied().map(Into::into).collect()
    }
}

/// Layout of `SubField` listings.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum ViewMode {
    /// Cards in a grid.
    Grid,

    /// Rows in a list.
    List,
}

impl From<preferences::ViewMode> for ViewMode {
    fn from(mode: preferences::ViewMode) -> Self {
        match mode {
            preferences::ViewMode::Grid => Self::Grid,
            preferences::ViewMode::List => Self::List,
        }
    }
}

impl From<ViewMode> for preferences::ViewMode {
    fn from(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Grid => Self::Grid,
            ViewMode::List => Self::List,
        }
    }
}

/// Section of a `Complex` page.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum Tab {
    /// General information.
    Overview,

    /// `SubField`s with their prices.
    Fields,

    /// Availability by `TimeSlot`.
    Schedule,

    /// Visitor reviews.
    Reviews,
}

impl From<preferences::Tab> for Tab {
    fn from(tab: preferences::Tab) -> Self {
        match tab {
            preferences::Tab::Overview => Self::Overview,
            preferences::Tab::Fields => Self::Fields,
            preferences::Tab::Schedule => Self::Schedule,
            preferences::Tab::Reviews => Self::Reviews,
        }
    }
}

impl From<Tab> for preferences::Tab {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Overview => Self::Overview,
            Tab::Fields => Self::Fields,
            Tab::Schedule => Self::Schedule,
            Tab::Reviews => Self::Reviews,
        }
    }
}
