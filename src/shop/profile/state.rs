//! State for the profile tab.

use crate::runtime::FeatureState;
use crate::shop::models::UserProfile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileDataState {
    #[default]
    NotStarted,
    Loading,
    /// The request finished, successfully or not.
    Complete,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileState {
    pub profile: UserProfile,
    pub data_state: ProfileDataState,
}

impl ProfileState {
    pub fn is_loading(&self) -> bool {
        self.data_state == ProfileDataState::Loading
    }
}

impl FeatureState for ProfileState {}
