//! Actions for the profile tab.

use crate::dependencies::ApiError;
use crate::runtime::Action;
use crate::shop::models::UserProfile;

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileAction {
    /// Load the profile once; ignored while loading or after completion.
    FetchUserProfile,

    UserProfileResponse(Result<UserProfile, ApiError>),
}

impl Action for ProfileAction {}
