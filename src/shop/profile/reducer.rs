//! Reducer for the profile tab.

use crate::dependencies::ApiClient;
use crate::runtime::{Effect, Reducer};

use super::action::ProfileAction;
use super::state::{ProfileDataState, ProfileState};

pub struct ProfileReducer {
    api: ApiClient,
}

impl ProfileReducer {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl Reducer for ProfileReducer {
    type State = ProfileState;
    type Action = ProfileAction;

    fn reduce(&self, state: &mut ProfileState, action: ProfileAction) -> Effect<ProfileAction> {
        match action {
            ProfileAction::FetchUserProfile => {
                if state.data_state != ProfileDataState::NotStarted {
                    return Effect::none();
                }

                state.data_state = ProfileDataState::Loading;
                let api = self.api.clone();
                Effect::future(async move {
                    ProfileAction::UserProfileResponse(api.fetch_user_profile().await)
                })
            }

            ProfileAction::UserProfileResponse(Ok(profile)) => {
                state.data_state = ProfileDataState::Complete;
                state.profile = profile;
                Effect::none()
            }

            ProfileAction::UserProfileResponse(Err(err)) => {
                // Keep the placeholder profile; the tab shows it as is.
                tracing::warn!(error = %err, "Error getting user profile");
                state.data_state = ProfileDataState::Complete;
                Effect::none()
            }
        }
    }
}
