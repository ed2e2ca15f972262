//! User and preferences management operations.
//!
//! Wraps the `/UserManagement/*` endpoints. Preferences live in their own
//! records keyed by a preferences id; several operations exist only to map
//! between users and that id.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{CreateUserRequest, PreferencesPatch, UpdatePreferencesRequest, User, UserPreferences};

/// Facade over the UserManagement service. Stateless view of the client.
#[derive(Debug, Clone, Copy)]
pub struct UserManagement<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn user_management(&self) -> UserManagement<'_> {
        UserManagement { client: self }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreated {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesIdEnvelope {
    pub preferences_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserIdBody<'a> {
    user_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PreferencesIdBody<'a> {
    preferences_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateByIdBody<'a> {
    preferences_id: &'a str,
    preferences: &'a PreferencesPatch,
}

impl UserManagement<'_> {
    pub async fn create_user(&self, input: &CreateUserRequest) -> Result<UserCreated, ApiError> {
        self.client.execute("/UserManagement/createUser", input).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<UserEnvelope, ApiError> {
        self.client
            .execute("/UserManagement/getUser", &UserIdBody { user_id })
            .await
    }

    pub async fn get_user_preferences_id(
        &self,
        user_id: &str,
    ) -> Result<PreferencesIdEnvelope, ApiError> {
        self.client
            .execute("/UserManagement/getUserPreferencesId", &UserIdBody { user_id })
            .await
    }

    pub async fn create_default_preferences(
        &self,
        user_id: &str,
    ) -> Result<PreferencesIdEnvelope, ApiError> {
        self.client
            .execute("/UserManagement/createDefaultPreferences", &UserIdBody { user_id })
            .await
    }

    pub async fn update_preferences(&self, input: &UpdatePreferencesRequest) -> Result<(), ApiError> {
        self.client.execute_unit("/UserManagement/updatePreferences", input).await
    }

    pub async fn update_preferences_by_id(
        &self,
        preferences_id: &str,
        preferences: &PreferencesPatch,
    ) -> Result<(), ApiError> {
        self.client
            .execute_unit(
                "/UserManagement/updatePreferencesById",
                &UpdateByIdBody {
                    preferences_id,
                    preferences,
                },
            )
            .await
    }

    /// Returns the preferences record bare, not enveloped.
    pub async fn get_preferences(&self, preferences_id: &str) -> Result<UserPreferences, ApiError> {
        self.client
            .execute("/UserManagement/getPreferences", &PreferencesIdBody { preferences_id })
            .await
    }

    pub async fn get_preferences_by_user(
        &self,
        user_id: &str,
    ) -> Result<PreferencesIdEnvelope, ApiError> {
        self.client
            .execute("/UserManagement/getPreferencesByUser", &UserIdBody { user_id })
            .await
    }

    /// Administrative bulk query; returns the users bare, not enveloped.
    pub async fn all_users(&self) -> Result<Vec<User>, ApiError> {
        self.client.execute("/UserManagement/_getAllUsers", &json!({})).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_by_id_body_nests_the_patch() {
        let patch = PreferencesPatch {
            notifications: Some(false),
            ..PreferencesPatch::default()
        };
        let body = UpdateByIdBody {
            preferences_id: "p1",
            preferences: &patch,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["preferencesId"], "p1");
        assert_eq!(json["preferences"]["notifications"], false);
        assert!(json["preferences"].get("units").is_none());
    }

    #[test]
    fn user_id_body_uses_camel_case() {
        let json = serde_json::to_value(&UserIdBody { user_id: "u1" }).unwrap();
        assert_eq!(json["userId"], "u1");
    }
}
