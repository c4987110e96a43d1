use super::client::OstClient;
use super::converters::user_from_json;
use super::{encode_text, entity_path, list_params};
use crate::core::errors::OstError;
use crate::core::kernel::{HttpMethod, Params};
use crate::core::types::{ListParams, User};
use tracing::instrument;

const USERS: &str = "/users";
const USERS_LIST: &str = "/users/";

/// User operations
pub struct Users<'a> {
    client: &'a OstClient,
}

impl<'a> Users<'a> {
    pub(crate) const fn new(client: &'a OstClient) -> Self {
        Self { client }
    }

    /// Create a user, optionally named
    #[instrument(skip(self, name), fields(named = name.is_some()))]
    pub async fn create(&self, name: Option<&str>) -> Result<User, OstError> {
        let mut params = Params::new();
        if let Some(name) = name {
            params.insert("name".to_string(), encode_text(name));
        }

        self.client
            .fetch(HttpMethod::Post, USERS, params, "user", user_from_json)
            .await
    }

    /// Rename an existing user
    #[instrument(skip(self, id, name), fields(user_id = %id))]
    pub async fn update(&self, id: &str, name: &str) -> Result<User, OstError> {
        let endpoint = entity_path(USERS, id)?;
        let mut params = Params::new();
        params.insert("name".to_string(), encode_text(name));

        self.client
            .fetch(HttpMethod::Post, &endpoint, params, "user", user_from_json)
            .await
    }

    #[instrument(skip(self, id), fields(user_id = %id))]
    pub async fn get(&self, id: &str) -> Result<User, OstError> {
        let endpoint = entity_path(USERS, id)?;
        self.client
            .fetch(HttpMethod::Get, &endpoint, Params::new(), "user", user_from_json)
            .await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, params: ListParams) -> Result<Vec<User>, OstError> {
        self.client
            .fetch_list(USERS_LIST, list_params(&params, true), "users", user_from_json)
            .await
    }
}
