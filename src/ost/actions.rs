use super::client::OstClient;
use super::converters::{action_from_json, transaction_from_json};
use super::transactions::TRANSACTIONS;
use super::{encode_text, entity_path, list_params, validate_id};
use crate::core::errors::OstError;
use crate::core::kernel::{HttpMethod, Params};
use crate::core::types::{Action, ExecuteAction, ListParams, NewAction, Transaction};
use tracing::instrument;

const ACTIONS: &str = "/actions";
const ACTIONS_LIST: &str = "/actions/";

/// Action operations
pub struct Actions<'a> {
    client: &'a OstClient,
}

impl<'a> Actions<'a> {
    pub(crate) const fn new(client: &'a OstClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, action), fields(kind = %action.kind, currency = %action.currency))]
    pub async fn create(&self, action: &NewAction) -> Result<Action, OstError> {
        self.client
            .fetch(
                HttpMethod::Post,
                ACTIONS,
                new_action_params(action)?,
                "action",
                action_from_json,
            )
            .await
    }

    #[instrument(skip(self, id), fields(action_id = %id))]
    pub async fn get(&self, id: &str) -> Result<Action, OstError> {
        let endpoint = entity_path(ACTIONS, id)?;
        self.client
            .fetch(
                HttpMethod::Get,
                &endpoint,
                Params::new(),
                "action",
                action_from_json,
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, params: ListParams) -> Result<Vec<Action>, OstError> {
        self.client
            .fetch_list(
                ACTIONS_LIST,
                list_params(&params, true),
                "actions",
                action_from_json,
            )
            .await
    }

    /// Execute an action between two users, creating a transaction
    #[instrument(skip(self, request), fields(action_id = %request.action_id))]
    pub async fn execute(&self, request: &ExecuteAction) -> Result<Transaction, OstError> {
        self.client
            .fetch(
                HttpMethod::Post,
                TRANSACTIONS,
                execute_params(request)?,
                "transaction",
                transaction_from_json,
            )
            .await
    }
}

fn execute_params(request: &ExecuteAction) -> Result<Params, OstError> {
    validate_id("from_user_id", &request.from_user_id)?;
    validate_id("to_user_id", &request.to_user_id)?;
    validate_id("action_id", &request.action_id)?;

    let mut params = Params::new();
    params.insert("from_user_id".to_string(), request.from_user_id.clone());
    params.insert("to_user_id".to_string(), request.to_user_id.clone());
    params.insert("action_id".to_string(), request.action_id.clone());
    if let Some(amount) = request.amount {
        params.insert("amount".to_string(), amount.to_string());
    }
    if let Some(commission_percent) = request.commission_percent {
        params.insert(
            "commission_percent".to_string(),
            commission_percent.to_string(),
        );
    }
    Ok(params)
}

fn new_action_params(action: &NewAction) -> Result<Params, OstError> {
    validate_id("kind", &action.kind)?;
    validate_id("currency", &action.currency)?;

    let mut params = Params::new();
    params.insert("name".to_string(), encode_text(&action.name));
    params.insert("kind".to_string(), action.kind.clone());
    params.insert("currency".to_string(), action.currency.clone());
    params.insert(
        "arbitrary_amount".to_string(),
        action.amount.is_none().to_string(),
    );
    if let Some(amount) = action.amount {
        params.insert("amount".to_string(), amount.to_string());
    }

    // Commission only exists between users
    if action.is_user_to_user() {
        params.insert(
            "arbitrary_commission".to_string(),
            action.commission_percent.is_none().to_string(),
        );
        if let Some(commission_percent) = action.commission_percent {
            params.insert(
                "commission_percent".to_string(),
                commission_percent.to_string(),
            );
        }
    }
    Ok(params)
}
