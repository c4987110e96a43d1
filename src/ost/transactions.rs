use super::client::OstClient;
use super::converters::transaction_from_json;
use super::{entity_path, list_params};
use crate::core::errors::OstError;
use crate::core::kernel::{HttpMethod, Params};
use crate::core::types::{ListParams, Transaction};
use tracing::instrument;

pub(crate) const TRANSACTIONS: &str = "/transactions";
const TRANSACTIONS_LIST: &str = "/transactions/";

/// Transaction lookups; new transactions come from `Actions::execute`
pub struct Transactions<'a> {
    client: &'a OstClient,
}

impl<'a> Transactions<'a> {
    pub(crate) const fn new(client: &'a OstClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, id), fields(transaction_id = %id))]
    pub async fn get(&self, id: &str) -> Result<Transaction, OstError> {
        let endpoint = entity_path(TRANSACTIONS, id)?;
        self.client
            .fetch(
                HttpMethod::Get,
                &endpoint,
                Params::new(),
                "transaction",
                transaction_from_json,
            )
            .await
    }

    /// List transactions by creation time; `params.order_by` is not sent
    #[instrument(skip(self))]
    pub async fn list(&self, params: ListParams) -> Result<Vec<Transaction>, OstError> {
        self.client
            .fetch_list(
                TRANSACTIONS_LIST,
                list_params(&params, false),
                "transactions",
                transaction_from_json,
            )
            .await
    }
}
