/*
[INPUT]:  Bearer token, card id and transfer details
[OUTPUT]: Pending or committed transactions
[POS]:    Endpoint layer - card transaction endpoints (two-step create/commit)
[UPDATE]: When transaction payloads or flow change
*/

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::api::Uphold;
use crate::http::Result;
use crate::types::{CreateTransactionRequest, DenominationRequest, Transaction, to_params};

const CURRENT_USER_PATH: &str = "/v0/me";

impl Uphold {
    /// Quote a transfer from a card without settling it
    ///
    /// POST /v0/me/cards/{card_id}/transactions
    ///
    /// The returned transaction stays pending until
    /// [`commit_transaction`](Self::commit_transaction) is called.
    pub async fn create_transaction(
        &self,
        token: &str,
        card_id: &str,
        currency: &str,
        destination: &str,
        amount: Decimal,
    ) -> Result<Transaction> {
        let client = self.client(Some(token), Some(CURRENT_USER_PATH))?;
        let params = to_params(&CreateTransactionRequest {
            denomination: DenominationRequest {
                amount,
                currency: currency.to_string(),
            },
            destination: destination.to_string(),
        })?;

        let uri = format!("cards/{card_id}/transactions");
        let response = client.post(&uri, Some(&params)).await.inspect_err(|err| {
            warn!(card_id, error = %err, "failed to create transaction");
        })?;
        debug!(card_id, status = response.status, "received create transaction response");

        response
            .expect_status("create_transaction", self.policy().create_transaction)?
            .into_model()
    }

    /// Commit a previously quoted transaction for settlement
    ///
    /// POST /v0/me/cards/{card_id}/transactions/{transaction_id}/commit
    pub async fn commit_transaction(
        &self,
        token: &str,
        card_id: &str,
        transaction_id: &str,
    ) -> Result<Transaction> {
        let client = self.client(Some(token), Some(CURRENT_USER_PATH))?;

        let uri = format!("cards/{card_id}/transactions/{transaction_id}/commit");
        let response = client.post(&uri, None).await.inspect_err(|err| {
            warn!(card_id, transaction_id, error = %err, "failed to commit transaction");
        })?;
        debug!(
            card_id,
            transaction_id,
            status = response.status,
            "received commit transaction response"
        );

        response
            .expect_status("commit_transaction", self.policy().commit_transaction)?
            .into_model()
    }
}
