use {
    crate::artifact::Artifact,
    alloy::{
        network::TransactionBuilder,
        providers::{DynProvider, PendingTransactionError, Provider},
        rpc::types::TransactionRequest,
        transports::{RpcError, TransportErrorKind},
    },
    alloy_primitives::{Address, TxHash},
    std::time::Duration,
    thiserror::Error,
};

/// How long a submitted deployment may take to get mined before the run is
/// aborted.
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum Error {
    #[error("deployment transaction rejected on submission")]
    Submission(#[source] RpcError<TransportErrorKind>),
    #[error("deployment transaction not confirmed within {timeout:?}")]
    ConfirmationTimeout { timeout: Duration },
    #[error("error while waiting for deployment confirmation")]
    Confirmation(#[source] PendingTransactionError),
    #[error("deployment transaction {tx_hash} reverted without creating a contract")]
    Reverted { tx_hash: TxHash },
}

/// Assembles the contract creation transaction for an artifact. The
/// artifact's bytecode is used as is, meaning constructor arguments are not
/// supported.
pub fn deploy_request(artifact: &Artifact, from: Option<Address>) -> TransactionRequest {
    let request = TransactionRequest::default().with_deploy_code(artifact.bytecode.clone());
    match from {
        Some(from) => request.with_from(from),
        None => request,
    }
}

/// Deploys a single instance of the given artifact and returns the address
/// of the created contract.
///
/// Makes exactly one attempt. Every deployment creates a new instance, there
/// is no check whether the contract already exists on the target network.
pub async fn deploy(
    provider: &DynProvider,
    artifact: &Artifact,
    from: Option<Address>,
) -> Result<Address, Error> {
    let request = deploy_request(artifact, from);
    let pending = provider
        .send_transaction(request)
        .await
        .map_err(Error::Submission)?;
    let tx_hash = *pending.tx_hash();
    tracing::debug!(
        %tx_hash,
        contract = %artifact.contract_name,
        "submitted deployment transaction"
    );

    let receipt = tokio::time::timeout(CONFIRMATION_TIMEOUT, pending.get_receipt())
        .await
        .map_err(|_| Error::ConfirmationTimeout {
            timeout: CONFIRMATION_TIMEOUT,
        })?
        .map_err(Error::Confirmation)?;
    if !receipt.status() {
        return Err(Error::Reverted { tx_hash });
    }
    receipt.contract_address.ok_or(Error::Reverted { tx_hash })
}
