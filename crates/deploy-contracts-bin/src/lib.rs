pub mod arguments;

use {
    crate::arguments::Arguments,
    alloy::providers::Provider,
    anyhow::{Context, Result},
};

/// Name of the contract this runner deploys. The build artifact for it has
/// to be present in the configured artifacts directory.
// TODO: make the contract name and constructor arguments configurable once
// more than the governor gets deployed this way.
pub const CONTRACT_NAME: &str = "PeerGovernor";

/// Performs a one-shot deployment of [`CONTRACT_NAME`] and prints the
/// resulting address to stdout. Everything else (progress, errors) goes to
/// stderr through the log pipeline.
pub async fn run(args: Arguments) -> Result<()> {
    let store = contracts::Store::new(&args.artifacts_path);
    let artifact = store.resolve(CONTRACT_NAME)?;

    let (provider, from) = match args.private_key {
        Some(signer) => {
            tracing::debug!(sender = %signer.address(), "signing deployment in-process");
            let provider = ethrpc::alloy::provider_with_signer(&args.node_url, Box::new(signer));
            (provider, None)
        }
        None => {
            let provider = ethrpc::alloy::provider(&args.node_url);
            let accounts = provider
                .get_accounts()
                .await
                .context("failed to fetch node accounts")?;
            let sender = accounts
                .first()
                .copied()
                .context("node manages no accounts, provide a private key instead")?;
            tracing::debug!(%sender, "using node managed account");
            (provider, Some(sender))
        }
    };

    let chain_id = provider
        .get_chain_id()
        .await
        .context("could not fetch current chain id")?;
    tracing::info!(chain_id, url = %args.node_url, "connected to network");

    let address = contracts::deploy::deploy(&provider, &artifact, from).await?;
    println!("{CONTRACT_NAME} deployed to: {address}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser};

    #[tokio::test]
    async fn missing_artifact_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let args = Arguments::try_parse_from([
            "deploy-contracts",
            "--artifacts-path",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();

        let err = run(args).await.unwrap_err();
        assert!(err.to_string().contains(CONTRACT_NAME));
    }
}
