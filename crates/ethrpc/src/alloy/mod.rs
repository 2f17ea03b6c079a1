use {
    crate::AlloyProvider,
    alloy::{
        network::{EthereumWallet, TxSigner},
        primitives::Signature,
        providers::{Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
    },
    url::Url,
};

#[cfg(any(test, feature = "test-util"))]
use alloy::providers::mock;

/// Creates a provider for the node at the given URL. Transactions sent
/// through it are signed by the node.
pub fn provider(url: &Url) -> AlloyProvider {
    let rpc = ClientBuilder::default().http(url.clone());
    ProviderBuilder::new().connect_client(rpc).erased()
}

/// Like [`provider`] but signs transactions in-process with the given signer
/// instead of handing them to the node.
pub fn provider_with_signer(
    url: &Url,
    signer: Box<dyn TxSigner<Signature> + Send + Sync + 'static>,
) -> AlloyProvider {
    let rpc = ClientBuilder::default().http(url.clone());
    let wallet = EthereumWallet::new(signer);
    ProviderBuilder::new()
        .wallet(wallet)
        .connect_client(rpc)
        .erased()
}

#[cfg(any(test, feature = "test-util"))]
pub fn dummy_provider() -> AlloyProvider {
    let asserter = mock::Asserter::new();
    ProviderBuilder::new()
        .connect_mocked_client(asserter)
        .erased()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_providers() {
        let url: Url = "http://localhost:8545".parse().unwrap();
        let _ = provider(&url);
        let _ = dummy_provider();
    }
}
