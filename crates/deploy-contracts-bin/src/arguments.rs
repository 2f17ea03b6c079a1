use {alloy::signers::local::PrivateKeySigner, clap::Parser, std::path::PathBuf, url::Url};

#[derive(Parser)]
pub struct Arguments {
    #[clap(
        long,
        env,
        default_value = "warn,deploy_contracts=debug,contracts=debug"
    )]
    pub log_filter: String,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Directory the build step wrote the compiled contract artifacts to.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts_path: PathBuf,

    /// Private key to sign the deployment transaction with. Without it the
    /// transaction is signed by the node using its first managed account.
    #[clap(long, env)]
    pub private_key: Option<PrivateKeySigner>,
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "log_filter: {}", self.log_filter)?;
        writeln!(f, "node_url: {}", self.node_url)?;
        writeln!(f, "artifacts_path: {}", self.artifacts_path.display())?;
        writeln!(
            f,
            "private_key: {}",
            match self.private_key {
                Some(_) => "SECRET",
                None => "None",
            }
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Arguments::try_parse_from(["deploy-contracts"]).unwrap();
        assert_eq!(args.node_url.as_str(), "http://localhost:8545/");
        assert_eq!(args.artifacts_path, PathBuf::from("artifacts"));
        assert!(args.private_key.is_none());
    }

    #[test]
    fn display_does_not_leak_private_key() {
        let args = Arguments::try_parse_from([
            "deploy-contracts",
            "--private-key",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        ])
        .unwrap();
        let formatted = args.to_string();
        assert!(!formatted.contains("ac0974"));
        assert!(formatted.contains("private_key: SECRET"));
    }
}
