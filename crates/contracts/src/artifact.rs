use {
    alloy_json_abi::JsonAbi,
    alloy_primitives::Bytes,
    serde::Deserialize,
    std::{
        fs,
        path::{Path, PathBuf},
    },
    thiserror::Error,
};

/// A compiled contract as emitted by the Solidity build step.
///
/// The build step writes one JSON file per contract containing at least the
/// contract name, the ABI and the creation bytecode. Additional fields
/// (deployed bytecode, link references, format markers) are ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub source_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("no compiled artifact for contract {0:?}")]
    NotFound(String),
    #[error("failed to read artifact {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed artifact {path:?}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Handle to a directory of compiled contract artifacts.
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the compiled artifact for the contract with the given name.
    ///
    /// The build step nests artifacts as `<root>/<Source>.sol/<Name>.json` so
    /// the whole directory is searched for files named `<name>.json`. A file
    /// whose `contractName` field does not match is skipped.
    pub fn resolve(&self, name: &str) -> Result<Artifact, Error> {
        let file_name = format!("{name}.json");
        resolve_in(&self.root, &file_name, name)?.ok_or_else(|| Error::NotFound(name.to_string()))
    }
}

fn resolve_in(dir: &Path, file_name: &str, name: &str) -> Result<Option<Artifact>, Error> {
    // An unreadable (usually nonexistent) directory holds no artifacts.
    let Ok(entries) = fs::read_dir(dir) else {
        return Ok(None);
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Some(artifact) = resolve_in(&path, file_name, name)? {
                return Ok(Some(artifact));
            }
        } else if path.file_name().is_some_and(|file| file == file_name) {
            if let Some(artifact) = parse_if_named(&path, name)? {
                return Ok(Some(artifact));
            }
        }
    }
    Ok(None)
}

fn parse_if_named(path: &Path, name: &str) -> Result<Option<Artifact>, Error> {
    let contents = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: Artifact = serde_json::from_slice(&contents).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((artifact.contract_name == name).then_some(artifact))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEER_GOVERNOR: &str = r#"{
        "_format": "hh-sol-artifact-1",
        "contractName": "PeerGovernor",
        "sourceName": "contracts/PeerGovernor.sol",
        "abi": [
            { "inputs": [], "stateMutability": "nonpayable", "type": "constructor" },
            {
                "inputs": [],
                "name": "proposalCount",
                "outputs": [{ "internalType": "uint256", "name": "", "type": "uint256" }],
                "stateMutability": "view",
                "type": "function"
            }
        ],
        "bytecode": "0x6080604052348015600f57600080fd5b50603f80601d6000396000f3fe",
        "deployedBytecode": "0x6080604052600080fd",
        "linkReferences": {},
        "deployedLinkReferences": {}
    }"#;

    #[test]
    fn parses_artifact() {
        let artifact: Artifact = serde_json::from_str(PEER_GOVERNOR).unwrap();
        assert_eq!(artifact.contract_name, "PeerGovernor");
        assert_eq!(artifact.source_name, "contracts/PeerGovernor.sol");
        assert_eq!(artifact.bytecode.first(), Some(&0x60));
        assert!(artifact.abi.constructor.is_some());
    }

    #[test]
    fn resolves_nested_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("contracts").join("PeerGovernor.sol");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("PeerGovernor.json"), PEER_GOVERNOR).unwrap();

        let store = Store::new(dir.path());
        let artifact = store.resolve("PeerGovernor").unwrap();
        assert_eq!(artifact.contract_name, "PeerGovernor");
    }

    #[test]
    fn resolves_flat_artifact() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("PeerGovernor.json"), PEER_GOVERNOR).unwrap();

        let store = Store::new(dir.path());
        assert!(store.resolve("PeerGovernor").is_ok());
    }

    #[test]
    fn missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        assert!(matches!(
            store.resolve("PeerGovernor"),
            Err(Error::NotFound(name)) if name == "PeerGovernor"
        ));
    }

    #[test]
    fn missing_directory_is_not_found() {
        let store = Store::new("/nonexistent/artifacts");
        assert!(matches!(
            store.resolve("PeerGovernor"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn mismatched_contract_name_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let renamed = PEER_GOVERNOR.replace("\"PeerGovernor\"", "\"SomethingElse\"");
        fs::write(dir.path().join("PeerGovernor.json"), renamed).unwrap();

        let store = Store::new(dir.path());
        assert!(matches!(
            store.resolve("PeerGovernor"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn malformed_artifact() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("PeerGovernor.json"), "not json").unwrap();

        let store = Store::new(dir.path());
        assert!(matches!(
            store.resolve("PeerGovernor"),
            Err(Error::Json { .. })
        ));
    }
}
