use std::path::Path;

use tracing::debug;
use vaultcli_crypto::{
    AsymmetricKeyPair, AsymmetricWrap, Cypher, KeyWrapper, WorkspaceCypher, WrapScheme,
};

use crate::platform::{Config, ConfigError, ConfigFile};

mod crypto;
pub(crate) use crypto::{read_input, DecryptArgs, EncryptArgs, WorkspaceKeyCommand};

/// The user's key material, loaded once per invocation.
pub(crate) struct UserKeys {
    pub(crate) config: Config,
    wrapper: KeyWrapper,
}

impl UserKeys {
    pub(crate) fn load(config_path: Option<&Path>) -> color_eyre::eyre::Result<Self> {
        let file = ConfigFile::open(config_path)?;
        let config = file.config()?;

        let key_path = file.resolve(&config.key);
        let key = read_key_file(&key_path)?;

        let wrapper = match (&config.public_key, config.wrap_scheme) {
            (Some(public_key), WrapScheme::Asymmetric) => {
                let public_key = read_key_file(&file.resolve(public_key))?;
                KeyWrapper::Asymmetric(AsymmetricWrap::new(AsymmetricKeyPair::from_pems(
                    &key,
                    &public_key,
                )?))
            }
            (_, scheme) => KeyWrapper::from_scheme(scheme, &key)?,
        };
        debug!(
            scheme = ?wrapper.scheme(),
            server = %config.server,
            insecure = config.insecure,
            "Loaded user key"
        );

        Ok(Self { config, wrapper })
    }

    pub(crate) fn cypher(self) -> Cypher<KeyWrapper> {
        Cypher::new(self.wrapper)
    }

    /// The RSA cypher, only available with the asymmetric scheme.
    pub(crate) fn workspace_cypher(&self) -> color_eyre::eyre::Result<&WorkspaceCypher> {
        match &self.wrapper {
            KeyWrapper::Asymmetric(wrap) => Ok(wrap.cypher()),
            KeyWrapper::Symmetric(_) => Err(color_eyre::eyre::eyre!(
                "Signing requires an RSA private key, set wrap_scheme to 'asymmetric'"
            )),
        }
    }
}

fn read_key_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::KeyFile {
        path: path.to_path_buf(),
        source,
    })
}
