mod asymmetric;
pub use asymmetric::{AsymmetricKeyPair, PrivateKey, PublicKey};
mod workspace_key;
pub use workspace_key::{WorkspaceKey, WrappedWorkspaceKey, DEFAULT_WORKSPACE_KEY_SIZE};
