use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::VersionedTransaction,
};

use crate::error::{Result, UltraError};

pub const DEFAULT_PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

const SECRET_KEY_LEN: usize = 64;

/// Signing key resolved once from the environment.
///
/// Holds the keypair for the lifetime of the owning client. `Debug` only
/// shows the public key.
pub struct WalletCredential {
    keypair: Keypair,
}

impl std::fmt::Debug for WalletCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletCredential")
            .field("pubkey", &self.keypair.pubkey())
            .finish_non_exhaustive()
    }
}

impl WalletCredential {
    /// Reads and decodes `env_var`. The value may be a Base58 secret key or a
    /// `[1, 2, ...]` byte array, both 64 bytes once decoded.
    pub fn from_env(env_var: &str) -> Result<Self> {
        let raw = std::env::var(env_var).map_err(|_| UltraError::MissingPrivateKey {
            env_var: env_var.to_string(),
        })?;
        Self::parse(&raw, env_var)
    }

    /// Decodes a secret key string. `source` names where it came from in
    /// error messages.
    pub fn parse(raw: &str, source: &str) -> Result<Self> {
        let invalid = |reason: String| UltraError::InvalidPrivateKey {
            env_var: source.to_string(),
            reason,
        };

        let raw = raw.trim();
        if raw.is_empty() {
            return Err(UltraError::MissingPrivateKey {
                env_var: source.to_string(),
            });
        }

        let bytes = if raw.starts_with('[') {
            serde_json::from_str::<Vec<u8>>(raw)
                .map_err(|e| invalid(format!("invalid byte array: {e}")))?
        } else {
            bs58::decode(raw)
                .into_vec()
                .map_err(|e| invalid(format!("invalid base58: {e}")))?
        };

        if bytes.len() != SECRET_KEY_LEN {
            return Err(invalid(format!(
                "expected {SECRET_KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let keypair =
            Keypair::try_from(bytes.as_slice()).map_err(|e| invalid(e.to_string()))?;

        Ok(Self { keypair })
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn public_key(&self) -> String {
        self.keypair.pubkey().to_string()
    }

    /// Signs a base64 bincode `VersionedTransaction` in the wallet's signer
    /// slot and returns it re-encoded as base64. Other slots are left as-is.
    pub fn sign_base64_transaction(&self, transaction_base64: &str) -> Result<String> {
        if transaction_base64.is_empty() {
            return Err(UltraError::Signing("empty transaction".to_string()));
        }

        let tx_bytes = BASE64
            .decode(transaction_base64)
            .map_err(|e| UltraError::Signing(format!("invalid base64 transaction: {e}")))?;

        let transaction: VersionedTransaction = bincode::deserialize(&tx_bytes)
            .map_err(|e| UltraError::Signing(format!("invalid transaction bytes: {e}")))?;

        let signed = self.sign_transaction(transaction)?;

        let signed_bytes =
            bincode::serialize(&signed).map_err(|e| UltraError::Signing(e.to_string()))?;
        Ok(BASE64.encode(signed_bytes))
    }

    pub fn sign_transaction(
        &self,
        mut transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction> {
        let pubkey = self.keypair.pubkey();
        let num_signers = usize::from(transaction.message.header().num_required_signatures);

        let index = transaction
            .message
            .static_account_keys()
            .iter()
            .take(num_signers)
            .position(|key| *key == pubkey)
            .ok_or_else(|| {
                UltraError::Signing(format!("wallet {pubkey} is not a required signer"))
            })?;

        if transaction.signatures.len() < num_signers {
            transaction
                .signatures
                .resize(num_signers, Signature::default());
        }

        let message_bytes = transaction.message.serialize();
        transaction.signatures[index] = self.keypair.sign_message(&message_bytes);
        Ok(transaction)
    }
}
