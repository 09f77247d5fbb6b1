//! Signing encoded transactions.
//!
//! Signatures are computed over the exact bytes of an
//! [`EncodedTransaction`]. Nothing is re-encoded between encoding and
//! signing, so the node verifies the same bytes every key attested to.

use super::types::{EncodedTransaction, SignaturePair};
use crate::crypto::KeyCapability;
use crate::errors::{SdkResult, ValidationError, ValidationKey};

/// Signs `blob` once per private key, in the order the keys are given.
///
/// Multi-signature accounts need signatures whose combined weight meets the
/// account threshold; the node may check them in order, so the output order
/// always matches the input order.
///
/// Fails with `PRIVATEKEY_NULL_ERROR` when no keys are given and with
/// `INVALID_PRIVATEKEY_ERROR` (naming the offending index) when any key is
/// malformed. No signature is produced unless every key is usable.
pub fn sign_blob<S: AsRef<str>>(
    blob: &EncodedTransaction,
    private_keys: &[S],
    keys: &dyn KeyCapability,
) -> SdkResult<Vec<SignaturePair>> {
    if private_keys.is_empty() {
        return Err(ValidationError::new(ValidationKey::PrivateKeyNull, "privateKeys").into());
    }

    if let Some(index) = private_keys
        .iter()
        .position(|k| !keys.is_valid_private_key(k.as_ref()))
    {
        return Err(ValidationError::new(
            ValidationKey::InvalidPrivateKey,
            format!("privateKeys[{}]", index),
        )
        .into());
    }

    let signatures = private_keys
        .iter()
        .map(|k| -> SdkResult<SignaturePair> {
            let private_key = k.as_ref();
            Ok(SignaturePair {
                sign_data: keys.sign(blob.as_bytes(), private_key)?,
                public_key: keys.public_key_for(private_key)?,
            })
        })
        .collect::<SdkResult<Vec<_>>>()?;

    tracing::debug!(
        signatures = signatures.len(),
        hash = %blob.hash(),
        "transaction signed"
    );
    Ok(signatures)
}
