//! # Transaction Module
//!
//! Everything between validated operations and a hash returned by the node.
//!
//! ## Architecture
//!
//! ```text
//! types.rs      : TransactionDraft, EncodedTransaction, SignaturePair
//! builder.rs    : TransactionBuilder and TransactionDraft::from_args
//! wire.rs       : prost messages mirroring the node's protobuf schema
//! codec.rs      : canonical encode/decode between drafts and wire bytes
//! signing.rs    : one Ed25519 signature per key over the encoded bytes
//! submission.rs : submitTransaction payload and node code mapping
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** a [`TransactionDraft`] with [`TransactionBuilder`] or
//!    [`TransactionDraft::from_args`]. All validation happens here.
//! 2. **Encode** it with [`encode`]. The resulting [`EncodedTransaction`] is
//!    the exact byte sequence that gets signed.
//! 3. **Sign** those bytes with [`sign_blob`], once per key.
//! 4. **Submit** blob and signatures with [`submit`].
//!
//! A draft is single-use: it is never mutated after validation, and once
//! encoded only the blob matters. Re-encoding after signing is never
//! needed and never done.

pub mod builder;
pub mod codec;
pub mod signing;
pub mod submission;
pub mod types;
pub mod wire;

pub use builder::TransactionBuilder;
pub use codec::{decode, encode};
pub use signing::sign_blob;
pub use submission::{submission_payload, submit, Submitted};
pub use types::{EncodedTransaction, SignaturePair, TransactionDraft};
