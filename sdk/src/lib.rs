// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # BUMO SDK Client Library
//!
//! Builds, signs and submits transactions for the BUMO ledger without ever
//! letting a 64-bit amount anywhere near a float.
//!
//! ## Pipeline
//!
//! ```text
//! args ─▶ validation ─▶ operation builders ─▶ encoder ─▶ blob ─▶ signer ─▶ submission ─▶ normalizer ─▶ result
//! ```
//!
//! Every stage is a pure function except submission, which makes exactly
//! one network round-trip. Errors stop the pipeline at the first stage that
//! sees them; a failed call produces no bytes and no partial result.
//!
//! ## Modules
//!
//! - **validation**: Schema-as-data rules, one interpreter, one error per call.
//! - **operation**: One builder per operation kind. Closed enum, no string magic.
//! - **transaction**: Drafts, canonical protobuf encoding, signing, submission.
//! - **crypto**: Ed25519 keys in the ledger's prefix-and-checksum encodings.
//! - **normalize**: Turns every integer in a node response into an exact string.
//! - **transport**: The only door to the network. No retries behind your back.
//! - **account** / **ledger**: Queries the pipeline needs (nonce, fees, block).
//! - **client**: [`BumoSdk`], which wires it all together.
//! - **errors** / **response**: Stable codes and the `{errorCode, errorDesc, result}` envelope.
//! - **config**: Protocol constants and node options.
//! - **logging**: Optional `tracing` subscriber setup.
//!
//! ## Design Philosophy
//!
//! 1. Validate before encoding, encode before signing, never re-encode after.
//! 2. Amounts are decimal strings at the edges and `u64` inside.
//! 3. A signed transaction is never resent automatically.

pub mod account;
pub mod client;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod ledger;
pub mod logging;
pub mod normalize;
pub mod operation;
pub mod response;
pub mod transaction;
pub mod transport;
pub mod validation;

pub use client::BumoSdk;
pub use config::SdkOptions;
pub use errors::{SdkError, SdkResult};
pub use response::SdkResponse;
