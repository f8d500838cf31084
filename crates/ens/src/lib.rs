//! # atlas-ens
//!
//! Ethereum Name Service lookups and record edits.
//!
//! The core of the crate is a three step pipeline:
//!
//! 1. [`classify`] decides whether an input is an address or a name,
//! 2. [`resolve`](resolve::resolve) fills in the other half of the `(name, address)` pair,
//! 3. [`dispatch`](dispatch::dispatch) runs exactly one record lookup on the resolved identity.
//!
//! Chain access goes through the [`EnsReader`] and [`EnsWriter`] traits. [`ProviderEns`]
//! implements both over an `alloy` provider.

#![warn(missing_docs, unused_crate_dependencies)]

#[macro_use]
extern crate tracing;

pub mod abi_record;
pub mod ccip;
pub mod classify;
pub mod coins;
pub mod contenthash;
pub mod contracts;
pub mod deployments;
pub mod dispatch;
pub mod hash;
pub mod normalize;
pub mod profile;
pub mod provider;
pub mod reader;
pub mod resolve;
pub mod subgraph;
pub mod writer;

mod error;
pub use error::{CodecError, EnsError};

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use classify::{InputKind, classify};
pub use deployments::Deployment;
pub use dispatch::{LookupError, RecordQuery, Rendered, ResolveRequest, dispatch};
pub use hash::{labelhash, namehash, reverse_node};
pub use normalize::{NormalizeError, normalize};
pub use provider::ProviderEns;
pub use reader::EnsReader;
pub use resolve::{ResolveError, ResolvedIdentity, resolve, try_resolve};
pub use writer::{EnsWriter, ResolverContract};
