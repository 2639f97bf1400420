//! Service layer module
//!
//! Credential lookup, request building, transport, response decoding and the batch dispatcher

pub mod builder;
pub mod client;
pub mod credentials;
pub mod decoder;
pub mod dispatcher;

pub use builder::{build_payload, build_request, PreparedRequest};
pub use client::{ChatClient, RawResponse};
pub use credentials::{credential_variable, CredentialSource, EnvCredentials, StaticCredentials};
pub use decoder::decode_response;
pub use dispatcher::{BatchDispatcher, BatchReport, UnitFailure, UnitOutcome, UnitStage};
