// Library root
// -----------
// The binary (`main.rs`) is a thin shell over these modules.
//
// Module responsibilities:
// - `credentials`: stores, loads and remotely validates the API key.
// - `request`: turns an operation (image local/remote, NLP, account
//   queries) into a fully described HTTP request. No network I/O.
// - `api`: blocking transport that sends requests and classifies failures.
// - `output`: writes processed images/archives to disk or prints text.
// - `commands`: maps each CLI verb to build -> send -> materialize.
// - `cli`, `logging`, `error`: argument parsing, tracing setup, and the
//   error taxonomy shared by everything above.
pub mod api;
pub mod cli;
pub mod commands;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod output;
pub mod request;

pub use error::{Error, Result};
