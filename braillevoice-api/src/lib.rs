pub mod auth;
pub mod convert;
pub mod parse;
pub mod preview;
pub mod request;
pub mod runtime;
