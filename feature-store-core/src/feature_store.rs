//! Feature store serving module. Contains the request handler and the
//! validation, batching, assembly and error-translation steps behind it.

mod handler;
mod read_params;
mod response_builder;
mod translate;
mod validate;

pub use handler::FeatureStoreHandler;
