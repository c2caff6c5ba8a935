pub(crate) mod ast;
pub mod codegen;
pub(crate) mod context;
pub(crate) mod converter;
pub(crate) mod document;
pub mod errors;
pub(crate) mod naming;
pub mod orchestrator;
pub(crate) mod resolver;
pub(crate) mod schema;
pub mod stats;
