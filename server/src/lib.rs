// gRPC adapter over the bill splitting engine
pub mod error;
pub mod services;
