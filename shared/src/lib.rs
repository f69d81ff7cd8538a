// Domain models and helpers shared by the engine and the gRPC server.
pub mod models;
pub mod utils;
