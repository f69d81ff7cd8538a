// Mapping of engine errors onto gRPC status codes
use engine::EngineError;
use tonic::Status;

pub fn status_from(err: EngineError) -> Status {
    match err {
        EngineError::ValidationError(msg) => {
            tracing::warn!(reason = %msg, "Rejected invalid request");
            Status::invalid_argument(msg)
        }
        EngineError::NotFound(msg) => Status::not_found(msg),
        EngineError::Conflict(msg) => Status::already_exists(msg),
        EngineError::ConfigError(msg) => {
            tracing::error!(reason = %msg, "Configuration error while serving request");
            Status::failed_precondition(format!("Configuration error: {}", msg))
        }
        other => {
            tracing::error!(error = ?other, "Internal error while serving request");
            Status::internal(other.to_string())
        }
    }
}
