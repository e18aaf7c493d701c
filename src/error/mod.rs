use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Catalog construction and loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Empty {kind} name in catalog")]
    EmptyName { kind: String },

    #[error("Duplicate category: {name}")]
    DuplicateCategory { name: String },

    #[error("Duplicate automation '{name}' (categories '{first}' and '{second}')")]
    DuplicateRecord {
        name: String,
        first: String,
        second: String,
    },

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Session state errors.
///
/// These are local validation failures; the session itself is never left
/// in a partial state.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Unknown automation: {name}")]
    UnknownRecord { name: String },

    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },
}

/// Progress report export/import errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unknown export column: {column}")]
    UnknownColumn { column: String },

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Malformed CSV at line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("Invalid value '{value}' in column {column} (row {row})")]
    InvalidValue {
        column: String,
        value: String,
        row: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// MCP protocol errors
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Unknown tool: {tool_name}")]
    UnknownTool { tool_name: String },

    #[error("Invalid parameters for {tool_name}: {message}")]
    InvalidParameters { tool_name: String, message: String },

    #[error("Tool execution failed: {message}")]
    ExecutionFailed { message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<AppError> for McpError {
    fn from(err: AppError) -> Self {
        McpError::ExecutionFailed {
            message: err.to_string(),
        }
    }
}

impl From<SessionError> for McpError {
    fn from(err: SessionError) -> Self {
        McpError::ExecutionFailed {
            message: err.to_string(),
        }
    }
}

impl From<ExportError> for McpError {
    fn from(err: ExportError) -> Self {
        McpError::ExecutionFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type alias for export/import operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type alias for MCP operations
pub type McpResult<T> = Result<T, McpError>;
