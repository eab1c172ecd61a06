use std::fmt;

#[derive(Debug, Clone)]
pub enum GoUrlsError {
    Configuration(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    ReservedShortName(String),
    DuplicateShortName(String),
    NotFound(String),
    Forbidden(String),
    Serialization(String),
}

impl GoUrlsError {
    pub fn code(&self) -> &'static str {
        match self {
            GoUrlsError::Configuration(_) => "E001",
            GoUrlsError::DatabaseConnection(_) => "E002",
            GoUrlsError::DatabaseOperation(_) => "E003",
            GoUrlsError::Validation(_) => "E004",
            GoUrlsError::ReservedShortName(_) => "E005",
            GoUrlsError::DuplicateShortName(_) => "E006",
            GoUrlsError::NotFound(_) => "E007",
            GoUrlsError::Forbidden(_) => "E008",
            GoUrlsError::Serialization(_) => "E009",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            GoUrlsError::Configuration(_) => "Configuration Error",
            GoUrlsError::DatabaseConnection(_) => "Database Connection Error",
            GoUrlsError::DatabaseOperation(_) => "Database Operation Error",
            GoUrlsError::Validation(_) => "Validation Error",
            GoUrlsError::ReservedShortName(_) => "Reserved Short Name",
            GoUrlsError::DuplicateShortName(_) => "Duplicate Short Name",
            GoUrlsError::NotFound(_) => "Resource Not Found",
            GoUrlsError::Forbidden(_) => "Forbidden",
            GoUrlsError::Serialization(_) => "Serialization Error",
        }
    }

    /// Machine-readable kind tag used in API error payloads
    pub fn kind(&self) -> &'static str {
        match self {
            GoUrlsError::Validation(_) => "validation",
            GoUrlsError::ReservedShortName(_) => "reserved",
            GoUrlsError::DuplicateShortName(_) => "duplicate",
            GoUrlsError::NotFound(_) => "not_found",
            GoUrlsError::Forbidden(_) => "forbidden",
            _ => "internal",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            GoUrlsError::Configuration(msg) => msg,
            GoUrlsError::DatabaseConnection(msg) => msg,
            GoUrlsError::DatabaseOperation(msg) => msg,
            GoUrlsError::Validation(msg) => msg,
            GoUrlsError::ReservedShortName(msg) => msg,
            GoUrlsError::DuplicateShortName(msg) => msg,
            GoUrlsError::NotFound(msg) => msg,
            GoUrlsError::Forbidden(msg) => msg,
            GoUrlsError::Serialization(msg) => msg,
        }
    }

    /// Colored output for server startup failures
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GoUrlsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GoUrlsError {}

// Convenience constructors
impl GoUrlsError {
    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        GoUrlsError::Configuration(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        GoUrlsError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        GoUrlsError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        GoUrlsError::Validation(msg.into())
    }

    pub fn reserved_short_name<T: Into<String>>(msg: T) -> Self {
        GoUrlsError::ReservedShortName(msg.into())
    }

    pub fn duplicate_short_name<T: Into<String>>(msg: T) -> Self {
        GoUrlsError::DuplicateShortName(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        GoUrlsError::NotFound(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        GoUrlsError::Forbidden(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        GoUrlsError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for GoUrlsError {
    fn from(err: sea_orm::DbErr) -> Self {
        GoUrlsError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for GoUrlsError {
    fn from(err: std::io::Error) -> Self {
        GoUrlsError::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for GoUrlsError {
    fn from(err: serde_json::Error) -> Self {
        GoUrlsError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GoUrlsError>;
