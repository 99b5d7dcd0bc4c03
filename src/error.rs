use thiserror::Error;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Failed to read sheet '{sheet}': {message}")]
    SheetRead { sheet: String, message: String },
}
