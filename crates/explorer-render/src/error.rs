use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write markup: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write markup: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("rendered markup is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
