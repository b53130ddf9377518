//! Material errors.

use thiserror::Error;

pub type MaterialResult<T> = Result<T, MaterialError>;

#[derive(Error, Debug)]
pub enum MaterialError {
    #[error("Unknown material: {name}")]
    UnknownMaterial { name: String },

    #[error("Invalid property for {material}: {what}")]
    InvalidProperty {
        material: String,
        what: &'static str,
    },

    #[error("Duplicate material: {name}")]
    Duplicate { name: String },

    #[error("Invalid property table: {what}")]
    Table { what: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MaterialError::UnknownMaterial {
            name: "UNOBTAINIUM".into(),
        };
        assert!(err.to_string().contains("UNOBTAINIUM"));
    }
}
