use thiserror::Error;

pub type BfResult<T> = Result<T, BfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BfError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Keyword '{key}' is undefined in dictionary")]
    MissingKey { key: String },

    #[error("Keyword '{key}' has the wrong type, expected {expected}")]
    WrongType { key: String, expected: &'static str },

    #[error(
        "{name} is not a valid {category}. Options are: {}",
        .options.join(", ")
    )]
    UnknownSelection {
        category: &'static str,
        name: String,
        options: Vec<&'static str>,
    },

    #[error("Failed to parse configuration: {message}")]
    Parse { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_selection_lists_options() {
        let err = BfError::UnknownSelection {
            category: "interpolationScheme",
            name: "quintic".into(),
            options: vec!["linearClamp", "cubicClamp"],
        };
        let msg = err.to_string();
        assert!(msg.contains("quintic"));
        assert!(msg.contains("linearClamp, cubicClamp"));
    }
}
