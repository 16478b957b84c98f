//! Error type conversions

use super::RotatorError;

impl From<std::io::Error> for RotatorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            operation: "io_operation".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for RotatorError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::ConfigParse {
            line: err.location().map(|loc| loc.line()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RotatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io {
            operation: "serialize_status".to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_error_maps_to_parse_error() {
        let err: RotatorError = serde_yaml::from_str::<Vec<u32>>("- 1\n- not-a-number")
            .unwrap_err()
            .into();
        assert!(matches!(err, RotatorError::ConfigParse { .. }), "got {err:?}");
        assert_eq!(err.code(), "config_parse");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RotatorError = io.into();
        assert_eq!(err.code(), "io");
    }
}
