use std::path::PathBuf;

use super::*;

#[test]
fn error_display_config() {
    let err = LintError::Config("chunk_size must be positive".to_string());
    assert_eq!(
        err.to_string(),
        "Configuration error: chunk_size must be positive"
    );
}

#[test]
fn error_display_ignorelist_names_line() {
    let err = LintError::Ignorelist {
        line: 7,
        message: "expected RULE:glob[:line]".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid ignorelist entry on line 7: expected RULE:glob[:line]"
    );
}

#[test]
fn error_display_file_read() {
    let err = LintError::FileRead {
        path: PathBuf::from("lint.ignore"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    };
    assert!(err.to_string().contains("lint.ignore"));
}

#[test]
fn error_display_git() {
    let err = LintError::Git("Failed to open git index".to_string());
    assert_eq!(err.to_string(), "Git error: Failed to open git index");
}

#[test]
fn error_type_returns_correct_type() {
    assert_eq!(LintError::Config("x".to_string()).error_type(), "Config");
    assert_eq!(
        LintError::Ignorelist {
            line: 1,
            message: "x".to_string()
        }
        .error_type(),
        "Ignorelist"
    );
    assert_eq!(LintError::Git("x".to_string()).error_type(), "Git");
    assert_eq!(
        LintError::Io(std::io::Error::other("x")).error_type(),
        "IO"
    );
}

#[test]
fn io_error_converts_with_question_mark() {
    fn fails() -> Result<()> {
        Err(std::io::Error::other("boom"))?;
        Ok(())
    }
    assert!(matches!(fails(), Err(LintError::Io(_))));
}

#[test]
fn invalid_pattern_keeps_source() {
    let source = globset::Glob::new("[").unwrap_err();
    let err = LintError::InvalidPattern {
        pattern: "[".to_string(),
        source,
    };
    assert!(std::error::Error::source(&err).is_some());
}
