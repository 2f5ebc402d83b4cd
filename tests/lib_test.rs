//! Library integration tests.

use evicheck::EvicheckError;

#[test]
fn error_types_are_public() {
    let err = EvicheckError::SettingsValidation {
        message: "test".into(),
    };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> evicheck::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use evicheck::cli::Cli;

    let cli = Cli::parse_from(["evicheck", "--headless"]);
    assert!(cli.headless);
}

#[test]
fn evidence_phrases_are_exported() {
    use evicheck::session::EVIDENCE_PHRASES;
    assert_eq!(EVIDENCE_PHRASES.len(), 2);
}
