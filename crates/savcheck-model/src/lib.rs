pub mod diagnostics;
pub mod error;
pub mod lookup;
pub mod meta;
pub mod options;

pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics};
pub use error::{CheckError, Result};
pub use lookup::CaseInsensitiveSet;
pub use meta::SurveyMeta;
pub use options::{CheckOptions, PipelineConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_counts_by_severity() {
        let mut diags = Diagnostics::new();
        diags.info("labels", "labels applied", Some("SUPERVISOR"));
        diags.warning("missing-column", "column NOME not in table", Some("NOME"));
        diags.error("conversion", "non-numeric value in ID", Some("ID"));
        assert_eq!(diags.len(), 3);
        assert_eq!(diags.warning_count(), 1);
        assert_eq!(diags.error_count(), 1);
        assert!(diags.has_errors());
    }

    #[test]
    fn diagnostic_serializes() {
        let diag = Diagnostic {
            severity: DiagnosticSeverity::Warning,
            code: "missing-column".to_string(),
            message: "column NOME not in table".to_string(),
            column: Some("NOME".to_string()),
        };
        let json = serde_json::to_string(&diag).expect("serialize diagnostic");
        let round: Diagnostic = serde_json::from_str(&json).expect("deserialize diagnostic");
        assert_eq!(round.code, "missing-column");
        assert_eq!(round.severity, DiagnosticSeverity::Warning);
    }
}
