//! End-to-end pipeline tests over real .sav files.

use std::collections::BTreeMap;
use std::path::Path;

use savcheck_core::{ScriptedResolver, display_value, run_check};
use savcheck_model::{CheckError, CheckOptions, PipelineConfig};
use savcheck_sav::{SavColumn, SavDataset, SavValue, write_sav};

/// A small field-survey export: duplicated interview IDs, one cancelled
/// record, and a labelled supervisor variable.
fn write_survey(path: &Path) {
    let mut dataset = SavDataset::with_columns(vec![
        SavColumn::numeric("sbjnum").with_label("Subject number"),
        SavColumn::numeric("id").with_label("Interview ID"),
        SavColumn::text("nome", 24),
        SavColumn::text("status", 16),
        SavColumn::numeric("superv"),
    ]);
    let mut supervisors = BTreeMap::new();
    supervisors.insert(1, "Ana".to_string());
    supervisors.insert(2, "Bruno".to_string());
    dataset.set_value_labels("superv", supervisors);

    let rows = [
        (101.0, 9.0, "maria", "Completa", 1.0),
        (102.0, 5.0, "joao", "Completa", 2.0),
        (103.0, 7.0, "carla", "Completa", 1.0),
        (104.0, 9.0, "pedro", "Completa", 2.0),
        (105.0, 5.0, "ana", "Cancelada", 1.0),
        (106.0, 5.0, "rita", "Completa", 1.0),
    ];
    for (sbjnum, id, nome, status, superv) in rows {
        dataset.add_row(vec![
            SavValue::number(sbjnum),
            SavValue::number(id),
            SavValue::text(nome),
            SavValue::text(status),
            SavValue::number(superv),
        ]);
    }
    write_sav(path, &dataset).unwrap();
}

fn config() -> PipelineConfig {
    PipelineConfig::new()
        .with_upper_columns(["NOME"])
        .with_int_columns(["SBJNUM", "ID"])
        .with_label_columns(["SUPERV"])
        .with_required_subset(["SBJNUM", "ID", "NOME", "STATUS", "SUPERV"])
        .with_check(CheckOptions::default())
}

#[test]
fn finds_duplicates_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wave.sav");
    write_survey(&path);

    let mut resolver = ScriptedResolver::proceed();
    let outcome = run_check(&path, &config(), &mut resolver).unwrap();

    // IDs after dropping the cancelled row: {9,5,7,9,5}. Duplicates: 5,5,9,9.
    assert!(outcome.has_duplicates());
    assert_eq!(outcome.report.height(), 4);

    let ids: Vec<String> = {
        let column = outcome.report.column("ID").unwrap();
        (0..outcome.report.height())
            .map(|idx| display_value(column.get(idx).unwrap()))
            .collect()
    };
    assert_eq!(ids, vec!["5", "5", "9", "9"]);

    // The cancelled subject 105 must not appear.
    let subjects: Vec<String> = {
        let column = outcome.report.column("SBJNUM").unwrap();
        (0..outcome.report.height())
            .map(|idx| display_value(column.get(idx).unwrap()))
            .collect()
    };
    assert!(!subjects.contains(&"105".to_string()));

    // Supervisor codes were resolved to labels before the report was cut.
    let supervisors: Vec<String> = {
        let column = outcome.report.column("SUPERV").unwrap();
        (0..outcome.report.height())
            .map(|idx| display_value(column.get(idx).unwrap()))
            .collect()
    };
    assert!(supervisors.contains(&"Ana".to_string()));

    assert!(outcome.diagnostics.with_code("labels-applied").next().is_some());
    assert!(!outcome.diagnostics.has_errors());
}

#[test]
fn recovery_prompt_supplies_replacement_subset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wave.sav");
    write_survey(&path);

    let config = config().with_required_subset(["SBJNUM", "ID", "STATUS", "REGIAO"]);
    let mut resolver = ScriptedResolver::replace("sbjnum, id, status");
    let outcome = run_check(&path, &config, &mut resolver).unwrap();

    assert_eq!(outcome.report.height(), 4);
    assert!(outcome.diagnostics.with_code("subset-replaced").next().is_some());
}

#[test]
fn recovery_prompt_without_input_terminates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wave.sav");
    write_survey(&path);

    let config = config().with_required_subset(["SBJNUM", "ID", "STATUS", "REGIAO"]);
    let mut resolver = ScriptedResolver::replace_with_nothing();
    let err = run_check(&path, &config, &mut resolver).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CheckError>(),
        Some(CheckError::NoColumnsProvided)
    ));
}

#[test]
fn unreadable_path_is_file_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut resolver = ScriptedResolver::proceed();
    let err = run_check(&dir.path().join("missing.sav"), &config(), &mut resolver).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CheckError>(),
        Some(CheckError::FileAccess { .. })
    ));
}

#[test]
fn malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not_a_sav.sav");
    std::fs::write(&path, b"this is not a system file at all").unwrap();

    let mut resolver = ScriptedResolver::proceed();
    let err = run_check(&path, &config(), &mut resolver).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CheckError>(),
        Some(CheckError::Parse { .. })
    ));
}

#[test]
fn all_unique_ids_give_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unique.sav");

    let mut dataset = SavDataset::with_columns(vec![
        SavColumn::numeric("sbjnum"),
        SavColumn::numeric("id"),
        SavColumn::text("status", 16),
    ]);
    for (sbjnum, id) in [(1.0, 5.0), (2.0, 7.0), (3.0, 9.0)] {
        dataset.add_row(vec![
            SavValue::number(sbjnum),
            SavValue::number(id),
            SavValue::text("Completa"),
        ]);
    }
    write_sav(&path, &dataset).unwrap();

    let config = PipelineConfig::new()
        .with_int_columns(["SBJNUM", "ID"])
        .with_required_subset(["SBJNUM", "ID", "STATUS"]);
    let mut resolver = ScriptedResolver::proceed();
    let outcome = run_check(&path, &config, &mut resolver).unwrap();

    assert!(!outcome.has_duplicates());
    assert_eq!(outcome.report.height(), 0);
    assert!(outcome.diagnostics.with_code("no-duplicates").next().is_some());
}
