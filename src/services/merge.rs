use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::model::config::{AlignConfig, MismatchPolicy};
use crate::model::record::Record;
use crate::services::{dataset, encoding};

#[derive(Debug, Serialize)]
pub struct MergeReport {
    pub files: usize,
    pub records_updated: usize,
    pub mismatched_files: usize,
}

/// Split posicional do artefato. O extract termina toda linha com '\n',
/// o que renderia um segmento vazio extra no fim; descartamos só esse.
/// CR final de linha é removido (editor Windows devolve CRLF).
pub fn split_artifact(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').map(|l| l.trim_end_matches('\r')).collect();

    if lines.last() == Some(&"") {
        lines.pop();
    }

    lines
}

/// Merge posicional e monotônico: a linha i só entra no registro i quando
/// existe e não é vazia. Nunca apaga tradução já presente.
pub fn apply_lines(records: &mut [Record], lines: &[&str], target_field: &str) -> usize {
    let mut updated = 0usize;

    for (i, r) in records.iter_mut().enumerate() {
        match lines.get(i) {
            Some(line) if !line.is_empty() => {
                r.set_text(target_field, line);
                updated += 1;
            }
            _ => {}
        }
    }

    updated
}

/// Para cada dataset de input_dir, lê o artefato de mesmo nome em
/// artifact_dir e grava o dataset atualizado em output_dir.
/// Artefato ausente é erro duro: sem ele não há como avançar o arquivo.
pub fn run(cfg: &AlignConfig) -> Result<MergeReport, String> {
    let mut report = MergeReport {
        files: 0,
        records_updated: 0,
        mismatched_files: 0,
    };

    for path in dataset::list_files(Path::new(&cfg.input_dir))? {
        let mut ds = dataset::load(&path)?;

        let artifact_path = Path::new(&cfg.artifact_dir).join(&ds.file_name);
        let text = encoding::read_artifact(&artifact_path)?;
        let lines = split_artifact(&text);

        if lines.len() != ds.records.len() {
            report.mismatched_files += 1;

            match cfg.mismatch_policy {
                MismatchPolicy::Strict => {
                    return Err(format!(
                        "{}: artifact has {} lines for {} records",
                        ds.file_name,
                        lines.len(),
                        ds.records.len()
                    ));
                }
                MismatchPolicy::Lenient => {
                    warn!(
                        "{}: artifact has {} lines for {} records, merging up to the shorter length",
                        ds.file_name,
                        lines.len(),
                        ds.records.len()
                    );
                }
            }
        }

        let updated = apply_lines(&mut ds.records, &lines, &cfg.target_field);
        dataset::save(&ds, Path::new(&cfg.output_dir))?;

        info!("{}: {} records updated", ds.file_name, updated);

        report.files += 1;
        report.records_updated += updated;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn record(v: serde_json::Value) -> Record {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn splits_with_and_without_trailing_newline() {
        assert_eq!(split_artifact("A\nB\n"), vec!["A", "B"]);
        assert_eq!(split_artifact("A\nB"), vec!["A", "B"]);
        assert_eq!(split_artifact(""), Vec::<&str>::new());
    }

    #[test]
    fn crlf_endings_are_normalized() {
        assert_eq!(split_artifact("A\r\nB\r\n"), vec!["A", "B"]);
    }

    #[test]
    fn only_one_trailing_empty_segment_is_dropped() {
        // "A\n\n" é uma linha "A" seguida de uma linha vazia legítima.
        assert_eq!(split_artifact("A\n\n"), vec!["A", ""]);
    }

    #[test]
    fn positional_merge_fills_every_index() {
        let mut records = vec![
            record(json!({"src": "a"})),
            record(json!({"src": "b"})),
            record(json!({"src": "c"})),
        ];

        let updated = apply_lines(&mut records, &split_artifact("A\nB\nC"), "dst");

        assert_eq!(updated, 3);
        assert_eq!(records[0].text("dst"), Some("A"));
        assert_eq!(records[1].text("dst"), Some("B"));
        assert_eq!(records[2].text("dst"), Some("C"));
    }

    #[test]
    fn short_artifact_leaves_tail_unchanged() {
        let mut records = vec![
            record(json!({"src": "a"})),
            record(json!({"src": "b"})),
            record(json!({"src": "c"})),
        ];

        let updated = apply_lines(&mut records, &split_artifact("A\nB"), "dst");

        assert_eq!(updated, 2);
        assert_eq!(records[2].text("dst"), None);
    }

    #[test]
    fn empty_line_never_erases_existing_translation() {
        let mut records = vec![record(json!({"src": "b", "dst": "B"}))];

        let updated = apply_lines(&mut records, &split_artifact("\n"), "dst");

        assert_eq!(updated, 0);
        assert_eq!(records[0].text("dst"), Some("B"));
    }

    #[test]
    fn non_target_fields_and_their_order_pass_through() {
        let mut records = vec![record(json!({"Id": 1, "Text_Korean": "가"}))];

        apply_lines(&mut records, &["Hello"], "Text_English");

        assert_eq!(
            serde_json::to_string(&records).unwrap(),
            r#"[{"Id":1,"Text_Korean":"가","Text_English":"Hello"}]"#
        );
    }

    fn cycle_config(root: &Path) -> AlignConfig {
        AlignConfig {
            input_dir: root.join("text").to_string_lossy().to_string(),
            artifact_dir: root.join("temp").to_string_lossy().to_string(),
            output_dir: root.join("output").to_string_lossy().to_string(),
            ..AlignConfig::default()
        }
    }

    #[test]
    fn extract_then_merge_round_trips_on_disk() {
        let temp = tempdir().unwrap();
        let cfg = cycle_config(temp.path());

        fs::create_dir_all(&cfg.input_dir).unwrap();
        fs::write(
            Path::new(&cfg.input_dir).join("dialog.json"),
            r#"[{"Id":1,"Text_Korean":"안녕"},{"Id":2,"Text_Korean":"잘 가"}]"#,
        )
        .unwrap();

        crate::services::extract::run(&cfg).unwrap();

        // Tradução externa: edita o artefato linha a linha.
        let artifact = Path::new(&cfg.artifact_dir).join("dialog.json");
        assert_eq!(fs::read_to_string(&artifact).unwrap(), "안녕\n잘 가\n");
        fs::write(&artifact, "Hello\nGoodbye\n").unwrap();

        let report = run(&cfg).unwrap();

        assert_eq!(report.files, 1);
        assert_eq!(report.records_updated, 2);
        assert_eq!(report.mismatched_files, 0);

        let out = fs::read_to_string(Path::new(&cfg.output_dir).join("dialog.json")).unwrap();
        assert_eq!(
            out,
            r#"[{"Id":1,"Text_Korean":"안녕","Text_English":"Hello"},{"Id":2,"Text_Korean":"잘 가","Text_English":"Goodbye"}]"#
        );
    }

    #[test]
    fn unmodified_artifact_round_trips_without_erasing() {
        let temp = tempdir().unwrap();
        let cfg = AlignConfig {
            skip_translated: true,
            ..cycle_config(temp.path())
        };

        fs::create_dir_all(&cfg.input_dir).unwrap();
        fs::write(
            Path::new(&cfg.input_dir).join("dialog.json"),
            r#"[{"Text_Korean":"가","Text_English":"A"},{"Text_Korean":"나","Text_English":"B"}]"#,
        )
        .unwrap();

        // Passe incremental sem nada a traduzir: artefato só com linhas vazias.
        crate::services::extract::run(&cfg).unwrap();
        assert_eq!(
            fs::read_to_string(Path::new(&cfg.artifact_dir).join("dialog.json")).unwrap(),
            "\n\n"
        );

        let report = run(&cfg).unwrap();
        assert_eq!(report.records_updated, 0);

        let out = fs::read_to_string(Path::new(&cfg.output_dir).join("dialog.json")).unwrap();
        assert_eq!(
            out,
            r#"[{"Text_Korean":"가","Text_English":"A"},{"Text_Korean":"나","Text_English":"B"}]"#
        );
    }

    #[test]
    fn lenient_policy_merges_short_artifact_and_counts_mismatch() {
        let temp = tempdir().unwrap();
        let cfg = cycle_config(temp.path());

        fs::create_dir_all(&cfg.input_dir).unwrap();
        fs::create_dir_all(&cfg.artifact_dir).unwrap();
        fs::write(
            Path::new(&cfg.input_dir).join("items.json"),
            r#"[{"Text_Korean":"가"},{"Text_Korean":"나"},{"Text_Korean":"다"}]"#,
        )
        .unwrap();
        fs::write(Path::new(&cfg.artifact_dir).join("items.json"), "A\nB").unwrap();

        let report = run(&cfg).unwrap();

        assert_eq!(report.records_updated, 2);
        assert_eq!(report.mismatched_files, 1);

        let out = fs::read_to_string(Path::new(&cfg.output_dir).join("items.json")).unwrap();
        assert_eq!(
            out,
            r#"[{"Text_Korean":"가","Text_English":"A"},{"Text_Korean":"나","Text_English":"B"},{"Text_Korean":"다"}]"#
        );
    }

    #[test]
    fn strict_policy_fails_on_line_count_divergence() {
        let temp = tempdir().unwrap();
        let cfg = AlignConfig {
            mismatch_policy: MismatchPolicy::Strict,
            ..cycle_config(temp.path())
        };

        fs::create_dir_all(&cfg.input_dir).unwrap();
        fs::create_dir_all(&cfg.artifact_dir).unwrap();
        fs::write(
            Path::new(&cfg.input_dir).join("items.json"),
            r#"[{"Text_Korean":"가"},{"Text_Korean":"나"}]"#,
        )
        .unwrap();
        fs::write(Path::new(&cfg.artifact_dir).join("items.json"), "A\n").unwrap();

        let err = run(&cfg).unwrap_err();
        assert!(err.contains("items.json"));
        assert!(err.contains("1 lines for 2 records"));
    }

    #[test]
    fn missing_artifact_is_a_hard_error() {
        let temp = tempdir().unwrap();
        let cfg = cycle_config(temp.path());

        fs::create_dir_all(&cfg.input_dir).unwrap();
        fs::write(
            Path::new(&cfg.input_dir).join("items.json"),
            r#"[{"Text_Korean":"가"}]"#,
        )
        .unwrap();

        let err = run(&cfg).unwrap_err();
        assert!(err.contains("failed to read artifact"));
    }
}
