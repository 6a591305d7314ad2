use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::model::config::AlignConfig;
use crate::model::record::Record;
use crate::services::dataset;

#[derive(Debug, Serialize)]
pub struct ExtractReport {
    pub files: usize,
    pub lines_emitted: usize,
    pub lines_reserved: usize,
}

/// Monta o texto do artefato: uma linha por registro, na ordem do dataset,
/// toda linha terminada em '\n'. Linhas == registros, sempre — é isso que
/// mantém o merge posicional válido.
pub fn extract_lines(
    records: &[Record],
    source_field: &str,
    target_field: &str,
    skip_translated: bool,
) -> String {
    let mut out = String::new();

    for r in records {
        // Já traduzido: linha vazia segura a posição, não re-emite o texto.
        if skip_translated && r.has_text(target_field) {
            out.push('\n');
            continue;
        }

        let text = r.text_or_empty(source_field);

        if text.contains('\n') || text.contains('\r') {
            // Quebra embutida desalinharia todos os registros seguintes.
            warn!("flattening embedded line break in source text");
            out.push_str(&flatten(text));
        } else {
            out.push_str(text);
        }

        out.push('\n');
    }

    out
}

fn flatten(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

fn reserved_count(records: &[Record], target_field: &str, skip_translated: bool) -> usize {
    if !skip_translated {
        return 0;
    }
    records.iter().filter(|r| r.has_text(target_field)).count()
}

/// Varre input_dir e escreve um artefato por dataset em artifact_dir,
/// com o mesmo nome de arquivo.
pub fn run(cfg: &AlignConfig) -> Result<ExtractReport, String> {
    let mut report = ExtractReport {
        files: 0,
        lines_emitted: 0,
        lines_reserved: 0,
    };

    for path in dataset::list_files(Path::new(&cfg.input_dir))? {
        let ds = dataset::load(&path)?;

        let text = extract_lines(
            &ds.records,
            &cfg.source_field,
            &cfg.target_field,
            cfg.skip_translated,
        );
        dataset::write_text(Path::new(&cfg.artifact_dir), &ds.file_name, &text)?;

        let reserved = reserved_count(&ds.records, &cfg.target_field, cfg.skip_translated);

        info!(
            "{}: {} records extracted, {} reserved",
            ds.file_name,
            ds.records.len(),
            reserved
        );

        report.files += 1;
        report.lines_reserved += reserved;
        report.lines_emitted += ds.records.len() - reserved;
    }

    Ok(report)
}
