use std::fs;
use std::path::{Path, PathBuf};

use crate::model::record::{Dataset, Record};

/// Lista os datasets (.json) do diretório, na ordem em que o SO devolve.
/// Não ordenamos: cada arquivo é processado de forma independente.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries =
        fs::read_dir(dir).map_err(|e| format!("failed to list {}: {e}", dir.display()))?;

    let mut files = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| format!("failed to list {}: {e}", dir.display()))?;
        let path = entry.path();

        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path);
        }
    }

    Ok(files)
}

/// Carrega um dataset: sempre um array JSON de objetos.
pub fn load(path: &Path) -> Result<Dataset, String> {
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => return Err(format!("invalid dataset path: {}", path.display())),
    };

    let data =
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;

    let records: Vec<Record> = serde_json::from_str(&data)
        .map_err(|e| format!("{file_name} is not a json array of records: {e}"))?;

    Ok(Dataset { file_name, records })
}

/// Grava o dataset em out_dir com o mesmo nome do arquivo de origem.
/// JSON compacto, igual ao formato dos arquivos de entrada.
pub fn save(dataset: &Dataset, out_dir: &Path) -> Result<PathBuf, String> {
    let json = serde_json::to_string(&dataset.records)
        .map_err(|e| format!("failed to serialize {}: {e}", dataset.file_name))?;

    write_text(out_dir, &dataset.file_name, &json)
}

/// Escrita via temporário + rename: escrita parcial nunca fica visível
/// no destino.
pub fn write_text(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, String> {
    fs::create_dir_all(dir).map_err(|e| format!("failed to create {}: {e}", dir.display()))?;

    let path = dir.join(file_name);
    let tmp = dir.join(format!("{file_name}.tmp"));

    fs::write(&tmp, contents).map_err(|e| format!("failed to write {}: {e}", tmp.display()))?;

    // Windows não renomeia por cima de arquivo existente.
    if path.exists() {
        fs::remove_file(&path).map_err(|e| format!("failed to replace {}: {e}", path.display()))?;
    }

    fs::rename(&tmp, &path).map_err(|e| format!("failed to write {}: {e}", path.display()))?;

    Ok(path)
}
