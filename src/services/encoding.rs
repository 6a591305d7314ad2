use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Lê um artefato de texto devolvido por editor externo.
/// Tradutor em Windows coreano costuma salvar CP949 em vez de UTF-8,
/// então detectamos o encoding antes de decodificar.
pub fn read_artifact(path: &Path) -> Result<String, String> {
    let bytes =
        fs::read(path).map_err(|e| format!("failed to read artifact {}: {e}", path.display()))?;

    decode(&bytes).map_err(|e| format!("artifact {}: {e}", path.display()))
}

fn decode(bytes: &[u8]) -> Result<String, String> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    // Caminho comum: UTF-8 válido.
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);

    decode_with(detector.guess(None, true), bytes)
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> Result<String, String> {
    let (text, _, had_errors) = encoding.decode(bytes);

    if had_errors {
        return Err(format!("text is not valid {}", encoding.name()));
    }

    Ok(text.into_owned())
}
