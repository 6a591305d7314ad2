use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Um registro do dataset: mapa de campos nomeados, na ordem do arquivo.
/// O conjunto de campos varia por dataset; o Aligner só conhece os campos
/// de origem/destino configurados e repassa o resto intacto.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Valor textual do campo. None quando ausente ou não-string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_str())
    }

    pub fn text_or_empty(&self, field: &str) -> &str {
        self.text(field).unwrap_or("")
    }

    pub fn has_text(&self, field: &str) -> bool {
        !self.text_or_empty(field).is_empty()
    }

    /// Campo novo entra no fim do registro; campo existente mantém a posição.
    pub fn set_text(&mut self, field: &str, value: &str) {
        self.fields
            .insert(field.to_string(), Value::String(value.to_string()));
    }
}

/// Um arquivo de dataset em memória: os registros, na ordem do arquivo,
/// mais o nome-base que liga dataset, artefato e saída.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub file_name: String,
    pub records: Vec<Record>,
}
