use serde::{Deserialize, Serialize};

fn default_input_dir() -> String {
    "text".to_string()
}

fn default_artifact_dir() -> String {
    "temp".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_source_field() -> String {
    "Text_Korean".to_string()
}

fn default_target_field() -> String {
    "Text_English".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AlignConfig {
    #[serde(default = "default_input_dir")]
    pub input_dir: String,

    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_source_field")]
    pub source_field: String,

    #[serde(default = "default_target_field")]
    pub target_field: String,

    /// Passe incremental: registros com destino já preenchido viram
    /// linha vazia no artefato em vez de re-emitir o texto de origem.
    #[serde(default)]
    pub skip_translated: bool,

    #[serde(default)]
    pub mismatch_policy: MismatchPolicy,
}

impl Default for AlignConfig {
    fn default() -> Self {
        AlignConfig {
            input_dir: default_input_dir(),
            artifact_dir: default_artifact_dir(),
            output_dir: default_output_dir(),
            source_field: default_source_field(),
            target_field: default_target_field(),
            skip_translated: false,
            mismatch_policy: MismatchPolicy::default(),
        }
    }
}

/// O que fazer quando o artefato tem menos (ou mais) linhas que o dataset
/// tem registros.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Divergência derruba a execução.
    Strict,
    /// Avisa e funde só até o comprimento comum.
    Lenient,
}

impl Default for MismatchPolicy {
    fn default() -> Self {
        MismatchPolicy::Lenient
    }
}
