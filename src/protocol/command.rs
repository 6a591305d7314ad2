#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    ExtractLines,
    ApplyLines,
    Extract,
    MergeBack,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "extract_lines" => Command::ExtractLines,
            "apply_lines" => Command::ApplyLines,
            "extract" => Command::Extract,
            "merge_back" => Command::MergeBack,
            _ => Command::Unknown,
        }
    }
}
