use clap::ValueEnum;
use serde::Serialize;

/// The two task categories a session can be logged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ValueEnum)]
pub enum TaskLabel {
    Main,
    Secondary,
}

impl TaskLabel {
    pub const ALL: [TaskLabel; 2] = [TaskLabel::Main, TaskLabel::Secondary];

    /// Label as written in the log file.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskLabel::Main => "Main",
            TaskLabel::Secondary => "Secondary",
        }
    }

    /// Lenient parse for user input (config values, CLI).
    pub fn from_user_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "main" | "m" => Some(TaskLabel::Main),
            "secondary" | "s" => Some(TaskLabel::Secondary),
            _ => None,
        }
    }

    pub fn matches(&self, label: &str) -> bool {
        self.as_str() == label
    }
}

impl std::fmt::Display for TaskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
