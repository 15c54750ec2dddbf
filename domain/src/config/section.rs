//! Registry of top-level configuration sections.
//!
//! File configuration is merged section by section: a section present in the
//! file replaces the baseline section wholesale. The registry lists the
//! sections that exist so unknown keys can be reported instead of silently
//! ignored.

/// Metadata for a single top-level section.
#[derive(Debug, Clone)]
pub struct SectionInfo {
    /// Top-level key (e.g., `"models"`).
    pub key: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

/// All known top-level sections, in display order.
pub fn known_sections() -> &'static [SectionInfo] {
    &KNOWN_SECTIONS
}

/// Look up a section by its key.
pub fn lookup_section(key: &str) -> Option<&'static SectionInfo> {
    KNOWN_SECTIONS.iter().find(|s| s.key == key)
}

static KNOWN_SECTIONS: [SectionInfo; 5] = [
    SectionInfo {
        key: "models",
        description: "Model roles: default, classifier, and any extra named roles",
    },
    SectionInfo {
        key: "model_assignments",
        description: "Task type to model overrides",
    },
    SectionInfo {
        key: "prompts",
        description: "Task type to prompt template",
    },
    SectionInfo {
        key: "thresholds",
        description: "max_response_time (seconds) and min_response_length (chars)",
    },
    SectionInfo {
        key: "executor",
        description: "Model executor backend: ollama-cli, ollama-http or stub",
    },
];
