use std::collections::BTreeMap;
use std::path::Path;
use anyhow::Context;
use regex::Regex;
use crate::utils;

/// Class id to display name lookup for model outputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelMap {
    names: BTreeMap<u32, String>,
}

impl LabelMap {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_label(mut self, id: u32, name: &str) -> Self {
        self.names.insert(id, name.to_string());
        self
    }

    /// Parses an object-detection `label_map.pbtxt`.
    ///
    /// `display_name` wins over `name` when both are present. Items without an
    /// `id` are skipped.
    pub fn from_pbtxt(text: &str) -> anyhow::Result<Self> {
        let item_re = Regex::new(r"item\s*\{([^}]*)\}")?;
        let id_re = Regex::new(r"\bid\s*:\s*(\d+)")?;
        let display_re = Regex::new(r#"display_name\s*:\s*["']([^"']*)["']"#)?;
        let name_re = Regex::new(r#"(?:^|\s)name\s*:\s*["']([^"']*)["']"#)?;

        let mut names = BTreeMap::new();
        for item in item_re.captures_iter(text) {
            let body = &item[1];
            let Some(id) = id_re.captures(body) else {
                log::warn!("Skipping label map item without an id: {}", body.trim());
                continue;
            };
            let id: u32 = id[1].parse().with_context(|| format!("bad label id in: {}", body.trim()))?;

            let name = display_re
                .captures(body)
                .or_else(|| name_re.captures(body))
                .map(|c| c[1].to_string())
                .unwrap_or_else(|| id.to_string());
            names.insert(id, name);
        }

        Ok(Self { names })
    }

    /// Plain label file, one name per line; ids start at 1 (0 is background).
    pub fn from_lines(lines: &[String]) -> Self {
        let names = lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .enumerate()
            .map(|(i, l)| (i as u32 + 1, l.to_string()))
            .collect();
        Self { names }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        if path.extension().is_some_and(|ext| ext == "pbtxt") {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading label map {}", path.display()))?;
            Self::from_pbtxt(&text)
        } else {
            let lines = utils::file_to_vec(&path.to_string_lossy())
                .with_context(|| format!("reading label file {}", path.display()))?;
            Ok(Self::from_lines(&lines))
        }
    }

    /// Name for `id`, or the id itself when it is not mapped.
    pub fn name(&self, id: u32) -> String {
        self.names.get(&id).cloned().unwrap_or_else(|| id.to_string())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
