// ABOUTME: Output registry for the slide-extractor application
// ABOUTME: Remembers, in order, which presentation was written to which file

/// Insertion-ordered map from presentation name to output file name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRegistry {
    entries: Vec<(String, String)>,
}

impl OutputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a written page. Re-recording a name keeps its position.
    pub fn record(&mut self, name: impl Into<String>, file_name: impl Into<String>) {
        let name = name.into();
        let file_name = file_name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = file_name,
            None => self.entries.push((name, file_name)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, file_name)| file_name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, file_name)| (name.as_str(), file_name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
