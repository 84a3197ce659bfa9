use crate::services::providers::RecommenderBackend;

/// The full title list, loaded once and never modified afterwards
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleCatalog {
    titles: Vec<String>,
}

impl TitleCatalog {
    pub fn new(titles: Vec<String>) -> Self {
        Self { titles }
    }

    /// Fetches the catalog from the backend
    ///
    /// A failed fetch is logged and leaves the catalog empty, so every later
    /// lookup simply finds nothing.
    pub async fn load(backend: &dyn RecommenderBackend) -> Self {
        match backend.fetch_titles().await {
            Ok(titles) => Self::new(titles),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    backend = backend.name(),
                    "Failed to load title catalog"
                );
                Self::default()
            }
        }
    }

    /// Titles whose lowercase form contains the lowercase input, in catalog order
    pub fn matches(&self, input: &str) -> Vec<&str> {
        if input.is_empty() {
            return Vec::new();
        }

        let needle = input.to_lowercase();
        self.titles
            .iter()
            .filter(|title| title.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t == title)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Input box plus the suggestion list rendered beneath it
#[derive(Debug, Clone, Default)]
pub struct AutocompleteWidget {
    catalog: TitleCatalog,
    input: String,
    results: Vec<String>,
}

impl AutocompleteWidget {
    pub fn new(catalog: TitleCatalog) -> Self {
        Self {
            catalog,
            input: String::new(),
            results: Vec::new(),
        }
    }

    /// Handles a change of the input text
    pub fn on_input(&mut self, text: &str) -> &[String] {
        self.input = text.to_string();
        self.results = self
            .catalog
            .matches(text)
            .into_iter()
            .map(str::to_string)
            .collect();
        &self.results
    }

    /// Copies the suggestion at `index` into the input and clears the list
    pub fn select(&mut self, index: usize) -> Option<&str> {
        let chosen = self.results.get(index)?.clone();
        tracing::debug!(title = %chosen, "Suggestion selected");

        self.input = chosen;
        self.results.clear();
        Some(self.input.as_str())
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.results.clear();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn catalog(&self) -> &TitleCatalog {
        &self.catalog
    }
}
