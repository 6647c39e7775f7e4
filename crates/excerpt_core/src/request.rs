use serde::{Deserialize, Serialize};

/// Per-request generation parameters. Every field may be empty or absent;
/// empty values resolve to the configured defaults inside the prompt
/// builder. Exists only for the duration of one request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationParams {
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub focus_keywords: String,
}

impl GenerationParams {
    /// The explicit word target carried by the request, if any. A zero
    /// value is treated as absent.
    pub fn requested_max_length(&self) -> Option<u32> {
        self.max_length.filter(|n| *n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_max_length_counts_as_absent() {
        let params = GenerationParams {
            max_length: Some(0),
            ..Default::default()
        };
        assert_eq!(params.requested_max_length(), None);

        let params = GenerationParams {
            max_length: Some(120),
            ..Default::default()
        };
        assert_eq!(params.requested_max_length(), Some(120));
    }

    #[test]
    fn deserializes_with_all_fields_absent() {
        let params: GenerationParams = serde_json::from_str("{}").unwrap();
        assert!(params.style.is_empty());
        assert!(params.max_length.is_none());
    }
}
