//! Citation extraction from grounding metadata.

use crate::generation::model::{GenerationResponse, GroundingMetadata};

/// A normalized source reference.
///
/// Web-sourced and retrieved-context chunks both collapse into a
/// `(title, uri)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub title: Option<String>,
    pub uri: Option<String>,
}

/// Citations derived from one model response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Citations {
    /// Rendered search-entry-point block, surfaced verbatim
    pub search_queries: Option<String>,
    pub sources: Vec<Source>,
    /// Number of segment-level grounding links
    pub grounded_segments: usize,
}

impl Citations {
    pub fn from_metadata(metadata: &GroundingMetadata) -> Self {
        let search_queries = metadata
            .search_entry_point
            .as_ref()
            .and_then(|entry| entry.rendered_content.clone());

        // Chunks with neither a web nor a retrieved-context source are skipped.
        let sources = metadata
            .grounding_chunks
            .iter()
            .flatten()
            .filter_map(|chunk| {
                let source = chunk.web.as_ref().or(chunk.retrieved_context.as_ref())?;
                Some(Source {
                    title: source.title.clone(),
                    uri: source.uri.clone(),
                })
            })
            .collect();

        let grounded_segments = metadata.grounding_supports.as_ref().map_or(0, Vec::len);

        Self {
            search_queries,
            sources,
            grounded_segments,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search_queries.is_none() && self.sources.is_empty() && self.grounded_segments == 0
    }
}

/// Citations for a response, or `None` when it carries no grounding
/// metadata at all.
pub fn extract(response: &GenerationResponse) -> Option<Citations> {
    response.grounding_metadata().map(Citations::from_metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerationResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn no_grounding_metadata_yields_no_citations() {
        let response = response(json!({
            "candidates": [
                {
                    "content": {
                        "parts": [{"text": "Plain answer."}],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }
            ]
        }));

        assert!(extract(&response).is_none());
    }

    #[test]
    fn web_and_retrieved_context_chunks_normalize_to_pairs() {
        let response = response(json!({
            "candidates": [
                {
                    "content": {
                        "parts": [{"text": "Grounded answer."}],
                        "role": "model"
                    },
                    "groundingMetadata": {
                        "groundingChunks": [
                            {"web": {"title": "Example Site", "uri": "https://example.com"}},
                            {"retrievedContext": {"title": "notes.txt", "uri": "fileSearchStores/s1/documents/d1"}},
                            {}
                        ],
                        "groundingSupports": [
                            {"segment": {"startIndex": 0, "endIndex": 12}, "groundingChunkIndices": [0]},
                            {"segment": {"startIndex": 13, "endIndex": 20}, "groundingChunkIndices": [1]}
                        ]
                    }
                }
            ]
        }));

        let citations = extract(&response).unwrap();
        assert_eq!(
            citations.sources,
            vec![
                Source {
                    title: Some("Example Site".to_string()),
                    uri: Some("https://example.com".to_string()),
                },
                Source {
                    title: Some("notes.txt".to_string()),
                    uri: Some("fileSearchStores/s1/documents/d1".to_string()),
                },
            ]
        );
        assert_eq!(citations.grounded_segments, 2);
        assert!(citations.search_queries.is_none());
    }

    #[test]
    fn search_entry_point_is_surfaced_verbatim() {
        let response = response(json!({
            "candidates": [
                {
                    "content": {"parts": [{"text": "x"}], "role": "model"},
                    "groundingMetadata": {
                        "searchEntryPoint": {"renderedContent": "<div>queries</div>"}
                    }
                }
            ]
        }));

        let citations = extract(&response).unwrap();
        assert_eq!(citations.search_queries.as_deref(), Some("<div>queries</div>"));
        assert!(citations.sources.is_empty());
        assert_eq!(citations.grounded_segments, 0);
    }

    #[test]
    fn empty_metadata_object_still_counts_as_citations() {
        // Metadata present but carrying nothing: extraction succeeds with an
        // empty set rather than pretending there was no grounding at all.
        let response = response(json!({
            "candidates": [
                {
                    "content": {"parts": [{"text": "x"}], "role": "model"},
                    "groundingMetadata": {}
                }
            ]
        }));

        let citations = extract(&response).unwrap();
        assert!(citations.is_empty());
    }
}
