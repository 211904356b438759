//! Markdown transcript export.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use time::macros::format_description;
use time::OffsetDateTime;

use crate::chat::citations::Citations;
use crate::chat::session::ChatTurn;
use crate::generation::model::Role;

fn file_stamp(now: OffsetDateTime) -> String {
    now.format(format_description!(
        "[year][month][day]_[hour][minute][second]"
    ))
    .unwrap_or_default()
}

fn header_stamp(now: OffsetDateTime) -> String {
    now.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap_or_default()
}

/// Resolves the export file name.
///
/// Defaults to `chat_export_<timestamp>` when no name is given; a `.md`
/// suffix is appended exactly once.
pub fn resolve_filename(requested: Option<&str>, now: OffsetDateTime) -> String {
    let base = match requested.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => format!("chat_export_{}", file_stamp(now)),
    };

    if base.ends_with(".md") {
        base
    } else {
        format!("{base}.md")
    }
}

/// Renders the transcript as a markdown document.
pub fn render_markdown(
    turns: &[ChatTurn],
    model: &str,
    store_name: Option<&str>,
    exported_at: OffsetDateTime,
) -> String {
    let mut doc = String::new();

    doc.push_str("# Gemini Chat Conversation Export\n\n");
    doc.push_str(&format!("**Exported:** {}\n\n", header_stamp(exported_at)));
    doc.push_str(&format!("**Model:** {model}\n\n"));
    doc.push_str(&format!(
        "**File Search Store:** {}\n\n",
        store_name.unwrap_or("none")
    ));
    doc.push_str("---\n\n");

    for turn in turns {
        let heading = match turn.role {
            Role::User => "You",
            Role::Model => "Assistant",
        };
        doc.push_str(&format!("## {heading}\n\n{}\n\n", turn.text));

        if let Some(citations) = &turn.citations {
            if !citations.is_empty() {
                doc.push_str(&format_citations(citations));
            }
        }

        doc.push_str("---\n\n");
    }

    doc
}

fn format_citations(citations: &Citations) -> String {
    let mut block = String::from("### Citations\n\n");

    if let Some(queries) = &citations.search_queries {
        block.push_str(&format!("**Search queries used:** {queries}\n\n"));
    }

    if !citations.sources.is_empty() {
        block.push_str(&format!("**Sources ({}):**\n\n", citations.sources.len()));
        for (i, source) in citations.sources.iter().enumerate() {
            let title = source.title.as_deref().unwrap_or("(untitled)");
            block.push_str(&format!("{}. **{title}**\n", i + 1));
            if let Some(uri) = &source.uri {
                block.push_str(&format!("   - URI: {uri}\n"));
            }
            block.push('\n');
        }
    }

    if citations.grounded_segments > 0 {
        block.push_str(&format!(
            "**Grounding supports:** {} segment(s) grounded\n\n",
            citations.grounded_segments
        ));
    }

    block
}

/// Writes `contents` into `dir/filename`, creating the directory if absent.
pub fn write_export(dir: &Path, filename: &str, contents: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    fs::write(&path, contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::citations::Source;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2026-08-06 12:34:56 UTC);

    #[test]
    fn default_filename_is_timestamped_markdown() {
        assert_eq!(
            resolve_filename(None, NOW),
            "chat_export_20260806_123456.md"
        );
        assert_eq!(resolve_filename(Some("   "), NOW), "chat_export_20260806_123456.md");
    }

    #[test]
    fn md_suffix_is_appended_exactly_once() {
        assert_eq!(resolve_filename(Some("report"), NOW), "report.md");
        assert_eq!(resolve_filename(Some("report.md"), NOW), "report.md");
    }

    fn transcript() -> Vec<ChatTurn> {
        vec![
            ChatTurn {
                role: Role::User,
                text: "What is in the files?".to_string(),
                citations: None,
            },
            ChatTurn {
                role: Role::Model,
                text: "The files describe two things.".to_string(),
                citations: Some(Citations {
                    search_queries: None,
                    sources: vec![
                        Source {
                            title: Some("alpha.txt".to_string()),
                            uri: Some("fileSearchStores/s/documents/a".to_string()),
                        },
                        Source {
                            title: Some("beta.txt".to_string()),
                            uri: Some("fileSearchStores/s/documents/b".to_string()),
                        },
                    ],
                    grounded_segments: 2,
                }),
            },
        ]
    }

    #[test]
    fn document_has_header_sections_and_citations() {
        let doc = render_markdown(
            &transcript(),
            "gemini-2.5-flash",
            Some("fileSearchStores/s"),
            NOW,
        );

        assert!(doc.starts_with("# Gemini Chat Conversation Export\n"));
        assert!(doc.contains("**Exported:** 2026-08-06 12:34:56"));
        assert!(doc.contains("**Model:** gemini-2.5-flash"));
        assert!(doc.contains("**File Search Store:** fileSearchStores/s"));
        assert_eq!(doc.matches("## You").count(), 1);
        assert_eq!(doc.matches("## Assistant").count(), 1);
        assert!(doc.contains("**Sources (2):**"));
        assert!(doc.contains("1. **alpha.txt**"));
        assert!(doc.contains("2. **beta.txt**"));
        assert!(doc.contains("**Grounding supports:** 2 segment(s) grounded"));
    }

    #[test]
    fn missing_store_is_rendered_as_none() {
        let doc = render_markdown(&transcript(), "gemini-2.5-flash", None, NOW);
        assert!(doc.contains("**File Search Store:** none"));
    }

    #[test]
    fn write_export_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let export_dir = dir.path().join("exports");

        let path = write_export(&export_dir, "report.md", "# hello\n").unwrap();
        assert_eq!(path, export_dir.join("report.md"));
        assert_eq!(fs::read_to_string(path).unwrap(), "# hello\n");
    }
}
