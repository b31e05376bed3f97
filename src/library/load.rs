use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::model::{Entry, Link, MediaLibrary};

#[derive(Debug, Deserialize)]
struct RawLibrary {
    #[serde(default)]
    entries: Vec<Entry>,
    #[serde(default)]
    links: Vec<Link>,
}

pub fn load_library(path: &Path) -> Result<MediaLibrary> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read media log at {}", path.display()))?;

    let library = parse_library(&raw)
        .with_context(|| format!("failed to parse media log at {}", path.display()))?;

    log::info!(
        "loaded media log: {} entries, {} links",
        library.entries.len(),
        library.links.len()
    );
    Ok(library)
}

pub(super) fn parse_library(raw: &str) -> Result<MediaLibrary> {
    let parsed: RawLibrary = serde_json::from_str(raw).context("invalid JSON in media log")?;

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(parsed.entries.len());
    for entry in parsed.entries {
        if seen.insert(entry.id.clone()) {
            entries.push(entry);
        } else {
            log::warn!("duplicate entry id {:?}; keeping the first occurrence", entry.id);
        }
    }

    let dangling = parsed
        .links
        .iter()
        .filter(|link| !seen.contains(&link.a) || !seen.contains(&link.b))
        .count();
    if dangling > 0 {
        log::warn!("{dangling} links reference unknown entry ids; they will not be drawn");
    }

    Ok(MediaLibrary {
        entries,
        links: parsed.links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::model::{MediaType, Status, Verdict};

    const SAMPLE: &str = r#"{
        "entries": [
            {"id": "e1", "title": "Dune", "creator": "Frank Herbert", "mediaType": "book", "verdict": "loved"},
            {"id": "e2", "title": "Blade Runner", "mediaType": "film", "verdict": "liked", "status": "finished", "note": "ignored"},
            {"id": "e3", "title": "Hades", "mediaType": "game", "verdict": "loved", "status": "inProgress"}
        ],
        "links": [
            {"a": "e1", "b": "e2"},
            {"a": "e2", "b": "missing"}
        ]
    }"#;

    #[test]
    fn parses_entries_and_links() {
        let library = parse_library(SAMPLE).unwrap();
        assert_eq!(library.entries.len(), 3);
        assert_eq!(library.links.len(), 2);

        let dune = library.entry("e1").unwrap();
        assert_eq!(dune.title, "Dune");
        assert_eq!(dune.creator.as_deref(), Some("Frank Herbert"));
        assert_eq!(dune.media_type, MediaType::Book);
        assert_eq!(dune.verdict, Verdict::Loved);
        assert_eq!(dune.status, Status::Finished);
    }

    #[test]
    fn status_defaults_to_finished_and_filters() {
        let library = parse_library(SAMPLE).unwrap();
        let finished = library.finished_entries();
        assert_eq!(finished.len(), 2);
        assert!(finished.iter().all(|entry| entry.id != "e3"));
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let raw = r#"{
            "entries": [
                {"id": "e1", "title": "First", "mediaType": "film", "verdict": "fine"},
                {"id": "e1", "title": "Second", "mediaType": "book", "verdict": "loved"}
            ],
            "links": []
        }"#;
        let library = parse_library(raw).unwrap();
        assert_eq!(library.entries.len(), 1);
        assert_eq!(library.entry("e1").unwrap().title, "First");
    }

    #[test]
    fn empty_library_is_valid() {
        let library = parse_library("{}").unwrap();
        assert!(library.entries.is_empty());
        assert!(library.links.is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_library("not json").is_err());
    }
}
