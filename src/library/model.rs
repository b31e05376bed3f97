use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Loved,
    Liked,
    Fine,
    Disliked,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Self::Loved => "loved",
            Self::Liked => "liked",
            Self::Fine => "fine",
            Self::Disliked => "disliked",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Film,
    Series,
    Book,
    Game,
    Album,
    Podcast,
}

impl MediaType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Film => "film",
            Self::Series => "series",
            Self::Book => "book",
            Self::Game => "game",
            Self::Album => "album",
            Self::Podcast => "podcast",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    #[default]
    Finished,
    InProgress,
    Planned,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Entry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(rename = "mediaType")]
    pub media_type: MediaType,
    pub verdict: Verdict,
    #[serde(default)]
    pub status: Status,
}

/// User-authored association between two entries. Undirected; the `a`/`b`
/// order carries no meaning.
#[derive(Clone, Debug, Deserialize)]
pub struct Link {
    pub a: String,
    pub b: String,
}

#[derive(Clone, Debug, Default)]
pub struct MediaLibrary {
    pub entries: Vec<Entry>,
    pub links: Vec<Link>,
}

impl MediaLibrary {
    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn finished_entries(&self) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|entry| entry.status == Status::Finished)
            .cloned()
            .collect()
    }
}
