//! Fixed semester/course/content-type catalogue.
//!
//! The taxonomy is compile-time data: ten semesters, a fixed set of courses
//! per semester and three content types. Menu labels resolve back to typed
//! values here, so the controller never string-matches free text itself.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// One of the ten fixed semesters, identified by "1".."10".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Semester(u8);

/// Course catalogue, one row per semester. Course names are unique across
/// the whole catalogue so a course label resolves without extra context.
const CURRICULUM: [&[&str]; 10] = [
    &["Anatomy", "Physiology", "Biochemistry"],
    &["English", "Histology", "Embryology"],
    &["Pathology", "Microbiology", "Parasitology"],
    &["Pharmacology", "Community Medicine", "Immunology"],
    &["Internal Medicine", "General Surgery", "Radiology"],
    &["Pediatrics", "Obstetrics & Gynaecology", "Psychiatry"],
    &["Ophthalmology", "ENT", "Dermatology"],
    &["Orthopaedics", "Anaesthesia", "Forensic Medicine"],
    &["Family Medicine", "Emergency Medicine", "Clinical Pharmacology"],
    &["Elective", "Research Methods", "Clinical Rotations"],
];

impl Semester {
    pub const COUNT: u8 = 10;

    /// Builds a semester from its 1-based number; `None` outside 1..=10.
    pub fn new(number: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&number).then_some(Self(number))
    }

    /// The stable identifier, "1".."10".
    pub fn key(&self) -> String {
        self.0.to_string()
    }

    /// Parses the stable identifier form ("1".."10").
    pub fn parse_key(key: &str) -> Option<Self> {
        key.parse::<u8>().ok().and_then(Self::new)
    }

    /// The menu button label shown to users.
    pub fn label(&self) -> String {
        format!("🎓 السمستر {}", self.0)
    }

    /// Resolves a menu button label back to a semester.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::iter().find(|s| s.label() == label)
    }

    pub fn iter() -> impl Iterator<Item = Semester> {
        (1..=Self::COUNT).map(Semester)
    }

    /// Fixed course list for this semester.
    pub fn courses(&self) -> &'static [&'static str] {
        CURRICULUM[(self.0 - 1) as usize]
    }

    /// True if `course` is taught in this semester.
    pub fn has_course(&self, course: &str) -> bool {
        self.courses().contains(&course)
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolves a course label anywhere in the catalogue to its canonical
/// `(semester, course)` pair.
pub fn find_course(label: &str) -> Option<(Semester, &'static str)> {
    Semester::iter().find_map(|sem| {
        sem.courses()
            .iter()
            .find(|c| **c == label)
            .map(|c| (sem, *c))
    })
}

/// Kind of stored material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum ContentType {
    Pdf,
    Video,
    Reference,
}

impl ContentType {
    /// The menu button label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Pdf => "📄 PDF",
            ContentType::Video => "🎥 فيديو",
            ContentType::Reference => "📚 مرجع",
        }
    }

    /// Arabic display name used in reply texts.
    pub fn display_name(&self) -> &'static str {
        match self {
            ContentType::Pdf => "ملف PDF",
            ContentType::Video => "فيديو",
            ContentType::Reference => "مرجع",
        }
    }

    /// Resolves a menu button label back to a content type.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::iter().find(|ct| ct.label() == label)
    }

    /// Whether an inbound attachment of `kind` may be stored as this type.
    pub fn accepts(&self, kind: MediaKind) -> bool {
        match self {
            ContentType::Pdf | ContentType::Reference => kind == MediaKind::Document,
            ContentType::Video => kind == MediaKind::Video,
        }
    }

    /// Best-guess type for an unclassified attachment (single-file flow).
    pub fn infer_from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Video => ContentType::Video,
            MediaKind::Document => ContentType::Pdf,
            MediaKind::Photo | MediaKind::Audio => ContentType::Reference,
        }
    }

    /// Media kind the transport should send a stored file of this type as.
    pub fn media_kind(&self) -> MediaKind {
        match self {
            ContentType::Pdf | ContentType::Reference => MediaKind::Document,
            ContentType::Video => MediaKind::Video,
        }
    }
}

/// Media kind of an inbound or outbound attachment, as the transport sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Document,
    Video,
    Photo,
    Audio,
}
