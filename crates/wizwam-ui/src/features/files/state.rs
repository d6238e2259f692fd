//! File catalog state and the filter/sort pipeline.
//!
//! # Design
//! - The catalog cache is replaced wholesale on every successful reload.
//! - Search and sort are applied on read; the cache itself is never
//!   reordered.
//! - Sorting is stable; missing timestamps and sizes count as zero.
//! - Names compare with Unicode root collation, so accented names sort next
//!   to their base letter.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_provider::DataLocale;
use wizwam_api_models::FileRecord;

use crate::core::logic::file_count;

/// Placeholder when the cache is empty.
pub const EMPTY_CATALOG: &str = "No files downloaded yet.";
/// Placeholder when a search matches nothing.
pub const NO_MATCHES: &str = "No files match your search.";
/// Placeholder after a failed reload.
pub const LOAD_FAILED: &str = "Error loading files.";
/// Size text when the server sent none.
pub const UNKNOWN_SIZE: &str = "Unknown size";

/// One catalog row.
#[derive(Clone, Debug, PartialEq)]
pub struct FileEntry {
    /// File name; also the key for every action.
    pub name: String,
    /// Preformatted size label.
    pub size_label: Option<String>,
    /// Size in bytes (0 when unknown).
    pub size_bytes: u64,
    /// Modification time in seconds (0 when unknown).
    pub modified: f64,
    /// A network-storage copy exists.
    pub has_remote_copy: bool,
}

impl FileEntry {
    /// Size text for display.
    #[must_use]
    pub fn size_text(&self) -> &str {
        self.size_label
            .as_deref()
            .filter(|label| !label.is_empty())
            .unwrap_or(UNKNOWN_SIZE)
    }
}

impl From<FileRecord> for FileEntry {
    fn from(record: FileRecord) -> Self {
        Self {
            name: record.display_name().to_string(),
            size_label: record.size_mb,
            size_bytes: record.size.unwrap_or(0),
            modified: record.modified.unwrap_or(0.0),
            has_remote_copy: record.nas_copy,
        }
    }
}

/// Catalog ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Most recently modified first.
    #[default]
    Newest,
    /// Least recently modified first.
    Oldest,
    /// Name A→Z.
    NameAsc,
    /// Name Z→A.
    NameDesc,
    /// Largest first.
    SizeDesc,
    /// Smallest first.
    SizeAsc,
}

impl SortKey {
    /// Every key in menu order.
    pub const ALL: [Self; 6] = [
        Self::Newest,
        Self::Oldest,
        Self::NameAsc,
        Self::NameDesc,
        Self::SizeDesc,
        Self::SizeAsc,
    ];

    /// Parse a select value; unknown values fall back to [`SortKey::Newest`].
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        match value {
            "oldest" => Self::Oldest,
            "name-asc" => Self::NameAsc,
            "name-desc" => Self::NameDesc,
            "size-desc" => Self::SizeDesc,
            "size-asc" => Self::SizeAsc,
            _ => Self::Newest,
        }
    }

    /// Select value.
    #[must_use]
    pub const fn as_value(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::SizeDesc => "size-desc",
            Self::SizeAsc => "size-asc",
        }
    }

    /// Menu caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
            Self::NameAsc => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::SizeDesc => "Largest first",
            Self::SizeAsc => "Smallest first",
        }
    }

    fn compare(self, a: &FileEntry, b: &FileEntry) -> Ordering {
        match self {
            Self::Newest => b.modified.total_cmp(&a.modified),
            Self::Oldest => a.modified.total_cmp(&b.modified),
            Self::NameAsc => compare_names(&a.name, &b.name),
            Self::NameDesc => compare_names(&b.name, &a.name),
            Self::SizeDesc => b.size_bytes.cmp(&a.size_bytes),
            Self::SizeAsc => a.size_bytes.cmp(&b.size_bytes),
        }
    }
}

thread_local! {
    // Root collation: accents and case are secondary to the base letter.
    static NAME_COLLATOR: Option<Collator> =
        Collator::try_new(&DataLocale::default(), CollatorOptions::new()).ok();
}

fn compare_names(a: &str, b: &str) -> Ordering {
    NAME_COLLATOR
        .with(|collator| collator.as_ref().map(|collator| collator.compare(a, b)))
        .unwrap_or_else(|| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| b.cmp(a))
        })
}

/// Last reload result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CatalogLoad {
    /// No reload finished yet.
    #[default]
    Pending,
    /// Cache reflects the last successful reload.
    Loaded,
    /// Last reload failed; the cache still holds earlier results.
    Failed(String),
}

/// Catalog slice of the app store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogState {
    /// Cached rows in server order.
    pub files: Vec<FileEntry>,
    /// Raw search text.
    pub search: String,
    /// Selected ordering.
    pub sort: SortKey,
    /// Last reload result.
    pub load: CatalogLoad,
}

/// Replace the cache after a successful reload.
pub fn set_files(state: &mut CatalogState, records: Vec<FileRecord>) {
    state.files = records.into_iter().map(FileEntry::from).collect();
    state.load = CatalogLoad::Loaded;
}

/// Record a failed reload; the cache is kept.
pub fn mark_failed(state: &mut CatalogState, detail: impl Into<String>) {
    state.load = CatalogLoad::Failed(detail.into());
}

/// Why the list renders no rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyReason {
    /// First reload still running.
    Loading,
    /// Cache is empty.
    NoFiles,
    /// Search matched nothing.
    NoMatches,
    /// Reload failed.
    LoadFailed,
}

impl EmptyReason {
    /// Placeholder text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Loading => "Loading files...",
            Self::NoFiles => EMPTY_CATALOG,
            Self::NoMatches => NO_MATCHES,
            Self::LoadFailed => LOAD_FAILED,
        }
    }
}

/// Result of the pipeline, ready to render.
#[derive(Clone, Debug, PartialEq)]
pub struct FileView {
    /// Rows to render, filtered and sorted.
    pub entries: Vec<FileEntry>,
    /// Size of the cache.
    pub total: usize,
    /// Header count text.
    pub count_label: String,
}

impl FileView {
    /// Placeholder reason when `entries` is empty.
    #[must_use]
    pub fn empty_reason(&self, searching: bool) -> Option<EmptyReason> {
        if !self.entries.is_empty() {
            return None;
        }
        if self.total == 0 {
            Some(EmptyReason::NoFiles)
        } else if searching {
            Some(EmptyReason::NoMatches)
        } else {
            None
        }
    }
}

/// Header count text.
#[must_use]
pub fn count_label(shown: usize, total: usize, searching: bool) -> String {
    if searching {
        format!("Showing {shown} of {total} files")
    } else {
        file_count(shown)
    }
}

/// Filter by case-insensitive substring on the name, then sort.
#[must_use]
pub fn filter_and_sort(files: &[FileEntry], search: &str, sort: SortKey) -> FileView {
    let needle = search.to_lowercase();
    let mut entries: Vec<FileEntry> = files
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    entries.sort_by(|a, b| sort.compare(a, b));
    let searching = !search.is_empty();
    FileView {
        count_label: count_label(entries.len(), files.len(), searching),
        total: files.len(),
        entries,
    }
}

/// Run the pipeline over the store slice.
#[must_use]
pub fn select_view(state: &CatalogState) -> FileView {
    filter_and_sort(&state.files, &state.search, state.sort)
}

/// Placeholder for the store slice, taking load state into account.
#[must_use]
pub fn select_placeholder(state: &CatalogState, view: &FileView) -> Option<EmptyReason> {
    match &state.load {
        CatalogLoad::Failed(_) => Some(EmptyReason::LoadFailed),
        CatalogLoad::Pending if state.files.is_empty() => Some(EmptyReason::Loading),
        _ => view.empty_reason(!state.search.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, size: u64, modified: f64) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            size_label: None,
            size_bytes: size,
            modified,
            has_remote_copy: false,
        }
    }

    fn names(view: &FileView) -> Vec<&str> {
        view.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    fn sample() -> Vec<FileEntry> {
        vec![
            entry("b.mp4", 5, 100.0),
            entry("A.mkv", 10, 300.0),
            entry("c.webm", 1, 200.0),
        ]
    }

    #[test]
    fn sort_keys_parse_with_newest_fallback() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_value(key.as_value()), key);
        }
        assert_eq!(SortKey::from_value("bogus"), SortKey::Newest);
        assert_eq!(SortKey::from_value(""), SortKey::Newest);
    }

    #[test]
    fn every_ordering_sorts_as_named() {
        let files = sample();
        let order = |key| names(&filter_and_sort(&files, "", key)).join(",");
        assert_eq!(order(SortKey::Newest), "A.mkv,c.webm,b.mp4");
        assert_eq!(order(SortKey::Oldest), "b.mp4,c.webm,A.mkv");
        assert_eq!(order(SortKey::NameAsc), "A.mkv,b.mp4,c.webm");
        assert_eq!(order(SortKey::NameDesc), "c.webm,b.mp4,A.mkv");
        assert_eq!(order(SortKey::SizeDesc), "A.mkv,b.mp4,c.webm");
        assert_eq!(order(SortKey::SizeAsc), "c.webm,b.mp4,A.mkv");
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let files = sample();
        let view = filter_and_sort(&files, "MK", SortKey::Newest);
        assert_eq!(names(&view), vec!["A.mkv"]);
        assert_eq!(view.count_label, "Showing 1 of 3 files");
        assert_eq!(view.total, 3);
    }

    #[test]
    fn count_label_pluralises_without_search() {
        assert_eq!(filter_and_sort(&[], "", SortKey::Newest).count_label, "0 files");
        assert_eq!(
            filter_and_sort(&[entry("x", 0, 0.0)], "", SortKey::Newest).count_label,
            "1 file"
        );
        assert_eq!(count_label(2, 5, true), "Showing 2 of 5 files");
    }

    #[test]
    fn stable_sort_keeps_cache_order_for_ties() {
        let files = vec![entry("first", 1, 0.0), entry("second", 1, 0.0)];
        let view = filter_and_sort(&files, "", SortKey::SizeDesc);
        assert_eq!(names(&view), vec!["first", "second"]);
        let view = filter_and_sort(&files, "", SortKey::Newest);
        assert_eq!(names(&view), vec!["first", "second"]);
    }

    #[test]
    fn pipeline_does_not_touch_cache() {
        let files = sample();
        let before = files.clone();
        let _ = filter_and_sort(&files, "b", SortKey::NameDesc);
        assert_eq!(files, before);
    }

    #[test]
    fn accented_names_sort_beside_their_base_letter() {
        let files = vec![
            entry("zebra.mp4", 0, 0.0),
            entry("École.mp4", 0, 0.0),
            entry("apple.mp4", 0, 0.0),
        ];
        let view = filter_and_sort(&files, "", SortKey::NameAsc);
        assert_eq!(names(&view), vec!["apple.mp4", "École.mp4", "zebra.mp4"]);
        let view = filter_and_sort(&files, "", SortKey::NameDesc);
        assert_eq!(names(&view), vec!["zebra.mp4", "École.mp4", "apple.mp4"]);
        assert_eq!(compare_names("eclair", "éclair"), Ordering::Less);
    }

    #[test]
    fn names_fold_case_and_put_lowercase_first() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("a", "A"), Ordering::Less);
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
    }

    #[test]
    fn records_map_with_fallbacks() {
        let entry = FileEntry::from(FileRecord {
            filename: Some("legacy.mp4".into()),
            nas_copy: true,
            ..FileRecord::default()
        });
        assert_eq!(entry.name, "legacy.mp4");
        assert_eq!(entry.size_text(), UNKNOWN_SIZE);
        assert_eq!(entry.size_bytes, 0);
        assert!(entry.modified.abs() < f64::EPSILON);
        assert!(entry.has_remote_copy);
    }

    #[test]
    fn placeholders_follow_state() {
        let mut state = CatalogState::default();
        let view = select_view(&state);
        assert_eq!(select_placeholder(&state, &view), Some(EmptyReason::Loading));

        set_files(&mut state, Vec::new());
        let view = select_view(&state);
        assert_eq!(select_placeholder(&state, &view), Some(EmptyReason::NoFiles));
        assert_eq!(EmptyReason::NoFiles.message(), EMPTY_CATALOG);

        set_files(
            &mut state,
            vec![FileRecord {
                name: Some("clip.mp4".into()),
                ..FileRecord::default()
            }],
        );
        state.search = "zzz".into();
        let view = select_view(&state);
        assert_eq!(select_placeholder(&state, &view), Some(EmptyReason::NoMatches));

        state.search.clear();
        let view = select_view(&state);
        assert_eq!(select_placeholder(&state, &view), None);
    }

    #[test]
    fn failed_reload_keeps_cache_until_next_success() {
        let mut state = CatalogState::default();
        set_files(
            &mut state,
            vec![FileRecord {
                name: Some("kept.mp4".into()),
                ..FileRecord::default()
            }],
        );
        mark_failed(&mut state, "offline");
        assert_eq!(state.files.len(), 1);
        let view = select_view(&state);
        assert_eq!(select_placeholder(&state, &view), Some(EmptyReason::LoadFailed));

        set_files(&mut state, Vec::new());
        assert_eq!(state.load, CatalogLoad::Loaded);
    }
}
