//! File explorer panel state
//!
//! The explorer shows the directory tree under a root as a flat list of
//! visible entries. Directories come before files and each group is sorted
//! case-insensitively. Hidden entries are skipped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fileops::FileOps;

/// One visible row of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerEntry {
    pub path: PathBuf,
    pub name: String,
    pub depth: usize,
    pub is_dir: bool,
    pub expanded: bool,
}

/// Explorer panel state
#[derive(Debug)]
pub struct Explorer {
    root: PathBuf,
    entries: Vec<ExplorerEntry>,
    expanded: HashSet<PathBuf>,
    selected: usize,
    /// Whether the panel is drawn
    pub visible: bool,
    /// Panel width in columns
    pub width: u16,
}

impl Explorer {
    pub fn new(root: PathBuf, visible: bool, width: u16) -> Self {
        Self {
            root,
            entries: Vec::new(),
            expanded: HashSet::new(),
            selected: 0,
            visible,
            width,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[ExplorerEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&ExplorerEntry> {
        self.entries.get(self.selected)
    }

    /// Directory new entries should be created in: the selected directory,
    /// the parent of the selected file, or the root
    pub fn target_dir(&self) -> PathBuf {
        match self.selected() {
            Some(entry) if entry.is_dir => entry.path.clone(),
            Some(entry) => entry
                .path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.root.clone()),
            None => self.root.clone(),
        }
    }

    /// Rebuild the visible list from disk, keeping expansion and selection
    pub fn refresh(&mut self, fs: &dyn FileOps) -> Result<()> {
        let selected_path = self.selected().map(|e| e.path.clone());

        let mut entries = Vec::new();
        self.collect(fs, &self.root, 0, &mut entries)?;
        self.entries = entries;
        // Forget expanded directories that no longer exist
        let present: HashSet<&PathBuf> = self.entries.iter().filter(|e| e.is_dir).map(|e| &e.path).collect();
        self.expanded.retain(|p| present.contains(p));

        self.selected = selected_path
            .and_then(|path| self.entries.iter().position(|e| e.path == path))
            .unwrap_or(self.selected)
            .min(self.entries.len().saturating_sub(1));
        Ok(())
    }

    fn collect(
        &self,
        fs: &dyn FileOps,
        dir: &Path,
        depth: usize,
        out: &mut Vec<ExplorerEntry>,
    ) -> Result<()> {
        let mut listing = fs.list_dir(dir)?;
        listing.retain(|e| !e.name.starts_with('.'));
        listing.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        for item in listing {
            let expanded = item.is_dir && self.expanded.contains(&item.path);
            out.push(ExplorerEntry {
                path: item.path.clone(),
                name: item.name,
                depth,
                is_dir: item.is_dir,
                expanded,
            });
            if expanded {
                // An unreadable subdirectory shows as empty
                if let Err(e) = self.collect(fs, &item.path, depth + 1, out) {
                    log::warn!("cannot list {}: {}", item.path.display(), e);
                }
            }
        }
        Ok(())
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Select the entry with this path, if it is visible
    pub fn select_path(&mut self, path: &Path) -> bool {
        match self.entries.iter().position(|e| e.path == path) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    /// Expand or collapse the selected directory
    pub fn toggle_selected(&mut self, fs: &dyn FileOps) -> Result<()> {
        let Some(entry) = self.selected() else {
            return Ok(());
        };
        if !entry.is_dir {
            return Ok(());
        }
        let path = entry.path.clone();
        if !self.expanded.remove(&path) {
            self.expanded.insert(path);
        }
        self.refresh(fs)
    }

    /// Collapse the selected directory, or move to the parent directory row
    pub fn collapse_selected(&mut self, fs: &dyn FileOps) -> Result<()> {
        let Some(entry) = self.selected() else {
            return Ok(());
        };
        if entry.is_dir && entry.expanded {
            let path = entry.path.clone();
            self.expanded.remove(&path);
            return self.refresh(fs);
        }
        if let Some(parent) = entry.path.parent().map(Path::to_path_buf) {
            self.select_path(&parent);
        }
        Ok(())
    }

    /// Index of the first entry to draw so the selection fits in `height` rows
    pub fn scroll_offset(&self, height: usize) -> usize {
        if height == 0 || self.selected < height {
            0
        } else {
            self.selected + 1 - height
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fileops::DiskFs;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir(root.join("src")).unwrap();
        std::fs::create_dir(root.join("Docs")).unwrap();
        std::fs::write(root.join("src").join("main.py"), "").unwrap();
        std::fs::write(root.join("index.html"), "").unwrap();
        std::fs::write(root.join("README"), "").unwrap();
        std::fs::write(root.join(".hidden"), "").unwrap();
        dir
    }

    fn names(explorer: &Explorer) -> Vec<String> {
        explorer
            .entries()
            .iter()
            .map(|e| format!("{}{}", "  ".repeat(e.depth), e.name))
            .collect()
    }

    #[test]
    fn test_directories_first_sorted() {
        let dir = tree();
        let mut explorer = Explorer::new(dir.path().to_path_buf(), true, 28);
        explorer.refresh(&DiskFs).unwrap();
        assert_eq!(names(&explorer), vec!["Docs", "src", "index.html", "README"]);
    }

    #[test]
    fn test_expand_and_collapse() {
        let dir = tree();
        let fs = DiskFs;
        let mut explorer = Explorer::new(dir.path().to_path_buf(), true, 28);
        explorer.refresh(&fs).unwrap();

        explorer.select_next();
        assert_eq!(explorer.selected().unwrap().name, "src");
        explorer.toggle_selected(&fs).unwrap();
        assert_eq!(names(&explorer), vec!["Docs", "src", "  main.py", "index.html", "README"]);
        assert!(explorer.entries()[1].expanded);

        explorer.select_next();
        assert_eq!(explorer.target_dir(), dir.path().join("src"));

        // Collapsing from a child moves to the parent row
        explorer.collapse_selected(&fs).unwrap();
        assert_eq!(explorer.selected().unwrap().name, "src");
        explorer.collapse_selected(&fs).unwrap();
        assert_eq!(names(&explorer), vec!["Docs", "src", "index.html", "README"]);
    }

    #[test]
    fn test_refresh_keeps_selection_and_expansion() {
        let dir = tree();
        let fs = DiskFs;
        let mut explorer = Explorer::new(dir.path().to_path_buf(), true, 28);
        explorer.refresh(&fs).unwrap();
        explorer.select_path(&dir.path().join("src"));
        explorer.toggle_selected(&fs).unwrap();
        explorer.select_path(&dir.path().join("index.html"));

        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        explorer.refresh(&fs).unwrap();

        assert_eq!(explorer.selected().unwrap().name, "index.html");
        assert!(names(&explorer).contains(&"  main.py".to_string()));
        assert!(names(&explorer).contains(&"a.txt".to_string()));
    }

    #[test]
    fn test_selection_clamped_after_delete() {
        let dir = tree();
        let fs = DiskFs;
        let mut explorer = Explorer::new(dir.path().to_path_buf(), true, 28);
        explorer.refresh(&fs).unwrap();
        explorer.select_path(&dir.path().join("README"));
        std::fs::remove_file(dir.path().join("README")).unwrap();

        explorer.refresh(&fs).unwrap();
        assert_eq!(explorer.selected().unwrap().name, "index.html");
    }

    #[test]
    fn test_target_dir_defaults_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut explorer = Explorer::new(dir.path().to_path_buf(), true, 28);
        explorer.refresh(&DiskFs).unwrap();
        assert!(explorer.selected().is_none());
        assert_eq!(explorer.target_dir(), dir.path());
    }

    #[test]
    fn test_scroll_offset() {
        let mut explorer = Explorer::new(PathBuf::from("."), true, 28);
        assert_eq!(explorer.scroll_offset(10), 0);
        explorer.selected = 14;
        assert_eq!(explorer.scroll_offset(10), 5);
        assert_eq!(explorer.scroll_offset(0), 0);
    }
}
