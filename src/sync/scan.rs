//! Initial directory scan.
//!
//! Walks every source and feeds each file to [`Synchronizer::add`], the
//! same entry point watch events use. A file under nested sources is added
//! once, by the innermost source.

use std::path::PathBuf;

use jwalk::WalkDir;

use super::{Added, Sink, Source, SyncError, Synchronizer};
use crate::page::FileStat;
use crate::utils::path::normalize_path;

/// Counts from one scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub files: usize,
    pub created: usize,
    pub duplicates: usize,
    pub skipped: usize,
    /// Stopped early by Ctrl+C
    pub interrupted: bool,
}

/// Files under a source, sorted, without descending into ignored
/// directories.
pub fn collect_files(source: &Source) -> Vec<PathBuf> {
    let rules = source.clone();
    WalkDir::new(&source.dir)
        .sort(true)
        .process_read_dir(move |_depth, _dir, _state, children| {
            children.retain(|entry| match entry {
                Ok(entry) if entry.file_type().is_dir() => rules
                    .relative(&entry.path())
                    .is_none_or(|rel| !rules.is_ignored_dir(&rel)),
                _ => true,
            });
        })
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| normalize_path(&e.path()))
        .collect()
}

impl Synchronizer {
    /// Add every file currently in the source directories.
    ///
    /// Stops at the first sync error, like watch mode.
    pub fn scan(&mut self, sink: &mut dyn Sink) -> Result<ScanReport, SyncError> {
        let mut report = ScanReport::default();

        for index in 0..self.sources.len() {
            let source = &self.sources[index];
            let files = collect_files(source);
            crate::debug!("scan"; "{}: {} files", source.label, files.len());

            for path in files {
                if crate::core::is_shutdown() {
                    report.interrupted = true;
                    return Ok(report);
                }

                // Files inside a nested source belong to the innermost one,
                // the same routing watch events get.
                let Some((owner, rel)) = self.locate(&path) else {
                    continue;
                };
                if owner != index {
                    continue;
                }
                let stat = FileStat::read(&path).map_err(|err| {
                    let err = SyncError::Io {
                        path: path.clone(),
                        source: err,
                    };
                    sink.fatal(&err);
                    err
                })?;

                report.files += 1;
                match self.add(index, &rel, &stat, sink)? {
                    Added::Created(_) => report.created += 1,
                    Added::Duplicate(_) => report.duplicates += 1,
                    Added::Skipped => report.skipped += 1,
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{PlaceholderSyntax, Rules};
    use crate::sync::RecordingSink;
    use std::fs;
    use tempfile::TempDir;

    fn source(dir: PathBuf, template: PathBuf) -> Source {
        Source {
            label: "pages".into(),
            dir,
            template,
            url: "/:slug".into(),
            syntax: PlaceholderSyntax::Auto,
            rules: Rules::new(&["*.md"], &["drafts"], &["index.*"], PlaceholderSyntax::Auto)
                .unwrap(),
            debug: false,
        }
    }

    fn site() -> (TempDir, PathBuf, Source) {
        let temp = TempDir::new().unwrap();
        let root = normalize_path(temp.path());
        let pages = root.join("pages");
        for dir in ["blog", "drafts", "node_modules/pkg", ".git"] {
            fs::create_dir_all(pages.join(dir)).unwrap();
        }
        for file in [
            "index.md",
            "about.md",
            "notes.txt",
            "blog/index.md",
            "blog/first.md",
            "drafts/wip.md",
            "node_modules/pkg/readme.md",
            ".git/HEAD",
        ] {
            fs::write(pages.join(file), file).unwrap();
        }
        let template = root.join("Page.jsx");
        fs::write(&template, "").unwrap();
        let source = source(pages, template);
        (temp, root, source)
    }

    #[test]
    fn test_collect_prunes_ignored_dirs() {
        let (_temp, _root, source) = site();
        let files: Vec<String> = collect_files(&source)
            .iter()
            .filter_map(|p| source.relative(p))
            .collect();

        assert_eq!(
            files,
            vec!["about.md", "blog/first.md", "blog/index.md", "index.md", "notes.txt"]
        );
    }

    #[test]
    fn test_nested_sources_add_each_file_once() {
        let temp = TempDir::new().unwrap();
        let root = normalize_path(temp.path());
        let content = root.join("content");
        fs::create_dir_all(content.join("blog")).unwrap();
        fs::write(content.join("blog/post.md"), "post").unwrap();
        fs::write(content.join("about.md"), "about").unwrap();
        let template = root.join("Page.jsx");
        fs::write(&template, "").unwrap();

        let mut outer = source(content.clone(), template.clone());
        outer.label = "content".into();
        let mut inner = source(content.join("blog"), template);
        inner.label = "blog".into();
        inner.url = "/articles/:slug".into();

        let mut sync = Synchronizer::new(root, vec![outer, inner]);
        let mut sink = RecordingSink::new();
        let report = sync.scan(&mut sink).unwrap();

        assert_eq!(report.files, 2);
        assert_eq!(report.created, 2);
        let graph = sync.graph();
        assert_eq!(graph.len(), 2);
        assert!(graph.by_url("/articles/post").is_some());
        assert!(graph.by_url("/blog/post").is_none());

        let creates = sink
            .commands
            .iter()
            .filter(|c| matches!(c, crate::sync::Command::CreateNode(_)))
            .count();
        assert_eq!(creates, 2);
    }

    #[test]
    fn test_scan_builds_tree() {
        let (_temp, root, source) = site();
        let mut sync = Synchronizer::new(root, vec![source]);
        let mut sink = RecordingSink::new();

        let report = sync.scan(&mut sink).unwrap();
        assert_eq!(
            report,
            ScanReport {
                files: 5,
                created: 4,
                duplicates: 0,
                skipped: 1,
                interrupted: false,
            }
        );

        let graph = sync.graph();
        let home = graph.by_url("/").unwrap();
        let blog = graph.by_url("/blog").unwrap();
        let first = graph.by_url("/blog/first").unwrap();
        assert_eq!(blog.parent(), Some(&home.id));
        assert_eq!(first.parent(), Some(&blog.id));
        assert!(sink.fatals.is_empty());
    }
}
