use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use gix::bstr::ByteSlice;
use tracing::debug;

use crate::source::all_filesystem_paths;
use crate::{LintError, Result};

/// Returns the set of files changed compared to a git reference.
pub trait ChangedFiles {
    /// Files changed between `base_ref` and HEAD, plus staged, unstaged and
    /// untracked files, as `/`-separated paths relative to the work tree.
    ///
    /// # Errors
    /// Returns an error if the reference cannot be parsed or the repository cannot be accessed.
    fn get_changed_files(&self, base_ref: &str) -> Result<BTreeSet<String>>;
}

/// Git diff implementation using gix.
pub struct GitDiff {
    repo_path: PathBuf,
    workdir: PathBuf,
}

type TreePaths = HashMap<String, gix::ObjectId>;

impl GitDiff {
    /// Create a new `GitDiff` for the repository containing the given path.
    ///
    /// # Errors
    /// Returns an error if no git repository is found.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = gix::discover(path)
            .map_err(|e| LintError::Git(format!("Failed to discover git repository: {e}")))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| LintError::Git("Repository has no working directory".into()))?
            .to_path_buf();
        Ok(Self {
            repo_path: repo.path().to_path_buf(),
            workdir,
        })
    }

    /// Get the working directory of the repository.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn open_repo(&self) -> Result<gix::Repository> {
        gix::open(&self.repo_path)
            .map_err(|e| LintError::Git(format!("Failed to open git repository: {e}")))
    }

    fn collect_tree_paths(tree: &gix::Tree<'_>) -> Result<TreePaths> {
        let mut paths = HashMap::new();
        Self::collect_tree_paths_recursive(tree, "", &mut paths)?;
        Ok(paths)
    }

    fn collect_tree_paths_recursive(
        tree: &gix::Tree<'_>,
        prefix: &str,
        paths: &mut TreePaths,
    ) -> Result<()> {
        for entry in tree.iter() {
            let entry =
                entry.map_err(|e| LintError::Git(format!("Failed to read tree entry: {e}")))?;
            let name = std::str::from_utf8(entry.filename())
                .map_err(|e| LintError::Git(format!("Invalid filename encoding: {e}")))?;
            let path = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}/{name}")
            };

            match entry.mode().kind() {
                gix::object::tree::EntryKind::Blob
                | gix::object::tree::EntryKind::BlobExecutable
                | gix::object::tree::EntryKind::Link => {
                    paths.insert(path, entry.oid().into());
                }
                gix::object::tree::EntryKind::Tree => {
                    let subtree = entry.object().map_err(|e| {
                        LintError::Git(format!("Failed to get subtree object: {e}"))
                    })?;
                    let subtree = subtree.into_tree();
                    Self::collect_tree_paths_recursive(&subtree, &path, paths)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn head_paths(repo: &gix::Repository) -> Result<TreePaths> {
        // New repos have no commits yet.
        match repo.head_commit() {
            Ok(commit) => {
                let head_tree = commit
                    .tree()
                    .map_err(|e| LintError::Git(format!("Failed to get HEAD tree: {e}")))?;
                Self::collect_tree_paths(&head_tree)
            }
            Err(_) => Ok(HashMap::new()),
        }
    }

    /// Get files staged for commit (index differs from HEAD).
    ///
    /// # Errors
    /// Returns an error if the repository cannot be accessed.
    pub fn get_staged_files(&self) -> Result<BTreeSet<String>> {
        let repo = self.open_repo()?;
        let index = repo
            .index_or_empty()
            .map_err(|e| LintError::Git(format!("Failed to open git index: {e}")))?;
        let head_paths = Self::head_paths(&repo)?;

        let mut staged_files = BTreeSet::new();
        for entry in index.entries() {
            let path = entry.path(&index).to_str_lossy().into_owned();
            let is_staged = head_paths
                .get(&path)
                .is_none_or(|head_oid| *head_oid != entry.id);
            if is_staged {
                staged_files.insert(path);
            }
        }

        Ok(staged_files)
    }

    /// Get tracked files whose work tree copy no longer matches the index
    /// stat data. Deleted files are left out.
    ///
    /// # Errors
    /// Returns an error if the repository cannot be accessed.
    pub fn get_unstaged_files(&self) -> Result<BTreeSet<String>> {
        let repo = self.open_repo()?;
        let index = repo
            .index_or_empty()
            .map_err(|e| LintError::Git(format!("Failed to open git index: {e}")))?;

        let mut unstaged = BTreeSet::new();
        for entry in index.entries() {
            let path = entry.path(&index).to_str_lossy().into_owned();
            let Ok(meta) = fs::symlink_metadata(self.workdir.join(&path)) else {
                continue;
            };
            if !meta.is_file() {
                continue;
            }
            let mtime = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map_or(0, |d| d.as_secs());
            let size_differs = u64::from(entry.stat.size) != meta.len() % (1 << 32);
            let mtime_differs = u64::from(entry.stat.mtime.secs) != mtime % (1 << 32);
            if size_differs || mtime_differs {
                unstaged.insert(path);
            }
        }

        Ok(unstaged)
    }

    /// Get files that are neither tracked nor ignored.
    ///
    /// # Errors
    /// Returns an error if the repository cannot be accessed.
    pub fn get_untracked_files(&self) -> Result<BTreeSet<String>> {
        let repo = self.open_repo()?;
        let index = repo
            .index_or_empty()
            .map_err(|e| LintError::Git(format!("Failed to get git index: {e}")))?;
        let tracked: HashSet<String> = index
            .entries()
            .iter()
            .map(|entry| entry.path(&index).to_str_lossy().into_owned())
            .collect();

        Ok(all_filesystem_paths(&self.workdir, &self.workdir)
            .into_iter()
            .filter(|path| !tracked.contains(path))
            .collect())
    }

    /// Get files changed between two git references.
    ///
    /// Files deleted on the way to `target_ref` are included when they still
    /// exist in the work tree.
    ///
    /// # Errors
    /// Returns an error if either reference cannot be parsed or the repository cannot be accessed.
    pub fn get_changed_files_range(
        &self,
        base_ref: &str,
        target_ref: &str,
    ) -> Result<BTreeSet<String>> {
        let repo = self.open_repo()?;
        let base_paths = Self::tree_paths_at(&repo, base_ref)?;
        let target_paths = Self::tree_paths_at(&repo, target_ref)?;

        let mut changed_files = BTreeSet::new();
        for (path, oid) in &target_paths {
            if base_paths.get(path) != Some(oid) {
                changed_files.insert(path.clone());
            }
        }
        for path in base_paths.keys() {
            if !target_paths.contains_key(path) && self.workdir.join(path).exists() {
                changed_files.insert(path.clone());
            }
        }

        Ok(changed_files)
    }

    fn tree_paths_at(repo: &gix::Repository, reference: &str) -> Result<TreePaths> {
        let commit = repo
            .rev_parse_single(reference)
            .map_err(|e| {
                LintError::Git(format!("Failed to parse reference '{reference}': {e}"))
            })?
            .object()
            .map_err(|e| {
                LintError::Git(format!("Failed to get object for '{reference}': {e}"))
            })?
            .peel_to_commit()
            .map_err(|e| {
                LintError::Git(format!("Failed to peel to commit '{reference}': {e}"))
            })?;
        let tree = commit
            .tree()
            .map_err(|e| LintError::Git(format!("Failed to get tree for '{reference}': {e}")))?;
        Self::collect_tree_paths(&tree)
    }

    fn has_head(&self) -> Result<bool> {
        Ok(self.open_repo()?.head_commit().is_ok())
    }
}

impl ChangedFiles for GitDiff {
    fn get_changed_files(&self, base_ref: &str) -> Result<BTreeSet<String>> {
        let mut changed = if self.has_head()? {
            self.get_changed_files_range(base_ref, "HEAD")?
        } else {
            BTreeSet::new()
        };
        let committed = changed.len();
        let staged = self.get_staged_files()?;
        let unstaged = self.get_unstaged_files()?;
        let untracked = self.get_untracked_files()?;
        debug!(
            "changed files: {committed} committed, {} staged, {} unstaged, {} untracked",
            staged.len(),
            unstaged.len(),
            untracked.len()
        );
        changed.extend(staged);
        changed.extend(unstaged);
        changed.extend(untracked);
        Ok(changed)
    }
}
