//! Asset pools — the candidate sets slots draw from
//!
//! A [`PoolSpec`] names a category and, for dependent slots, how the parent
//! pick scopes it. An [`AssetSource`] lists raw candidates. [`AssetPool`] is
//! the resolved, filtered, non-empty result of one query. Pools are resolved
//! fresh on every draw; nothing is cached across a context change.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{RevealError, RevealResult};
use crate::label;

/// How a parent pick maps to the scoped sub-pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKey {
    /// Parent id without extension: `"Medkit.png"` → `"Medkit"`
    Stem,
    /// Parent label with spaces removed: `"TheTrapper.png"` → `"THETRAPPER"`
    CompactLabel,
}

impl ScopeKey {
    pub fn derive(&self, parent: &str) -> String {
        match self {
            ScopeKey::Stem => label::stem(parent).to_string(),
            ScopeKey::CompactLabel => label::compact_label(parent),
        }
    }
}

/// Declarative description of a slot's pool
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolSpec {
    /// Category identifier, e.g. "killer_perks"
    pub category: String,
    /// Set for pools that depend on a parent pick
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeKey>,
    /// Candidates starting with this prefix are never drawn (placeholders)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_prefix: Option<String>,
}

impl PoolSpec {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            scope: None,
            exclude_prefix: None,
        }
    }

    pub fn scoped(category: impl Into<String>, scope: ScopeKey) -> Self {
        Self {
            scope: Some(scope),
            ..Self::new(category)
        }
    }

    pub fn excluding(mut self, prefix: impl Into<String>) -> Self {
        self.exclude_prefix = Some(prefix.into());
        self
    }

    pub fn is_scoped(&self) -> bool {
        self.scope.is_some()
    }

    /// Scope key for a parent pick, `None` for unscoped pools
    pub fn context_for(&self, parent: Option<&str>) -> Option<String> {
        match (self.scope, parent) {
            (Some(scope), Some(parent)) => Some(scope.derive(parent)),
            _ => None,
        }
    }
}

/// Lists raw candidates for a category
pub trait AssetSource {
    /// `scope` is the derived scope key for dependent pools
    fn list(&self, category: &str, scope: Option<&str>) -> RevealResult<Vec<String>>;
}

impl<T: AssetSource + ?Sized> AssetSource for Box<T> {
    fn list(&self, category: &str, scope: Option<&str>) -> RevealResult<Vec<String>> {
        (**self).list(category, scope)
    }
}

impl<T: AssetSource + ?Sized> AssetSource for &T {
    fn list(&self, category: &str, scope: Option<&str>) -> RevealResult<Vec<String>> {
        (**self).list(category, scope)
    }
}

/// In-memory source
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pools: HashMap<(String, Option<String>), Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool<I, S>(mut self, category: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(category, None, ids);
        self
    }

    pub fn with_scoped_pool<I, S>(
        mut self,
        category: impl Into<String>,
        scope: impl Into<String>,
        ids: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(category, Some(scope.into()), ids);
        self
    }

    pub fn insert<I, S>(&mut self, category: impl Into<String>, scope: Option<String>, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pools.insert(
            (category.into(), scope),
            ids.into_iter().map(Into::into).collect(),
        );
    }
}

impl AssetSource for MemorySource {
    fn list(&self, category: &str, scope: Option<&str>) -> RevealResult<Vec<String>> {
        let key = (category.to_string(), scope.map(str::to_string));
        match (self.pools.get(&key), scope) {
            (Some(ids), _) => Ok(ids.clone()),
            (None, Some(scope)) => Err(RevealError::UnreachableDependent {
                category: category.to_string(),
                parent: scope.to_string(),
            }),
            (None, None) => Ok(Vec::new()),
        }
    }
}

/// Directory-backed source: `root/<category>[/<scope>]/*.<extension>`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    extension: String,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: "png".to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }
}

impl AssetSource for DirectorySource {
    fn list(&self, category: &str, scope: Option<&str>) -> RevealResult<Vec<String>> {
        let mut dir = self.root.join(category);
        if let Some(scope) = scope {
            dir.push(scope);
        }

        if !dir.is_dir() {
            return match scope {
                Some(scope) => Err(RevealError::UnreachableDependent {
                    category: category.to_string(),
                    parent: scope.to_string(),
                }),
                None => Ok(Vec::new()),
            };
        }

        let mut ids = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() && self.matches_extension(entry.path()) {
                if let Some(name) = entry.file_name().to_str() {
                    ids.push(name.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Identity of a resolved pool; slots with equal keys draw from the same set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoolKey {
    pub category: String,
    pub context: Option<String>,
    pub exclude_prefix: Option<String>,
}

impl PoolKey {
    /// Would `spec`, scoped by `parent`, resolve to this pool
    pub fn matches(&self, spec: &PoolSpec, parent: Option<&str>) -> bool {
        spec.category == self.category
            && spec.exclude_prefix == self.exclude_prefix
            && spec.context_for(parent) == self.context
    }
}

/// A resolved, non-empty candidate set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPool {
    category: String,
    context: Option<String>,
    exclude_prefix: Option<String>,
    candidates: Vec<String>,
}

impl AssetPool {
    /// Query `source` for `spec`, scoped by `parent` when the pool is dependent.
    ///
    /// Fails with `EmptyPool` when nothing survives filtering, including the
    /// case of a scoped pool with no parent pick.
    pub fn resolve(
        spec: &PoolSpec,
        source: &dyn AssetSource,
        parent: Option<&str>,
    ) -> RevealResult<Self> {
        let context = spec.context_for(parent);
        if spec.is_scoped() && context.is_none() {
            return Err(RevealError::empty_pool(&spec.category, None));
        }

        let mut candidates = source.list(&spec.category, context.as_deref())?;
        if let Some(prefix) = &spec.exclude_prefix {
            candidates.retain(|c| !c.starts_with(prefix.as_str()));
        }
        candidates.sort();
        candidates.dedup();

        if candidates.is_empty() {
            return Err(RevealError::empty_pool(&spec.category, context.as_deref()));
        }

        Ok(Self {
            category: spec.category.clone(),
            context,
            exclude_prefix: spec.exclude_prefix.clone(),
            candidates,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.candidates.iter().any(|c| c == candidate)
    }

    /// Identity of the underlying pool; slots with equal keys share a pool
    pub fn key(&self) -> PoolKey {
        PoolKey {
            category: self.category.clone(),
            context: self.context.clone(),
            exclude_prefix: self.exclude_prefix.clone(),
        }
    }

    /// Candidates minus `exclude`, or the full pool if that leaves nothing
    pub fn without<'a>(&'a self, exclude: &[&str]) -> Vec<&'a String> {
        let remaining: Vec<&String> = self
            .candidates
            .iter()
            .filter(|c| !exclude.contains(&c.as_str()))
            .collect();
        if remaining.is_empty() {
            self.candidates.iter().collect()
        } else {
            remaining
        }
    }
}
