//! One-object session: resolve a data source, then query its records

use std::path::{Path, PathBuf};

use gitdata_git::{GitCli, GitExecutor, SourceLocation, SyncEngine};

use crate::filter::RecordFilter;
use crate::record::{Record, RecordCollection};
use crate::settings::Settings;
use crate::store::{Loaded, RecordStore};
use crate::{Error, Result};

/// A resolved data source and the record store over it.
///
/// ```rust,no_run
/// use gitdata_store::{GitData, Settings, filter};
/// use gitdata_git::GitCli;
///
/// let settings = Settings::new("git@github.com:org/ocp-build-data.git")
///     .with_clone_dir("/tmp")
///     .with_branch("openshift-4.1");
/// let data = GitData::open(settings, GitCli::new())?;
///
/// let mut images = data.load_all("images", &[&filter::owner_is("someone@example.com")])?;
/// if let Some(image) = images.get_mut("cluster-autoscaler") {
///     image.set("mode", "wip");
///     image.save()?;
/// }
/// data.commit("Mark cluster-autoscaler as wip")?;
/// data.push()?;
/// # Ok::<(), gitdata_store::Error>(())
/// ```
#[derive(Debug)]
pub struct GitData<G: GitExecutor + Clone = GitCli> {
    settings: Settings,
    source: SourceLocation,
    engine: SyncEngine<G>,
    root: PathBuf,
    store: RecordStore<G>,
}

impl<G: GitExecutor + Clone> GitData<G> {
    /// Classify and resolve the configured source, then open its records.
    pub fn open(settings: Settings, git: G) -> Result<Self> {
        let location = settings.source.as_deref().ok_or(Error::MissingSource)?;
        let source = SourceLocation::parse(location)?;
        Self::open_source(settings, source, git)
    }

    /// Like [`open`](Self::open) with an already classified source; the
    /// `source` field of `settings` is ignored.
    pub fn open_source(settings: Settings, source: SourceLocation, git: G) -> Result<Self> {
        let engine = SyncEngine::new(git, &settings.clone_dir, &settings.branch);

        let root = engine.resolve(&source)?;
        let store = Self::open_store(&settings, &root, engine.git().clone())?;
        tracing::info!(source = %source, root = %root.display(), "Opened data");

        Ok(Self {
            settings,
            source,
            engine,
            root,
            store,
        })
    }

    /// Resolve the source again and reopen the store over the result.
    pub fn resync(&mut self) -> Result<()> {
        let root = self.engine.resolve(&self.source)?;
        self.store = Self::open_store(&self.settings, &root, self.engine.git().clone())?;
        self.root = root;
        Ok(())
    }

    fn open_store(settings: &Settings, root: &Path, git: G) -> Result<RecordStore<G>> {
        RecordStore::new(root, settings.sub_dir.as_deref(), git)?
            .with_extensions(&settings.extensions)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn source(&self) -> &SourceLocation {
        &self.source
    }

    /// Local directory the source resolved to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The remote URL, when the data is a clone.
    pub fn remote_url(&self) -> Option<&str> {
        self.source.url()
    }

    pub fn store(&self) -> &RecordStore<G> {
        &self.store
    }

    pub fn load(&self, path: &str, key: Option<&str>, filters: &[&dyn RecordFilter]) -> Result<Loaded> {
        self.store.load(path, key, filters)
    }

    pub fn load_all(&self, path: &str, filters: &[&dyn RecordFilter]) -> Result<RecordCollection> {
        self.store.load_all(path, filters)
    }

    pub fn load_key(&self, path: &str, key: &str) -> Result<Option<Record>> {
        self.store.load_key(path, key)
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.store.commit(message)
    }

    pub fn push(&self) -> Result<()> {
        self.store.push()
    }
}
