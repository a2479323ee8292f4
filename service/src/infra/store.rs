//! [`Store`]-related implementations.

use std::{collections::BTreeMap, io, path::PathBuf, sync::Arc};

use common::operations::{By, Select, Update};
use derive_more::{Display, Error as StdError, From};
use tokio::{fs, sync::Mutex};
use tracerr::Traced;

use crate::domain::{user, Preferences};

/// Operation of the local [`Preferences`] storage.
pub use common::Handler as Store;

/// [`Store`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to read or write the [`Store`] file.
    #[display("`Store` I/O failed: {_0}")]
    Io(io::Error),

    /// [`Store`] file contents are not valid JSON of [`Preferences`].
    #[display("`Store` contents are malformed: {_0}")]
    Json(serde_json::Error),
}

/// [`Store`] keeping all the [`Preferences`] in a single JSON file.
///
/// The file is read once on [`File::load()`] and rewritten after every
/// update.
#[derive(Clone, Debug)]
pub struct File {
    /// Path to the JSON file.
    path: PathBuf,

    /// [`Preferences`] by their owners.
    state: Arc<Mutex<BTreeMap<user::Id, Preferences>>>,
}

impl File {
    /// Loads a [`File`] store from the provided `path`.
    ///
    /// A missing file is treated as an empty [`Store`].
    ///
    /// # Errors
    ///
    /// If the file cannot be read or its contents are malformed.
    pub async fn load(
        path: impl Into<PathBuf>,
    ) -> Result<Self, Traced<Error>> {
        let path = path.into();

        let state = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(tracerr::from_and_wrap!(=> Error))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(tracerr::new!(Error::Io(e))),
        };

        Ok(Self {
            path,
            state: Arc::new(Mutex::new(state)),
        })
    }

    /// Writes the provided `state` to the file of this [`File`] store.
    ///
    /// Contents are written to a sibling file first and then renamed, so
    /// the file is never observed half-written.
    async fn save(
        &self,
        state: &BTreeMap<user::Id, Preferences>,
    ) -> Result<(), Traced<Error>> {
        let bytes = serde_json::to_vec_pretty(state)
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

impl Store<Select<By<Preferences, user::Id>>> for File {
    type Ok = Preferences;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Preferences, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .state
            .lock()
            .await
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Preferences::new(id)))
    }
}

impl Store<Update<Preferences>> for File {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update(prefs): Update<Preferences>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state.lock().await;
        let prev = state.insert(prefs.user_id, prefs.clone());

        let res = self.save(&state).await;
        if res.is_err() {
            // Keep memory consistent with the file.
            match prev {
                Some(p) => drop(state.insert(p.user_id, p)),
                None => drop(state.remove(&prefs.user_id)),
            }
        }
        res.map_err(tracerr::wrap!())
    }
}
