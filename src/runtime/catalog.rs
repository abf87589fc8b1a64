//! App entry-point resolution.
//!
//! The runtime resolves app names through this registry and never inspects
//! how a constructible type was located. An installed app's backing folder
//! carries a small JSON manifest; folders without one are scratch state and
//! are deleted when their app closes.

use blob_store::{Store, StoreError};
use serde::{Deserialize, Serialize};

use crate::core::geometry::Size;
use crate::runtime::app::App;

/// File marking a backing folder as an installed program.
pub const APP_MANIFEST: &str = "app.json";

const MANIFEST_VERSION: u32 = 1;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct AppManifest {
    pub name: String,
    pub version: u32,
}

/// Construction inputs handed to an app factory.
pub struct AppSeed {
    pub name: String,
    /// Fixed display resolution.
    pub screen: Size,
    /// Store scoped to the app's backing folder.
    pub store: Store,
    /// Launchable app names, in registration order.
    pub catalog_names: Vec<String>,
}

pub type AppFactory = Box<dyn Fn(&AppSeed) -> Box<dyn App>>;

#[derive(Default)]
pub struct AppCatalog {
    factories: Vec<(String, AppFactory)>,
}

impl AppCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`; a later registration with the same
    /// name replaces the earlier one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&AppSeed) -> Box<dyn App> + 'static,
    ) {
        let name = name.into();
        self.factories.retain(|(existing, _)| *existing != name);
        self.factories.push((name, Box::new(factory)));
    }

    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&AppFactory> {
        self.factories
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, factory)| factory)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Registered names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.factories.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Write the install manifest into an app-scoped store.
    pub fn write_manifest(app_store: &Store, name: &str) -> Result<(), StoreError> {
        let manifest = AppManifest {
            name: name.to_string(),
            version: MANIFEST_VERSION,
        };
        let bytes = serde_json::to_vec_pretty(&manifest).unwrap_or_default();
        app_store.save(APP_MANIFEST, &bytes)
    }

    /// Whether an app-scoped store holds an install manifest.
    #[must_use]
    pub fn is_installed(app_store: &Store) -> bool {
        app_store.exists(APP_MANIFEST)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCatalog, AppManifest, AppSeed};
    use crate::core::geometry::Size;
    use crate::runtime::app::App;

    struct Nop(String);

    impl App for Nop {
        fn name(&self) -> &str {
            &self.0
        }
    }

    #[test]
    fn register_resolve_and_replace() {
        let mut catalog = AppCatalog::new();
        catalog.register("files", |seed: &AppSeed| {
            Box::new(Nop(seed.name.clone())) as Box<dyn App>
        });
        catalog.register("notes", |seed: &AppSeed| {
            Box::new(Nop(seed.name.clone())) as Box<dyn App>
        });

        assert!(catalog.contains("files"));
        assert!(!catalog.contains("paint"));
        assert_eq!(catalog.names(), vec!["files", "notes"]);

        catalog.register("files", |seed: &AppSeed| {
            Box::new(Nop(format!("{}-v2", seed.name))) as Box<dyn App>
        });
        assert_eq!(catalog.names(), vec!["notes", "files"]);

        let dir = tempfile::tempdir().expect("tempdir");
        let store = blob_store::Store::open(dir.path()).expect("store");
        let seed = AppSeed {
            name: "files".to_string(),
            screen: Size::new(80, 24),
            store,
            catalog_names: catalog.names(),
        };
        let app = catalog.resolve("files").expect("factory")(&seed);
        assert_eq!(app.name(), "files-v2");
    }

    #[test]
    fn manifest_round_trips_through_the_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = blob_store::Store::open(dir.path()).expect("store");
        assert!(!AppCatalog::is_installed(&store));

        AppCatalog::write_manifest(&store, "files").expect("write manifest");
        assert!(AppCatalog::is_installed(&store));

        let bytes = store.load(super::APP_MANIFEST).expect("load manifest");
        let manifest: AppManifest = serde_json::from_slice(&bytes).expect("parse manifest");
        assert_eq!(manifest.name, "files");
        assert_eq!(manifest.version, 1);
    }
}
