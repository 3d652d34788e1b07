use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's parsed `Cargo.toml`, used to find the path generated code
/// must use to reach a `phpser_*` crate.
///
/// ```rust
/// # use phpser_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("phpser_codec"));
/// ```
///
/// # Resolution rules
///
/// For `dependencies`, then `dev-dependencies`:
///
/// 1. A direct dependency on the crate gives `::phpser_codec`.
/// 2. For a `phpser_*` crate, a dependency on the facade `phpser` gives
///    `::phpser::codec`.
///
/// Anything else falls back to `::phpser_codec`.
///
/// A crate that derives on its own types needs
/// `extern crate self as phpser_codec;` in its root for rule 1 to hold.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "phpser";
const CRATE_PREFIX: &str = "phpser_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        let Some(dir) = env::var_os("CARGO_MANIFEST_DIR") else {
            panic!("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        };
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn get_manifest_modified_time(path: &Path) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let text = segments
            .iter()
            .fold(String::new(), |acc, seg| acc + "::" + *seg);
        syn::parse_str(&text)
            .unwrap_or_else(|_| panic!("`{text}` is not a valid path"))
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::absolute(&[FACADE_NAME, module]))
    }

    /// Returns the path to the crate named `name` as seen from the caller.
    ///
    /// See the type-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(path) = Self::find_in_deps(deps, name)
            {
                return path;
            }
        }
        Self::absolute(&[name])
    }

    /// Runs `func` on the caller's manifest.
    ///
    /// Manifests are cached by path and reparsed when the file's modified
    /// time changes. Call this once per macro invocation and pass the
    /// resulting path around.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .unwrap_or_else(|err| panic!("Cannot stat {}: {err}", manifest_path.display()));

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;

    fn path_text(path: &syn::Path) -> String {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        let prefix = if path.leading_colon.is_some() { "::" } else { "" };
        format!("{prefix}{}", segments.join("::"))
    }

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: toml_edit::Document::parse(text.to_owned().into_boxed_str()).unwrap(),
            modified_time: std::time::SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn direct_dependency_wins() {
        let m = manifest("[dependencies]\nphpser_codec = \"0.0.1\"\nphpser = \"0.0.1\"\n");
        assert_eq!(path_text(&m.get_crate_path("phpser_codec")), "::phpser_codec");
    }

    #[test]
    fn facade_dependency_maps_module() {
        let m = manifest("[dev-dependencies]\nphpser = \"0.0.1\"\n");
        assert_eq!(path_text(&m.get_crate_path("phpser_codec")), "::phpser::codec");
    }

    #[test]
    fn unknown_falls_back_to_absolute() {
        let m = manifest("[package]\nname = \"x\"\n");
        assert_eq!(path_text(&m.get_crate_path("phpser_codec")), "::phpser_codec");
    }
}
