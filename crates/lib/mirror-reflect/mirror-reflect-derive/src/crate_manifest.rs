use std::path::{Path, PathBuf};

use toml::{map::Map, Value};

/// Container for crate manifest fetched from external toml crate.
pub struct CrateManifest {
    manifest: Map<String, Value>,
}

/// Get the manifest of the crate being compiled by default.
impl Default for CrateManifest {
    fn default() -> Self {
        let manifest = std::env::var("CARGO_MANIFEST_DIR")
            .ok()
            .map(|dir| PathBuf::from(dir).join("Cargo.toml"))
            .and_then(|path| Self::read(&path))
            .unwrap_or_default();

        Self { manifest }
    }
}

impl CrateManifest {
    fn read(path: &Path) -> Option<Map<String, Value>> {
        let manifest = std::fs::read_to_string(path).ok()?;
        toml::from_str(&manifest).ok()
    }

    /// Try to get the path of the dependency `package` within the crate being compiled.
    ///
    /// A renamed dependency (`alias = { package = "..." }`) is reached through its alias.
    pub fn try_get_path(&self, package: &str) -> Option<syn::Path> {
        let find_in_deps_func = |deps: &Map<String, Value>| -> Option<syn::Path> {
            deps.iter().find_map(|(key, dep)| {
                let renamed_from = dep
                    .as_table()
                    .and_then(|table| table.get("package"))
                    .and_then(Value::as_str);

                match renamed_from {
                    Some(renamed_from) if renamed_from == package => Self::parse_str(&key.replace('-', "_")),
                    None if key == package => Self::parse_str(&key.replace('-', "_")),
                    _ => None,
                }
            })
        };

        let deps = self.manifest
            .get("dependencies")
            .and_then(Value::as_table);
        let dev_deps = self.manifest
            .get("dev-dependencies")
            .and_then(Value::as_table);

        deps.and_then(find_in_deps_func)
            .or_else(|| dev_deps.and_then(find_in_deps_func))
    }

    pub fn get_path_default(package: &str) -> syn::Path {
        Self::default().get_path(package)
    }

    pub fn get_path(&self, package: &str) -> syn::Path {
        let crate_name = package.replace('-', "_");
        self.try_get_path(package)
            // cannot find path in dependencies, assume the macro is used inside the crate itself
            .or_else(|| Self::parse_str(&crate_name))
            .unwrap_or_else(|| syn::Path::from(proc_macro2::Ident::new(&crate_name, proc_macro2::Span::call_site())))
    }

    /// Parse `path` as a token stream, then as a `T`.
    pub fn parse_str<T: syn::parse::Parse>(path: &str) -> Option<T> {
        syn::parse_str(path).ok()
    }
}
