//! The generated project model.
//!
//! A snapshot is the complete set of generated files, keyed by relative
//! path. It is replaced wholesale each turn, never patched in place, so
//! the preview layer can always mount a consistent file set.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// One generated file. The JSON form is `{"code": "..."}` — the shape the
/// generation service is instructed to emit for every file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub code: String,
}

impl SourceFile {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// The current set of generated project files.
///
/// Serializes transparently as the wire shape:
/// `{"App.js": {"code": "..."}, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectSnapshot {
    files: BTreeMap<String, SourceFile>,
}

impl ProjectSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The placeholder project substituted whenever generation is unusable.
    /// Always contains the HTML host file and the root entry point, so the
    /// preview can render something after any failure.
    pub fn placeholder() -> Self {
        let mut snapshot = Self::new();
        snapshot.insert(
            "public/index.html",
            "<!DOCTYPE html><html><head><meta charset=\"UTF-8\">\
             <title>Weaver</title></head>\
             <body><div id=\"root\"></div></body></html>",
        );
        snapshot.insert(
            "index.js",
            "import App from './App.js';\n\
             import { createRoot } from 'react-dom/client';\n\n\
             createRoot(document.getElementById('root')).render(<App />);\n",
        );
        snapshot.insert(
            "App.js",
            "function App() {\n  return <h1>Describe the app you want to build.</h1>;\n}\n\nexport default App;\n",
        );
        snapshot
    }

    pub fn insert(&mut self, path: impl Into<String>, code: impl Into<String>) {
        self.files.insert(path.into(), SourceFile::new(code));
    }

    pub fn get(&self, path: &str) -> Option<&SourceFile> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// File paths in stable (sorted) order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SourceFile)> {
        self.files.iter().map(|(path, file)| (path.as_str(), file))
    }

    /// True when every path satisfies [`is_valid_path`]
    pub fn paths_are_valid(&self) -> bool {
        self.files.keys().all(|path| is_valid_path(path))
    }
}

impl FromIterator<(String, SourceFile)> for ProjectSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, SourceFile)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// Path rules for snapshot keys: non-empty, relative, forward-slash
/// separated, no empty segments, no parent traversal.
pub fn is_valid_path(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.contains('\\')
        && path.split('/').all(|segment| !segment.is_empty() && segment != "..")
}
