//! Rewriting real files on disk through the native runtime.

use std::fs;
use std::path::{Path, PathBuf};

use modalias::{
    AliasOptions, AliasTable, NativeRuntime, Platform, ResolveSession, Settings, rewrite_source,
};
use serde_json::json;
use tempfile::TempDir;

fn create_project(temp: &TempDir, files: &[(&str, &str)]) -> PathBuf {
    let root = temp.path().to_path_buf();
    for (path, content) in files {
        let file = root.join(path);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&file, content).unwrap();
    }
    root
}

fn posix(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[test]
fn rewrites_against_absolute_root_with_variants() {
    let temp = TempDir::new().unwrap();
    let root = create_project(
        &temp,
        &[
            ("src/app.js", ""),
            ("src/ui/button.js", ""),
            ("src/ui/button.desktop.js", ""),
            ("src/ui/input.js", ""),
        ],
    );

    let options = AliasOptions::from_value(json!({
        "root": posix(&root),
        "react": true,
        "map": [
            { "expose": "ui", "src": "./src/ui" },
            { "expose": "abstract", "src": "npm:concrete" }
        ]
    }))
    .unwrap();

    let runtime = NativeRuntime::new();
    let settings = Settings::default().with_platform(Platform::Desktop);
    let table = AliasTable::build(&options, &settings, &runtime).unwrap();
    let mut session = ResolveSession::new(settings, &runtime).unwrap();

    let source = "import Button from 'ui/button';\n\
                  import Input from 'ui/input';\n\
                  const c = require('abstract/thing');\n\
                  import React from 'react';\n";
    let out = rewrite_source(&mut session, &table, &root.join("src/app.js"), source).unwrap();

    let base = posix(&root);
    assert_eq!(
        out.code,
        format!(
            "import Button from '{base}/src/ui/button.desktop';\n\
             import Input from '{base}/src/ui/input';\n\
             const c = require('concrete/thing');\n\
             import React from 'react';\n"
        )
    );
    assert_eq!(out.edits.len(), 3);
    assert_eq!(session.directory_cache().len(), 1);
}

#[test]
fn missing_variant_directory_fails_the_file() {
    let temp = TempDir::new().unwrap();
    let root = create_project(&temp, &[("src/app.js", "")]);

    let options = AliasOptions::from_value(json!({
        "root": posix(&root),
        "react": true,
        "map": [{ "expose": "ui", "src": "./src/ui" }]
    }))
    .unwrap();

    let runtime = NativeRuntime::new();
    let table = AliasTable::build(&options, &Settings::default(), &runtime).unwrap();
    let mut session = ResolveSession::new(Settings::default(), &runtime).unwrap();

    let result = rewrite_source(
        &mut session,
        &table,
        &root.join("src/app.js"),
        "import b from 'ui/button';\n",
    );
    assert!(matches!(result, Err(modalias::Error::DirectoryRead { .. })));
}
