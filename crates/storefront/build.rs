//! Build script for storefront crate.
//!
//! Generates a content-based hash for the stylesheet so it can be served
//! with immutable caching.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    hash_css();
}

/// Hash main.css and copy it to the derived directory with the hash in the
/// filename.
///
/// Sets `CSS_HASH` for use with `env!("CSS_HASH")`. An empty hash means the
/// stylesheet is served from its plain path.
fn hash_css() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let css_path = Path::new(&manifest_dir).join("static/css/main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let content = match fs::read(&css_path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read main.css: {e}");
            println!("cargo:rustc-env=CSS_HASH=");
            return;
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = digest.get(..8).unwrap_or(&digest);

    let derived_dir = Path::new(&manifest_dir).join("static/css/derived");
    let derived_path = derived_dir.join(format!("main.{short_hash}.css"));
    if let Err(e) = fs::create_dir_all(&derived_dir).and_then(|()| fs::copy(&css_path, &derived_path)) {
        println!("cargo:warning=Could not write hashed stylesheet: {e}");
        println!("cargo:rustc-env=CSS_HASH=");
        return;
    }

    println!("cargo:rustc-env=CSS_HASH={short_hash}");
}
