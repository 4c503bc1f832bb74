//! Build script for m3u2spotify.
//!
//! Copies the `.env.example` configuration template into the user's local data
//! directory (`m3u2spotify/.env.example`), next to where the application looks
//! for its `.env` file:
//! - Linux: `~/.local/share/m3u2spotify/`
//! - macOS: `~/Library/Application Support/m3u2spotify/`
//! - Windows: `%LOCALAPPDATA%/m3u2spotify/`
//!
//! A missing template or an unwritable data directory only produces a cargo
//! warning; the build itself never fails because of it.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("m3u2spotify");

    let copied = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")));
    if let Err(e) = copied {
        println!(
            "cargo:warning=could not copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
