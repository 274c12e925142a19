//! Disk tile cache location and naming.
//!
//! The cache is a single flat directory of PNG files, one per tile. A short
//! hash of the tile-source URL template namespaces the filenames so that
//! several sources can share one directory without colliding. Entries are
//! written once and never evicted.
//!
//! # Directory resolution
//!
//! The cache directory is picked by walking an ordered candidate chain,
//! each step either succeeding (short-circuit) or falling through:
//!
//! 1. a requested directory that exists and is read/write accessible;
//! 2. a requested directory that can be created;
//! 3. the first of `$TMPDIR`, `$TMP`, `$TEMP`, or `/tmp`.
//!
//! If the final fallback is not read/write accessible there is nowhere
//! left to put tiles and resolution fails.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use md5::{Digest, Md5};
use thiserror::Error;
use tracing::warn;

/// Environment variables consulted for the fallback directory, in
/// priority order.
const TEMP_DIR_VARS: [&str; 3] = ["TMPDIR", "TMP", "TEMP"];

/// Last-resort fallback when no temp variable is set.
const FALLBACK_DIR: &str = "/tmp";

/// Errors that can occur while locating the cache directory.
#[derive(Debug, Error)]
pub enum CacheError {
    /// No candidate directory was usable. The engine has no other
    /// persistence strategy, so this is fatal.
    #[error("unable to find, create or use tile cache directory (last candidate: {path})")]
    NoUsableDirectory { path: PathBuf },
}

/// How the resolved cache directory was obtained.
///
/// `Created` and `Fallback` are the advisory signals the caller may want
/// to surface; they are also logged as warnings during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDirSource {
    /// The requested directory was usable as-is.
    Requested,
    /// The requested directory was missing and has been created.
    Created,
    /// A temp directory was substituted for the requested one.
    Fallback,
}

/// Resolves the directory used to store cached tiles.
///
/// Walks the candidate chain described in the module docs and returns the
/// first usable directory together with how it was obtained.
///
/// # Errors
///
/// Returns [`CacheError::NoUsableDirectory`] if the fallback temp
/// directory is not read/write accessible. There is no further fallback.
pub fn resolve_cache_dir(
    requested: Option<&Path>,
) -> Result<(PathBuf, CacheDirSource), CacheError> {
    resolve_with_fallback(requested, &temp_dir())
}

fn resolve_with_fallback(
    requested: Option<&Path>,
    fallback: &Path,
) -> Result<(PathBuf, CacheDirSource), CacheError> {
    if let Some(dir) = requested {
        if dir.is_dir() {
            if is_read_write(dir) {
                return Ok((dir.to_path_buf(), CacheDirSource::Requested));
            }
            warn!(dir = %dir.display(), "insufficient privileges on cache dir");
        } else {
            match fs::create_dir_all(dir) {
                Ok(()) => {
                    warn!(dir = %dir.display(), "created cache dir");
                    return Ok((dir.to_path_buf(), CacheDirSource::Created));
                }
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "could not make cache dir");
                }
            }
        }
    }

    warn!(dir = %fallback.display(), "using temp directory to cache map tiles");

    if is_read_write(fallback) {
        Ok((fallback.to_path_buf(), CacheDirSource::Fallback))
    } else {
        Err(CacheError::NoUsableDirectory {
            path: fallback.to_path_buf(),
        })
    }
}

/// First temp directory named by the environment, or the fixed fallback.
fn temp_dir() -> PathBuf {
    TEMP_DIR_VARS
        .iter()
        .find_map(|var| env::var(var).ok().filter(|v| !v.is_empty()))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
}

/// Whether `dir` is both readable and writable by the current process.
///
/// Probes with a real directory listing and a real file create/delete
/// rather than inspecting permission bits, which keeps the check honest
/// across platforms and mount options.
fn is_read_write(dir: &Path) -> bool {
    if fs::read_dir(dir).is_err() {
        return false;
    }

    let probe = dir.join(format!(".osmviz-probe-{}", process::id()));
    match fs::OpenOptions::new().write(true).create(true).open(&probe) {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

/// Derives the cache filename prefix for a tile-source URL template.
///
/// The prefix is `osmviz-` followed by the first five hex characters of
/// the MD5 digest of the template string: stable across runs and
/// platforms, and distinct for distinct templates. Existing caches keyed
/// this way remain valid.
pub fn source_prefix(url_template: &str) -> String {
    let digest = format!("{:x}", Md5::digest(url_template.as_bytes()));
    format!("osmviz-{}", &digest[..5])
}

/// Path of the cache entry for one tile.
///
/// Produces `<dir>/<prefix>-<zoom>_<x>_<y>.png`; the cache layout is
/// flat, with no subdirectories.
pub fn tile_path(dir: &Path, prefix: &str, zoom: u8, x: u32, y: u32) -> PathBuf {
    dir.join(format!("{}-{}_{}_{}.png", prefix, zoom, x, y))
}
