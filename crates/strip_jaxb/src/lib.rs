// crates/strip_jaxb/src/lib.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use atomic_replace::{replace_file, ScratchFile};
use find_object_factories::find_object_factories;
use source_encoding::{resolve_encoding, EncodingError};
use strip_generated_block::{strip_file, StripError};

/// Configuration for one normalization run.
pub struct NormalizeConfig {
    /// Root directory holding the generated sources.
    pub generated_directory: PathBuf,
    /// Label of the encoding used to read and write the source files.
    pub encoding: String,
    /// If true, the run is a no-op.
    pub skip: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            generated_directory: PathBuf::from("target/generated-sources"),
            encoding: String::from("UTF-8"),
            skip: false,
        }
    }
}

/// Errors fatal to the whole run. Per-file failures are not fatal; they are
/// collected in the [`RunReport`] instead.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("error while visiting {path}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("cannot create temp file in {path}")]
    Scratch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why one candidate file was left untouched.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Transform(#[from] StripError),
    #[error("failed to replace file")]
    Replace(#[source] io::Error),
}

pub struct FileFailure {
    pub path: PathBuf,
    pub error: FileError,
}

/// What a run did: every candidate lands in exactly one of these lists.
#[derive(Default)]
pub struct RunReport {
    /// Candidates whose generated header was removed.
    pub stripped: Vec<PathBuf>,
    /// Candidates visited but containing no header region.
    pub unchanged: Vec<PathBuf>,
    /// Candidates left untouched because of a per-file error.
    pub failures: Vec<FileFailure>,
}

/// Walks the configured directory and strips the generator's
/// non-deterministic header from every `ObjectFactory.java` found.
///
/// Files are processed one at a time, in traversal order, through a single
/// scratch file: the normalized bytes are written to the scratch path and
/// then renamed over the original, so the original is only ever observed
/// whole or replaced whole. A failure on one file is logged, recorded in the
/// report, and does not stop the run; only traversal errors, an unusable
/// encoding, or failure to set up the scratch file are fatal.
pub fn run(config: &NormalizeConfig) -> Result<RunReport, RunError> {
    let mut report = RunReport::default();

    if config.skip {
        println!("Skipping execution of goal \"strip-jaxb\"");
        return Ok(report);
    }

    let encoding = resolve_encoding(&config.encoding)?;

    let root = &config.generated_directory;
    let candidates = find_object_factories(root).map_err(|source| RunError::Traversal {
        path: root.clone(),
        source,
    })?;
    if candidates.is_empty() {
        return Ok(report);
    }

    let scratch = ScratchFile::create_in(root).map_err(|source| RunError::Scratch {
        path: root.clone(),
        source,
    })?;

    for candidate in candidates {
        println!("Stripping {}", candidate.display());
        match normalize_one(&candidate, &scratch, encoding) {
            Ok(true) => report.stripped.push(candidate),
            Ok(false) => report.unchanged.push(candidate),
            Err(error) => {
                eprintln!("Error when normalizing {}: {}", candidate.display(), error);
                report.failures.push(FileFailure {
                    path: candidate,
                    error,
                });
            }
        }
    }
    Ok(report)
}

/// Normalizes a single candidate through the scratch file. Returns whether a
/// header region was removed. On any error the candidate is untouched: the
/// transform writes only to the scratch path, and the rename either fully
/// succeeds or leaves the target as it was.
fn normalize_one(
    candidate: &std::path::Path,
    scratch: &ScratchFile,
    encoding: &'static encoding_rs::Encoding,
) -> Result<bool, FileError> {
    scratch
        .recreate()
        .map_err(|source| FileError::Transform(StripError::Write {
            path: scratch.path().to_path_buf(),
            source,
        }))?;
    let stripped = strip_file(candidate, scratch.path(), encoding)?;
    replace_file(scratch.path(), candidate).map_err(FileError::Replace)?;
    Ok(stripped)
}
