// Copyright 2025 Chisomo Makombo Sakala
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use crate::error::FileError;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads the whole input file.
pub fn read_source(path: &Path) -> Result<String, FileError> {
  fs::read_to_string(path).map_err(|source| FileError::Read {
    path: path.to_path_buf(),
    source,
  })
}

/// Replaces `path` with `contents` without ever leaving a partial file.
///
/// The data is written to a temporary file next to `path` and renamed over
/// it. An existing file keeps its permissions.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), FileError> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut temp = NamedTempFile::new_in(dir).map_err(|source| FileError::CreateTemp {
    dir: dir.to_path_buf(),
    source,
  })?;

  let write_err = |source: std::io::Error| FileError::Write {
    path: path.to_path_buf(),
    source,
  };
  temp.write_all(contents.as_bytes()).map_err(write_err)?;
  temp.as_file().sync_all().map_err(write_err)?;

  if let Ok(metadata) = fs::metadata(path) {
    temp
      .as_file()
      .set_permissions(metadata.permissions())
      .map_err(write_err)?;
  }

  temp.persist(path).map_err(|e| FileError::Persist {
    path: path.to_path_buf(),
    source: e.error,
  })?;

  tracing::debug!("Replaced {}", path.display());
  Ok(())
}
