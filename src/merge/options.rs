//! options.txt merge operations
//!
//! Delegates load/dump to the [`crate::options`] codec. The source side is
//! loaded with its `version` stripped, so a merge never overwrites the
//! destination's data version (which also controls the dump encoding).

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::options;

/// Shallow-merge `from_path` into `to_path`.
pub fn merge(from_path: &Path, to_path: &Path) -> Result<()> {
    let from_options = options::load(&fs::read_to_string(from_path)?, true)?;
    let mut to_options = options::load(&fs::read_to_string(to_path)?, false)?;

    to_options.extend(from_options);

    fs::write(to_path, options::dump(&to_options))?;
    Ok(())
}
