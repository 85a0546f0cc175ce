//! `pseudo-translate` command: rewrites one or more PO/POT catalogs for layout/encoding testing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::args::PseudoTranslateArgs;
use crate::cli::ExitStatus;
use crate::pseudo::{pseudo_translate, PseudoOptions};

pub fn run(args: PseudoTranslateArgs) -> Result<ExitStatus> {
    let options = PseudoOptions {
        method: args.method.into(),
        add_brackets: args.brackets,
        width_change: args.width_change,
        add_tracking_ids: args.tracking_ids,
    };

    for file in &args.files {
        let text = fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
        let pseudo = pseudo_translate(&text, &options);
        let out_path = pseudo_output_path(file);
        fs::write(&out_path, pseudo).with_context(|| format!("failed to write {}", out_path.display()))?;
        println!("wrote {}", out_path.display());
    }

    Ok(ExitStatus::Success)
}

/// `.pot` catalogs are templates; the pseudo-translated output is a `.po` file, prefixed
/// `pseudo_`. `.po` files keep their extension.
fn pseudo_output_path(file: &Path) -> PathBuf {
    let name = file.file_name().and_then(|n| n.to_str()).unwrap_or("catalog.po");
    let renamed = match name.strip_suffix(".pot") {
        Some(stem) => format!("{stem}.po"),
        None => name.to_string(),
    };
    file.with_file_name(format!("pseudo_{renamed}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn po_extension_is_kept() {
        let out = pseudo_output_path(Path::new("locales/en.po"));
        assert_eq!(out, Path::new("locales/pseudo_en.po"));
    }

    #[test]
    fn pot_extension_becomes_po() {
        let out = pseudo_output_path(Path::new("locales/messages.pot"));
        assert_eq!(out, Path::new("locales/pseudo_messages.po"));
    }
}
