//! `modgen init`: write a default `modgen.toml`.

use std::fs;

use modgen_config::{CONFIG_FILE_NAME, ModgenConfig};

use crate::cli::InitArgs;
use crate::error::{CliError, Result};
use crate::ui;

pub fn execute(args: InitArgs) -> Result<()> {
    let path = args.dir.join(CONFIG_FILE_NAME);
    if path.exists() && !args.force {
        return Err(CliError::InvalidArgument(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let content = ModgenConfig::default().to_toml()?;
    fs::create_dir_all(&args.dir)
        .and_then(|()| fs::write(&path, content))
        .map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;

    ui::success(&format!("Created {}", path.display()));
    Ok(())
}
