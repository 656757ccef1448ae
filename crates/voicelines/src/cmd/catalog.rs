use voicelines_session::VoiceCatalog;

use crate::cmd::CatalogArgs;
use crate::exit::{io_error, CliResult, SUCCESS};
use crate::output::{print_catalog_summary, OutputFormat};

pub fn run(args: CatalogArgs, format: OutputFormat) -> CliResult<i32> {
    let catalog = VoiceCatalog::load(&args.file)
        .map_err(|err| io_error("failed loading metadata", err))?;

    print_catalog_summary(&args.file, &catalog, format);
    Ok(SUCCESS)
}
