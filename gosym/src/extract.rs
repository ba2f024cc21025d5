//! Single entry point tying the pipeline stages together

use crate::domain::{ExtractError, ParseStage};
use crate::options::ExtractOptions;
use crate::pclntab::{locate, Buffer, Header};
use crate::symtab::{build, SymbolTable};
use log::{debug, info, warn};

/// Recover every function symbol from a buffer containing a Go pclntab.
///
/// The buffer may be a single section or a whole executable; only the table
/// signature has to be present somewhere in it.
///
/// # Errors
/// The first [`ParseError`](crate::domain::ParseError) encountered, the stage
/// reached before it, and (with `allow_partial`) the symbols resolved before
/// the failing record.
pub fn extract_symbols(
    buffer: &[u8],
    options: &ExtractOptions,
) -> Result<SymbolTable, ExtractError> {
    let buf = Buffer::new(buffer);
    let mut stage = ParseStage::Unstarted;

    let anchor = locate(&buf).map_err(|e| ExtractError::new(e, stage))?;
    advance(&mut stage);

    let header = Header::decode(&buf, anchor).map_err(|e| ExtractError::new(e, stage))?;
    advance(&mut stage);

    advance(&mut stage);
    match build(buf, &header, options) {
        Ok(table) => {
            advance(&mut stage);
            info!("Recovered {} function symbols ({})", table.len(), header.version);
            Ok(table)
        }
        Err(failure) => {
            let partial = if options.allow_partial {
                warn!(
                    "Keeping {} of {} symbols after failure: {}",
                    failure.partial.len(),
                    header.nfunc,
                    failure.error
                );
                SymbolTable::from(failure.partial)
            } else {
                SymbolTable::default()
            };
            Err(ExtractError::with_partial(failure.error, stage, partial))
        }
    }
}

fn advance(stage: &mut ParseStage) {
    if let Some(next) = stage.next() {
        debug!("Parse stage: {stage} -> {next}");
        *stage = next;
    }
}
