//! Symbol table construction
//!
//! Sequential mode walks the descriptor iterator and stops at the first bad
//! record. Parallel mode hands index chunks to scoped worker threads over a
//! channel; every result is written to the slot of its function index, so
//! the output (including which prefix survives a failure) never depends on
//! scheduling.

use super::table::{Symbol, SymbolTable};
use crate::domain::ParseError;
use crate::options::ExtractOptions;
use crate::pclntab::{Buffer, FunctionDescriptor, FunctionTable, Header, NameResolver};
use crossbeam_channel::unbounded;
use log::debug;
use std::ops::Range;
use std::thread;

/// Functions per work item handed to a resolver thread.
const CHUNK_SIZE: usize = 512;

/// First failure while building, with the symbols resolved before it.
#[derive(Debug)]
pub struct BuildFailure {
    pub error: ParseError,
    pub partial: Vec<Symbol>,
}

/// Resolve every function in the table described by `header`.
///
/// # Errors
/// The first failing record's error, together with all symbols preceding it.
pub fn build(
    buf: Buffer<'_>,
    header: &Header,
    options: &ExtractOptions,
) -> Result<SymbolTable, BuildFailure> {
    let table = FunctionTable::new(buf, header);
    let resolver = NameResolver::new(buf, header, options.max_name_length);

    let workers = options.effective_workers().min(table.len().div_ceil(CHUNK_SIZE));
    let symbols = if workers > 1 {
        debug!("Resolving {} functions on {workers} threads", table.len());
        build_parallel(&table, &resolver, workers)?
    } else {
        build_sequential(&table, &resolver)?
    };

    Ok(SymbolTable::from(symbols))
}

fn resolve_one(
    resolver: &NameResolver<'_>,
    descriptor: &FunctionDescriptor,
) -> Result<Symbol, ParseError> {
    let resolved = resolver.resolve(descriptor)?;
    let meta_address = (resolved.meta_address != descriptor.address).then_some(resolved.meta_address);
    Ok(Symbol { name: resolved.name, address: descriptor.address, meta_address })
}

fn build_sequential(
    table: &FunctionTable<'_>,
    resolver: &NameResolver<'_>,
) -> Result<Vec<Symbol>, BuildFailure> {
    let mut symbols = Vec::with_capacity(table.len());

    for descriptor in table {
        let symbol = descriptor.and_then(|d| resolve_one(resolver, &d));
        match symbol {
            Ok(symbol) => symbols.push(symbol),
            Err(error) => return Err(BuildFailure { error, partial: symbols }),
        }
    }

    Ok(symbols)
}

fn build_parallel(
    table: &FunctionTable<'_>,
    resolver: &NameResolver<'_>,
    workers: usize,
) -> Result<Vec<Symbol>, BuildFailure> {
    let count = table.len();
    let (job_tx, job_rx) = unbounded::<Range<usize>>();
    let (result_tx, result_rx) = unbounded::<(usize, Result<Symbol, ParseError>)>();

    for start in (0..count).step_by(CHUNK_SIZE) {
        // Receivers outlive this loop, so the send cannot fail
        let _ = job_tx.send(start..(start + CHUNK_SIZE).min(count));
    }
    drop(job_tx);

    let mut slots: Vec<Option<Result<Symbol, ParseError>>> = (0..count).map(|_| None).collect();

    thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                while let Ok(range) = job_rx.recv() {
                    for index in range {
                        let symbol = table.get(index).and_then(|d| resolve_one(resolver, &d));
                        if result_tx.send((index, symbol)).is_err() {
                            return;
                        }
                    }
                }
            });
        }
        drop(result_tx);

        for (index, symbol) in &result_rx {
            slots[index] = Some(symbol);
        }
    });

    let mut symbols = Vec::with_capacity(count);
    for (index, slot) in slots.into_iter().enumerate() {
        let error = match slot {
            Some(Ok(symbol)) => {
                symbols.push(symbol);
                continue;
            }
            Some(Err(error)) => error,
            None => ParseError::corrupt(format!("function {index} was never resolved")),
        };
        return Err(BuildFailure { error, partial: symbols });
    }

    Ok(symbols)
}
