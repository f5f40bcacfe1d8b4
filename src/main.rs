mod bytecode;
mod chunk;
mod compiler;
mod errors;
mod scanner;
mod table;
mod value;
mod vm;

#[cfg(test)]
mod tests;

use std::{fs, process};

use vm::{InterpretResult, VM};

/// CLI entry point: one required positional argument, the source file
/// path. Mirrors `original_source/main.c`'s `argc` handling — `argc == 1`
/// (no file given) is reserved for a future REPL and isn't implemented
/// here; more than one extra argument is a usage error.
fn main() {
    let args: Vec<String> = std::env::args().collect();

    match args.len() {
        2 => {
            let source = read_source(&args[1]);
            let result = VM::interpret(&source);
            process::exit(exit_code(result));
        }
        1 => {
            // No file given. A REPL would start here; none is specified, so
            // there is nothing further to do.
        }
        _ => {
            eprintln!("Usage: loxvm [path]");
            process::exit(1);
        }
    }
}

/// Reads the whole source file into memory. Mirrors `runFile`'s split in
/// the original source: a memory-allocation failure while buffering the
/// file exits 70, while every other I/O failure (file not found, permission
/// denied, and so on) exits 74.
fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Could not open file '{}': {}", path, error);
            match error.kind() {
                std::io::ErrorKind::OutOfMemory => process::exit(70),
                _ => process::exit(74),
            }
        }
    }
}

fn exit_code(result: InterpretResult) -> i32 {
    match result {
        InterpretResult::Ok => 0,
        InterpretResult::CompileError => 65,
        InterpretResult::RuntimeError => 70,
    }
}
