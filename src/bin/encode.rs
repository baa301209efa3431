//! encode – compress a 16-bit mono WAV into an arithmetic-coded stream.
//!
//! With no arguments, reads from stdin and writes to stdout. With two
//! arguments, reads the first path and writes the second.

use std::env;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::process::ExitCode;

use nwav::encode_stream;

fn usage(program: &str) {
    eprintln!("Usage: {program} [input.wav output]");
    eprintln!();
    eprintln!("With no arguments, reads a 16-bit mono WAV from stdin and");
    eprintln!("writes the compressed stream to stdout.");
}

fn run_files(input_path: &str, output_path: &str) -> Result<(), String> {
    let input = File::open(input_path).map_err(|e| format!("{input_path}: {e}"))?;
    let output = File::create(output_path).map_err(|e| format!("{output_path}: {e}"))?;

    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);
    encode_stream(&mut reader, &mut writer).map_err(|e| e.to_string())?;
    writer.flush().map_err(|e| format!("{output_path}: {e}"))?;
    Ok(())
}

fn run_stdio() -> Result<(), String> {
    let mut input = io::stdin().lock();
    let mut output = BufWriter::new(io::stdout().lock());
    encode_stream(&mut input, &mut output).map_err(|e| e.to_string())?;
    output.flush().map_err(|e| format!("stdout: {e}"))?;
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let result = match args.len() {
        1 => run_stdio(),
        3 => run_files(&args[1], &args[2]),
        _ => {
            usage(args.first().map(String::as_str).unwrap_or("encode"));
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("encode: {e}");
            ExitCode::FAILURE
        }
    }
}
