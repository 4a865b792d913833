use std::fs;

use clap::Parser;

/// quill is a small imperative scripting language that runs directly or
/// transpiles to Java.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells quill to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Renders the program as Java source on stdout instead of running it.
    #[arg(short, long)]
    emit_java: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!(
                "Failed to read the input file '{}'. Perhaps this file does not exist?",
                &args.contents
            );
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    if args.emit_java {
        match quill::transpile(&script) {
            Ok(java) => print!("{java}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            },
        }
    } else if let Err(e) = quill::interpret(&script, std::io::stdout()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
