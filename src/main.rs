use std::{
    error::Error,
    io::{self, BufWriter, Read, Write},
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
};

use clap::Parser;
use hanlex::{Dictionary, Tokenizer};

/// Prints one token per line for TEXT, or for stdin when no text is given.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the `*.dic` word lists.
    #[arg(long, value_name = "DIR")]
    dict: Option<PathBuf>,

    /// Return every candidate instead of the longest non-nested words.
    #[arg(long)]
    fine: bool,

    text: Vec<String>,
}

fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let dict = match &args.dict {
        Some(dir) => Dictionary::load_dir(dir)?,
        None => Dictionary::default(),
    };
    let tokenizer = Tokenizer::builder()
        .dictionary(Arc::new(dict))
        .max_word_length(!args.fine)
        .build();

    let text = if args.text.is_empty() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.text.join(" ")
    };

    let mut out = BufWriter::new(io::stdout().lock());
    for token in tokenizer.segment(&text) {
        writeln!(out, "{}", token?)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("hanlex: {e}");
            ExitCode::FAILURE
        }
    }
}
