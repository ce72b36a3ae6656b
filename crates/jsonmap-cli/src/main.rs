use std::fs::File;
use std::io::{self, BufWriter, Read, Write, stdin};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use jsonmap::{Options, Value, WriteStrategy};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Direct,
    Recursive,
}

#[derive(Parser, Debug)]
#[command(
    name = "jsonmap",
    about = "Decode JSON with type inference and write it back in canonical form",
    version
)]
struct Args {
    /// Write strategy used for re-encoding
    #[arg(long, value_enum, default_value_t = StrategyArg::Direct)]
    strategy: StrategyArg,

    /// Indent output with two spaces
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Require the document root to be an object
    #[arg(long, default_value_t = false)]
    mapping: bool,

    /// Print `path<TAB>kind` for every leaf instead of JSON
    #[arg(long, default_value_t = false)]
    types: bool,

    /// Maximum container nesting accepted while decoding
    #[arg(long, default_value_t = jsonmap::options::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut buf = Vec::new();
    match &args.input {
        Some(path) => {
            let mut f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            f.read_to_end(&mut buf)?;
        }
        None => {
            stdin().read_to_end(&mut buf)?;
        }
    }

    let options = Options {
        strategy: match args.strategy {
            StrategyArg::Direct => WriteStrategy::DirectWrite,
            StrategyArg::Recursive => WriteStrategy::RecursiveGeneric,
        },
        indent: args.pretty.then_some(2),
        max_depth: args.max_depth,
        ..Options::default()
    };

    let value = if args.mapping {
        Value::Mapping(jsonmap::decode_mapping_from_slice(&buf, &options)?)
    } else {
        jsonmap::decode_from_slice(&buf, &options)?
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if args.types {
        write_types(&mut out, "$", &value)?;
    } else {
        jsonmap::encode_to_writer(&mut out, &value, &options)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn write_types<W: Write>(out: &mut W, path: &str, value: &Value) -> io::Result<()> {
    match value {
        Value::Sequence(items) if !items.is_empty() => {
            for (i, item) in items.iter().enumerate() {
                write_types(out, &format!("{path}[{i}]"), item)?;
            }
            Ok(())
        }
        Value::Mapping(m) if !m.is_empty() => {
            for (k, item) in m {
                write_types(out, &format!("{path}.{k}"), item)?;
            }
            Ok(())
        }
        leaf => writeln!(out, "{}\t{}", path, leaf.kind()),
    }
}
