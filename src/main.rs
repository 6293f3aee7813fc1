//! Command-line front end: reads a source (file or stdin), compresses or
//! decompresses it with the crate's optimal LZ4 engine, and writes the
//! result to a destination (file or stdout). Also hosts the in-memory
//! benchmark (`-cbench`/`-dbench`) and self-test (`-test`) modes.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;

use lz4x::bench::{bench_mem, BenchConfig};
use lz4x::cli::constants::set_display_level;
use lz4x::config::BLOCKSIZEID_DEFAULT;
use lz4x::dictionary::load_dictionary;
use lz4x::displaylevel;
use lz4x::frame::{
    compress_frame, compress_legacy, compress_raw, decompress_frame, decompress_legacy,
    decompress_raw, BlockChecksum, BlockMode, BlockSizeId, ContentChecksum, FrameInfo, Preferences,
};
use lz4x::selftest;
use lz4x::status::Status;

/// Optimal-parsing LZ4-compatible compressor and verifying decompressor.
#[derive(Parser, Debug)]
#[command(name = "lz4x", version)]
struct Cli {
    /// Decompress instead of compressing.
    #[arg(short = 'd', long = "decompress")]
    decompress: bool,

    /// Compress, then immediately decompress in memory and verify the
    /// result matches the source before writing output.
    #[arg(short = 'c', long = "verify")]
    verify: bool,

    /// Benchmark in-memory compression throughput and exit.
    #[arg(long = "cbench")]
    compress_bench: bool,

    /// Benchmark in-memory decompression throughput and exit.
    #[arg(long = "dbench")]
    decompress_bench: bool,

    /// Run the built-in round-trip self-test corpus and exit.
    #[arg(long = "test")]
    self_test: bool,

    /// Block size code 4 (64 KiB) through 7 (4 MiB).
    #[arg(short = 'B', value_parser = clap::value_parser!(u32).range(4..=7), default_value_t = BLOCKSIZEID_DEFAULT)]
    block_size_code: u32,

    /// Compress blocks independently (no inter-block matches).
    #[arg(long = "bi", conflicts_with = "block_dependent")]
    block_independent: bool,

    /// Compress blocks dependently (default): later blocks may reference earlier ones.
    #[arg(long = "bd")]
    block_dependent: bool,

    /// Use the legacy frame format (independent 8 MiB blocks, no footer).
    #[arg(short = 'l', long = "legacy")]
    legacy: bool,

    /// Emit/read a single raw block with no frame container.
    #[arg(short = 'r', long = "raw")]
    raw: bool,

    /// Trade compression ratio for output that favors decoder speed.
    #[arg(long = "favor-dec-speed")]
    favor_dec_speed: bool,

    /// Prepend a dictionary file's tail as match context for the first block.
    #[arg(short = 'D', value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// Print diagnostic information to stderr (repeatable).
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Input path; `-` or omitted reads from stdin.
    input: Option<PathBuf>,

    /// Output path; `-` or omitted writes to stdout.
    output: Option<PathBuf>,
}

fn block_size_id(code: u32) -> BlockSizeId {
    match code {
        4 => BlockSizeId::Max64Kb,
        5 => BlockSizeId::Max256Kb,
        6 => BlockSizeId::Max1Mb,
        _ => BlockSizeId::Max4Mb,
    }
}

fn read_input(path: &Option<PathBuf>) -> Result<Vec<u8>, Status> {
    match path.as_deref() {
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).map_err(|_| Status::SourceRead)?;
            Ok(buf)
        }
        Some(p) if p == Path::new("-") => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).map_err(|_| Status::SourceRead)?;
            Ok(buf)
        }
        Some(p) => fs::read(p).map_err(|_| Status::SourceRead),
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<(), Status> {
    match path.as_deref() {
        None => io::stdout().write_all(data).map_err(|_| Status::DestinationWrite),
        Some(p) if p == Path::new("-") => {
            io::stdout().write_all(data).map_err(|_| Status::DestinationWrite)
        }
        Some(p) => fs::write(p, data).map_err(|_| Status::DestinationWrite),
    }
}

fn preferences_from(cli: &Cli) -> Preferences {
    Preferences {
        frame_info: FrameInfo {
            block_size_id: block_size_id(cli.block_size_code),
            block_mode: if cli.block_independent {
                BlockMode::Independent
            } else {
                BlockMode::Linked
            },
            content_checksum_flag: ContentChecksum::Disabled,
            block_checksum_flag: BlockChecksum::Disabled,
            ..FrameInfo::default()
        },
        favor_dec_speed: cli.favor_dec_speed,
        ..Preferences::default()
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    set_display_level((2 + cli.verbose as u32).min(4));

    if cli.self_test {
        let cases = selftest::run_status()?;
        displaylevel!(2, "self-test passed: {cases} case/option combinations\n");
        return Ok(());
    }

    let input = read_input(&cli.input)?;
    let dict = match &cli.dictionary {
        Some(path) => load_dictionary(path)?,
        None => Vec::new(),
    };

    if cli.compress_bench || cli.decompress_bench {
        let mut config = BenchConfig::default();
        config.set_decode_only(cli.decompress_bench);
        let prefs = preferences_from(&cli);
        let result = bench_mem(&input, &prefs, &config)?;
        displaylevel!(
            2,
            "{} : {:.2} MB/s ({} iteration(s), best {:?})\n",
            if cli.decompress_bench { "decompress" } else { "compress" },
            result.mb_per_sec,
            result.iterations,
            result.best
        );
        return Ok(());
    }

    if cli.decompress {
        let output = if cli.raw {
            decompress_raw(&input)?
        } else if cli.legacy {
            decompress_legacy(&input)?
        } else {
            decompress_frame(&input, &dict)?
        };
        write_output(&cli.output, &output)?;
        return Ok(());
    }

    let prefs = preferences_from(&cli);

    let output = if cli.raw {
        compress_raw(&input)?
    } else if cli.legacy {
        compress_legacy(&input)?
    } else {
        compress_frame(&input, &prefs, &dict).map_err(|_| Status::InternalCompression)?
    };

    if cli.verify {
        let restored = if cli.raw {
            decompress_raw(&output)?
        } else if cli.legacy {
            decompress_legacy(&output)?
        } else {
            decompress_frame(&output, &dict)?
        };
        if restored != input {
            return Err(Status::InternalCompression.into());
        }
        displaylevel!(2, "verified: round-trip matches source\n");
    }

    displaylevel!(
        3,
        "{} -> {} bytes ({:.1}%)\n",
        input.len(),
        output.len(),
        100.0 * output.len() as f64 / input.len().max(1) as f64
    );
    write_output(&cli.output, &output)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("lz4x: {err}");
        std::process::exit(100);
    }
}
