//! lrutrace - replay a trace of store operations against an LRU store

mod handler;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lrustore::SharedLruStore;
use tracing::{info, warn};

use crate::handler::{CommandHandler, Reply};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Trace file, one command per line (reads stdin when omitted)
    trace: Option<PathBuf>,

    /// Store capacity (number of entries)
    #[arg(short, long, default_value_t = 3)]
    capacity: usize,

    /// Print a statistics summary after the replay
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let store = SharedLruStore::new(args.capacity)
        .with_context(|| format!("invalid capacity {}", args.capacity))?;
    let handler = CommandHandler::new(store);
    info!("Store capacity: {}", args.capacity);

    let input: Box<dyn BufRead> = match &args.trace {
        Some(path) => {
            info!("Replaying trace {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open trace {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => {
            info!("Replaying trace from stdin");
            Box::new(io::stdin().lock())
        }
    };

    let stdout = io::stdout();
    let mut output = stdout.lock();
    let commands = replay(&handler, input, &mut output)?;
    info!("Replayed {} commands", commands);

    if args.stats {
        write_stats(&handler, &mut output)?;
    }

    output.flush()?;
    Ok(())
}

/// Run every line of `input` through the handler, writing one reply per
/// command. Returns the number of commands executed.
fn replay<R: BufRead, W: Write>(
    handler: &CommandHandler,
    mut input: R,
    output: &mut W,
) -> Result<usize> {
    let mut commands = 0;
    let mut buf = Vec::new();
    let mut lineno = 0;

    loop {
        buf.clear();
        lineno += 1;
        let n = input
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("failed to read line {}", lineno))?;
        if n == 0 {
            break;
        }

        let reply = match std::str::from_utf8(&buf) {
            Ok(line) => match handler.handle(line) {
                Some(reply) => reply,
                None => continue,
            },
            Err(_) => Reply::Error("invalid UTF-8".to_string()),
        };

        if let Reply::Error(msg) = &reply {
            warn!("line {}: {}", lineno, msg);
        }
        writeln!(output, "{}", reply)?;
        commands += 1;
    }

    Ok(commands)
}

/// Write the one-line statistics summary printed by `--stats`
fn write_stats<W: Write>(handler: &CommandHandler, output: &mut W) -> Result<()> {
    let stats = handler.stats();
    writeln!(
        output,
        "entries={} hits={} misses={} hit_ratio={:.3} inserts={} updates={} evictions={} removals={}",
        handler.entries(),
        stats.hits(),
        stats.misses(),
        stats.hit_ratio(),
        stats.inserts(),
        stats.updates(),
        stats.evictions(),
        stats.removals(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    fn handler(capacity: usize) -> CommandHandler {
        CommandHandler::new(SharedLruStore::new(capacity).unwrap())
    }

    #[test]
    fn test_replay_eviction_trace() {
        let trace = "\
# fill, touch 1 and 2, then force an eviction
PUT 1 aaa
PUT 2 bbb
PUT 3 ccc
GET 1
GET 2
PUT 4 ddd

GET 3
GET 2
GET 4
GET 1
SIZE
";
        let handler = handler(3);
        let mut output = Vec::new();

        let commands = replay(&handler, Cursor::new(trace), &mut output).unwrap();

        assert_eq!(commands, 11);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "OK\nOK\nOK\naaa\nbbb\nOK\n(nil)\nbbb\nddd\naaa\n3\n"
        );
    }

    #[test]
    fn test_replay_continues_after_error() {
        let handler = handler(2);
        let mut output = Vec::new();

        replay(&handler, Cursor::new("BOGUS\nPUT k v\nGET k\n"), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "ERR unknown command 'BOGUS'\nOK\nv\n"
        );
    }

    #[test]
    fn test_replay_invalid_utf8_continues() {
        let handler = handler(2);
        let mut output = Vec::new();

        let trace: &[u8] = b"PUT a 1\nPUT b \xff\xfe\nGET a\n";
        let commands = replay(&handler, trace, &mut output).unwrap();

        assert_eq!(commands, 3);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "OK\nERR invalid UTF-8\n1\n"
        );
        assert_eq!(handler.stats().inserts(), 1);
    }

    #[test]
    fn test_replay_last_line_without_newline() {
        let handler = handler(2);
        let mut output = Vec::new();

        let commands = replay(&handler, Cursor::new("PUT a 1\nGET a"), &mut output).unwrap();

        assert_eq!(commands, 2);
        assert_eq!(String::from_utf8(output).unwrap(), "OK\n1\n");
    }

    #[test]
    fn test_write_stats_summary() {
        let trace = "\
PUT 1 aaa
PUT 2 bbb
PUT 3 ccc
GET 1
GET 2
PUT 4 ddd
GET 3
DEL 4
";
        let handler = handler(3);
        replay(&handler, Cursor::new(trace), &mut Vec::new()).unwrap();

        let mut output = Vec::new();
        write_stats(&handler, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "entries=2 hits=2 misses=1 hit_ratio=0.667 inserts=4 updates=0 evictions=1 removals=1\n"
        );
    }

    #[test]
    fn test_replay_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "PUT a 1").unwrap();
        writeln!(file, "PUT b 2").unwrap();
        writeln!(file, "PUT c 3").unwrap();
        writeln!(file, "KEYS").unwrap();

        let handler = handler(2);
        let input = BufReader::new(File::open(file.path()).unwrap());
        let mut output = Vec::new();

        replay(&handler, input, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "OK\nOK\nOK\nb c\n");
        assert_eq!(handler.stats().evictions(), 1);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["lrutrace"]);

        assert_eq!(args.capacity, 3);
        assert!(args.trace.is_none());
        assert!(!args.stats);
    }

    #[test]
    fn test_args_zero_capacity_rejected_by_store() {
        let args = Args::parse_from(["lrutrace", "--capacity", "0", "trace.txt"]);

        assert_eq!(args.trace, Some(PathBuf::from("trace.txt")));
        assert!(SharedLruStore::<String, String>::new(args.capacity).is_err());
    }
}
