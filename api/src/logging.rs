use anyhow::{Context, Result};
use env_logger::{Env, Target};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};

/// Writes every log line to stdout and to the append-only log file.
struct Tee {
    file: File,
    stdout: io::Stdout,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        self.stdout.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.stdout.flush()
    }
}

pub fn init(log_file: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("cannot open log file {}", log_file))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} {} {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(Tee {
            file,
            stdout: io::stdout(),
        })))
        .try_init()
        .context("logger already initialised")?;

    Ok(())
}
