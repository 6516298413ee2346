use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Mirrors every log line to the log file and stderr.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        io::stderr().write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        io::stderr().flush()
    }
}

pub fn format_line(timestamp: &str, level: log::Level, message: &str) -> String {
    format!("{timestamp} - {level} - {message}")
}

/// Installs the global logger. Must be called once, before the context is
/// built; the file handle stays open for the rest of the process.
pub fn init(log_path: &Path) -> io::Result<()> {
    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            writeln!(
                buf,
                "{}",
                format_line(&timestamp, record.level(), &record.args().to_string())
            )
        })
        .target(Target::Pipe(Box::new(Tee { file })))
        .try_init()
        .map_err(io::Error::other)
}
