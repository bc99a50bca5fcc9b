use crate::config::STDOUT_LOG_TARGET;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const MASTER_LOG_NAME: &str = "checker.log";

/// Where a process sends its log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
	Stdout,
	Directory(PathBuf),
}

impl LogTarget {
	/// `stdout` is the literal marker for console logging; anything else is a directory.
	pub fn parse(raw: &str) -> Self {
		if raw == STDOUT_LOG_TARGET {
			LogTarget::Stdout
		} else {
			LogTarget::Directory(PathBuf::from(raw))
		}
	}
}

pub fn worker_log_name(index: usize) -> String {
	format!("checker-{}.log", index)
}

/// Suffix appended to a finished daily log: `YYYYMMDD`.
pub fn daily_suffix(year: u32, month: u32, day: u32) -> String {
	format!("{:04}{:02}{:02}", year, month, day)
}

/// A log file that is closed and renamed with a date suffix when the UTC day changes.
pub struct DailyLogFile {
	dir: PathBuf,
	name: String,
	file: File,
	day: (u32, u32, u32),
}

impl DailyLogFile {
	pub fn open(dir: &Path, name: &str) -> io::Result<Self> {
		fs::create_dir_all(dir)?;
		let path = dir.join(name);
		let day = match fs::metadata(&path).and_then(|m| m.modified()) {
			Ok(modified) => ymd(system_secs(modified)),
			Err(_) => ymd(now_secs()),
		};
		let file = open_append(&path)?;
		Ok(Self {
			dir: dir.to_path_buf(),
			name: name.to_string(),
			file,
			day,
		})
	}

	pub fn path(&self) -> PathBuf {
		self.dir.join(&self.name)
	}

	pub fn write_at(&mut self, data: &[u8], now: u64) -> io::Result<()> {
		let today = ymd(now);
		if today != self.day {
			self.rotate(today)?;
		}
		self.file.write_all(data)
	}

	fn rotate(&mut self, today: (u32, u32, u32)) -> io::Result<()> {
		self.file.flush()?;
		let (y, m, d) = self.day;
		let rotated = self.dir.join(format!("{}.{}", self.name, daily_suffix(y, m, d)));
		fs::rename(self.path(), rotated)?;
		self.file = open_append(&self.path())?;
		self.day = today;
		Ok(())
	}
}

impl Write for DailyLogFile {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.write_at(buf, now_secs())?;
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		self.file.flush()
	}
}

fn open_append(path: &Path) -> io::Result<File> {
	OpenOptions::new().create(true).append(true).open(path)
}

fn now_secs() -> u64 {
	system_secs(SystemTime::now())
}

fn system_secs(t: SystemTime) -> u64 {
	t.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

fn ymd(secs: u64) -> (u32, u32, u32) {
	let (y, m, d, _, _) = secs_to_datetime(secs);
	(y, m, d)
}

/// UTC `(year, month, day, hour, minute)` from a unix timestamp.
pub fn secs_to_datetime(secs: u64) -> (u32, u32, u32, u32, u32) {
	let days = (secs / 86400) as i64;
	let time_of_day = secs % 86400;
	let hour = (time_of_day / 3600) as u32;
	let minute = ((time_of_day % 3600) / 60) as u32;

	// civil_from_days
	let z = days + 719468;
	let era = if z >= 0 { z } else { z - 146096 } / 146097;
	let doe = (z - era * 146097) as u32;
	let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
	let y = yoe as i64 + era * 400;
	let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
	let mp = (5 * doy + 2) / 153;
	let d = doy - (153 * mp + 2) / 5 + 1;
	let m = if mp < 10 { mp + 3 } else { mp - 9 };
	let y = if m <= 2 { y + 1 } else { y };

	(y as u32, m, d, hour, minute)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_secs_to_datetime() {
		// 2026-02-14 00:00:00 UTC
		assert_eq!(secs_to_datetime(1771027200), (2026, 2, 14, 0, 0));
		assert_eq!(secs_to_datetime(1771027200 + 9 * 3600 + 47 * 60), (2026, 2, 14, 9, 47));
	}

	#[test]
	fn test_daily_suffix_is_zero_padded() {
		assert_eq!(daily_suffix(2026, 2, 4), "20260204");
		assert_eq!(daily_suffix(2026, 11, 30), "20261130");
	}

	#[test]
	fn test_log_target_parse() {
		assert_eq!(LogTarget::parse("stdout"), LogTarget::Stdout);
		assert_eq!(
			LogTarget::parse("/var/log/moira"),
			LogTarget::Directory(PathBuf::from("/var/log/moira"))
		);
	}

	#[test]
	fn test_worker_log_name() {
		assert_eq!(worker_log_name(0), "checker-0.log");
		assert_eq!(worker_log_name(12), "checker-12.log");
	}
}
