use std::io::Write;
use std::sync::atomic::{AtomicU32, Ordering};

use moira_core::config::CheckerConfig;
use moira_core::logs::{self, DailyLogFile};

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

fn temp_dir(name: &str) -> std::path::PathBuf {
	let n = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
	let dir = std::env::temp_dir().join(format!("moira-core-test-{}-{}-{}", std::process::id(), n, name));
	let _ = std::fs::remove_dir_all(&dir);
	dir
}

fn now_secs() -> u64 {
	std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.unwrap()
		.as_secs()
}

// --- Config ---

#[test]
fn config_load_reads_file() {
	let dir = temp_dir("config");
	std::fs::create_dir_all(&dir).unwrap();
	let path = dir.join("checker.toml");
	std::fs::write(&path, "[worker]\nprogram = \"/bin/true\"\nargs = [\"a\", \"b\"]\n").unwrap();

	let config = CheckerConfig::load(&path).unwrap();
	assert_eq!(config.worker.program, std::path::PathBuf::from("/bin/true"));
	assert_eq!(config.worker.args, vec!["a".to_string(), "b".to_string()]);
	assert_eq!(config.logs.dir, "stdout");

	let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn config_load_reports_parse_errors_with_path() {
	let dir = temp_dir("config-bad");
	std::fs::create_dir_all(&dir).unwrap();
	let path = dir.join("checker.toml");
	std::fs::write(&path, "worker = [").unwrap();

	let err = CheckerConfig::load(&path).unwrap_err();
	assert!(err.to_string().contains("checker.toml"));

	let _ = std::fs::remove_dir_all(&dir);
}

// --- Daily log file ---

#[test]
fn daily_log_creates_directory_and_appends() {
	let dir = temp_dir("daily-append");
	let mut log = DailyLogFile::open(&dir, logs::MASTER_LOG_NAME).unwrap();
	log.write_all(b"first\n").unwrap();
	log.write_all(b"second\n").unwrap();
	log.flush().unwrap();

	let content = std::fs::read_to_string(dir.join("checker.log")).unwrap();
	assert_eq!(content, "first\nsecond\n");

	let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn daily_log_rotates_on_day_change() {
	let dir = temp_dir("daily-rotate");
	let now = now_secs();
	let (y, m, d, _, _) = logs::secs_to_datetime(now);

	let mut log = DailyLogFile::open(&dir, logs::MASTER_LOG_NAME).unwrap();
	log.write_at(b"today\n", now).unwrap();
	log.write_at(b"tomorrow\n", now + 86400).unwrap();
	log.flush().unwrap();

	let rotated = dir.join(format!("checker.log.{}", logs::daily_suffix(y, m, d)));
	assert_eq!(std::fs::read_to_string(&rotated).unwrap(), "today\n");
	assert_eq!(std::fs::read_to_string(log.path()).unwrap(), "tomorrow\n");

	let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn daily_log_reopened_from_an_older_day_rotates_to_that_day() {
	let dir = temp_dir("daily-reopen");
	std::fs::create_dir_all(&dir).unwrap();
	let path = dir.join(logs::MASTER_LOG_NAME);
	std::fs::write(&path, "from before\n").unwrap();

	let now = now_secs();
	let three_days_ago = now - 3 * 86400;
	std::fs::File::options()
		.write(true)
		.open(&path)
		.unwrap()
		.set_modified(std::time::UNIX_EPOCH + std::time::Duration::from_secs(three_days_ago))
		.unwrap();
	let (y, m, d, _, _) = logs::secs_to_datetime(three_days_ago);

	let mut log = DailyLogFile::open(&dir, logs::MASTER_LOG_NAME).unwrap();
	log.write_at(b"after restart\n", now).unwrap();
	log.flush().unwrap();

	let rotated = dir.join(format!("checker.log.{}", logs::daily_suffix(y, m, d)));
	assert_eq!(std::fs::read_to_string(&rotated).unwrap(), "from before\n");
	assert_eq!(std::fs::read_to_string(&path).unwrap(), "after restart\n");

	let _ = std::fs::remove_dir_all(&dir);
}
