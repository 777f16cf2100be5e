//! Fake `ssh`, `rsync`, `stop` and `start` executables.
//!
//! `ssh` runs the script it is handed locally, so remote paths are real
//! paths inside the test's remote directory. Every invocation is logged
//! under `$FAKE_LOG_DIR`.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const FAKE_SSH: &str = r#"#!/bin/sh
for script; do :; done
printf '%s\n---\n' "$script" >> "$FAKE_LOG_DIR/ssh.log"
exec /bin/sh -c "$script"
"#;

const FAKE_RSYNC: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$FAKE_LOG_DIR/rsync.log"
if [ -n "$FAKE_RSYNC_FAIL" ]; then
  echo "rsync: connection unexpectedly closed" >&2
  exit 12
fi
set -f
mirror=0
excludes=""
while [ $# -gt 2 ]; do
  case "$1" in
    -e) shift ;;
    --delete) mirror=1 ;;
    --exclude=*) excludes="$excludes ${1#--exclude=}" ;;
  esac
  shift
done
src="${1#*:}"
dst="${2#*:}"
if [ "$mirror" = 1 ]; then
  mkdir -p "$dst"
  find "$dst" -mindepth 1 -maxdepth 1 -exec rm -rf {} +
  cp -R "$src/." "$dst/"
  for pattern in $excludes; do
    pattern="${pattern#/}"
    pattern="${pattern%/}"
    find "$dst" -mindepth 1 -name "$pattern" -prune -exec rm -rf {} +
  done
  echo "sending incremental file list"
else
  if [ ! -f "$src" ]; then
    echo "rsync: link_stat \"$src\" failed: No such file or directory (2)" >&2
    exit 23
  fi
  cp "$src" "$dst"
fi
"#;

const FAKE_STOP: &str = r#"#!/bin/sh
echo "stop $1" >> "$FAKE_LOG_DIR/service.log"
state="$FAKE_LOG_DIR/$1.state"
if [ ! -f "$state" ]; then
  echo "stop: Unknown job: $1" >&2
  exit 1
fi
if [ "$(cat "$state")" != running ]; then
  echo "stop: Unknown instance: " >&2
  exit 1
fi
echo stopped > "$state"
echo "$1 stop/waiting"
"#;

const FAKE_START: &str = r#"#!/bin/sh
echo "start $1" >> "$FAKE_LOG_DIR/service.log"
state="$FAKE_LOG_DIR/$1.state"
if [ ! -f "$state" ]; then
  echo "start: Unknown job: $1" >&2
  exit 1
fi
echo running > "$state"
echo "$1 start/running"
"#;

/// Directory holding the fake executables, written once per test binary
pub fn fake_bin_dir() -> &'static Path {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join("cutover-fake-bin");
        fs::create_dir_all(&dir).unwrap();
        for (name, body) in [
            ("ssh", FAKE_SSH),
            ("rsync", FAKE_RSYNC),
            ("stop", FAKE_STOP),
            ("start", FAKE_START),
        ] {
            install_script(&dir, name, body);
        }
        dir
    })
}

/// Write to a temporary name and rename into place, so no executable is
/// ever open for writing while another test spawns it.
fn install_script(dir: &Path, name: &str, body: &str) {
    let staging = dir.join(format!(".{}.{}.tmp", name, std::process::id()));
    fs::write(&staging, body).unwrap();
    fs::set_permissions(&staging, fs::Permissions::from_mode(0o755)).unwrap();
    fs::rename(&staging, dir.join(name)).unwrap();
}
