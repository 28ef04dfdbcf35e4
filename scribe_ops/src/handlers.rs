//! The three operation workflows: create, edit, read.
//!
//! Each call re-resolves its path and re-reads from storage; the
//! filesystem is the single source of truth and no state survives
//! between calls. Concurrent calls against the same path race at the
//! filesystem level (last write wins); the per-edit timestamped backup
//! is the recovery path for a lost update.

use std::fs;

use scribe_config::Config;
use scribe_edit::{LineBuffer, LineEnding, replace_lines};
use scribe_fs::{ENCODING_NAME, create_backup, decode, encode, resolve_path, verify_file, write_atomic};
use tracing::debug;

use crate::error::{OpError, OpResult};
use crate::protocol::{
    CreateRequest, CreateResponse, EditRequest, EditResponse, ReadRequest, ReadResponse,
};

/// Create or overwrite `path` with `text` transcoded to Windows-1252,
/// then verify what actually landed on disk.
pub fn create(config: &Config, request: &CreateRequest) -> OpResult<CreateResponse> {
    let path = resolve_path(&request.path, config.sandbox_root.as_deref())?;
    debug!(path = %path.display(), bytes = request.text.len(), "create");

    write_atomic(&path, &encode(&request.text))?;
    let verification = verify_file(&path)?;

    Ok(CreateResponse {
        success: true,
        path: path.display().to_string(),
        encoding: ENCODING_NAME,
        corruption_count: verification.corruption_count,
        is_clean: verification.is_clean,
    })
}

/// Replace an inclusive 1-based line range of an existing file.
///
/// The file's own terminator convention is detected before the edit and
/// is authoritative for the rejoin, whatever style the replacement text
/// uses. A timestamped backup is taken strictly before any mutation; if
/// the backup fails the file is left untouched.
pub fn edit(config: &Config, request: &EditRequest) -> OpResult<EditResponse> {
    let path = resolve_path(&request.path, config.sandbox_root.as_deref())?;
    if !path.exists() {
        return Err(OpError::NotFound(path));
    }
    debug!(
        path = %path.display(),
        start = request.start_line,
        end = request.end_line,
        "edit"
    );

    let backup_path = create_backup(&path, &config.backup_root)?;

    let text = decode(&fs::read(&path)?);
    let ending = LineEnding::detect(&text);

    let mut buffer = LineBuffer::from_text(&text);
    let outcome = replace_lines(
        &mut buffer,
        to_line_number(request.start_line),
        to_line_number(request.end_line),
        &request.replacement_text,
    )?;

    write_atomic(&path, &encode(&buffer.join(ending)))?;
    let verification = verify_file(&path)?;

    Ok(EditResponse {
        success: true,
        path: path.display().to_string(),
        encoding: ENCODING_NAME,
        corruption_count: verification.corruption_count,
        is_clean: verification.is_clean,
        lines_replaced: outcome.lines_replaced,
        total_lines: outcome.total_lines,
        backup_path: backup_path.display().to_string(),
    })
}

/// Read a file back as UTF-8 text with its line statistics.
pub fn read(config: &Config, request: &ReadRequest) -> OpResult<ReadResponse> {
    let path = resolve_path(&request.path, config.sandbox_root.as_deref())?;
    if !path.exists() {
        return Err(OpError::NotFound(path));
    }
    debug!(path = %path.display(), "read");

    let content = decode(&fs::read(&path)?);
    let ending = LineEnding::detect(&content);
    let lines = LineBuffer::from_text(&content).line_count();

    Ok(ReadResponse {
        success: true,
        path: path.display().to_string(),
        content,
        lines,
        line_ending: ending.label(),
    })
}

/// Wire line numbers arrive as u64; the engine works in usize. Values
/// beyond usize are clamped and rejected by the range checks instead of
/// wrapping.
fn to_line_number(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn test_config(root: &std::path::Path) -> Config {
        Config::with_roots(None, root.to_path_buf())
    }

    fn path_string(root: &std::path::Path, name: &str) -> String {
        root.join(name).display().to_string()
    }

    #[test]
    fn test_create_then_read_round_trips() {
        let dir = tempdir().expect("temp dir");
        let config = test_config(dir.path());
        let path = path_string(dir.path(), "greeting.txt");

        let created = create(
            &config,
            &CreateRequest { path: path.clone(), text: "Café, niño".to_string() },
        )
        .expect("create");
        assert!(created.success);
        assert_eq!(created.encoding, "windows-1252");
        assert!(created.is_clean);
        assert_eq!(created.corruption_count, 0);

        let got = read(&config, &ReadRequest { path }).expect("read");
        assert_eq!(got.content, "Café, niño");
        assert_eq!(got.lines, 1);
    }

    #[test]
    fn test_create_writes_single_byte_encoding() {
        let dir = tempdir().expect("temp dir");
        let config = test_config(dir.path());
        let path = path_string(dir.path(), "bytes.txt");

        create(&config, &CreateRequest { path: path.clone(), text: "é€".to_string() })
            .expect("create");

        let bytes = fs::read(dir.path().join("bytes.txt")).expect("raw bytes");
        assert_eq!(bytes, vec![0xE9, 0x80]);
    }

    #[test]
    fn test_create_relative_path_rejected() {
        let dir = tempdir().expect("temp dir");
        let config = test_config(dir.path());

        let err = create(
            &config,
            &CreateRequest { path: "relative.txt".to_string(), text: String::new() },
        )
        .expect_err("must reject");
        assert!(matches!(err, OpError::Path(_)));
    }

    #[test]
    fn test_sandbox_enforced() {
        let dir = tempdir().expect("temp dir");
        let config = Config::with_roots(Some(dir.path().to_path_buf()), dir.path().to_path_buf());

        let err = create(
            &config,
            &CreateRequest { path: "/somewhere/else.txt".to_string(), text: String::new() },
        )
        .expect_err("must reject");
        assert!(matches!(err, OpError::Path(_)));
    }

    #[test]
    fn test_edit_missing_file_is_not_found() {
        let dir = tempdir().expect("temp dir");
        let config = test_config(dir.path());

        let err = edit(
            &config,
            &EditRequest {
                path: path_string(dir.path(), "absent.txt"),
                start_line: 1,
                end_line: 1,
                replacement_text: "x".to_string(),
            },
        )
        .expect_err("must fail");
        assert!(matches!(err, OpError::NotFound(_)));
    }

    #[test]
    fn test_edit_replaces_range_and_reports_counts() {
        let dir = tempdir().expect("temp dir");
        let config = test_config(dir.path());
        let path = path_string(dir.path(), "doc.txt");

        create(
            &config,
            &CreateRequest { path: path.clone(), text: "a\nb\nc\nd\ne".to_string() },
        )
        .expect("create");

        let edited = edit(
            &config,
            &EditRequest {
                path: path.clone(),
                start_line: 2,
                end_line: 4,
                replacement_text: "middle".to_string(),
            },
        )
        .expect("edit");
        assert_eq!(edited.lines_replaced, 3);
        assert_eq!(edited.total_lines, 3);
        assert!(edited.is_clean);

        let got = read(&config, &ReadRequest { path }).expect("read");
        assert_eq!(got.content, "a\nmiddle\ne");
    }

    #[test]
    fn test_edit_preserves_crlf_convention() {
        let dir = tempdir().expect("temp dir");
        let config = test_config(dir.path());
        let path = path_string(dir.path(), "dos.txt");

        create(
            &config,
            &CreateRequest { path: path.clone(), text: "one\r\ntwo\r\nthree".to_string() },
        )
        .expect("create");

        // Replacement uses LF internally; the file's CRLF wins.
        edit(
            &config,
            &EditRequest {
                path: path.clone(),
                start_line: 2,
                end_line: 2,
                replacement_text: "2a\n2b".to_string(),
            },
        )
        .expect("edit");

        let bytes = fs::read(dir.path().join("dos.txt")).expect("raw bytes");
        assert_eq!(bytes, b"one\r\n2a\r\n2b\r\nthree");

        let got = read(&config, &ReadRequest { path }).expect("read");
        assert_eq!(got.line_ending, "CRLF");
        assert_eq!(got.lines, 4);
    }

    #[test]
    fn test_edit_backup_holds_pre_edit_content() {
        let dir = tempdir().expect("temp dir");
        let config = test_config(dir.path());
        let path = path_string(dir.path(), "data.txt");

        create(&config, &CreateRequest { path: path.clone(), text: "before".to_string() })
            .expect("create");

        let edited = edit(
            &config,
            &EditRequest {
                path,
                start_line: 1,
                end_line: 1,
                replacement_text: "after".to_string(),
            },
        )
        .expect("edit");

        let backup = PathBuf::from(&edited.backup_path);
        assert!(backup.exists());
        assert_eq!(fs::read(&backup).expect("backup bytes"), b"before");
        assert_eq!(fs::read(dir.path().join("data.txt")).expect("file bytes"), b"after");
    }

    #[test]
    fn test_edit_range_error_names_both_bounds() {
        let dir = tempdir().expect("temp dir");
        let config = test_config(dir.path());
        let path = path_string(dir.path(), "short.txt");

        let ten_lines = (1..=10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        create(&config, &CreateRequest { path: path.clone(), text: ten_lines }).expect("create");

        let err = edit(
            &config,
            &EditRequest {
                path: path.clone(),
                start_line: 15,
                end_line: 20,
                replacement_text: "x".to_string(),
            },
        )
        .expect_err("must fail");
        let message = err.to_string();
        assert!(matches!(err, OpError::Range(_)));
        assert!(message.contains("15") && message.contains("10"));

        let err = edit(
            &config,
            &EditRequest {
                path,
                start_line: 0,
                end_line: 1,
                replacement_text: "x".to_string(),
            },
        )
        .expect_err("must fail");
        assert!(matches!(err, OpError::Range(_)));
    }

    #[test]
    fn test_rejected_edit_leaves_file_untouched() {
        let dir = tempdir().expect("temp dir");
        let config = test_config(dir.path());
        let path = path_string(dir.path(), "doc.txt");

        create(&config, &CreateRequest { path: path.clone(), text: "a\nb".to_string() })
            .expect("create");
        let _ = edit(
            &config,
            &EditRequest { path, start_line: 5, end_line: 9, replacement_text: "x".to_string() },
        );

        assert_eq!(fs::read(dir.path().join("doc.txt")).expect("bytes"), b"a\nb");
    }

    #[test]
    fn test_lossy_create_reports_but_does_not_fail() {
        let dir = tempdir().expect("temp dir");
        let config = test_config(dir.path());
        let path = path_string(dir.path(), "lossy.txt");

        let created = create(
            &config,
            &CreateRequest { path: path.clone(), text: "日本語".to_string() },
        )
        .expect("lossy create still succeeds");
        assert!(created.success);

        let got = read(&config, &ReadRequest { path }).expect("read");
        assert_eq!(got.content, "???");
    }

    #[test]
    fn test_read_reports_lf_file() {
        let dir = tempdir().expect("temp dir");
        let config = test_config(dir.path());
        let path = path_string(dir.path(), "unix.txt");

        create(&config, &CreateRequest { path: path.clone(), text: "a\nb\nc\n".to_string() })
            .expect("create");

        let got = read(&config, &ReadRequest { path }).expect("read");
        assert_eq!(got.line_ending, "LF");
        assert_eq!(got.lines, 4);
        assert_eq!(got.content, "a\nb\nc\n");
    }
}
