//! Turns typed or pasted paths into the ingestion file list.
//!
//! Terminals deliver a drag-and-drop as pasted text: one or more paths,
//! possibly quoted, backslash-escaped or written as `file://` URLs. On
//! Windows a backslash is a path separator, never an escape.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dashboard_core::catalog::is_accepted_extension;
use dashboard_core::SelectedFile;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("aucun chemin fourni")]
    Empty,
    #[error("chemin mal formé: {0}")]
    Malformed(#[from] shell_words::ParseError),
    #[error("{}: introuvable", .0.display())]
    NotFound(PathBuf),
    #[error("{}: aucun fichier pris en charge", .0.display())]
    NoAcceptedFiles(PathBuf),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolves every path in `raw`. Directories contribute their accepted
/// files (non-recursive, sorted by name); plain files are taken as given.
pub fn resolve_input(raw: &str) -> Result<Vec<SelectedFile>, ResolveError> {
    let paths = split_paths(raw, cfg!(windows))?;
    if paths.is_empty() {
        return Err(ResolveError::Empty);
    }

    let mut files = Vec::new();
    for path in paths {
        files.extend(resolve_path(&path)?);
    }
    Ok(files)
}

fn resolve_path(path: &Path) -> Result<Vec<SelectedFile>, ResolveError> {
    let metadata = fs::metadata(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ResolveError::NotFound(path.to_path_buf()),
        _ => ResolveError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    if !metadata.is_dir() {
        return Ok(vec![selected(path, metadata.len())]);
    }

    let io_error = |source| ResolveError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(path).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let entry_path = entry.path();
        let accepted = entry_path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(is_accepted_extension);
        if !accepted {
            continue;
        }
        let metadata = entry.metadata().map_err(io_error)?;
        if metadata.is_file() {
            files.push(selected(&entry_path, metadata.len()));
        }
    }
    if files.is_empty() {
        return Err(ResolveError::NoAcceptedFiles(path.to_path_buf()));
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

fn selected(path: &Path, size_bytes: u64) -> SelectedFile {
    SelectedFile {
        path: path.to_path_buf(),
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        size_bytes,
    }
}

/// Splits pasted text into paths with shell quoting rules. With
/// `literal_backslashes`, backslashes outside single quotes are kept as typed.
fn split_paths(
    raw: &str,
    literal_backslashes: bool,
) -> Result<Vec<PathBuf>, shell_words::ParseError> {
    let prepared = if literal_backslashes {
        Cow::Owned(escape_backslashes(raw))
    } else {
        Cow::Borrowed(raw)
    };

    Ok(shell_words::split(&prepared)?
        .into_iter()
        .filter(|word| !word.is_empty())
        .map(|word| match Url::parse(&word) {
            Ok(url) if url.scheme() == "file" => {
                url.to_file_path().unwrap_or_else(|()| PathBuf::from(&word))
            }
            _ => PathBuf::from(word),
        })
        .collect())
}

/// Doubles every backslash the shell rules would consume. Single-quoted
/// text is already literal.
fn escape_backslashes(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    let mut quote: Option<char> = None;
    for ch in raw.chars() {
        match (quote, ch) {
            (None, '\'' | '"') => quote = Some(ch),
            (Some(open), ch) if ch == open => quote = None,
            (None | Some('"'), '\\') => escaped.push('\\'),
            _ => {}
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use std::io::Write;

    fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap().write_all(bytes).unwrap();
        path
    }

    #[test]
    fn splits_quoted_escaped_and_url_paths() {
        let raw = "'/tmp/a b.pdf' /tmp/c\\ d.md\n\"/tmp/e.txt\" file:///tmp/f%20g.docx";
        assert_eq!(
            split_paths(raw, false).unwrap(),
            vec![
                PathBuf::from("/tmp/a b.pdf"),
                PathBuf::from("/tmp/c d.md"),
                PathBuf::from("/tmp/e.txt"),
                PathBuf::from("/tmp/f g.docx"),
            ]
        );
        assert!(split_paths("  \n ", false).unwrap().is_empty());
    }

    #[test]
    fn windows_paths_keep_their_backslashes() {
        let raw = r#"C:\Users\me\doc.pdf "D:\My Docs\notes.md" 'E:\lot\a.txt' \\nas\share\b.pdf"#;
        assert_eq!(
            split_paths(raw, true).unwrap(),
            vec![
                PathBuf::from(r"C:\Users\me\doc.pdf"),
                PathBuf::from(r"D:\My Docs\notes.md"),
                PathBuf::from(r"E:\lot\a.txt"),
                PathBuf::from(r"\\nas\share\b.pdf"),
            ]
        );
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        assert!(split_paths("'/tmp/a.pdf /tmp/b.pdf", false).is_err());
        let err = resolve_input("\"/tmp/a.pdf").unwrap_err();
        assert!(matches!(err, ResolveError::Malformed(_)));
        assert!(err.to_string().starts_with("chemin mal formé"));
    }

    #[test]
    fn explicit_files_are_taken_with_their_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "notes.bin", &[0; 1536]);

        let files = resolve_input(&format!("'{}'", path.display())).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "notes.bin");
        assert_eq!(files[0].size_bytes, 1536);
    }

    #[test]
    fn directories_contribute_accepted_formats_only() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.md", b"# b");
        write(dir.path(), "a.PDF", b"%PDF");
        write(dir.path(), "skip.png", b"png");
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let files = resolve_input(&dir.path().display().to_string()).unwrap();
        let names: Vec<&str> = files.iter().map(|file| file.name.as_str()).collect();
        assert_eq!(names, vec!["a.PDF", "b.md"]);
    }

    #[test]
    fn missing_and_empty_inputs_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "image.png", b"png");

        assert!(matches!(resolve_input("   "), Err(ResolveError::Empty)));
        assert!(matches!(
            resolve_input(&dir.path().join("absent.pdf").display().to_string()),
            Err(ResolveError::NotFound(_))
        ));
        let err = resolve_input(&dir.path().display().to_string()).unwrap_err();
        assert!(matches!(err, ResolveError::NoAcceptedFiles(_)));
        assert!(err.to_string().ends_with("aucun fichier pris en charge"));
    }
}
