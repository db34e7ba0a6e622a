//! Model path resolution: environment expansion and existence check.

use std::path::PathBuf;

use super::AdapterError;

/// Expand `$VAR` and `${VAR}` references against the process environment.
///
/// Unset variables are left in place verbatim so the failure surfaces in
/// the not-found error instead of silently pointing at a different file.
pub fn expand_env_vars(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        let rest = &path[idx + 1..];
        let (name, consumed) = if let Some(inner) = rest.strip_prefix('{') {
            match inner.find('}') {
                Some(end) => (&inner[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = rest
                .find(|ch: char| !ch.is_ascii_alphanumeric() && ch != '_')
                .unwrap_or(rest.len());
            (&rest[..end], end)
        };

        if name.is_empty() {
            out.push('$');
            continue;
        }

        match std::env::var(name) {
            Ok(value) => out.push_str(&value),
            Err(_) => {
                out.push('$');
                continue;
            }
        }
        while chars.peek().is_some_and(|&(i, _)| i < idx + 1 + consumed) {
            chars.next();
        }
    }

    out
}

/// Resolve a model path: reject empty paths, expand environment variables,
/// and require the file to exist.
pub fn resolve(path: &str) -> Result<PathBuf, AdapterError> {
    if path.trim().is_empty() {
        return Err(AdapterError::EmptyPath);
    }
    let expanded = PathBuf::from(expand_env_vars(path));
    if !expanded.is_file() {
        return Err(AdapterError::FileNotFound(expanded));
    }
    Ok(expanded)
}
