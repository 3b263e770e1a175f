use std::path::{Component, Path, PathBuf};

/// Resolves a CWD argument: absolute arguments replace the working directory, relative
/// ones are joined to it.
pub fn resolve_dir(working_dir: &Path, arg: &str) -> PathBuf {
    let joined = if arg.starts_with('/') {
        PathBuf::from(arg)
    } else {
        working_dir.join(arg)
    };
    clean_path(&joined)
}

/// Builds the path of a file named in STOR/RETR. The name is always taken relative to the
/// working directory, even with a leading `/`.
pub fn construct_file_path(working_dir: &Path, name: &str) -> PathBuf {
    clean_path(&working_dir.join(name.trim_start_matches('/')))
}

/// Lexically collapses `.` and `..` components without touching the filesystem.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}
