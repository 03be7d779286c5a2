use crate::session::Session;
use crate::tokenizer::{Token, leading_args};
use anyhow::Result;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};

/// Hands an argument vector to an external program, synchronously.
///
/// Walks the token vector by start index: holes are skipped, and each present
/// token is tried as a program name with the tokens after it (up to the next
/// hole) as argv. A failed attempt prints a message and moves on to the next
/// index; a successful spawn records the child's pid into the session's pid
/// ring, blocks until that child exits, and returns. Exhausting every token
/// without a successful spawn returns normally and the loop reads the next
/// line.
pub fn launch(tokens: &[Token], session: &mut Session) -> Result<()> {
    let search_paths = std::env::var_os("PATH").unwrap_or_default();

    for start in 0..tokens.len() {
        let Some(name) = tokens[start].as_deref() else {
            continue;
        };
        let args = leading_args(&tokens[start + 1..]);

        match spawn_program(&search_paths, name, &args) {
            Ok(mut child) => {
                session.pids.record(child.id());
                log::debug!("spawned {} as pid {}", name, child.id());
                let status = child.wait()?;
                log::debug!("{} exited with {:?}", name, status.code());
                return Ok(());
            }
            Err(err) => {
                eprintln!("{}: {}", name, err);
            }
        }
    }
    Ok(())
}

fn spawn_program(search_paths: &OsStr, name: &str, args: &[&str]) -> io::Result<Child> {
    let program = find_command_path(search_paths, Path::new(name))
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "command not found"))?;
    Command::new(program.as_ref()).args(args).spawn()
}

/// Resolves `path` to an existing executable location.
///
/// Absolute paths and multi-component relative paths (`bin/sh`, `./foo`) are
/// checked directly against the filesystem. A bare name is looked up in each
/// directory of `search_paths` (PATH order), first hit wins. An empty path
/// resolves to nothing.
///
/// The return borrows `path` where possible; only a PATH hit allocates.
pub fn find_command_path<'a>(search_paths: &OsStr, path: &'a Path) -> Option<Cow<'a, Path>> {
    if path.is_absolute() {
        return find_by_path(path).map(Cow::Borrowed);
    }

    let search_in_current_dir = cfg!(not(unix)) || path.starts_with("./");
    if search_in_current_dir && path.exists() {
        return Some(Cow::Borrowed(path));
    }

    let mut components = path.components();
    let first = components.next();
    let second = components.next();
    match (first, second) {
        (None, None) => {
            // Empty path -> not found
            None
        }
        (Some(x), None) => {
            // Single component -> search in PATH
            find_in_path(search_paths, x.as_os_str()).map(Cow::Owned)
        }
        _ => {
            // Multiple components -> search in current dir
            find_by_path(path).map(Cow::Borrowed)
        }
    }
}

fn find_in_path(search_paths: &OsStr, cmd: &OsStr) -> Option<PathBuf> {
    for dir in std::env::split_paths(search_paths) {
        let path = dir.join(cmd);
        if let Some(path) = find_by_path(&path) {
            return Some(path.to_owned());
        }
    }
    None
}

fn find_by_path(path: &Path) -> Option<&Path> {
    if path.exists() { Some(path) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[cfg(unix)]
    fn osstr(s: &str) -> &OsStr {
        OsStr::new(s)
    }

    #[test]
    #[cfg(unix)]
    fn absolute_existing_path_resolves() {
        let path = Path::new("/bin/sh");
        let res = find_command_path(osstr("/bin"), path);
        assert!(res.is_some(), "/bin/sh should resolve as-is");
        assert_eq!(res.unwrap().as_ref(), path);
    }

    #[test]
    #[cfg(unix)]
    fn absolute_missing_path_is_none() {
        let res = find_command_path(osstr("/bin"), Path::new("/bin/nonexisting"));
        assert!(res.is_none());
    }

    #[test]
    #[cfg(unix)]
    fn single_component_found_via_path_search() {
        let res = find_command_path(osstr("/bin"), Path::new("sh"));
        let found = res.expect("bare 'sh' should be picked up from the search path");
        assert!(found.as_ref().ends_with("sh"));
        assert!(found.as_ref().starts_with("/bin"));
    }

    #[test]
    #[cfg(unix)]
    fn single_component_missing_is_none() {
        let res = find_command_path(osstr("/bin"), Path::new("nonexisting"));
        assert!(res.is_none());
    }

    #[test]
    #[cfg(unix)]
    fn empty_path_is_none() {
        let res = find_command_path(osstr("/bin"), Path::new(""));
        assert!(res.is_none());
    }

    #[cfg(unix)]
    fn unique_temp_file(tag: &str) -> std::path::PathBuf {
        use std::time::{SystemTime, UNIX_EPOCH};
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("msh_{}_{}_{}", tag, std::process::id(), nanos))
    }

    #[test]
    #[cfg(unix)]
    fn launch_records_pid_and_waits() {
        let mut session = Session::new();
        let tokens = tokenize("true");
        launch(&tokens, &mut session).unwrap();
        assert_eq!(session.pids.len(), 1);
    }

    #[test]
    #[cfg(unix)]
    fn launch_passes_arguments_to_the_child() {
        let mut session = Session::new();
        let target = unique_temp_file("launch_args");
        let _ = std::fs::remove_file(&target);

        let tokens = tokenize(&format!("touch {}", target.display()));
        launch(&tokens, &mut session).unwrap();

        // launch returns only after the child exits, so the file is already
        // on disk by the time we look.
        assert!(target.exists(), "touch never saw its argument");
        assert_eq!(session.pids.len(), 1);
        let _ = std::fs::remove_file(&target);
    }

    #[test]
    #[cfg(unix)]
    fn launch_hands_the_child_its_exact_argv() {
        let mut session = Session::new();
        let target = unique_temp_file("launch_argv");
        let _ = std::fs::remove_file(&target);

        // sh only runs the script if argv is exactly ["-c", script]; a
        // dropped, shifted or duplicated argument leaves the file unwritten.
        let script = format!("echo ok > {}", target.display());
        let tokens: Vec<Token> = vec![
            Some("sh".to_string()),
            Some("-c".to_string()),
            Some(script),
        ];
        launch(&tokens, &mut session).unwrap();

        let body = std::fs::read_to_string(&target).expect("sh -c never ran its script");
        assert_eq!(body, "ok\n");
        let _ = std::fs::remove_file(&target);
    }

    #[test]
    #[cfg(unix)]
    fn launch_retries_from_next_token_on_failure() {
        let mut session = Session::new();
        // The first token cannot be resolved, so the launcher moves on and
        // runs the second token as the program.
        let tokens = tokenize("definitely_not_a_command_msh true");
        launch(&tokens, &mut session).unwrap();
        assert_eq!(session.pids.len(), 1);
    }

    #[test]
    fn launch_with_only_holes_spawns_nothing() {
        let mut session = Session::new();
        launch(&tokenize("  "), &mut session).unwrap();
        assert!(session.pids.is_empty());
    }

    #[test]
    fn launch_with_unresolvable_name_spawns_nothing() {
        let mut session = Session::new();
        launch(&tokenize("definitely_not_a_command_msh"), &mut session).unwrap();
        assert!(session.pids.is_empty());
    }
}
