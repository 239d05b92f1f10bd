//! Removal of a single directory entry that must be a regular file.
//!
//! A removal is confined to a trusted `root` directory: the literal part of
//! the pattern the path came from. The root itself may sit behind symlinks,
//! but no directory between the root and the entry may be one, since a
//! wildcard walking into a linked directory can reach anywhere on disk.
//!
//! On Unix the root is opened once, each directory below it is opened with
//! `openat(O_NOFOLLOW | O_DIRECTORY)`, the entry is re-checked with
//! `fstatat(AT_SYMLINK_NOFOLLOW)` and removed with `unlinkat(dirfd, name, 0)`
//! relative to the last descriptor. Without `AT_REMOVEDIR` the kernel never
//! removes a directory, and unlinking a symlink never touches its target.
//!
//! Known limitation: there is no "unlink if regular" syscall. If the entry is
//! replaced by a symlink between the re-check and the unlink, the link itself
//! is removed. Its target is left alone.

use std::io;
use std::path::Path;

/// What [`unlink_regular`] found at the path.
#[derive(Debug, PartialEq, Eq)]
pub enum Unlinked {
    Removed,
    NotRegular,
}

/// Split the parent of `path` into `root` and the directories below it.
/// A path outside `root` is confined to its own parent.
fn split_parent<'a>(root: &'a Path, path: &'a Path) -> (&'a Path, &'a Path) {
    let parent = path.parent().unwrap_or(Path::new(""));
    match parent.strip_prefix(root) {
        Ok(below) => (root, below),
        Err(_) => (parent, Path::new("")),
    }
}

/// Whether any directory between `root` and `path` is a symlink.
pub fn crosses_symlink(root: &Path, path: &Path) -> io::Result<bool> {
    let (root, below) = split_parent(root, path);
    let mut dir = root.to_path_buf();
    for component in below.components() {
        dir.push(component);
        if std::fs::symlink_metadata(&dir)?.file_type().is_symlink() {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(unix)]
pub fn unlink_regular(root: &Path, path: &Path) -> io::Result<Unlinked> {
    use std::mem::MaybeUninit;
    use std::path::Component;

    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let (start, below) = split_parent(root, path);
    let start = if start.as_os_str().is_empty() {
        Path::new(".")
    } else {
        start
    };

    let c_start = c_path(start.as_os_str())?;
    let fd = unsafe {
        libc::open(
            c_start.as_ptr(),
            libc::O_RDONLY | libc::O_DIRECTORY | libc::O_CLOEXEC,
        )
    };
    if fd < 0 {
        return Err(io::Error::last_os_error());
    }
    let mut dir = DirFd(fd);

    for component in below.components() {
        let Component::Normal(component) = component else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "unexpected path component",
            ));
        };
        let c_component = c_path(component)?;
        let fd = unsafe {
            libc::openat(
                dir.0,
                c_component.as_ptr(),
                libc::O_RDONLY | libc::O_DIRECTORY | libc::O_NOFOLLOW | libc::O_CLOEXEC,
            )
        };
        if fd < 0 {
            let err = io::Error::last_os_error();
            return match err.raw_os_error() {
                Some(libc::ELOOP | libc::ENOTDIR) => Ok(Unlinked::NotRegular),
                _ => Err(err),
            };
        }
        dir = DirFd(fd);
    }

    let c_name = c_path(name)?;
    let mut stat = MaybeUninit::<libc::stat>::uninit();
    let ret = unsafe {
        libc::fstatat(
            dir.0,
            c_name.as_ptr(),
            stat.as_mut_ptr(),
            libc::AT_SYMLINK_NOFOLLOW,
        )
    };
    if ret != 0 {
        return Err(io::Error::last_os_error());
    }
    let stat = unsafe { stat.assume_init() };
    if stat.st_mode & libc::S_IFMT != libc::S_IFREG {
        return Ok(Unlinked::NotRegular);
    }

    let ret = unsafe { libc::unlinkat(dir.0, c_name.as_ptr(), 0) };
    if ret != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(Unlinked::Removed)
}

/// Fallback without `*at` syscalls: re-check with `symlink_metadata`, then
/// `remove_file`. The window between the two calls is wider than on Unix.
#[cfg(not(unix))]
pub fn unlink_regular(root: &Path, path: &Path) -> io::Result<Unlinked> {
    if crosses_symlink(root, path)? || !std::fs::symlink_metadata(path)?.file_type().is_file() {
        return Ok(Unlinked::NotRegular);
    }
    std::fs::remove_file(path)?;
    Ok(Unlinked::Removed)
}

#[cfg(unix)]
fn c_path(part: &std::ffi::OsStr) -> io::Result<std::ffi::CString> {
    use std::os::unix::ffi::OsStrExt;

    std::ffi::CString::new(part.as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

#[cfg(unix)]
struct DirFd(libc::c_int);

#[cfg(unix)]
impl Drop for DirFd {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.0);
        }
    }
}
