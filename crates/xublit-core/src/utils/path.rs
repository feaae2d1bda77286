use std::path::{Component, Path, PathBuf};

/// Join `segment` onto `base` lexically.
///
/// Unlike [`Path::join`], an absolute `segment` is appended rather than
/// replacing `base`, `.` components are dropped and `..` pops the previous
/// normal component. The filesystem is never consulted, so glob patterns
/// such as `xublit-*` pass through untouched.
pub fn join<B: AsRef<Path>, S: AsRef<Path>>(base: B, segment: S) -> PathBuf {
    join_all(base, [segment])
}

/// Join several segments onto `base`, see [`join`].
pub fn join_all<B, I, S>(base: B, segments: I) -> PathBuf
where
    B: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let mut out = PathBuf::new();
    push_components(&mut out, base.as_ref(), true);
    for segment in segments {
        push_components(&mut out, segment.as_ref(), false);
    }
    if out.as_os_str().is_empty() {
        out.push(Component::CurDir.as_os_str());
    }
    out
}

fn push_components(out: &mut PathBuf, path: &Path, keep_root: bool) {
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                if keep_root {
                    out.push(component.as_os_str());
                }
            }
            Component::CurDir => {}
            Component::ParentDir => {
                // Only a normal component can be cancelled out; `/..` stays `/`.
                match out.components().next_back() {
                    Some(Component::Normal(_)) => {
                        out.pop();
                    }
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                    _ => out.push(Component::ParentDir.as_os_str()),
                }
            }
            Component::Normal(name) => out.push(name),
        }
    }
}
