use std::collections::BTreeSet;

/// Order branch names for the target picker: `develop`, then `main` (or
/// `master` when there is no `main`), then everything else sorted.
pub fn prioritize_branches<I, S>(branches: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut rest: BTreeSet<String> = branches.into_iter().map(Into::into).collect();
    let mut ordered = Vec::with_capacity(rest.len());

    if rest.remove("develop") {
        ordered.push("develop".to_string());
    }
    if rest.remove("main") {
        ordered.push("main".to_string());
    } else if rest.remove("master") {
        ordered.push("master".to_string());
    }

    ordered.extend(rest);
    ordered
}
