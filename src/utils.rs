//! Utility functions for template filling and remote path manipulation

/// Fill a template's named `{placeholder}` tokens
///
/// Unknown placeholders are left in place; substitution is plain text
/// replacement, not format parsing.
///
/// # Examples
///
/// ```
/// use tour_dl::utils::fill_template;
///
/// let url = fill_template(
///     "http://new.web-docent.org/modules/media/{path}/log.txt",
///     &[("path", "img/42")],
/// );
/// assert_eq!(url, "http://new.web-docent.org/modules/media/img/42/log.txt");
/// ```
pub fn fill_template(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut filled = template.to_string();
    for (name, value) in substitutions {
        filled = filled.replace(&format!("{{{name}}}"), value);
    }
    filled
}

/// Final path segment of a remote path, with any trailing wildcard stripped
///
/// Archive locations carry a `*` glob component; the local file keeps only
/// the concrete final segment.
#[must_use]
pub fn remote_basename(remote: &str) -> String {
    remote
        .rsplit('/')
        .next()
        .unwrap_or(remote)
        .trim_end_matches('*')
        .to_string()
}

/// File name with a trailing `.gz` suffix removed, if present
#[must_use]
pub fn strip_gz(name: &str) -> &str {
    name.strip_suffix(".gz").unwrap_or(name)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_template_substitutes_every_named_placeholder() {
        let command = fill_template(
            "sshpass -p {password} scp {user}@host:{remote} {local}",
            &[
                ("password", "s3cret"),
                ("user", "exporter"),
                ("remote", "/data/a.gz"),
                ("local", "/tmp/a.gz"),
            ],
        );
        assert_eq!(command, "sshpass -p s3cret scp exporter@host:/data/a.gz /tmp/a.gz");
    }

    #[test]
    fn fill_template_leaves_unknown_placeholders_alone() {
        assert_eq!(fill_template("{a}/{b}", &[("a", "x")]), "x/{b}");
    }

    #[test]
    fn remote_basename_takes_the_final_segment() {
        assert_eq!(remote_basename("/data/cmap/med_arc/123/foo.jpg"), "foo.jpg");
    }

    #[test]
    fn remote_basename_strips_trailing_wildcard() {
        assert_eq!(remote_basename("/modules/media/img/42/scan.tif*"), "scan.tif");
    }

    #[test]
    fn remote_basename_of_bare_name_is_the_name() {
        assert_eq!(remote_basename("foo.gz"), "foo.gz");
    }

    #[test]
    fn strip_gz_only_touches_the_gz_suffix() {
        assert_eq!(strip_gz("photo.jpg.gz"), "photo.jpg");
        assert_eq!(strip_gz("photo.jpg"), "photo.jpg");
        assert_eq!(strip_gz("archive.gzip"), "archive.gzip");
    }
}
