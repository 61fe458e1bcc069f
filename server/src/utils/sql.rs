//! SQL string helpers

/// Escape LIKE metacharacters (%, _, \) so search text matches literally
///
/// Backslash is PostgreSQL's default LIKE escape character, so the escaped
/// pattern needs no ESCAPE clause.
///
/// ```
/// use jobly_server::utils::sql::escape_like_pattern;
///
/// let pattern = format!("%{}%", escape_like_pattern("50%_off"));
/// assert_eq!(pattern, "%50\\%\\_off%");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
