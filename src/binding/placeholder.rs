/// How a placeholder is spelled in the generated SQL text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?`, as used by JDBC-style and SQLite/MySQL drivers.
    #[default]
    Question,
    /// `$1`, `$2`, ... numbered by physical index, as PostgreSQL expects.
    Numbered,
}

impl PlaceholderStyle {
    /// Writes `count` comma-joined placeholders, the first one at `first_index`.
    pub(crate) fn write_placeholders(self, out: &mut String, first_index: usize, count: usize) {
        for offset in 0..count {
            if offset > 0 {
                out.push(',');
            }
            match self {
                PlaceholderStyle::Question => out.push('?'),
                PlaceholderStyle::Numbered => {
                    out.push('$');
                    out.push_str(&(first_index + offset).to_string());
                }
            }
        }
    }
}
