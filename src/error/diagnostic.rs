use crate::error::Error;

/// Renders `error` as a three-line caret diagnostic.
///
/// The first line is `"<Kind> at line <N>: <message>"`, followed by the
/// offending source line and a `^` under the reported column. Tabs before the
/// column are kept so the caret lines up in a terminal. When the line does not
/// exist in `source` (e.g. an error at the end of an empty input) only the
/// heading is produced.
///
/// # Parameters
/// - `error`: The error to render.
/// - `source`: The text the error was produced from.
///
/// # Returns
/// The rendered diagnostic, without a trailing newline.
///
/// # Example
/// ```
/// use foolang::{error::diagnostic::render, evaluate};
///
/// let source = "a = 1;\nb = a + c;";
/// let error = evaluate(source).unwrap_err();
///
/// assert_eq!(render(&error, source),
///            "Lookup error at line 2: Undefined name: c\nb = a + c;\n        ^");
/// ```
#[must_use]
pub fn render(error: &Error, source: &str) -> String {
    let position = error.position();
    let mut rendered = format!("{} at line {}: {error}", error.kind(), position.line);

    let Some(text) = position.line
                             .checked_sub(1)
                             .and_then(|index| source.lines().nth(index))
    else {
        return rendered;
    };

    let padding: String = text.chars()
                              .take(position.column.saturating_sub(1))
                              .map(|c| if c == '\t' { '\t' } else { ' ' })
                              .collect();

    rendered.push('\n');
    rendered.push_str(text);
    rendered.push('\n');
    rendered.push_str(&padding);
    rendered.push('^');
    rendered
}
