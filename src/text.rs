//! Validation for user entered text.

use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

/// Trim `text` and check that it is not empty and at most `max_length`
/// user-perceived characters long.
///
/// `field` names the input in error messages, e.g. "Name".
///
/// # Errors
///
/// Returns `empty_error` if the trimmed text is empty, or
/// [Error::TextTooLong] if it is too long.
pub fn validate_text(
    text: &str,
    field: &'static str,
    max_length: usize,
    empty_error: Error,
) -> Result<String, Error> {
    let text = text.trim();

    if text.is_empty() {
        return Err(empty_error);
    }

    if text.graphemes(true).count() > max_length {
        return Err(Error::TextTooLong {
            field,
            max: max_length,
        });
    }

    Ok(text.to_owned())
}

#[cfg(test)]
mod validate_text_tests {
    use crate::{Error, text::validate_text};

    #[test]
    fn trims_whitespace() {
        assert_eq!(
            validate_text("  Rent \n", "Name", 10, Error::EmptyName),
            Ok("Rent".to_owned())
        );
    }

    #[test]
    fn rejects_blank_text() {
        assert_eq!(
            validate_text("\t \r\n", "Name", 10, Error::EmptyName),
            Err(Error::EmptyName)
        );
    }

    #[test]
    fn counts_graphemes_not_bytes() {
        // Each flag is several bytes and two code points.
        let flags = "🇳🇿🇳🇿🇳🇿";

        assert_eq!(
            validate_text(flags, "Name", 3, Error::EmptyName),
            Ok(flags.to_owned())
        );
        assert_eq!(
            validate_text(flags, "Name", 2, Error::EmptyName),
            Err(Error::TextTooLong {
                field: "Name",
                max: 2
            })
        );
    }
}
