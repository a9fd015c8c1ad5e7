use crate::{
    error::{Error, Result},
    macros::*,
};

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

/// Check whether a path exists.
///
/// # Arguments
///
/// * `path` - The path to be checked.
///
pub(crate) fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}

/// Check whether a path has the `.txt` extension.
fn is_text_file_path(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

/// Read the contents of a `.txt` file into a string.
///
/// # Arguments
///
/// * `path` - The path to the file.
///
pub fn read_text_file(path: &str) -> Result<String> {
    if !is_text_file_path(path) {
        return Err(Error::TextFileExtensionInvalid);
    }

    if !path_exists(path) {
        return Err(Error::PathInvalid);
    }

    let mut file = unwrap_or_return_err!(File::open(path), Error::FileOpen);
    let mut buffer = Vec::new();
    if file.read_to_end(&mut buffer).is_err() {
        return Err(Error::FileRead);
    }

    String::from_utf8(buffer).map_err(|_| Error::DecodeStringInvalid)
}

/// Write a string to a `.txt` file, replacing any existing contents.
///
/// # Arguments
///
/// * `path` - The path to the file.
/// * `text` - The text to be written.
///
pub fn write_text_file(path: &str, text: &str) -> Result<()> {
    if !is_text_file_path(path) {
        return Err(Error::TextFileExtensionInvalid);
    }

    let mut file = unwrap_or_return_err!(File::create(path), Error::FileCreate);

    match file.write_all(text.as_bytes()) {
        Ok(_) => Ok(()),
        Err(_) => Err(Error::FileWrite),
    }
}

#[cfg(test)]
mod tests_file_utils {
    use super::{read_text_file, write_text_file};
    use crate::{error::Error, utilities::test_utils::TestUtils};

    #[test]
    fn test_text_round_trip() {
        let mut tu = TestUtils::new();
        let path = tu.get_out_file("txt", true);

        write_text_file(&path, "¿Dónde está?\nAquí.").expect("failed to write the file");
        assert_eq!(read_text_file(&path), Ok("¿Dónde está?\nAquí.".to_string()));
    }

    #[test]
    fn test_extension_is_enforced() {
        let mut tu = TestUtils::new();

        let path = tu.get_out_file("md", true);
        assert_eq!(
            write_text_file(&path, "text"),
            Err(Error::TextFileExtensionInvalid)
        );
        assert_eq!(read_text_file(&path), Err(Error::TextFileExtensionInvalid));
    }

    #[test]
    fn test_missing_file() {
        let mut tu = TestUtils::new();
        let path = tu.get_out_file("txt", false);

        assert_eq!(read_text_file(&path), Err(Error::PathInvalid));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut tu = TestUtils::new();
        let path = tu.get_out_file("txt", true);

        std::fs::write(&path, [65, 159, 146, 150, 65]).expect("failed to write the file");
        assert_eq!(read_text_file(&path), Err(Error::DecodeStringInvalid));
    }
}
