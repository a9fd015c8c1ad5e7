pub mod file_utils;
pub mod misc_utils;
#[cfg(test)]
pub(crate) mod test_utils;
