//! Course module identifiers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of a course module, left-padded with zeros to at least two digits.
///
/// The digits given on the command line are kept, so `5` names `05` and
/// `007` names `007`. A module made only of zeros does not exist.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid module number specified: {input:?}")]
pub struct InvalidModuleId {
    pub input: String,
}

impl ModuleId {
    pub fn new(number: u32) -> Option<Self> {
        (number > 0).then(|| Self(format!("{number:02}")))
    }

    /// Directory name of the module's template under the source root.
    pub fn dir_name(&self) -> &str {
        &self.0
    }
}

impl FromStr for ModuleId {
    type Err = InvalidModuleId;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let is_digits = !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit());
        if !is_digits || trimmed.chars().all(|ch| ch == '0') {
            return Err(InvalidModuleId {
                input: input.to_string(),
            });
        }
        Ok(Self(format!("{trimmed:0>2}")))
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_single_digit_modules() {
        let module: ModuleId = "5".parse().expect("module");
        assert_eq!(module.to_string(), "05");
        assert_eq!(module.dir_name(), "05");
        assert_eq!(ModuleId::new(5), Some(module));
    }

    #[test]
    fn keeps_given_digits() {
        assert_eq!("05".parse::<ModuleId>().expect("module").dir_name(), "05");
        assert_eq!("12".parse::<ModuleId>().expect("module").dir_name(), "12");
        assert_eq!("123".parse::<ModuleId>().expect("module").dir_name(), "123");
        assert_eq!("007".parse::<ModuleId>().expect("module").dir_name(), "007");
    }

    #[test]
    fn accepts_numbers_beyond_u32() {
        let module: ModuleId = "99999999999".parse().expect("module");
        assert_eq!(module.dir_name(), "99999999999");
    }

    #[test]
    fn rejects_zero_empty_and_non_numeric() {
        for input in ["0", "00", "000", "", "  ", "abc", "-1", "+3", "4a"] {
            let err = input.parse::<ModuleId>().expect_err(input);
            assert_eq!(err.input, input);
        }
        assert_eq!(ModuleId::new(0), None);
    }

    #[test]
    fn invalid_message_names_input() {
        let err = "x".parse::<ModuleId>().expect_err("invalid");
        assert_eq!(err.to_string(), "Invalid module number specified: \"x\"");
    }
}
