// hcs-logs - Prompt description
//
// A `Prompt` says what to show and what to accept. Matching is pure so the
// scanner only has to deal with terminal IO.

use super::ValidationError;

/// Custom acceptance check, consulted only for free-text prompts.
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError>>;

/// One selectable answer. Options are kept in declaration order; that order
/// decides which option wins when two share a first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOption {
    pub value: String,
    pub label: String,
}

impl PromptOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A single question for the operator.
#[derive(Default)]
pub struct Prompt {
    pub(super) placeholder: String,
    pub(super) default: Option<String>,
    pub(super) options: Vec<PromptOption>,
    pub(super) min_length: usize,
    pub(super) password: bool,
    pub(super) validator: Option<Validator>,
}

impl Prompt {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..Default::default()
        }
    }

    /// Value returned on empty input. An empty default means "no default".
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.default = (!value.is_empty()).then_some(value);
        self
    }

    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(PromptOption::new(value, label));
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Mask the displayed default. Typed input is read and checked as usual.
    pub fn password(mut self) -> Self {
        self.password = true;
        self
    }

    pub fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> Result<(), ValidationError> + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn default_answer(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Decide whether a non-empty answer is acceptable, returning the value
    /// the prompt yields for it.
    pub fn accept(&self, answer: &str) -> Result<String, ValidationError> {
        if !self.options.is_empty() {
            return self
                .match_option(answer)
                .map(|opt| opt.value.clone())
                .ok_or_else(|| ValidationError::new("input value un-acceptable"));
        }

        if answer.chars().count() < self.min_length {
            return Err(ValidationError::new(format!(
                "input length should be at least {}",
                self.min_length
            )));
        }

        if let Some(validator) = &self.validator {
            validator(answer)?;
        }

        Ok(answer.to_string())
    }

    /// Exact value first, then first character, then 1-based index. Each pass
    /// walks the options in declaration order.
    fn match_option(&self, answer: &str) -> Option<&PromptOption> {
        if let Some(opt) = self.options.iter().find(|o| o.value == answer) {
            return Some(opt);
        }

        let mut chars = answer.chars();
        if let (Some(first), None) = (chars.next(), chars.next()) {
            if let Some(opt) = self
                .options
                .iter()
                .find(|o| o.value.chars().next() == Some(first))
            {
                return Some(opt);
            }
        }

        answer
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=self.options.len()).contains(n))
            .map(|n| &self.options[n - 1])
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_prompt() -> Prompt {
        Prompt::new("Select auth method:")
            .default_value("basic")
            .option("basic", "basic authenticate")
            .option("token", "token authenticate")
    }

    #[test]
    fn test_option_matches_value_first_char_and_index() {
        let prompt = auth_prompt();
        assert_eq!(prompt.accept("token").unwrap(), "token");
        assert_eq!(prompt.accept("b").unwrap(), "basic");
        assert_eq!(prompt.accept("2").unwrap(), "token");
        assert_eq!(prompt.accept("1").unwrap(), "basic");
    }

    #[test]
    fn test_option_rejects_unknown_and_out_of_range() {
        let prompt = auth_prompt();
        assert!(prompt.accept("x").is_err());
        assert!(prompt.accept("0").is_err(), "Indices are 1-based");
        assert!(prompt.accept("3").is_err());
        assert!(prompt.accept("bas").is_err(), "Prefixes longer than one char do not match");
    }

    #[test]
    fn test_first_char_tie_goes_to_earlier_option() {
        let prompt = Prompt::new("Pick:")
            .option("delete", "delete exists configure")
            .option("default", "default/global config");
        assert_eq!(prompt.accept("d").unwrap(), "delete");

        let reversed = Prompt::new("Pick:")
            .option("default", "default/global config")
            .option("delete", "delete exists configure");
        assert_eq!(reversed.accept("d").unwrap(), "default");
    }

    #[test]
    fn test_exact_value_beats_first_char() {
        let prompt = Prompt::new("Pick:").option("token", "").option("t", "");
        assert_eq!(prompt.accept("t").unwrap(), "t");
    }

    #[test]
    fn test_exact_value_beats_index() {
        let prompt = Prompt::new("Pick:").option("alpha", "").option("1", "");
        assert_eq!(prompt.accept("1").unwrap(), "1");
    }

    #[test]
    fn test_min_length_enforced_without_options() {
        let prompt = Prompt::new("Input your username :").min_length(3);
        assert!(prompt.accept("ab").is_err());
        assert_eq!(prompt.accept("abc").unwrap(), "abc");
    }

    #[test]
    fn test_validator_runs_after_min_length() {
        let prompt = Prompt::new("Token:")
            .min_length(2)
            .validator(|s| {
                if s.len() == 4 {
                    Ok(())
                } else {
                    Err(ValidationError::new("must be 4 chars"))
                }
            });
        assert_eq!(prompt.accept("a").unwrap_err().0, "input length should be at least 2");
        assert_eq!(prompt.accept("abc").unwrap_err().0, "must be 4 chars");
        assert_eq!(prompt.accept("abcd").unwrap(), "abcd");
    }

    #[test]
    fn test_validator_ignored_when_options_present() {
        let prompt = Prompt::new("Pick:")
            .option("s3", "AWS S3")
            .validator(|_| Err(ValidationError::new("never")));
        assert_eq!(prompt.accept("s3").unwrap(), "s3");
    }

    #[test]
    fn test_empty_default_means_no_default() {
        assert_eq!(Prompt::new("x").default_value("").default_answer(), None);
        assert_eq!(Prompt::new("x").default_value("y").default_answer(), Some("y"));
    }
}
