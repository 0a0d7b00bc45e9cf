use dialoguer::{Input, theme::ColorfulTheme};
use std::io::{BufRead, Write};

/// Abstraction over a string input prompt.
///
/// Implementors define how string input is collected from the user,
/// including any styling or interactivity. This trait enables testability
/// by decoupling user input from the logic that consumes it.
pub trait StringPrompter {
    /// Prompt the user for a string input.
    ///
    /// # Parameters
    /// - `prompt`: The message shown to the user.
    /// - `allow_empty`: Whether pressing Enter on an empty line is accepted.
    ///
    /// # Returns
    /// `Ok(String)` with the raw input, or an `Err(String)` describing the failure.
    fn prompt(&mut self, prompt: &str, allow_empty: bool) -> Result<String, String>;
}

/// Abstraction over a boolean (yes/no) confirmation prompt.
///
/// This trait allows interactive confirmation to be injected or mocked,
/// so the configure-and-confirm flow can run without a terminal.
pub trait ConfirmPrompter {
    /// Prompt the user for a yes/no confirmation.
    ///
    /// # Parameters
    /// - `prompt`: The confirmation message.
    /// - `default`: The answer used if the user presses Enter.
    ///
    /// # Returns
    /// `Ok(true)` if confirmed, `Ok(false)` if declined, or `Err(String)` on input failure.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, String>;
}

/// Terminal prompter backed by `dialoguer`, styled with `ColorfulTheme`.
///
/// Text answers are returned exactly as typed so that whitespace tokens such
/// as a single space survive. The confirmation is a typed answer too, read
/// with [`confirmation_answer`]: any answer other than `y`/`Y` declines.
pub struct DialoguerPrompter;

impl StringPrompter for DialoguerPrompter {
    fn prompt(&mut self, prompt: &str, allow_empty: bool) -> Result<String, String> {
        let theme = ColorfulTheme::default();
        let input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(allow_empty);
        match input.interact_text() {
            Ok(v) => Ok(v),
            Err(e) => Err(e.to_string()),
        }
    }
}

impl ConfirmPrompter for DialoguerPrompter {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, String> {
        let theme = ColorfulTheme::default();
        let input = Input::<String>::with_theme(&theme)
            .with_prompt(format!("{} (y/n)", prompt))
            .allow_empty(true);
        match input.interact_text() {
            Ok(v) => Ok(confirmation_answer(&v, default)),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Line-based prompter for non-interactive standard input.
///
/// Used when input is piped rather than typed at a terminal, where the
/// dialoguer prompts cannot read keys. Prompts are written to `writer` and
/// answers are read one line at a time from `reader`. Only the line ending
/// is stripped from each answer.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        LinePrompter { reader, writer }
    }

    fn read_answer(&mut self, prompt: &str) -> Result<String, String> {
        if let Err(e) = write!(self.writer, "{}: ", prompt).and_then(|_| self.writer.flush()) {
            return Err(e.to_string());
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Err(String::from("unexpected end of input")),
            Ok(_) => {
                let answer = line.strip_suffix('\n').unwrap_or(&line);
                let answer = answer.strip_suffix('\r').unwrap_or(answer);
                Ok(answer.to_string())
            }
            Err(e) => Err(e.to_string()),
        }
    }
}

impl<R: BufRead, W: Write> StringPrompter for LinePrompter<R, W> {
    fn prompt(&mut self, prompt: &str, allow_empty: bool) -> Result<String, String> {
        let answer = self.read_answer(prompt)?;
        if !allow_empty && answer.trim().is_empty() {
            return Err(String::from("input must not be empty"));
        }
        Ok(answer)
    }
}

impl<R: BufRead, W: Write> ConfirmPrompter for LinePrompter<R, W> {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, String> {
        let answer = self.read_answer(&format!("{} (y/n)", prompt))?;
        Ok(confirmation_answer(&answer, default))
    }
}

/// Returns `true` only for a `y` or `Y` answer.
///
/// Any other text, including `yes` and the empty string, counts as a
/// refusal.
pub fn is_affirmative(answer: &str) -> bool {
    answer == "y" || answer == "Y"
}

/// Interprets a typed confirmation answer.
///
/// An empty answer takes `default`; otherwise only `y`/`Y` confirms.
pub fn confirmation_answer(answer: &str, default: bool) -> bool {
    if answer.is_empty() {
        return default;
    }
    is_affirmative(answer)
}

/// Ask for the directory to scan. Empty input is not accepted.
pub fn ask_directory<P: StringPrompter>(prompter: &mut P) -> Result<String, String> {
    prompter.prompt("Enter the directory to scan", false)
}

/// Ask for the text to look for in file names.
///
/// Empty input is accepted here and rejected by the caller, so the user
/// sees the same validation message whichever way the token was given.
pub fn ask_find<P: StringPrompter>(prompter: &mut P) -> Result<String, String> {
    prompter.prompt("Enter character(s) to find (e.g. _)", true)
}

/// Ask for the replacement text. Empty input removes the found text.
pub fn ask_replace<P: StringPrompter>(prompter: &mut P) -> Result<String, String> {
    prompter.prompt(
        "Enter replacement character(s) (e.g. a space, empty to remove)",
        true,
    )
}

/// Ask the user to confirm the displayed configuration.
///
/// Defaults to "no", so pressing Enter cancels.
pub fn confirm_proceed<P: ConfirmPrompter>(prompter: &mut P) -> Result<bool, String> {
    prompter.confirm("Proceed?", false)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockStringPrompter {
        pub response: Result<String, String>,
        pub expected_prompt: String,
        pub expected_allow_empty: bool,
    }

    impl StringPrompter for MockStringPrompter {
        fn prompt(&mut self, prompt: &str, allow_empty: bool) -> Result<String, String> {
            assert_eq!(prompt, self.expected_prompt);
            assert_eq!(allow_empty, self.expected_allow_empty);
            self.response.clone()
        }
    }

    struct MockConfirmPrompter {
        pub response: Result<bool, String>,
        pub expected_default: bool,
    }

    impl ConfirmPrompter for MockConfirmPrompter {
        fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, String> {
            assert_eq!(prompt, "Proceed?");
            assert_eq!(default, self.expected_default);
            self.response.clone()
        }
    }

    #[test]
    fn test_ask_directory_requires_input() {
        let mut prompter = MockStringPrompter {
            response: Ok("/tmp/photos".to_string()),
            expected_prompt: "Enter the directory to scan".to_string(),
            expected_allow_empty: false,
        };
        assert_eq!(ask_directory(&mut prompter).unwrap(), "/tmp/photos");
    }

    #[test]
    fn test_ask_find_returns_raw_input() {
        let mut prompter = MockStringPrompter {
            response: Ok("_".to_string()),
            expected_prompt: "Enter character(s) to find (e.g. _)".to_string(),
            expected_allow_empty: true,
        };
        assert_eq!(ask_find(&mut prompter).unwrap(), "_");
    }

    #[test]
    fn test_ask_replace_keeps_whitespace() {
        let mut prompter = MockStringPrompter {
            response: Ok(" ".to_string()),
            expected_prompt: "Enter replacement character(s) (e.g. a space, empty to remove)"
                .to_string(),
            expected_allow_empty: true,
        };
        assert_eq!(ask_replace(&mut prompter).unwrap(), " ");
    }

    #[test]
    fn test_ask_returns_error() {
        let mut prompter = MockStringPrompter {
            response: Err("input failed".to_string()),
            expected_prompt: "Enter the directory to scan".to_string(),
            expected_allow_empty: false,
        };
        assert!(ask_directory(&mut prompter).is_err());
    }

    #[test]
    fn test_confirm_proceed_defaults_to_no() {
        let mut prompter = MockConfirmPrompter {
            response: Ok(false),
            expected_default: false,
        };
        assert_eq!(confirm_proceed(&mut prompter).unwrap(), false);
    }

    #[test]
    fn test_confirm_proceed_true() {
        let mut prompter = MockConfirmPrompter {
            response: Ok(true),
            expected_default: false,
        };
        assert_eq!(confirm_proceed(&mut prompter).unwrap(), true);
    }

    #[test]
    fn test_confirm_proceed_error() {
        let mut prompter = MockConfirmPrompter {
            response: Err("confirm failed".to_string()),
            expected_default: false,
        };
        assert!(confirm_proceed(&mut prompter).is_err());
    }

    #[test]
    fn test_line_prompter_reads_answers_in_order() {
        let input = b"/tmp/dir\n_\n \ny\n";
        let mut out = Vec::new();
        let mut p = LinePrompter::new(&input[..], &mut out);

        assert_eq!(ask_directory(&mut p).unwrap(), "/tmp/dir");
        assert_eq!(ask_find(&mut p).unwrap(), "_");
        assert_eq!(ask_replace(&mut p).unwrap(), " ");
        assert_eq!(confirm_proceed(&mut p).unwrap(), true);

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Enter the directory to scan: "));
        assert!(shown.contains("Proceed? (y/n): "));
    }

    #[test]
    fn test_line_prompter_strips_crlf_only() {
        let input = b" a \r\n";
        let mut p = LinePrompter::new(&input[..], Vec::new());
        assert_eq!(ask_find(&mut p).unwrap(), " a ");
    }

    #[test]
    fn test_line_prompter_confirm_rejects_anything_but_y() {
        for answer in ["n\n", "yes\n", "Y \n", "x\n", "\n"] {
            let mut p = LinePrompter::new(answer.as_bytes(), Vec::new());
            assert_eq!(confirm_proceed(&mut p).unwrap(), false, "answer {:?}", answer);
        }
        let mut p = LinePrompter::new(&b"Y\n"[..], Vec::new());
        assert_eq!(confirm_proceed(&mut p).unwrap(), true);
    }

    #[test]
    fn test_line_prompter_eof_is_error() {
        let mut p = LinePrompter::new(&b""[..], Vec::new());
        assert_eq!(
            ask_find(&mut p).unwrap_err(),
            "unexpected end of input".to_string()
        );
    }

    #[test]
    fn test_line_prompter_rejects_empty_directory() {
        let mut p = LinePrompter::new(&b"\n"[..], Vec::new());
        assert!(ask_directory(&mut p).is_err());
    }

    #[test]
    fn test_confirmation_answer_declines_unknown_input() {
        assert_eq!(confirmation_answer("", false), false);
        assert_eq!(confirmation_answer("", true), true);
        assert_eq!(confirmation_answer("y", false), true);
        assert_eq!(confirmation_answer("Y", false), true);
        assert_eq!(confirmation_answer("q", true), false);
        assert_eq!(confirmation_answer("yes", true), false);
        assert_eq!(confirmation_answer("n", true), false);
    }

    #[test]
    fn test_is_affirmative_only_accepts_y() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative(" y"));
    }
}
