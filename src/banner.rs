use console::{measure_text_width, style};

use crate::config::Configuration;

/// Prints a framed, colorized summary of the configuration about to run.
///
/// The box is sized to the widest **visible** line, using
/// [`console::measure_text_width`] so ANSI color codes inside the content do
/// not throw off the padding. Borders are styled separately from the inner
/// text.
///
/// Tokens are shown in single quotes so that whitespace and empty
/// replacements are visible.
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use token_rename::{banner::print_configuration, config::Configuration};
///
/// let config = Configuration::new(PathBuf::from("/tmp/photos"), "_".into(), " ".into());
/// print_configuration(&config);
/// ```
pub fn print_configuration(config: &Configuration) {
    let lines = configuration_lines(config);

    let max_width = lines
        .iter()
        .map(|l| measure_text_width(l))
        .max()
        .unwrap_or(0)
        + 2;

    let border = "═".repeat(max_width);
    let top = style(format!("╔{}╗", border)).blue().bold();
    let bottom = style(format!("╚{}╝", border)).blue().bold();
    let left = style("║ ").blue().bold().to_string();
    let right = style("║").blue().bold().to_string();

    println!();
    println!("{top}");
    for line in lines {
        let visible = measure_text_width(&line);
        let pad = max_width - visible;
        println!("{}{}{}{}", left, line, " ".repeat(pad - 1), right);
    }
    println!("{bottom}");
    println!();
}

/// Builds the banner rows: a title, a blank spacer, then one row per setting.
///
/// Setting values may carry ANSI styling; measure them with
/// `console::measure_text_width` rather than `str::len()`.
fn configuration_lines(config: &Configuration) -> Vec<String> {
    let rows = [
        (
            "Directory:",
            config.target_directory.display().to_string(),
        ),
        ("Find:", format!("'{}'", config.find)),
        ("Replace:", format!("'{}'", config.replace)),
    ];

    let mut lines = vec![String::from("Configuration"), String::new()];
    for (label, value) in rows {
        lines.push(format!(
            "{:<11}{}",
            label,
            style(value).cyan().bold()
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::configuration_lines;
    use crate::config::Configuration;
    use console::strip_ansi_codes;
    use std::path::PathBuf;

    #[test]
    fn lines_show_every_setting_with_quoted_tokens() {
        let config = Configuration::new(PathBuf::from("/data/photos"), "_".into(), " ".into());
        let lines: Vec<String> = configuration_lines(&config)
            .iter()
            .map(|l| strip_ansi_codes(l).to_string())
            .collect();

        assert_eq!(lines[0], "Configuration");
        assert!(lines.iter().any(|l| l == "Directory: /data/photos"));
        assert!(lines.iter().any(|l| l == "Find:      '_'"));
        assert!(lines.iter().any(|l| l == "Replace:   ' '"));
    }

    #[test]
    fn empty_replacement_is_visible() {
        let config = Configuration::new(PathBuf::from("/d"), "-".into(), String::new());
        let s = configuration_lines(&config).join("\n");
        assert!(strip_ansi_codes(&s).contains("Replace:   ''"));
    }
}
