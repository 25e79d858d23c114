// ABOUTME: User-facing status messages for the Imgur CLI written to stderr
// ABOUTME: Formats errors with SDK help text plus warnings and upload confirmations

use imgur_sdk::ImgurError;
use owo_colors::OwoColorize;

pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Render a failed command: the error chain, then a hint if the SDK has one.
    pub fn render_error(&self, err: &anyhow::Error) -> String {
        let mut rendered = self.label("error:", Level::Error);
        rendered.push(' ');
        rendered.push_str(&format!("{err:#}"));

        if let Some(help) = help_for(err) {
            rendered.push('\n');
            rendered.push_str(&self.label("hint:", Level::Hint));
            rendered.push(' ');
            rendered.push_str(help);
        }
        rendered
    }

    pub fn error(&self, err: &anyhow::Error) {
        eprintln!("{}", self.render_error(err));
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{} {}", self.label("warning:", Level::Warning), message);
    }

    pub fn success(&self, message: &str) {
        eprintln!("{} {}", self.label("success:", Level::Success), message);
    }

    fn label(&self, text: &str, level: Level) -> String {
        if !self.use_color {
            return text.to_string();
        }
        match level {
            Level::Error => text.red().bold().to_string(),
            Level::Warning => text.yellow().bold().to_string(),
            Level::Success => text.green().bold().to_string(),
            Level::Hint => text.blue().bold().to_string(),
        }
    }
}

enum Level {
    Error,
    Warning,
    Success,
    Hint,
}

fn help_for(err: &anyhow::Error) -> Option<&'static str> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ImgurError>())
        .and_then(ImgurError::help_text)
}
