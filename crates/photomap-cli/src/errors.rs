use console::style;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for an input path that does not exist
pub fn input_not_found(path: &str) -> CliError {
    CliError::new("Input path not found")
        .with_context(format!("The specified photo or directory does not exist.\n\nPath: {}", path))
        .with_suggestion("Check the path and try again")
        .with_suggestion("Use an absolute path or a path relative to the current directory")
        .with_help("Run: photomap map --help")
}

/// Create error for inputs that contain no supported photos
pub fn no_photos_found(recursive: bool) -> CliError {
    let error = CliError::new("No photos found")
        .with_context(
            "None of the given paths contain supported photos.\n\nSupported: jpg, jpeg, png, tif, tiff, webp, heic, heif",
        );

    let error = if recursive {
        error
    } else {
        error.with_suggestion("Scan subdirectories too: --recursive")
    };

    error
        .with_suggestion("Point at files with one of the supported extensions")
        .with_help("Run: photomap map --help")
}

/// Create error for an output file that cannot be written
pub fn output_not_writable(path: &str, reason: &str) -> CliError {
    CliError::new("Cannot write output file")
        .with_context(format!("Path: {}\n\nError: {}", path, reason))
        .with_suggestion("Check that the parent directory exists")
        .with_suggestion("Or choose another location: --output <PATH>")
        .with_help("Run: photomap map --help")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check the TOML file passed with --config for syntax errors")
        .with_suggestion("Or check PHOTOMAP_* environment variables")
        .with_help("Run: photomap config")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    // Errors already built for presentation pass through unchanged
    let error = match error.downcast::<CliError>() {
        Ok(cli_error) => return cli_error,
        Err(error) => error,
    };

    let message = format!("{:#}", error);

    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.to_lowercase().contains("permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
            .with_suggestion("Or run with appropriate privileges")
    } else {
        CliError::new(message)
    }
}
